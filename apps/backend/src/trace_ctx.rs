//! Task-local trace id for the request being served.
//!
//! The request trace middleware opens the scope; error responses and store
//! logs read it. Outside a request every lookup yields `"unknown"`.

use std::future::Future;

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

const UNKNOWN: &str = "unknown";

/// Trace id of the current task, or `"unknown"` outside a request.
pub fn trace_id() -> String {
    current().unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn current() -> Option<String> {
    TRACE_ID.try_with(Clone::clone).ok()
}

/// Run `future` with `trace_id` visible to everything it awaits.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
