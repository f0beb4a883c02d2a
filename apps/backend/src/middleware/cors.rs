use actix_cors::Cors;
use actix_web::http::header;

const LOCAL_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Build the CORS layer from the configured origins.
///
/// Entries that are empty, `"null"` or lack an http(s) scheme are ignored;
/// when nothing valid remains only the local dev origins are allowed.
pub fn cors_middleware(configured: &[String]) -> Cors {
    let mut origins: Vec<&str> = configured
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .collect();

    if origins.is_empty() {
        origins.extend(LOCAL_ORIGINS);
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::IF_NONE_MATCH,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
            header::ETAG,
        ])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
