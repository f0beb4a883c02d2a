//! Session codes: 6 characters of Crockford's Base32.
//!
//! Codes are what players type to join, so parsing is forgiving about case
//! and the usual look-alike letters.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

pub const SESSION_CODE_LEN: usize = 6;

/// Fresh random session code from the thread-local CSPRNG.
pub fn generate_session_code() -> String {
    let mut rng = rand::rng();
    (0..SESSION_CODE_LEN)
        .map(|_| CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char)
        .collect()
}

/// Canonical form of a user-typed code, or `None` if it cannot be one.
///
/// Lowercase is accepted, `I`/`L` read as `1` and `O` as `0`.
pub fn parse_session_code(raw: &str) -> Option<String> {
    let code: String = raw
        .trim()
        .chars()
        .map(|c| match c.to_ascii_uppercase() {
            'I' | 'L' => '1',
            'O' => '0',
            other => other,
        })
        .collect();

    let valid = code.len() == SESSION_CODE_LEN
        && code.bytes().all(|b| CROCKFORD.contains(&b));
    valid.then_some(code)
}
