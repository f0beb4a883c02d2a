//! Player name normalization.
//!
//! Names are the only identity a player has, so every comparison and every
//! stored copy goes through [`normalize_name`].

use unicode_normalization::UnicodeNormalization;

use crate::errors::domain::{DomainError, ValidationKind};

pub const MAX_NAME_CHARS: usize = 32;

/// Trim and NFC-normalize a client-supplied name.
pub fn normalize_name(raw: &str) -> Result<String, DomainError> {
    let name: String = raw.trim().nfc().collect();

    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerName,
            "player name must not be empty",
        ));
    }
    let chars = name.chars().count();
    if chars > MAX_NAME_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerName,
            format!("player name is {chars} characters; at most {MAX_NAME_CHARS} allowed"),
        ));
    }
    Ok(name)
}
