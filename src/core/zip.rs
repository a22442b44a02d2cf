//! ZIP code syntax.
//!
//! A well-formed ZIP is exactly five ASCII digits once surrounding
//! whitespace is trimmed. Whether it exists is a separate, remote question
//! (see `api::zip_lookup`).

/// Number of digits in a U.S. ZIP code.
pub const ZIP_LEN: usize = 5;

pub const INVALID_ZIP_MESSAGE: &str = "Please enter a valid 5-digit U.S. ZIP code.";
pub const UNKNOWN_ZIP_MESSAGE: &str = "That ZIP code does not exist. Please try another.";

pub fn is_well_formed(input: &str) -> bool {
    let zip = input.trim();
    zip.len() == ZIP_LEN && zip.bytes().all(|b| b.is_ascii_digit())
}

/// Returns the trimmed ZIP if it is well-formed.
pub fn normalize(input: &str) -> Option<&str> {
    is_well_formed(input).then(|| input.trim())
}
