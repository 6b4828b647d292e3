use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters that may not appear in a stored media filename
    /// Anything outside ASCII letters, digits, underscore, dot and hyphen
    /// - Kept: "bottle_1.jpg", "IMG-2024.png"
    /// - Dropped: "/", "\\", "?", "%", "é", spaces
    pub static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.\-]").unwrap();

    /// Runs of whitespace, collapsed to a single underscore in filenames
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// True when a form value carries something other than whitespace
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}
