//! Naming rules for stored media
//!
//! Every stored name carries a fresh UUID, so two uploads never share a file
//! even when they arrive in the same instant with the same client filename.

use base64::prelude::*;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::modules::storage::StorageError;
use crate::shared::constants::{
    AFTER_IMAGE_PREFIX, BEFORE_IMAGE_PREFIX, CAPTURED_IMAGE_EXTENSION,
};
use crate::shared::validation::{UNSAFE_FILENAME_CHARS, WHITESPACE_RUN};

/// Reduce a client-supplied filename to a safe basename.
///
/// Accented letters are folded to ASCII (`café` becomes `cafe`), path
/// separators become word breaks, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9_.-]` is dropped and leading/trailing `.`/`_` are
/// trimmed. The result may be empty.
pub fn secure_filename(filename: &str) -> String {
    let folded: String = filename.nfkd().filter(char::is_ascii).collect();
    let spaced = folded.replace(['/', '\\'], " ");
    let joined = WHITESPACE_RUN.replace_all(spaced.trim(), "_");
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");

    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Decode the payload of a `data:<mime>;base64,<payload>` URL
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, StorageError> {
    let (_, payload) = data_url.split_once(',').ok_or_else(|| {
        StorageError::InvalidDataUrl("Captured image is not a data URL".to_string())
    })?;

    BASE64_STANDARD
        .decode(payload.trim())
        .map_err(|e| StorageError::InvalidDataUrl(format!("Captured image is not valid base64: {}", e)))
}

/// Name for a camera-captured image
pub fn captured_image_name() -> String {
    format!(
        "{}_{}.{}",
        BEFORE_IMAGE_PREFIX,
        Uuid::new_v4().simple(),
        CAPTURED_IMAGE_EXTENSION
    )
}

/// Name for a file uploaded with a new report
pub fn before_image_name(original_filename: &str) -> String {
    unique_name(BEFORE_IMAGE_PREFIX, original_filename)
}

/// Name for a file uploaded when a worker completes a report
pub fn after_image_name(report_id: i64, original_filename: &str) -> String {
    unique_name(
        &format!("{}_{}", AFTER_IMAGE_PREFIX, report_id),
        original_filename,
    )
}

fn unique_name(prefix: &str, original_filename: &str) -> String {
    let token = Uuid::new_v4().simple();
    let safe = secure_filename(original_filename);

    if safe.is_empty() {
        format!("{}_{}", prefix, token)
    } else {
        format!("{}_{}_{}", prefix, token, safe)
    }
}
