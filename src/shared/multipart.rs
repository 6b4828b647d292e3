//! Helpers for reading browser form posts encoded as multipart/form-data.

use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use tracing::debug;

use crate::core::error::{AppError, Result};

/// A file part read from a multipart form
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Filename as sent by the browser; empty when the file input was left blank
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Next field of the form, or `None` once the body is exhausted
pub async fn next_field(multipart: &mut Multipart) -> Result<Option<Field<'_>>> {
    multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        multipart_error("Failed to read multipart data", e)
    })
}

/// Keep the body-limit rejection distinguishable from malformed input
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    let message = format!("{}: {}", context, err);
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::BadRequest(message)
    }
}

/// Read a text field
pub async fn read_text(field: Field<'_>) -> Result<String> {
    let name = field.name().unwrap_or("").to_string();
    field
        .text()
        .await
        .map_err(|e| multipart_error(&format!("Failed to read {} field", name), e))
}

/// Read a file field
pub async fn read_file(field: Field<'_>) -> Result<UploadedImage> {
    let file_name = field.file_name().unwrap_or("").to_string();
    let data = field.bytes().await.map_err(|e| {
        debug!("Failed to read file bytes: {}", e);
        multipart_error("Failed to read file data", e)
    })?;

    Ok(UploadedImage {
        file_name,
        data: data.to_vec(),
    })
}
