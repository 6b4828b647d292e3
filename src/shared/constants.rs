/// Request body ceiling covering multipart photo uploads (32 MiB)
pub const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 32 * 1024 * 1024;

/// URL path the media directory is served under
pub const DEFAULT_MEDIA_URL_PREFIX: &str = "/static/uploads";

/// Extension used for camera-captured images
pub const CAPTURED_IMAGE_EXTENSION: &str = "jpg";

// =============================================================================
// MEDIA NAME PREFIXES
// =============================================================================

/// Prefix for images attached at submission time
pub const BEFORE_IMAGE_PREFIX: &str = "before";

/// Prefix for images attached by a worker at completion time
pub const AFTER_IMAGE_PREFIX: &str = "after";
