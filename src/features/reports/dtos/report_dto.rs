use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::reports::models::{Report, ReportStatus};
use crate::modules::storage::MediaStorage;
pub use crate::shared::multipart::UploadedImage;
use crate::shared::validation::is_present;

/// Multipart field names of the submission form
pub const FIELD_WASTE_TYPE: &str = "waste_type";
pub const FIELD_LATITUDE: &str = "latitude";
pub const FIELD_LONGITUDE: &str = "longitude";
pub const FIELD_USER_ID: &str = "user_id";
pub const FIELD_CAPTURED_IMAGE: &str = "captured_image";
pub const FIELD_BEFORE_IMAGE: &str = "before_image";
pub const FIELD_AFTER_IMAGE: &str = "after_image";

/// Where the photo of a new report comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// `data:image/...;base64,...` URL produced by the in-page camera
    Captured(String),
    /// File chosen in the form's file input
    Uploaded(UploadedImage),
}

/// Submission form for `POST /submit`, read from either a multipart or an
/// url-encoded body. Missing text fields default to empty and fail validation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SubmitReportForm {
    #[validate(length(min = 1, message = "waste_type is required"))]
    pub waste_type: String,

    #[validate(length(min = 1, message = "latitude is required"))]
    pub latitude: String,

    #[validate(length(min = 1, message = "longitude is required"))]
    pub longitude: String,

    pub user_id: Option<String>,

    pub captured_image: Option<String>,

    /// Only multipart bodies can carry a file
    #[serde(skip)]
    pub before_image: Option<UploadedImage>,
}

impl SubmitReportForm {
    /// Pick the photo to store: a captured image wins over an uploaded file
    pub fn image_source(&self) -> Option<ImageSource> {
        if let Some(data_url) = self.captured_image.as_ref().filter(|s| is_present(s)) {
            return Some(ImageSource::Captured(data_url.clone()));
        }

        self.before_image
            .as_ref()
            .filter(|f| !f.file_name.is_empty())
            .cloned()
            .map(ImageSource::Uploaded)
    }
}

/// Feedback form for `POST /feedback/{report_id}`
#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    pub feedback: String,
}

/// Query parameters for the per-user status views
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StatusQuery {
    /// Client-chosen user identifier; without it no reports are listed
    pub user: Option<String>,
}

impl StatusQuery {
    pub fn user_id(&self) -> Option<&str> {
        self.user
            .as_deref()
            .filter(|u| is_present(u))
            .map(str::trim)
    }
}

/// Response DTO for report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: i64,
    pub user_id: Option<String>,
    pub waste_type: String,
    pub latitude: String,
    pub longitude: String,
    /// Stored filename of the photo taken at submission
    pub before_image: Option<String>,
    pub before_image_url: Option<String>,
    /// Stored filename of the photo taken at completion
    pub after_image: Option<String>,
    pub after_image_url: Option<String>,
    pub status: ReportStatus,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ReportResponseDto {
    pub fn from_report(r: Report, storage: &dyn MediaStorage) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            before_image_url: r.before_image.as_deref().map(|n| storage.url_for(n)),
            before_image: r.before_image,
            after_image_url: r.after_image.as_deref().map(|n| storage.url_for(n)),
            after_image: r.after_image,
            waste_type: r.waste_type,
            latitude: r.latitude,
            longitude: r.longitude,
            status: r.status,
            feedback: r.feedback,
            created_at: r.created_at,
        }
    }

    pub fn from_reports(reports: Vec<Report>, storage: &dyn MediaStorage) -> Vec<Self> {
        reports
            .into_iter()
            .map(|r| Self::from_report(r, storage))
            .collect()
    }
}
