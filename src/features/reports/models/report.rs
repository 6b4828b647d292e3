use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// Report lifecycle status, stored as its display text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(rename_all = "PascalCase")]
pub enum ReportStatus {
    Pending,
    Completed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database model for report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: i64,
    pub user_id: Option<String>,
    pub waste_type: String,
    pub latitude: String,
    pub longitude: String,
    pub before_image: Option<String>,
    pub after_image: Option<String>,
    pub status: ReportStatus,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn is_completed(&self) -> bool {
        self.status == ReportStatus::Completed
    }
}

/// Data for creating a new report
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub user_id: Option<String>,
    pub waste_type: String,
    pub latitude: String,
    pub longitude: String,
    pub before_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_matches_stored_text() {
        assert_eq!(ReportStatus::Pending.to_string(), "Pending");
        assert_eq!(ReportStatus::Completed.to_string(), "Completed");
    }

    #[test]
    fn test_status_serializes_as_text() {
        let json = serde_json::to_string(&ReportStatus::Completed).unwrap();
        assert_eq!(json, "\"Completed\"");
    }
}
