use axum::{
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    response::{Html, Redirect},
};
use minijinja::context;
use std::sync::Arc;
use tracing::debug;

use crate::core::error::Result;
use crate::core::extractor::{is_urlencoded_form, AppForm, AppMultipart};
use crate::features::reports::dtos::{
    FeedbackForm, ReportResponseDto, StatusQuery, SubmitReportForm, FIELD_BEFORE_IMAGE,
    FIELD_CAPTURED_IMAGE, FIELD_LATITUDE, FIELD_LONGITUDE, FIELD_USER_ID, FIELD_WASTE_TYPE,
};
use crate::features::reports::services::{FeedbackOutcome, ReportService};
use crate::shared::multipart::{next_field, read_file, read_text};
use crate::shared::views::render_view;

/// Location of the status page, filtered to `user_id` when one is known
pub fn status_location(user_id: Option<&str>) -> String {
    match user_id {
        Some(user) => format!("/status?user={}", urlencoding::encode(user)),
        None => "/status".to_string(),
    }
}

/// Citizen submission page
pub async fn index() -> Result<Html<String>> {
    Ok(Html(render_view("index.html.jinja", context! {})?))
}

/// Create a report from the submission form
///
/// Accepts multipart/form-data or application/x-www-form-urlencoded with:
/// - `waste_type`, `latitude`, `longitude`: required
/// - `user_id`: optional client identifier
/// - `captured_image`: optional camera snapshot as a base64 data URL
/// - `before_image`: optional photo file (multipart only), used when no snapshot was taken
pub async fn submit_report(
    State(service): State<Arc<ReportService>>,
    request: Request,
) -> Result<Redirect> {
    let form = if is_urlencoded_form(request.headers()) {
        let AppForm(form) = AppForm::<SubmitReportForm>::from_request(request, &()).await?;
        form
    } else {
        let AppMultipart(multipart) = AppMultipart::from_request(request, &()).await?;
        read_submit_form(multipart).await?
    };

    let report = service.submit(form).await?;

    Ok(Redirect::to(&status_location(report.user_id.as_deref())))
}

async fn read_submit_form(mut multipart: Multipart) -> Result<SubmitReportForm> {
    let mut form = SubmitReportForm::default();

    while let Some(field) = next_field(&mut multipart).await? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            FIELD_WASTE_TYPE => form.waste_type = read_text(field).await?,
            FIELD_LATITUDE => form.latitude = read_text(field).await?,
            FIELD_LONGITUDE => form.longitude = read_text(field).await?,
            FIELD_USER_ID => form.user_id = Some(read_text(field).await?),
            FIELD_CAPTURED_IMAGE => form.captured_image = Some(read_text(field).await?),
            FIELD_BEFORE_IMAGE => form.before_image = Some(read_file(field).await?),
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    Ok(form)
}

/// Reports submitted by one user, newest first
pub async fn status_page(
    State(service): State<Arc<ReportService>>,
    Query(query): Query<StatusQuery>,
) -> Result<Html<String>> {
    let reports = match query.user_id() {
        Some(user) => service.list_by_user(user).await?,
        None => Vec::new(),
    };
    let reports = ReportResponseDto::from_reports(reports, service.storage());

    let html = render_view(
        "status.html.jinja",
        context! {
            user => query.user_id(),
            reports => reports,
        },
    )?;

    Ok(Html(html))
}

/// Attach citizen feedback to a completed report
pub async fn submit_feedback(
    State(service): State<Arc<ReportService>>,
    Path(report_id): Path<i64>,
    AppForm(form): AppForm<FeedbackForm>,
) -> Result<Redirect> {
    let location = match service.add_feedback(report_id, &form.feedback).await? {
        FeedbackOutcome::Saved(report) | FeedbackOutcome::NotCompleted(report) => {
            status_location(report.user_id.as_deref())
        }
        FeedbackOutcome::NotFound => status_location(None),
    };

    Ok(Redirect::to(&location))
}
