use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use minijinja::context;
use std::sync::Arc;
use tracing::debug;

use crate::core::error::Result;
use crate::core::extractor::AppMultipart;
use crate::features::reports::dtos::{ReportResponseDto, FIELD_AFTER_IMAGE};
use crate::features::worker::services::{CompletionOutcome, WorkerService};
use crate::shared::multipart::{next_field, read_file};
use crate::shared::views::render_view;

const WORKER_PANEL: &str = "/worker";

/// Worker triage page listing every report
pub async fn worker_panel(State(service): State<Arc<WorkerService>>) -> Result<Html<String>> {
    let reports = service.list_reports().await?;
    let reports = ReportResponseDto::from_reports(reports, service.storage());

    let html = render_view("worker.html.jinja", context! { reports => reports })?;
    Ok(Html(html))
}

/// Mark a report completed with an after-image
///
/// Missing files and unknown reports leave the store untouched; the worker is
/// sent back to the panel either way.
pub async fn complete_report(
    State(service): State<Arc<WorkerService>>,
    Path(report_id): Path<i64>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<Redirect> {
    let mut after_image = None;

    while let Some(field) = next_field(&mut multipart).await? {
        if field.name() == Some(FIELD_AFTER_IMAGE) {
            after_image = Some(read_file(field).await?);
        } else {
            debug!("Ignoring unknown field: {:?}", field.name());
        }
    }

    match service.complete(report_id, after_image).await? {
        CompletionOutcome::Completed(report) => {
            debug!("Report {} is now {}", report.id, report.status)
        }
        CompletionOutcome::MissingImage | CompletionOutcome::NotFound => {}
    }

    Ok(Redirect::to(WORKER_PANEL))
}
