//! Receipt and workload report downloads.

use std::path::PathBuf;

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde_json::json;
use tracing::{error, info};

use super::{PageResult, ResponseResult};
use crate::documents::receipt::receipt_file_name;
use crate::documents::{generate_receipt, generate_workload_report};
use crate::error::{ClinicError, Result};
use crate::metrics::record_report_failure;
use crate::models::{WorkloadForm, WorkloadQuery};
use crate::validation::InputValidator;
use crate::web::state::AppState;

/// Message shown for any failure while building a workload report
pub const REPORT_FAILED_MESSAGE: &str = "Failed to generate the report";

/// Download name of every workload report
pub const REPORT_DOWNLOAD_NAME: &str = "workload_report.csv";

fn attachment(content_type: &str, file_name: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{file_name}\"")),
        ],
        body,
    )
        .into_response()
}

/// Generate the receipt for a payment and send it as a download.
///
/// Unknown payments get the 404 page; nothing is written in that case.
pub async fn payment_check(State(state): State<AppState>, Path(payment_id): Path<i64>) -> ResponseResult {
    let Some(payment) = state.db.get_payment(payment_id)? else {
        info!(payment_id, "Receipt requested for unknown payment");
        return Err(ClinicError::NotFound { entity: "payment", id: payment_id }.into());
    };
    let clinic = state.db.get_clinic_info()?;

    let path = generate_receipt(
        &state.config.receipt_template(),
        &state.config.output_directory(),
        Some(&payment),
        clinic.as_ref(),
    )?;
    let body = tokio::fs::read(&path).await.map_err(ClinicError::from)?;
    info!(payment_id, path = %path.display(), "Receipt generated");

    Ok(attachment(
        "text/plain; charset=utf-8",
        &receipt_file_name(Some(payment_id)),
        body,
    ))
}

/// Report form listing the employees to filter by
pub async fn workload_form(State(state): State<AppState>) -> PageResult {
    let employees = state.db.list_employees()?;
    Ok(state
        .views
        .render("reports/workload_form", &json!({ "employees": employees }))?)
}

fn report_error(state: &AppState, message: &str) -> PageResult {
    Ok(state.views.render("error_report", &json!({ "error": message }))?)
}

async fn build_report(state: &AppState, form: &WorkloadForm, start_date: String, end_date: String) -> Result<(PathBuf, Vec<u8>)> {
    let query = WorkloadQuery {
        start_date,
        end_date,
        employee_id: InputValidator::parse_employee_filter(form.employee_id.as_deref())?,
    };
    let path = generate_workload_report(&state.db, &query, &state.config.output_directory())?;
    let body = tokio::fs::read(&path).await?;
    Ok((path, body))
}

/// Build a workload report from the submitted form and send it as a download.
///
/// Missing dates and generation failures render the report error page; the
/// failure detail only goes to the log.
pub async fn workload_report(
    State(state): State<AppState>,
    form: std::result::Result<Form<WorkloadForm>, FormRejection>,
) -> ResponseResult {
    let Form(form) = form?;
    let (start_date, end_date) =
        match InputValidator::validate_report_dates(form.start_date.as_deref(), form.end_date.as_deref()) {
            Ok(dates) => dates,
            Err(ClinicError::InvalidInput(message)) => return Ok(report_error(&state, &message)?.into_response()),
            Err(err) => return Err(err.into()),
        };

    match build_report(&state, &form, start_date, end_date).await {
        Ok((path, body)) => {
            info!(path = %path.display(), "Workload report sent");
            Ok(attachment("text/csv; charset=utf-8", REPORT_DOWNLOAD_NAME, body))
        }
        Err(err) => {
            error!(error = %err, "Workload report generation failed");
            record_report_failure();
            Ok(report_error(&state, REPORT_FAILED_MESSAGE)?.into_response())
        }
    }
}
