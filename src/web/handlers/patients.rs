use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use serde_json::json;
use tracing::info;

use super::PageResult;
use crate::models::PatientForm;
use crate::web::error::WebError;
use crate::web::state::AppState;

/// All patients
pub async fn list(State(state): State<AppState>) -> PageResult {
    let patients = state.db.list_patients()?;
    Ok(state.views.render("patients/list", &json!({ "patients": patients }))?)
}

/// One patient with their visit history
pub async fn detail(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    let (patient, visits) = match state.db.get_patient_with_visits(id)? {
        Some(found) => (Some(found.patient), found.visits),
        None => (None, Vec::new()),
    };
    Ok(state
        .views
        .render("patients/detail", &json!({ "patient": patient, "visits": visits }))?)
}

/// Edit form pre-filled from the stored patient
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    let patient = state.db.get_patient(id)?;
    Ok(state.views.render("patients/edit", &json!({ "patient": patient }))?)
}

/// Overwrite the patient and show it
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: Result<Form<PatientForm>, FormRejection>,
) -> Result<Redirect, WebError> {
    let Form(form) = form?;
    state.db.update_patient(id, &form)?;
    info!(patient_id = id, "Patient updated");
    Ok(Redirect::to(&format!("/patients/{id}")))
}

/// Empty patient form
pub async fn add_form(State(state): State<AppState>) -> PageResult {
    Ok(state.views.render("patients/add", &json!({}))?)
}

/// Insert a patient and return to the list
pub async fn create(
    State(state): State<AppState>,
    form: Result<Form<PatientForm>, FormRejection>,
) -> Result<Redirect, WebError> {
    let Form(form) = form?;
    let id = state.db.add_patient(&form)?;
    info!(patient_id = id, "Patient added");
    Ok(Redirect::to("/patients"))
}
