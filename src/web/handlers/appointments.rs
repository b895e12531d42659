use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use serde_json::json;
use tracing::info;

use super::PageResult;
use crate::models::AppointmentForm;
use crate::web::error::WebError;
use crate::web::state::AppState;

/// All appointments in date order
pub async fn list(State(state): State<AppState>) -> PageResult {
    let appointments = state.db.list_appointments()?;
    Ok(state
        .views
        .render("appointments/list", &json!({ "appointments": appointments }))?)
}

/// One appointment with doctor and patient names
pub async fn detail(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    let appointment = state.db.get_appointment(id)?;
    Ok(state
        .views
        .render("appointments/detail", &json!({ "appointment": appointment }))?)
}

/// Edit form with doctor and patient choices
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    let appointment = state.db.get_appointment(id)?;
    let employees = state.db.list_employees()?;
    let patients = state.db.list_patients()?;
    Ok(state.views.render(
        "appointments/edit",
        &json!({ "appointment": appointment, "employees": employees, "patients": patients }),
    )?)
}

/// Overwrite the appointment and show it
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: Result<Form<AppointmentForm>, FormRejection>,
) -> Result<Redirect, WebError> {
    let Form(form) = form?;
    state.db.update_appointment(id, &form)?;
    info!(appointment_id = id, "Appointment updated");
    Ok(Redirect::to(&format!("/appointments/{id}")))
}

/// Empty appointment form with doctor and patient choices
pub async fn add_form(State(state): State<AppState>) -> PageResult {
    let employees = state.db.list_employees()?;
    let patients = state.db.list_patients()?;
    Ok(state
        .views
        .render("appointments/add", &json!({ "employees": employees, "patients": patients }))?)
}

/// Insert an appointment and return to the list
pub async fn create(
    State(state): State<AppState>,
    form: Result<Form<AppointmentForm>, FormRejection>,
) -> Result<Redirect, WebError> {
    let Form(form) = form?;
    let id = state.db.add_appointment(&form)?;
    info!(appointment_id = id, doctor_id = form.doctor_id, "Appointment added");
    Ok(Redirect::to("/appointments"))
}
