use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use serde_json::json;
use tracing::info;

use super::PageResult;
use crate::models::PaymentForm;
use crate::web::error::WebError;
use crate::web::state::AppState;

/// All payments with receipt links
pub async fn list(State(state): State<AppState>) -> PageResult {
    let payments = state.db.list_payments()?;
    Ok(state.views.render("payments/list", &json!({ "payments": payments }))?)
}

/// One payment
pub async fn detail(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    let payment = state.db.get_payment(id)?;
    Ok(state.views.render("payments/detail", &json!({ "payment": payment }))?)
}

/// Edit form with patient, service and employee choices
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    let payment = state.db.get_payment(id)?;
    let patients = state.db.list_patients()?;
    let services = state.db.list_services()?;
    let employees = state.db.list_employees()?;
    Ok(state.views.render(
        "payments/edit",
        &json!({
            "payment": payment,
            "patients": patients,
            "services": services,
            "employees": employees,
        }),
    )?)
}

/// Overwrite the payment and show it
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: Result<Form<PaymentForm>, FormRejection>,
) -> Result<Redirect, WebError> {
    let Form(form) = form?;
    state.db.update_payment(id, &form)?;
    info!(payment_id = id, "Payment updated");
    Ok(Redirect::to(&format!("/payments/{id}")))
}

/// Empty payment form with patient, service and employee choices
pub async fn add_form(State(state): State<AppState>) -> PageResult {
    let patients = state.db.list_patients()?;
    let services = state.db.list_services()?;
    let employees = state.db.list_employees()?;
    Ok(state.views.render(
        "payments/add",
        &json!({ "patients": patients, "services": services, "employees": employees }),
    )?)
}

/// Insert a payment and return to the list
pub async fn create(
    State(state): State<AppState>,
    form: Result<Form<PaymentForm>, FormRejection>,
) -> Result<Redirect, WebError> {
    let Form(form) = form?;
    let id = state.db.add_payment(&form)?;
    info!(payment_id = id, amount = form.amount, "Payment added");
    Ok(Redirect::to("/payments"))
}
