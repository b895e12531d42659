use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use serde_json::json;
use tracing::info;

use super::PageResult;
use crate::models::EmployeeForm;
use crate::web::error::WebError;
use crate::web::state::AppState;

/// All employees
pub async fn list(State(state): State<AppState>) -> PageResult {
    let employees = state.db.list_employees()?;
    Ok(state.views.render("employees/list", &json!({ "employees": employees }))?)
}

/// One employee
pub async fn detail(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    let employee = state.db.get_employee(id)?;
    Ok(state.views.render("employees/detail", &json!({ "employee": employee }))?)
}

/// Edit form pre-filled from the stored employee
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    let employee = state.db.get_employee(id)?;
    Ok(state.views.render("employees/edit", &json!({ "employee": employee }))?)
}

/// Overwrite the employee and show it
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: Result<Form<EmployeeForm>, FormRejection>,
) -> Result<Redirect, WebError> {
    let Form(form) = form?;
    state.db.update_employee(id, &form)?;
    info!(employee_id = id, "Employee updated");
    Ok(Redirect::to(&format!("/employees/{id}")))
}

/// Empty employee form
pub async fn add_form(State(state): State<AppState>) -> PageResult {
    Ok(state.views.render("employees/add", &json!({}))?)
}

/// Insert an employee and return to the list
pub async fn create(
    State(state): State<AppState>,
    form: Result<Form<EmployeeForm>, FormRejection>,
) -> Result<Redirect, WebError> {
    let Form(form) = form?;
    let id = state.db.add_employee(&form)?;
    info!(employee_id = id, "Employee added");
    Ok(Redirect::to("/employees"))
}
