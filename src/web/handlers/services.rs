use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use serde_json::json;
use tracing::info;

use super::PageResult;
use crate::models::ServiceForm;
use crate::web::error::WebError;
use crate::web::state::AppState;

/// The service catalogue
pub async fn list(State(state): State<AppState>) -> PageResult {
    let services = state.db.list_services()?;
    Ok(state.views.render("services/list", &json!({ "services": services }))?)
}

/// One service
pub async fn detail(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    let service = state.db.get_service(id)?;
    Ok(state.views.render("services/detail", &json!({ "service": service }))?)
}

/// Edit form pre-filled from the stored service
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    let service = state.db.get_service(id)?;
    Ok(state.views.render("services/edit", &json!({ "service": service }))?)
}

/// A code already used by another service fails with a database error
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: Result<Form<ServiceForm>, FormRejection>,
) -> Result<Redirect, WebError> {
    let Form(form) = form?;
    state.db.update_service(id, &form)?;
    info!(service_id = id, "Service updated");
    Ok(Redirect::to(&format!("/services/{id}")))
}

/// Empty service form
pub async fn add_form(State(state): State<AppState>) -> PageResult {
    Ok(state.views.render("services/add", &json!({}))?)
}

/// Insert a service and return to the list
pub async fn create(
    State(state): State<AppState>,
    form: Result<Form<ServiceForm>, FormRejection>,
) -> Result<Redirect, WebError> {
    let Form(form) = form?;
    let id = state.db.add_service(&form)?;
    info!(service_id = id, code = form.code.as_str(), "Service added");
    Ok(Redirect::to("/services"))
}
