//! Application router.
//!
//! Returns a plain `Router` so the binary can serve it and tests can drive
//! it with `oneshot`. Path params use `:param` syntax (axum 0.7).

use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::web::error::not_found;
use crate::web::handlers::{appointments, documents, employees, patients, payments, services};
use crate::web::state::AppState;

/// Build the router with every page and document route
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/patients") }))
        // Patients
        .route("/patients", get(patients::list))
        .route("/patients/:id", get(patients::detail))
        .route("/patients/:id/edit", get(patients::edit_form).post(patients::update))
        .route("/add_patient", get(patients::add_form).post(patients::create))
        // Employees
        .route("/employees", get(employees::list))
        .route("/employees/:id", get(employees::detail))
        .route("/employees/:id/edit", get(employees::edit_form).post(employees::update))
        .route("/add_employee", get(employees::add_form).post(employees::create))
        // Services
        .route("/services", get(services::list))
        .route("/services/:id", get(services::detail))
        .route("/services/:id/edit", get(services::edit_form).post(services::update))
        .route("/add_service", get(services::add_form).post(services::create))
        // Appointments
        .route("/appointments", get(appointments::list))
        .route("/appointments/:id", get(appointments::detail))
        .route("/appointments/:id/edit", get(appointments::edit_form).post(appointments::update))
        .route("/add_appointment", get(appointments::add_form).post(appointments::create))
        // Payments
        .route("/payments", get(payments::list))
        .route("/payments/:id", get(payments::detail))
        .route("/payments/:id/edit", get(payments::edit_form).post(payments::update))
        .route("/add_payment", get(payments::add_form).post(payments::create))
        // Documents
        .route("/generate_payment_check/:payment_id", get(documents::payment_check))
        .route(
            "/generate_workload_report",
            get(documents::workload_form).post(documents::workload_report),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_state(dir: &TempDir) -> AppState {
        let mut config = AppConfig::default();
        config.database.path = dir.path().join("clinic.db").to_string_lossy().into_owned();
        config.documents.receipt_template =
            concat!(env!("CARGO_MANIFEST_DIR"), "/templates/documents/cheque.hbs").to_string();
        config.documents.output_directory = dir.path().join("out").to_string_lossy().into_owned();

        let state = AppState::new(config).unwrap();
        state.db.reset().unwrap();
        state
    }

    async fn send(state: &AppState, req: Request<Body>) -> (StatusCode, header::HeaderMap, String) {
        let response = build_router(state.clone()).oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_req(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_redirects_to_patients() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (status, headers, _) = send(&state, get_req("/")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/patients");
    }

    #[tokio::test]
    async fn test_list_pages_render_seed_rows() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let (status, _, body) = send(&state, get_req("/patients")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Ivanov Ivan Ivanovich"));

        let (_, _, body) = send(&state, get_req("/services")).await;
        assert!(body.contains("LAB-001"));

        let (_, _, body) = send(&state, get_req("/payments")).await;
        assert!(body.contains("/generate_payment_check/1"));
    }

    #[tokio::test]
    async fn test_unknown_detail_renders_null_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (status, _, body) = send(&state, get_req("/patients/999")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Patient not found"));
    }

    #[tokio::test]
    async fn test_edit_then_detail_shows_new_values() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let (status, headers, _) = send(
            &state,
            form_req(
                "/employees/2/edit",
                "full_name=Orlova+Maria&position=Surgeon&phone=%2B70000000000&specialization=Surgery",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/employees/2");

        let (_, _, body) = send(&state, get_req("/employees/2")).await;
        assert!(body.contains("Orlova Maria"));
        assert!(body.contains("Surgeon"));
        assert!(!body.contains("Treatment room"));
    }

    #[tokio::test]
    async fn test_add_redirects_to_list() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let (status, headers, _) = send(
            &state,
            form_req(
                "/add_appointment",
                "doctor_id=1&patient_id=2&date=2024-03-05&time=11%3A30&complaints=Cough&preliminary_diagnosis=",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/appointments");
        assert_eq!(state.db.list_appointments().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_duplicate_service_code_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (status, _, _) = send(
            &state,
            form_req("/add_service", "name=Repeat+ECG&code=ECG-001&cost=2500&description=&detailed_description="),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(state.db.list_services().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unparsable_form_value_is_server_error_page() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (status, _, body) = send(
            &state,
            form_req("/add_service", "name=Massage&code=MSG&cost=&description=&detailed_description="),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Something went wrong"));
        assert_eq!(state.db.list_services().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_incomplete_edit_form_is_server_error_page() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (status, _, body) = send(&state, form_req("/patients/1/edit", "full_name=A")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Something went wrong"));

        let patient = state.db.get_patient(1).unwrap().unwrap();
        assert_eq!(patient.full_name, "Ivanov Ivan Ivanovich");
    }

    #[tokio::test]
    async fn test_payment_check_unknown_payment_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (status, _, body) = send(&state, get_req("/generate_payment_check/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("does not exist"));
        assert!(!dir.path().join("out").join("payment_999_cheque.txt").exists());
    }

    #[tokio::test]
    async fn test_payment_check_returns_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (status, headers, body) = send(&state, get_req("/generate_payment_check/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"payment_1_cheque.txt\""
        );
        assert!(body.contains("Ivanov Ivan Ivanovich"));
        assert!(body.contains("1500.00"));
        assert!(dir.path().join("out").join("payment_1_cheque.txt").exists());
    }

    #[tokio::test]
    async fn test_workload_report_returns_seeded_rows() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (status, headers, body) = send(
            &state,
            form_req(
                "/generate_workload_report",
                "start_date=2024-02-28&end_date=2024-03-01&employee_id=",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"workload_report.csv\""
        );

        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Date,Time,Patient,Employee");
        assert!(lines[1].starts_with("2024-02-28"));
        assert!(lines[2].starts_with("2024-02-29"));
        assert!(lines[3].starts_with("2024-03-01"));
    }

    #[tokio::test]
    async fn test_workload_report_without_dates_renders_error_page() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (status, _, body) = send(&state, form_req("/generate_workload_report", "start_date=&end_date=")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Start and end dates are required"));
    }

    #[tokio::test]
    async fn test_workload_report_failure_hides_detail() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (status, _, body) = send(
            &state,
            form_req(
                "/generate_workload_report",
                "start_date=2024-02-28&end_date=2024-03-01&employee_id=abc",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(documents::REPORT_FAILED_MESSAGE));
        assert!(!body.contains("abc"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (status, _, body) = send(&state, get_req("/no/such/page")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("404"));
    }
}
