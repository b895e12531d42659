//! Mapping of handler failures to HTTP responses.

use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use crate::error::ClinicError;

const NOT_FOUND_PAGE: &str = include_str!("../../templates/404.html");
const SERVER_ERROR_PAGE: &str = include_str!("../../templates/500.html");

/// Handler errors with HTTP status mapping
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// No route matches the request path
    #[error("Not found")]
    NotFound,
    /// A submitted form is missing fields or has unparsable values
    #[error("Malformed form submission: {0}")]
    InvalidForm(#[from] FormRejection),
    /// Failure from the database, document or template layer
    #[error(transparent)]
    Clinic(#[from] ClinicError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound | Self::Clinic(ClinicError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
            }
            err @ (Self::InvalidForm(_) | Self::Clinic(_)) => {
                error!(error = %err, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(SERVER_ERROR_PAGE)).into_response()
            }
        }
    }
}

/// The static 404 page, also served for unmatched paths
pub async fn not_found() -> WebError {
    WebError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(WebError::NotFound.into_response().status(), StatusCode::NOT_FOUND);

        let missing = WebError::from(ClinicError::NotFound { entity: "payment", id: 9 });
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let invalid = WebError::from(ClinicError::InvalidInput("bad".to_string()));
        assert_eq!(invalid.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
