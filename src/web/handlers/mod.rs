//! Route handlers, one module per entity plus the document downloads.
//!
//! Browsing handlers share one shape: load rows, render a page. Detail and
//! edit pages render a null record for unknown ids instead of failing.

use axum::response::{Html, Response};

use crate::web::error::WebError;

/// Appointment pages
pub mod appointments;
/// Receipt and workload report downloads
pub mod documents;
/// Employee pages
pub mod employees;
/// Patient pages and visit history
pub mod patients;
/// Payment pages
pub mod payments;
/// Service catalogue pages
pub mod services;

/// Rendered HTML page or a handler error
pub type PageResult = Result<Html<String>, WebError>;
/// Arbitrary response or a handler error
pub type ResponseResult = Result<Response, WebError>;
