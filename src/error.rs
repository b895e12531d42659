//! Error types for the medclinic library.
//!
//! This module provides custom error types using `thiserror` for better error handling
//! and more specific error messages throughout the application.

use thiserror::Error;

/// Errors that can occur in the medclinic application.
#[derive(Error, Debug)]
pub enum ClinicError {
    /// Database-related errors, including constraint violations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record looked up by primary key does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (e.g. "payment")
        entity: &'static str,
        /// Primary key that was requested
        id: i64,
    },

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Template rendering errors
    #[error("Template render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Template registration errors
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience type alias for Result with ClinicError
pub type Result<T> = std::result::Result<T, ClinicError>;

impl From<handlebars::TemplateError> for ClinicError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(err))
    }
}
