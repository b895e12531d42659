//! Medclinic - Clinic Administration
//!
//! A Rust library and web application for keeping a small clinic's records
//! and producing its paperwork.
//!
//! # Features
//!
//! - Patients, employees, services, appointments and payments in SQLite
//! - Server-rendered HTML pages for browsing, editing and adding records
//! - Payment receipts rendered from a text template
//! - Staff workload reports exported as CSV

/// Configuration management
pub mod config;
/// Database access, one connection per operation
pub mod db;
/// Receipt and workload report generation
pub mod documents;
/// Library error type
pub mod error;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Parameterised WHERE clause builder
pub mod query;
/// Database schema definitions
pub mod schema;
/// Input validation for the report form
pub mod validation;
/// HTTP router, handlers and page templates
pub mod web;

// Re-export key components for easier access
pub use config::AppConfig;
pub use db::Database;
pub use error::{ClinicError, Result};
pub use web::{build_router, AppState};
