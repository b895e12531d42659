use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Database;
use crate::error::{ClinicError, Result};
use crate::web::views::Views;

/// Shared handler state, built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<AppConfig>,
    /// Database handle; opens a connection per operation
    pub db: Database,
    /// Registered HTML pages
    pub views: Arc<Views>,
}

impl AppState {
    /// Open the database (creating the schema if needed) and register page templates.
    ///
    /// Configuration that fails validation is rejected before anything is opened.
    pub fn new(config: AppConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ClinicError::InvalidConfig(e.to_string()))?;
        let db = Database::new(&config.database.path)?;
        let views = Views::new()?;
        Ok(Self {
            config: Arc::new(config),
            db,
            views: Arc::new(views),
        })
    }
}
