use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration structure
///
/// Loaded once at startup and shared read-only with every request handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite settings
    pub database: DatabaseConfig,
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Receipt template and output locations
    pub documents: DocumentsConfig,
    /// Log level, file and format
    pub logging: LoggingConfig,
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite file
    pub path: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
}

/// Generated document settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// Handlebars template used for payment receipts
    pub receipt_template: String,
    /// Directory receiving generated receipts and workload reports
    pub output_directory: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset
    pub level: String,
    /// Daily rolling log file, if any
    pub file_path: Option<String>,
    /// Console format, `text` or `json`
    pub format: String, // "json" or "text"
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "medclinic.db".to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            documents: DocumentsConfig {
                receipt_template: "templates/documents/cheque.hbs".to_string(),
                output_directory: "templates/documents".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                format: "text".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            // Start with default values
            .add_source(Config::try_from(&Self::default())?)
            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(File::with_name("config").required(false))
            // Add environment variables with prefix, e.g. MEDCLINIC__SERVER__PORT
            .add_source(Environment::with_prefix("MEDCLINIC").separator("__"))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize configuration: {}", e))?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.database.path.trim().is_empty() {
            return Err(anyhow::anyhow!("database.path cannot be empty"));
        }

        if self.server.port == 0 {
            return Err(anyhow::anyhow!("server.port must be greater than 0"));
        }

        if self.documents.receipt_template.trim().is_empty() {
            return Err(anyhow::anyhow!("documents.receipt_template cannot be empty"));
        }
        if self.documents.output_directory.trim().is_empty() {
            return Err(anyhow::anyhow!("documents.output_directory cannot be empty"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format: {}. Must be one of: {:?}",
                self.logging.format,
                valid_formats
            ));
        }

        Ok(())
    }

    /// Socket address the HTTP server binds to
    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid server address {}:{}: {}", self.server.host, self.server.port, e))
    }

    /// Get log level from environment or config
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }

    /// Directory receiving generated documents
    pub fn output_directory(&self) -> PathBuf {
        PathBuf::from(&self.documents.output_directory)
    }

    /// Path of the receipt template
    pub fn receipt_template(&self) -> PathBuf {
        PathBuf::from(&self.documents.receipt_template)
    }
}
