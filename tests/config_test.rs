//! Configuration defaults and validation

use std::path::PathBuf;

use medclinic::config::AppConfig;

#[test]
fn test_default_config_values() {
    let config = AppConfig::default();

    assert_eq!(config.database.path, "medclinic.db");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.documents.receipt_template, "templates/documents/cheque.hbs");
    assert_eq!(config.documents.output_directory, "templates/documents");
}

#[test]
fn test_default_logging_config() {
    let config = AppConfig::default();

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file_path, None);
    assert_eq!(config.logging.format, "text");
}

#[test]
fn test_default_config_is_valid() {
    assert!(AppConfig::default().validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_port() {
    let mut config = AppConfig::default();
    config.server.port = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_empty_paths() {
    let mut config = AppConfig::default();
    config.database.path = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.documents.output_directory = String::new();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.documents.receipt_template = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_unknown_log_settings() {
    let mut config = AppConfig::default();
    config.logging.level = "verbose".to_string();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.logging.format = "xml".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_bind_address() {
    let mut config = AppConfig::default();
    assert_eq!(config.bind_address().unwrap().to_string(), "127.0.0.1:5000");

    config.server.host = "not a host".to_string();
    assert!(config.bind_address().is_err());
}

#[test]
fn test_document_paths() {
    let config = AppConfig::default();
    assert_eq!(config.output_directory(), PathBuf::from("templates/documents"));
    assert_eq!(config.receipt_template(), PathBuf::from("templates/documents/cheque.hbs"));
}
