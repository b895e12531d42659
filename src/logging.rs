use anyhow::Result;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Initialize structured logging system
///
/// The returned guard flushes the file appender on drop; keep it alive for
/// the lifetime of the process.
pub fn init_logging(log_level: Option<&str>, log_file: Option<&Path>, json: bool) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            let level = log_level.unwrap_or("info");
            EnvFilter::try_new(level)
        })
        .map_err(|e| anyhow::anyhow!("Failed to create log filter: {}", e))?;

    let registry = Registry::default().with(env_filter);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!json)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true);
    let console_layer = if json {
        console_layer.json().boxed()
    } else {
        console_layer.boxed()
    };

    let guard = if let Some(log_path) = log_file {
        let file_name = log_path.file_name().and_then(|n| n.to_str()).unwrap_or("medclinic.log");
        let file_appender = rolling::daily(log_path.parent().unwrap_or_else(|| Path::new(".")), file_name);
        let (non_blocking_appender, guard) = non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_appender)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .json();

        registry.with(console_layer).with(file_layer).init();
        Some(guard)
    } else {
        registry.with(console_layer).init();
        None
    };

    info!("Logging system initialized");
    Ok(guard)
}

/// Performance timing utilities
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    /// Start timing `operation`
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    /// Log the elapsed time and return it
    pub fn finish(self) -> Duration {
        let elapsed = self.start.elapsed();
        tracing::info!(
            operation = self.operation.as_str(),
            duration_ms = elapsed.as_millis(),
            "Operation completed"
        );
        elapsed
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            let duration = self.start.elapsed().as_millis();
            tracing::debug!(
                operation = self.operation.as_str(),
                duration_ms = duration,
                "Operation finished"
            );
        }
    }
}
