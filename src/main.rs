//! Command-line entry point: serves the clinic web application or resets its database.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};

use medclinic::config::AppConfig;
use medclinic::logging::init_logging;
use medclinic::{build_router, AppState, Database};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Drop all tables, recreate the schema and load the seed data
    ResetDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let mut config = AppConfig::load()?;

    let log_level = config.get_log_level();
    let _guard = init_logging(
        Some(&log_level),
        config.logging.file_path.as_deref().map(Path::new),
        config.logging.format == "json",
    )?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve { host: None, port: None });

    let result = match command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Commands::ResetDb => reset_db(&config),
    };

    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }
    result
}

async fn serve(config: AppConfig) -> Result<()> {
    let addr = config.bind_address()?;
    let state = AppState::new(config).context("Failed to initialize application state")?;
    let app = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Medclinic listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

fn reset_db(config: &AppConfig) -> Result<()> {
    let db = Database::new(&config.database.path).context("Failed to open database")?;
    db.reset().context("Failed to reset database")?;
    info!(path = %db.path().display(), "Database reset complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
