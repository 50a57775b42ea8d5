//! Manara admin API server.
//!
//! Loads configuration, initializes logging, connects to PostgreSQL and
//! serves the admin API until interrupted.

use tracing_subscriber::{EnvFilter, fmt};

use manara_core::config::{AppConfig, LogFormat};
use manara_core::error::AppError;
use manara_database::DatabasePool;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `MANARA_CONFIG`, or from `config/default` layered
/// with `config/{MANARA_ENV}`, plus `MANARA__*` environment overrides.
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("MANARA_CONFIG") {
        Ok(path) => AppConfig::load_file(&path),
        Err(_) => {
            let env = std::env::var("MANARA_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Manara v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::open(&config.database, false).await?;
    manara_api::app::run_server(config, db.into_pool()).await
}
