//! PostgreSQL pool setup for the change log and the tracked tables.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use manara_core::config::{DatabaseConfig, redact_url};
use manara_core::error::{AppError, ErrorKind};

use crate::migration;

/// Owns the sqlx pool shared by every repository.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %redact_url(&config.url),
            max = config.max_connections,
            min = config.min_connections,
            "Opening PostgreSQL pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Cannot reach {}: {e}", redact_url(&config.url)),
                    e,
                )
            })?;

        Ok(Self { pool })
    }

    /// Open the pool and apply pending migrations when `run_migrations` is
    /// set and `skip_migrations` is not.
    pub async fn open(config: &DatabaseConfig, skip_migrations: bool) -> Result<Self, AppError> {
        let db = Self::connect(config).await?;
        if config.run_migrations && !skip_migrations {
            migration::run_migrations(&db.pool).await?;
        }
        Ok(db)
    }

    pub fn into_pool(self) -> PgPool {
        self.pool
    }
}
