//! CLI command definitions and dispatch.

pub mod change_log;
pub mod config;
pub mod migrate;
pub mod serve;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use manara_api::AppState;
use manara_cache::provider::CacheManager;
use manara_core::config::AppConfig;
use manara_core::error::AppError;

use crate::output::OutputFormat;

/// Manara CMS administration
#[derive(Debug, Parser)]
#[command(name = "manara", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the admin API server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Browse, revert, and purge the change log
    ChangeLog(change_log::ChangeLogArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config, self.format).await,
            Commands::ChangeLog(args) => {
                change_log::execute(args, &self.config, self.format).await
            }
            Commands::Config(args) => config::execute(args, &self.config).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_file(config_path)
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<sqlx::PgPool, AppError> {
    let pool = manara_database::DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}

/// Helper: wire the services the same way the server does
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let pool = create_db_pool(&config).await?;
    let cache = Arc::new(CacheManager::new(&config.cache).await?);
    Ok(AppState::build(config, pool, cache))
}
