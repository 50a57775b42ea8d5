//! Configuration commands.

use clap::{Args, Subcommand};

use manara_core::config::redact_url;
use manara_core::error::AppError;

use crate::output;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Validate the configuration file and print a summary
    Validate,
}

/// Execute config commands
pub async fn execute(args: &ConfigArgs, config_path: &str) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Validate => match super::load_config(config_path) {
            Ok(config) => {
                output::print_success(&format!("Configuration '{config_path}' is valid"));
                output::print_kv(
                    "Server",
                    &format!("{}:{}", config.server.host, config.server.port),
                );
                output::print_kv("Database", &redact_url(&config.database.url));
                output::print_kv("Cache", config.cache.provider.as_str());
                output::print_kv(
                    "Undo slot TTL",
                    &format!("{} min", config.undo.slot_ttl_minutes),
                );
                output::print_kv(
                    "Strict logging",
                    &config.undo.strict_logging.to_string(),
                );
                output::print_kv(
                    "Retention",
                    &format!("{} days", config.undo.retention_days),
                );
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}
