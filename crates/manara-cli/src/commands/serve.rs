//! Start the admin API server.

use clap::Args;

use manara_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip database migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting Manara admin API...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);

    let db = manara_database::DatabasePool::open(&config.database, args.no_migrate).await?;
    manara_api::app::run_server(config, db.into_pool()).await
}
