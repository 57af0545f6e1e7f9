//! Main entry point for the application.
//!
//! Loads environment variables, parses the command line, initializes logging,
//! resolves the configuration and serves the REST API until shutdown.

use anylist_rest::anylist::RemoteClient;
use anylist_rest::api::server;
use anylist_rest::cli::Cli;
use anylist_rest::config::ServerConfig;
use anylist_rest::errors::Error;
use anylist_rest::utils;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};

async fn run(cli: Cli) -> Result<(), Error> {
    let config = ServerConfig::resolve(&cli)?;
    let client = RemoteClient::new(
        &config.api_url,
        &config.email,
        &config.password,
        config.credentials_file.clone(),
    )?;
    info!("Using AnyList API at {}", config.api_url);
    server::launch_server(&config, Arc::new(client)).await
}

/// Main entry point that initializes and runs the application.
///
/// # Initialization steps:
/// 1. Load environment variables from `.env`
/// 2. Parse CLI arguments
/// 3. Initialize logging system
/// 4. Resolve configuration and start the API server
#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    utils::init_logging(&cli.logging_level, cli.log_dir.as_deref());

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("Failed to load .env file: {}", e);
        }
    }

    if let Err(e) = run(cli).await {
        error!("Failed to start server: {}", e);
        std::process::exit(1);
    }
}
