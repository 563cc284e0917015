//! HTTP server command

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use moodlift_core::config::AppConfig;
use moodlift_server::db::{create_pool, migrations};
use moodlift_server::http::{run_server, ServerConfig};
use moodlift_server::storage::AssetStore;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Asset bucket root (overrides config/environment)
    #[arg(long)]
    pub assets_root: Option<PathBuf>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &AppConfig) -> Result<()> {
    let database_url = match args.database_url {
        Some(url) => url,
        None => config.require_database_url()?.to_owned(),
    };

    let assets_root = args.assets_root.unwrap_or_else(|| config.assets_root());

    tracing::info!("Starting moodlift server on {}", args.bind);

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    let assets = AssetStore::new(assets_root);
    assets
        .ensure_root()
        .await
        .context("Failed to create asset bucket root")?;

    let server_config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    run_server(pool, assets, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
