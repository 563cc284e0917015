//! moodlift - MoodLift service CLI
//!
//! Entry point for running the HTTP server and managing the database schema.

use anyhow::Result;
use clap::{Parser, Subcommand};

use moodlift_core::config::AppConfig;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "moodlift",
    author,
    version,
    about = "Mood-tracking content service: public APIs, admin CRUD, favorites sync"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),

    /// Run database migrations and exit
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = AppConfig::load()?;
    tracing_setup::init_tracing(cli.debug, config.log_level.as_deref())?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args, &config).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args, &config).await,
    }
}
