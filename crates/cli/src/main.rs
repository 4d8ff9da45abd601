//! # Waypoint CLI
//!
//! Command-line interface for the Waypoint mission authorization service.
//!
//! ## Usage
//!
//! ```bash
//! waypoint serve    # Start the API server (runs migrations automatically)
//! waypoint migrate  # Run database migrations
//! waypoint --help   # Show help
//! ```

mod commands;
mod config;
mod server;
mod tls;

use clap::{CommandFactory as _, Parser};
use commands::Commands;
use error::Result;

/// Waypoint - mission authorization and post-mission reporting
#[derive(Parser, Debug)]
#[command(name = "waypoint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "WAYPOINT_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level, &cli.log_format, None)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!(target: "app", command = ?cli.command, "Waypoint CLI starting...");

    match cli.command {
        Commands::Serve(args) => server::serve(&args).await?,
        Commands::Migrate(args) => commands::migrate::migrate(args).await?,
        Commands::Completions(args) => commands::completions::completions(args.shell, &mut Cli::command())?,
        Commands::Validate => commands::validate::validate()?,
    }

    tracing::info!(target: "app", "Waypoint CLI completed successfully");
    Ok(())
}
