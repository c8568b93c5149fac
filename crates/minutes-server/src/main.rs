//! Minutes Server binary
//!
//! Starts the HTTP service for transcript extraction and action item CRUD.

use clap::Parser;
use minutes_server::{config::ServerConfig, init_tracing, start_server, ServerError};
use std::path::PathBuf;
use std::process;
use tracing::warn;

/// Minutes - meeting transcript action item service
#[derive(Parser, Debug)]
#[command(name = "minutes-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Load configuration from a TOML file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the database path
    #[arg(long, value_name = "PATH")]
    database: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    // A missing .env file is normal
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => {
            warn!("No config file specified, using defaults");
            warn!("Usage: minutes-server --config <path-to-config.toml>");
            ServerConfig::default()
        }
    };

    if let Some(port) = args.port {
        config.server.bind_port = port;
    }
    if let Some(database) = args.database {
        config.server.database_path = database;
    }

    start_server(config).await
}
