//! Minutes Server
//!
//! HTTP service over the extraction pipeline and the action item store.
//!
//! # Architecture
//!
//! ```text
//! HTTP → axum handlers → Extractor → LlmProvider
//!                      ↘ SqliteStore (behind a Mutex)
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState, Limits};
use minutes_extractor::Extractor;
use minutes_llm::{build_provider, LlmError};
use minutes_store::{SqliteStore, StoreError};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Database could not be opened
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// LLM provider could not be built
    #[error("LLM provider error: {0}")]
    Llm(#[from] LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the stderr log subscriber, honoring `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Open the store and build the provider described by `config`
pub fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    let store = SqliteStore::new(&config.server.database_path)?;
    let provider = build_provider(&config.llm)?;
    let extractor = Extractor::new(provider, config.extraction.extractor.clone());

    Ok(AppState::new(
        store,
        extractor,
        Limits {
            min_transcript_chars: config.extraction.min_transcript_chars,
            history_limit: config.extraction.history_limit,
        },
    ))
}

/// Start the HTTP server
///
/// Opens the database, configures the provider, and serves until the
/// process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Minutes server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.server.database_path);

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
