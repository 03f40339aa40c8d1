//! Ballotbox kiosk server
//!
//! Hydrates the vote store from disk and serves the kiosk API.
//!
//! # Configuration
//!
//! Reads `config.toml` from the platform config directory,
//! `/etc/ballotbox/`, or the working directory; environment variables
//! override file settings:
//! - `BALLOTBOX_DATA_DIR`: Data directory
//! - `BALLOTBOX_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `BALLOTBOX_API_PORT`: Port to listen on (default: 8090)
//! - `BALLOTBOX_LOG_LEVEL` / `BALLOTBOX_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Fine-grained log filter (overrides the level setting)

use anyhow::Context;
use ballotbox::api::{serve, AppState};
use ballotbox::config::Config;
use ballotbox::store::{FileBackend, VoteStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_tracing(&config);

    tracing::info!("Starting Ballotbox v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {:?}", config.storage.data_dir());

    let backend = FileBackend::open(config.storage.data_dir())
        .with_context(|| format!("opening data directory {:?}", config.storage.data_dir()))?;
    let store = Arc::new(VoteStore::open(backend));

    let state = AppState::new(Arc::clone(&store), config.api.clone());

    serve(state, &config.api).await?;

    tracing::info!("Ballotbox stopped");
    Ok(())
}

/// Initialize tracing from the logging configuration.
///
/// `RUST_LOG` takes precedence over the configured level so operators can
/// raise verbosity without touching the config file.
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!(
                "ballotbox={},tower_http=info",
                config.logging.level
            ))
        });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
