//! Application state
//!
//! Shared state accessible by all API handlers, wrapped in Arc for
//! thread-safe sharing across async tasks. Constructing the state wires the
//! vote store's observer registry to the WebSocket hub so every mutation is
//! pushed to connected dashboards.

use crate::store::{Subscription, VoteStore};
use crate::websocket::{ConnectionHub, HubConfig, ServerMessage};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The vote store owning all election state
    pub store: Arc<VoteStore>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// WebSocket connection hub for real-time snapshots
    pub ws_hub: Arc<ConnectionHub>,
    /// Keeps the store -> hub bridge alive for the lifetime of the state
    _store_subscription: Arc<Subscription>,
}

impl AppState {
    /// Create the application state and bridge store updates to the hub.
    ///
    /// Must be called within a Tokio runtime: snapshot broadcasts are
    /// delivered on spawned tasks.
    pub fn new(store: Arc<VoteStore>, config: ApiConfig) -> Self {
        let ws_hub = Arc::new(ConnectionHub::new(HubConfig::default()));

        let hub_for_updates = Arc::clone(&ws_hub);
        let subscription = store.subscribe(move |config| {
            hub_for_updates.publish(ServerMessage::election(config.cloned()));
        });

        Self {
            store,
            config: Arc::new(config),
            start_time: Instant::now(),
            ws_hub,
            _store_subscription: Arc::new(subscription),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get WebSocket connection count
    pub async fn ws_connection_count(&self) -> usize {
        self.ws_hub.connection_count().await
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty means permissive
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes (logo data URIs ride along in
    /// configuration saves)
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_max_body_size() -> usize {
    5 * 1024 * 1024 // 5MB
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_body_size: default_max_body_size(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
