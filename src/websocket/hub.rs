//! WebSocket connection hub
//!
//! Tracks all connected dashboards and broadcasts election snapshots to
//! them. There is no per-topic subscription machinery: every connection
//! receives every update of the single live election.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::ServerMessage;

/// Unique identifier for a WebSocket connection
pub type ConnectionId = String;

/// Manages all WebSocket connections
pub struct ConnectionHub {
    /// Active connections: ConnectionId -> channel to that connection
    connections: Arc<RwLock<HashMap<ConnectionId, mpsc::UnboundedSender<ServerMessage>>>>,
    /// Configuration
    config: HubConfig,
}

/// Configuration for the connection hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent connections
    pub max_connections: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 256,
        }
    }
}

impl ConnectionHub {
    /// Create a new connection hub
    pub fn new(config: HubConfig) -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Register a new WebSocket connection
    ///
    /// Returns the connection ID on success, or an error if the connection
    /// limit has been reached.
    pub async fn register(
        &self,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<ConnectionId, HubError> {
        let mut connections = self.connections.write().await;
        if connections.len() >= self.config.max_connections {
            return Err(HubError::TooManyConnections);
        }

        let id = Uuid::new_v4().to_string();
        connections.insert(id.clone(), sender);

        tracing::info!(connection_id = %id, "WebSocket connected");
        Ok(id)
    }

    /// Unregister a connection
    pub async fn unregister(&self, id: &str) {
        self.connections.write().await.remove(id);
        tracing::info!(connection_id = %id, "WebSocket disconnected");
    }

    /// Send a message directly to a specific connection
    pub async fn send_to(&self, id: &str, message: ServerMessage) -> Result<(), HubError> {
        let connections = self.connections.read().await;
        let sender = connections.get(id).ok_or(HubError::ConnectionNotFound)?;

        sender.send(message).map_err(|_| HubError::SendFailed)
    }

    /// Broadcast a message to every connection
    pub async fn broadcast(&self, message: &ServerMessage) {
        let connections = self.connections.read().await;

        let mut sent_count = 0;
        for sender in connections.values() {
            if sender.send(message.clone()).is_ok() {
                sent_count += 1;
            }
        }

        if sent_count > 0 {
            tracing::trace!(subscribers = sent_count, "Broadcast election update");
        }
    }

    /// Publish a message from synchronous code
    ///
    /// This is the bridge from the store's synchronous observer callback to
    /// the async broadcast; delivery happens on a spawned task.
    pub fn publish(&self, message: ServerMessage) {
        let connections = Arc::clone(&self.connections);
        tokio::spawn(async move {
            let connections = connections.read().await;
            for sender in connections.values() {
                let _ = sender.send(message.clone());
            }
        });
    }

    /// Get the current connection count
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

/// Errors from the connection hub
#[derive(Error, Debug)]
pub enum HubError {
    #[error("Connection limit reached")]
    TooManyConnections,

    #[error("Connection not found")]
    ConnectionNotFound,

    #[error("Failed to send message to connection")]
    SendFailed,
}
