//! WebSocket message types
//!
//! Messages exchanged between kiosk dashboards and the server. There is a
//! single implicit topic: the current election.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::ElectionConfig;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
    /// Full election snapshot; sent on connect and after every mutation.
    /// `election` is null when no election is loaded.
    Election {
        election: Option<ElectionConfig>,
        updated_at: DateTime<Utc>,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error { message: String },
}

impl ServerMessage {
    /// Build a snapshot message for the given state.
    pub fn election(config: Option<ElectionConfig>) -> Self {
        ServerMessage::Election {
            election: config,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_parsing() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type": "ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));

        assert!(serde_json::from_str::<ClientMessage>(r#"{"type": "subscribe"}"#).is_err());
    }

    #[test]
    fn test_election_message_serializes_null_when_empty() {
        let json = serde_json::to_string(&ServerMessage::election(None)).unwrap();
        assert!(json.contains(r#""type":"election""#));
        assert!(json.contains(r#""election":null"#));
    }
}
