//! WebSocket push layer
//!
//! Real-time delivery of election snapshots to connected kiosk dashboards.
//! Every store mutation is pushed to every connection as a full snapshot,
//! mirroring the store's replace-on-change subscription semantics.

pub mod handler;
pub mod hub;
pub mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage};
