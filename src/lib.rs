//! # Ballotbox
//!
//! A self-hosted voting kiosk: an administrator defines an election
//! (questions with labeled options), voters cast one choice per question,
//! tallies persist across restarts, and dashboards receive live results.
//!
//! ## Modules
//!
//! - [`store`]: persistent, observable election state (the core)
//! - [`results`]: chart-ready derivations over the current election
//! - [`api`]: REST surface for the builder and voting views, with Axum
//! - [`websocket`]: live snapshot push to connected dashboards
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use ballotbox::store::{ElectionConfig, MemoryBackend, VoteStore, VotingItem, VotingOption};
//!
//! let store = VoteStore::open(MemoryBackend::new());
//!
//! store.save_config(ElectionConfig {
//!     title: "Assembly".to_string(),
//!     description: String::new(),
//!     logo_url: None,
//!     voting_items: vec![VotingItem {
//!         id: "item-1".to_string(),
//!         question: "Approve?".to_string(),
//!         options: vec![VotingOption {
//!             id: "opt-si".to_string(),
//!             label: "SI".to_string(),
//!             count: 0,
//!         }],
//!     }],
//! });
//!
//! store.save_vote("item-1", "opt-si");
//!
//! let config = store.current_config().unwrap();
//! for item in ballotbox::results::election_results(&config) {
//!     println!("{}: {} votes", item.question, item.total_votes);
//! }
//! ```

pub mod api;
pub mod config;
pub mod results;
pub mod store;
pub mod websocket;

// Re-export top-level types for convenience
pub use store::{
    ElectionConfig, FileBackend, MemoryBackend, StorageBackend, StoreError, StoreResult,
    Subscription, TallyMap, VoteStore, VotingItem, VotingOption, CONFIG_KEY, TALLY_KEY,
};

pub use results::{election_results, item_result, ItemResult, OptionBar};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use websocket::{
    websocket_handler, ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage,
};

pub use config::{Config, ConfigError, LoggingConfig, StorageConfig};
