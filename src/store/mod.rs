//! Ballotbox Vote Store
//!
//! The single source of truth for election state. The store owns the
//! persisted `ElectionConfig` aggregate, merges previously recorded tallies
//! back into it on startup, and notifies registered observers synchronously
//! on every mutation.
//!
//! Persistence is string-keyed: the configuration blob lives under
//! [`CONFIG_KEY`] and the tally map under [`TALLY_KEY`], each as one JSON
//! document in the configured [`StorageBackend`].

pub mod backend;
pub mod engine;
pub mod error;
pub mod subscribers;
pub mod types;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use engine::{VoteStore, CONFIG_KEY, TALLY_KEY};
pub use error::{StoreError, StoreResult};
pub use subscribers::{SubscriberRegistry, Subscription};
pub use types::{ElectionConfig, TallyMap, VotingItem, VotingOption};
