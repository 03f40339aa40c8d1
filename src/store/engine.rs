//! Vote store
//!
//! `VoteStore` is the sole writer and reader of persisted election state and
//! the single notification point for state changes. All mutations are
//! synchronous read-modify-persist-notify: the write completes and every
//! observer has run before the call returns.
//!
//! Startup hydration: the configuration blob is decoded first; if a tally
//! blob also exists, its counts are merged on top. A malformed blob is
//! logged and treated as absent - a malformed configuration yields "no
//! election loaded", a malformed tally alone falls back to the counts
//! embedded in the configuration. Storage-write failures during mutations
//! are logged and swallowed, leaving in-memory state ahead of persisted
//! state until a later write succeeds.

use std::sync::{Arc, RwLock};

use crate::store::backend::StorageBackend;
use crate::store::subscribers::{SubscriberRegistry, Subscription};
use crate::store::types::{ElectionConfig, TallyMap};

/// Storage key for the configuration blob.
pub const CONFIG_KEY: &str = "vote_app_data";
/// Storage key for the tally blob.
pub const TALLY_KEY: &str = "vote_app_counts";

/// Persistent, observable election state.
pub struct VoteStore {
    backend: Box<dyn StorageBackend>,
    current: RwLock<Option<ElectionConfig>>,
    subscribers: SubscriberRegistry,
}

impl VoteStore {
    /// Open the store over a backend, hydrating from whatever it holds.
    pub fn open(backend: impl StorageBackend + 'static) -> Self {
        let current = Self::hydrate(&backend);

        match &current {
            Some(config) => tracing::info!(
                title = %config.title,
                items = config.voting_items.len(),
                "Loaded election from storage"
            ),
            None => tracing::info!("No election in storage"),
        }

        Self {
            backend: Box::new(backend),
            current: RwLock::new(current),
            subscribers: SubscriberRegistry::new(),
        }
    }

    /// Read and merge the persisted blobs. Malformed data never fails
    /// startup.
    fn hydrate(backend: &dyn StorageBackend) -> Option<ElectionConfig> {
        let raw_config = backend.get(CONFIG_KEY)?;

        let mut config = match ElectionConfig::decode(&raw_config) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Discarding malformed configuration blob");
                return None;
            }
        };

        if let Some(raw_tallies) = backend.get(TALLY_KEY) {
            match serde_json::from_str::<TallyMap>(&raw_tallies) {
                Ok(tallies) => config.apply_tallies(&tallies),
                Err(e) => {
                    tracing::error!(error = %e, "Discarding malformed tally blob");
                }
            }
        }

        Some(config)
    }

    /// Snapshot of the latest known state.
    pub fn current_config(&self) -> Option<ElectionConfig> {
        self.current.read().unwrap().clone()
    }

    /// Register an observer.
    ///
    /// The observer receives the current state immediately and again on
    /// every change, as full snapshots. Cancelling (or dropping) the
    /// returned handle stops further notifications.
    pub fn subscribe(
        &self,
        observer: impl Fn(Option<&ElectionConfig>) + Send + Sync + 'static,
    ) -> Subscription {
        // Hold the state lock across initial delivery and registration so a
        // concurrent mutation cannot slip between the two.
        let guard = self.current.read().unwrap();
        observer(guard.as_ref());

        let observer: Arc<crate::store::subscribers::Observer> = Arc::new(observer);
        self.subscribers.register(observer)
    }

    /// Replace the live election wholesale.
    ///
    /// The stored configuration is a reset copy (all counts coerced to 0)
    /// regardless of the counts in the passed-in value, and any previously
    /// stored tallies are discarded: a new configuration invalidates prior
    /// votes. The live aggregate becomes the reset copy.
    pub fn save_config(&self, config: ElectionConfig) {
        let reset = config.with_zeroed_counts();

        self.persist(CONFIG_KEY, &reset);
        self.remove_key(TALLY_KEY);

        {
            let mut guard = self.current.write().unwrap();
            *guard = Some(reset.clone());
        }

        tracing::info!(title = %reset.title, "Saved election configuration");
        self.subscribers.notify(Some(&reset));
    }

    /// Record one vote.
    ///
    /// Increments the named option's count by 1, persists the full tally
    /// map, and notifies observers. When no election is loaded or either id
    /// is unknown this is a no-op: no state change, no notification, and
    /// `false` is returned.
    pub fn save_vote(&self, item_id: &str, option_id: &str) -> bool {
        let snapshot = {
            let mut guard = self.current.write().unwrap();

            let config = match guard.as_mut() {
                Some(config) => config,
                None => {
                    tracing::debug!(item_id, option_id, "Vote ignored: no election loaded");
                    return false;
                }
            };

            let item = match config.voting_items.iter_mut().find(|i| i.id == item_id) {
                Some(item) => item,
                None => {
                    tracing::debug!(item_id, "Vote ignored: unknown voting item");
                    return false;
                }
            };

            let option = match item.options.iter_mut().find(|o| o.id == option_id) {
                Some(option) => option,
                None => {
                    tracing::debug!(item_id, option_id, "Vote ignored: unknown option");
                    return false;
                }
            };

            option.count += 1;
            config.clone()
        };

        self.persist(TALLY_KEY, &snapshot.tally_map());
        self.subscribers.notify(Some(&snapshot));
        true
    }

    /// Erase all persisted state and notify observers with "no election".
    /// Idempotent.
    pub fn reset(&self) {
        self.remove_key(CONFIG_KEY);
        self.remove_key(TALLY_KEY);

        {
            let mut guard = self.current.write().unwrap();
            *guard = None;
        }

        tracing::info!("Election state reset");
        self.subscribers.notify(None);
    }

    /// Number of registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Serialize and write a value, logging failures instead of raising
    /// them; in-memory state runs ahead of storage until a write succeeds.
    fn persist<T: serde::Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => {
                if let Err(e) = self.backend.put(key, &raw) {
                    tracing::error!(
                        key,
                        error = %e,
                        "Storage write failed; in-memory state is ahead of storage"
                    );
                }
            }
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to serialize state for storage");
            }
        }
    }

    fn remove_key(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            tracing::error!(key, error = %e, "Failed to remove stored key");
        }
    }
}
