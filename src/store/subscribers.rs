//! Observer registry
//!
//! Explicit publish/subscribe for store state changes: a registry of
//! observer callbacks invoked synchronously on every mutation, with an
//! explicit unsubscribe handle. No queuing, no scheduling; all observers run
//! before the mutating call returns.

use std::sync::{Arc, Mutex, Weak};

use crate::store::types::ElectionConfig;

/// Callback receiving the full current state on every change.
///
/// `None` means no election is loaded.
pub type Observer = dyn Fn(Option<&ElectionConfig>) + Send + Sync;

struct RegistryInner {
    next_id: u64,
    observers: Vec<(u64, Arc<Observer>)>,
}

/// Registry of observers notified on every store mutation.
pub struct SubscriberRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(RegistryInner {
                next_id: 0,
                observers: Vec::new(),
            })),
        }
    }

    /// Register an observer. The returned [`Subscription`] cancels the
    /// registration when dropped or explicitly cancelled.
    pub fn register(&self, observer: Arc<Observer>) -> Subscription {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.observers.push((id, observer));

        tracing::debug!(subscription_id = id, "Observer registered");
        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Invoke every registered observer with the current state.
    ///
    /// Observers are cloned out of the lock before being called, so a
    /// callback may re-enter the registry (e.g. subscribe) without
    /// deadlocking.
    pub fn notify(&self, config: Option<&ElectionConfig>) {
        let observers: Vec<Arc<Observer>> = {
            let inner = self.inner.lock().unwrap();
            inner.observers.iter().map(|(_, o)| Arc::clone(o)).collect()
        };

        for observer in observers {
            (*observer)(config);
        }
    }

    /// Number of currently registered observers.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for one registered observer.
///
/// Dropping the handle (or calling [`Subscription::cancel`]) removes the
/// observer; it receives no further notifications and there are no other
/// side effects.
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<RegistryInner>>,
}

impl Subscription {
    /// Explicitly cancel this subscription.
    pub fn cancel(self) {
        // Drop does the unregistration.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            let mut inner = inner.lock().unwrap();
            inner.observers.retain(|(id, _)| *id != self.id);
            tracing::debug!(subscription_id = self.id, "Observer unregistered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_observer(counter: Arc<AtomicUsize>) -> Arc<Observer> {
        Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_notify_reaches_all_observers() {
        let registry = SubscriberRegistry::new();
        let count_a = Arc::new(AtomicUsize::new(0));
        let count_b = Arc::new(AtomicUsize::new(0));

        let _sub_a = registry.register(counting_observer(Arc::clone(&count_a)));
        let _sub_b = registry.register(counting_observer(Arc::clone(&count_b)));

        registry.notify(None);
        registry.notify(None);

        assert_eq!(count_a.load(Ordering::SeqCst), 2);
        assert_eq!(count_b.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cancel_stops_notifications() {
        let registry = SubscriberRegistry::new();
        let count = Arc::new(AtomicUsize::new(0));

        let sub = registry.register(counting_observer(Arc::clone(&count)));
        registry.notify(None);
        sub.cancel();
        registry.notify(None);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_drop_unregisters() {
        let registry = SubscriberRegistry::new();
        {
            let _sub = registry.register(Arc::new(|_| {}));
            assert_eq!(registry.len(), 1);
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_observer_may_reenter_registry() {
        let registry = Arc::new(SubscriberRegistry::new());
        let registry_clone = Arc::clone(&registry);
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);

        let _sub = registry.register(Arc::new(move |_| {
            // Calling back into the registry from an observer must not
            // deadlock.
            assert_eq!(registry_clone.len(), 1);
            count_clone.fetch_add(1, Ordering::SeqCst);
        }));

        registry.notify(None);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
