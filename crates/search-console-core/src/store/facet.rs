//! A single observable value.

use tokio::sync::watch;

/// One observable, replaceable value of the shared store.
///
/// Backed by a [`watch`] channel: writers replace the whole value, readers
/// see the new value on their next read, and subscribers are woken once per
/// change. Writing a value equal to the current one is a no-op and wakes
/// nobody, so consumers react to transitions rather than to writes.
///
/// Subscriptions are plain [`watch::Receiver`]s; dropping one unsubscribes.
#[derive(Debug)]
pub struct Facet<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + PartialEq> Facet<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replaces the value. Returns `true` if it changed.
    pub fn set(&self, value: T) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    /// Replaces the value with one computed from the previous value.
    /// Returns `true` if it changed.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        self.tx.send_if_modified(|current| {
            let next = f(current);
            if next == *current {
                false
            } else {
                *current = next;
                true
            }
        })
    }

    /// Subscribes to changes. The receiver starts with the current value
    /// marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone + PartialEq + Default> Default for Facet<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
