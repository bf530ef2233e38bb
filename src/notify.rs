//! User acknowledgements.
//!
//! The debug panel confirms a filename selection with a short message.
//! Nothing here blocks: toasts are queued for the host to drain (the HTTP
//! host returns them from `GET /api/toasts`, the CLI prints them).

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Mutex, PoisonError};

use crate::traits::Notifier;

/// Oldest toasts are dropped past this many.
const MAX_PENDING_TOASTS: usize = 32;

/// A message waiting to be shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// [`Notifier`] that buffers toasts until the host drains them.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: Mutex<Vec<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every pending toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, message: &str) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending.len() >= MAX_PENDING_TOASTS {
            pending.remove(0);
        }
        tracing::debug!(toast = message, "queued acknowledgement");
        pending.push(Toast {
            message: message.to_string(),
            created_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_in_order_and_empties() {
        let queue = ToastQueue::new();
        queue.notify("first");
        queue.notify("second");
        let drained: Vec<String> = queue.drain().into_iter().map(|t| t.message).collect();
        assert_eq!(drained, vec!["first", "second"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_is_bounded() {
        let queue = ToastQueue::new();
        for i in 0..(MAX_PENDING_TOASTS + 5) {
            queue.notify(&format!("toast {}", i));
        }
        let drained = queue.drain();
        assert_eq!(drained.len(), MAX_PENDING_TOASTS);
        assert_eq!(drained[0].message, "toast 5");
    }
}
