//! Generation counter for discarding stale asynchronous results.
//!
//! Work started for one state captures a [`Ticket`]; any later transition
//! advances the [`Generation`]. When the work completes, its ticket is
//! compared with the current generation and the result is dropped on
//! mismatch.

/// Monotonic counter of state transitions.
#[derive(Debug, Default)]
pub struct Generation {
    current: u64,
}

/// Snapshot of a [`Generation`] taken when work is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidates every outstanding ticket and returns a fresh one.
    pub fn advance(&mut self) -> Ticket {
        self.current = self.current.wrapping_add(1);
        Ticket(self.current)
    }

    pub fn current(&self) -> Ticket {
        Ticket(self.current)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }
}

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_invalidates_previous_ticket() {
        let mut generation = Generation::new();
        let first = generation.advance();
        assert!(generation.is_current(first));

        let second = generation.advance();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert_ne!(first, second);
    }

    #[test]
    fn test_current_matches_last_advance() {
        let mut generation = Generation::new();
        let ticket = generation.advance();
        assert_eq!(generation.current(), ticket);
        assert_eq!(ticket.value(), 1);
    }
}
