use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Identifies one navigation: the route parameter plus a generation number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    key: String,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Tracks the latest navigation so results of superseded ones can be dropped.
#[derive(Debug, Default)]
pub struct RequestGuard {
    generation: AtomicU64,
    latest: Mutex<Option<Ticket>>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a navigation to `key`. Any earlier ticket stops being current.
    pub fn begin(&self, key: &str) -> Ticket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let ticket = Ticket {
            generation,
            key: key.to_string(),
        };
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(ticket.clone());
        ticket
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|latest| latest == ticket)
    }

    /// Pass `value` through only if `ticket` is still the latest navigation.
    pub fn accept<T>(&self, ticket: &Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(
                "Dropping stale result for '{}' (generation {})",
                ticket.key,
                ticket.generation
            );
            None
        }
    }
}
