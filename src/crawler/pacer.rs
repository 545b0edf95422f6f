//! Fixed-interval dispatch pacing
//!
//! Reimplements the inter-post delay as a rate limiter feeding the worker
//! pool: each [`Pacer::acquire`] call claims the next dispatch slot, so
//! consecutive pipeline starts are spaced at least one interval apart no
//! matter how many workers are waiting. A zero interval disables pacing
//! entirely.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Spaces task starts at a fixed interval.
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl Pacer {
    /// Create a pacer dispatching at most one start per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Wait until the next dispatch slot.
    ///
    /// The first caller is released immediately; the i-th caller is
    /// released no earlier than `interval * i` after the first.
    pub async fn acquire(&self) {
        if self.interval.is_zero() {
            return;
        }

        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(at) if at > now => at,
                _ => now,
            };
            *next = Some(slot + self.interval);
            slot
        };

        sleep_until(slot).await;
    }
}
