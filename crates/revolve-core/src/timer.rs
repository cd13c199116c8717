//! Restartable single-shot delay.
//!
//! The engine is polled once per frame by the embedding view layer, so a
//! timer is just a deadline: `fire` reports true exactly once when the
//! deadline has passed and the caller re-arms as needed. Autoplay and the
//! transition-completion window are both built on this.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Timer {
    deadline: Option<Instant>,
    default_delay: Duration,
}

impl Timer {
    /// Create a timer armed at `now + default_delay`.
    pub fn new(now: Instant, default_delay: Duration) -> Self {
        Self {
            deadline: Some(now + default_delay),
            default_delay,
        }
    }

    /// Create an idle timer; `start` or `set` arms it later.
    pub fn unarmed(default_delay: Duration) -> Self {
        Self {
            deadline: None,
            default_delay,
        }
    }

    /// Cancel any pending delay. Idempotent.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    /// Arm for the default delay if nothing is pending.
    pub fn start(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.default_delay);
        }
    }

    /// Cancel any pending delay and arm a new one. A zero `delay` falls
    /// back to the default delay; callers pass `Duration::ZERO` to mean
    /// "no override".
    pub fn set(&mut self, now: Instant, delay: Duration) {
        let delay = if delay.is_zero() {
            self.default_delay
        } else {
            delay
        };
        self.deadline = Some(now + delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarm and report true once the deadline has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
