//! Portal clock — caller-advanced millisecond time.
//!
//! The original page waited on a real 1.5 s timer. Here the clock is an
//! explicit value the caller owns and advances, so tests move time
//! deterministically instead of sleeping.

use crate::types::Millis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortalClock {
    now_ms: Millis,
}

impl PortalClock {
    pub fn new() -> Self {
        Self { now_ms: 0 }
    }

    /// Start at an arbitrary epoch. Useful when replaying wall-clock traces.
    pub fn starting_at(now_ms: Millis) -> Self {
        Self { now_ms }
    }

    pub fn now_ms(&self) -> Millis {
        self.now_ms
    }

    /// Advance by `delta_ms`. Returns the new reading.
    pub fn advance(&mut self, delta_ms: Millis) -> Millis {
        self.now_ms += delta_ms;
        self.now_ms
    }
}

impl Default for PortalClock {
    fn default() -> Self {
        Self::new()
    }
}
