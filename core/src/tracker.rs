//! Complaint tracking session — the lookup state machine.
//!
//! The portal page flow: enter a token, watch a spinner, read the record.
//! The session models that flow against an explicit clock: `begin_lookup`
//! opens a loading window of `latency_ms`, `poll` resolves it once the
//! clock passes the deadline.
//!
//! RULES:
//!   - An empty or whitespace-only token is a strict no-op.
//!   - The loading flag is true strictly between begin and resolution.
//!   - Every begin bumps the request generation; a result carrying an
//!     older generation is dropped, never applied. The original page had
//!     no such guard and a stale response could clobber a newer lookup.

use crate::{
    clock::PortalClock,
    complaint::ComplaintRecord,
    error::PortalError,
    provider::ComplaintProvider,
    types::{Generation, Millis, TokenId},
};

/// Observed latency of the original portal: 1.5 seconds.
pub const DEFAULT_LOOKUP_LATENCY_MS: Millis = 1500;

/// Why a lookup came back without a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// Token failed client-side validation.
    InvalidToken,
    /// Backend or connectivity failure; retry may succeed.
    Upstream(String),
}

/// The discriminated result of one lookup request.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(ComplaintRecord),
    NotFound,
    Failed(LookupFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerState {
    Idle,
    Loading {
        token: TokenId,
        generation: Generation,
        resolve_at: Millis,
    },
    Resolved(ComplaintRecord),
    NotFound {
        token: TokenId,
    },
    Failed {
        token: TokenId,
        failure: LookupFailure,
    },
}

/// View-local tracking state. All state is owned by the session that
/// created it; discarded on teardown.
pub struct TrackerSession {
    state: TrackerState,
    generation: Generation,
    latency_ms: Millis,
}

impl TrackerSession {
    pub fn new(latency_ms: Millis) -> Self {
        Self {
            state: TrackerState::Idle,
            generation: 0,
            latency_ms,
        }
    }

    /// Start a lookup for `token`. Returns false (and changes nothing)
    /// for empty or whitespace-only input; otherwise the session is
    /// loading immediately and the previous in-flight lookup, if any, is
    /// superseded.
    pub fn begin_lookup(&mut self, token: &str, clock: &PortalClock) -> bool {
        if token.trim().is_empty() {
            return false;
        }
        self.generation += 1;
        // The token is echoed back verbatim, untrimmed, like the page did.
        self.state = TrackerState::Loading {
            token: token.to_string(),
            generation: self.generation,
            resolve_at: clock.now_ms() + self.latency_ms,
        };
        log::debug!(
            "lookup gen={} token={:?} resolves at {}ms",
            self.generation,
            token,
            clock.now_ms() + self.latency_ms
        );
        true
    }

    /// Drive the pending lookup. Before the deadline this is a no-op;
    /// at or after it, the provider is consulted and the outcome applied.
    /// Returns the outcome when this call resolved the lookup.
    pub fn poll(
        &mut self,
        clock: &PortalClock,
        provider: &dyn ComplaintProvider,
    ) -> Option<LookupOutcome> {
        let (token, generation) = match &self.state {
            TrackerState::Loading {
                token,
                generation,
                resolve_at,
            } if clock.now_ms() >= *resolve_at => (token.clone(), *generation),
            _ => return None,
        };

        let outcome = match provider.fetch_complaint(&token) {
            Ok(Some(record)) => LookupOutcome::Found(record),
            Ok(None) => LookupOutcome::NotFound,
            Err(PortalError::InvalidToken { .. }) => {
                LookupOutcome::Failed(LookupFailure::InvalidToken)
            }
            Err(e) => LookupOutcome::Failed(LookupFailure::Upstream(e.to_string())),
        };

        if self.apply_result(generation, outcome.clone()) {
            Some(outcome)
        } else {
            None
        }
    }

    /// Apply a lookup result fetched out-of-band. Results from a
    /// superseded generation are dropped. Returns whether it applied.
    pub fn apply_result(&mut self, generation: Generation, outcome: LookupOutcome) -> bool {
        if generation != self.generation {
            log::warn!(
                "dropping stale lookup result: gen={} current={}",
                generation,
                self.generation
            );
            return false;
        }
        let token = match &self.state {
            TrackerState::Loading { token, .. } => token.clone(),
            // Nothing in flight for this generation; ignore.
            _ => return false,
        };
        self.state = match outcome {
            LookupOutcome::Found(record) => TrackerState::Resolved(record),
            LookupOutcome::NotFound => TrackerState::NotFound { token },
            LookupOutcome::Failed(failure) => TrackerState::Failed { token, failure },
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, TrackerState::Loading { .. })
    }

    pub fn current_record(&self) -> Option<&ComplaintRecord> {
        match &self.state {
            TrackerState::Resolved(record) => Some(record),
            _ => None,
        }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn current_generation(&self) -> Generation {
        self.generation
    }

    /// Discard the current record and pending lookup (view teardown).
    pub fn reset(&mut self) {
        self.state = TrackerState::Idle;
    }
}

impl Default for TrackerSession {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKUP_LATENCY_MS)
    }
}
