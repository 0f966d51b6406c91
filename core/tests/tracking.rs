//! Tracker session tests — the lookup state machine.

use railcms_core::clock::PortalClock;
use railcms_core::complaint::ComplaintRecord;
use railcms_core::error::{PortalError, PortalResult};
use railcms_core::provider::{
    ComplaintProvider, ComplaintSummary, CountRow, FixtureProvider, PortalStat, StoreProvider,
    MAX_TOKEN_LEN,
};
use railcms_core::store::PortalStore;
use railcms_core::tracker::{
    LookupFailure, LookupOutcome, TrackerSession, TrackerState, DEFAULT_LOOKUP_LATENCY_MS,
};

/// A provider whose backend is down. Used to exercise the Upstream path
/// the original mock could never produce.
struct DownProvider;

impl ComplaintProvider for DownProvider {
    fn fetch_complaint(&self, _token: &str) -> PortalResult<Option<ComplaintRecord>> {
        Err(PortalError::Upstream("connection refused".to_string()))
    }
    fn portal_stats(&self) -> PortalResult<Vec<PortalStat>> {
        Ok(vec![])
    }
    fn priority_distribution(&self) -> PortalResult<Vec<CountRow>> {
        Ok(vec![])
    }
    fn category_breakdown(&self) -> PortalResult<Vec<CountRow>> {
        Ok(vec![])
    }
    fn recent_complaints(&self) -> PortalResult<Vec<ComplaintSummary>> {
        Ok(vec![])
    }
    fn analytics_insights(&self) -> PortalResult<Vec<String>> {
        Ok(vec![])
    }
}

/// Empty and whitespace-only tokens are strict no-ops: no loading flag,
/// no record, no state change.
#[test]
fn empty_token_is_a_noop() {
    let clock = PortalClock::new();
    let mut session = TrackerSession::default();

    assert!(!session.begin_lookup("", &clock));
    assert!(!session.begin_lookup("   ", &clock));
    assert!(!session.begin_lookup("\t\n", &clock));

    assert!(!session.is_loading());
    assert!(session.current_record().is_none());
    assert_eq!(*session.state(), TrackerState::Idle);

    let mut clock = clock;
    clock.advance(DEFAULT_LOOKUP_LATENCY_MS * 2);
    assert!(session.poll(&clock, &FixtureProvider).is_none());
}

/// The loading flag is true strictly between begin and resolution.
#[test]
fn loading_flag_spans_begin_to_resolution() {
    let mut clock = PortalClock::new();
    let mut session = TrackerSession::default();

    assert!(!session.is_loading());
    assert!(session.begin_lookup("RWY-2024-001234", &clock));
    assert!(session.is_loading(), "loading must be observable synchronously");

    // 1499 ms in: still pending.
    clock.advance(DEFAULT_LOOKUP_LATENCY_MS - 1);
    assert!(session.poll(&clock, &FixtureProvider).is_none());
    assert!(session.is_loading());

    // Deadline reached: resolves on this poll.
    clock.advance(1);
    let outcome = session.poll(&clock, &FixtureProvider);
    assert!(matches!(outcome, Some(LookupOutcome::Found(_))));
    assert!(!session.is_loading());

    // Further polls are no-ops.
    clock.advance(DEFAULT_LOOKUP_LATENCY_MS);
    assert!(session.poll(&clock, &FixtureProvider).is_none());
}

/// The record echoes the caller's token verbatim, whatever it is.
/// Length and charset are not the fixture's concern.
#[test]
fn record_id_echoes_token_verbatim() {
    let long = "X".repeat(MAX_TOKEN_LEN + 1);
    for token in ["RWY-2024-001234", "platform 37/B", " padded-token ", long.as_str()] {
        let mut clock = PortalClock::new();
        let mut session = TrackerSession::default();
        assert!(session.begin_lookup(token, &clock));
        clock.advance(DEFAULT_LOOKUP_LATENCY_MS);
        session.poll(&clock, &FixtureProvider);
        let record = session.current_record().expect("record after delay");
        assert_eq!(record.id, token);
    }
}

/// The reference scenario: RWY-2024-001234 resolves to the in-progress
/// record with its four-entry timeline, first entry "submitted".
#[test]
fn reference_token_scenario() {
    let mut clock = PortalClock::new();
    let mut session = TrackerSession::default();
    session.begin_lookup("RWY-2024-001234", &clock);
    clock.advance(DEFAULT_LOOKUP_LATENCY_MS);
    session.poll(&clock, &FixtureProvider);

    let record = session.current_record().expect("record after delay");
    assert_eq!(record.id, "RWY-2024-001234");
    assert_eq!(record.status.as_str(), "in_progress");
    assert_eq!(record.updates.len(), 4);
    assert_eq!(record.updates[0].status.as_str(), "submitted");
    // Reference timeline dates are non-decreasing.
    for pair in record.updates.windows(2) {
        assert!(pair[0].date <= pair[1].date);
    }
}

/// A newer lookup supersedes the in-flight one; only the latest
/// generation's result resolves.
#[test]
fn newer_lookup_supersedes_pending_one() {
    let mut clock = PortalClock::new();
    let mut session = TrackerSession::default();

    session.begin_lookup("FIRST", &clock);
    // First lookup's deadline passes unobserved, then a second begins.
    clock.advance(DEFAULT_LOOKUP_LATENCY_MS + 100);
    session.begin_lookup("SECOND", &clock);

    // The second lookup is not due yet, so nothing resolves — the first
    // one's elapsed deadline must not leak through.
    assert!(session.poll(&clock, &FixtureProvider).is_none());
    assert!(session.is_loading());

    clock.advance(DEFAULT_LOOKUP_LATENCY_MS);
    session.poll(&clock, &FixtureProvider);
    let record = session.current_record().expect("second lookup resolves");
    assert_eq!(record.id, "SECOND");
}

/// Out-of-band results carrying a stale generation are dropped.
#[test]
fn stale_generation_result_is_dropped() {
    let clock = PortalClock::new();
    let mut session = TrackerSession::default();

    session.begin_lookup("OLD", &clock);
    let old_gen = session.current_generation();
    session.begin_lookup("NEW", &clock);

    let stale = LookupOutcome::Found(FixtureProvider::reference_record("OLD"));
    assert!(!session.apply_result(old_gen, stale));
    assert!(session.is_loading(), "stale result must not end the newer lookup");

    let fresh = LookupOutcome::Found(FixtureProvider::reference_record("NEW"));
    assert!(session.apply_result(session.current_generation(), fresh));
    assert_eq!(session.current_record().unwrap().id, "NEW");
}

/// Tokens that are structurally unusable as a key (over-length or
/// containing control characters) fail a real keyed lookup with the
/// InvalidToken outcome.
#[test]
fn structurally_invalid_token_fails_store_lookup() {
    let store = PortalStore::in_memory().unwrap();
    store.migrate().unwrap();
    let provider = StoreProvider::new(&store, 10);

    let long_token = "X".repeat(MAX_TOKEN_LEN + 1);
    for token in [long_token.as_str(), "RWY-2024\u{7}001234"] {
        let mut clock = PortalClock::new();
        let mut session = TrackerSession::default();
        assert!(session.begin_lookup(token, &clock));
        clock.advance(DEFAULT_LOOKUP_LATENCY_MS);

        let outcome = session.poll(&clock, &provider);
        assert_eq!(
            outcome,
            Some(LookupOutcome::Failed(LookupFailure::InvalidToken))
        );
        assert!(matches!(session.state(), TrackerState::Failed { .. }));
        assert!(session.current_record().is_none());
    }
}

/// An unknown token against the real store surfaces NotFound, not a
/// synthetic record.
#[test]
fn unknown_token_is_not_found_on_store_provider() {
    let store = PortalStore::in_memory().unwrap();
    store.migrate().unwrap();
    let provider = railcms_core::provider::StoreProvider::new(&store, 10);

    let mut clock = PortalClock::new();
    let mut session = TrackerSession::default();
    session.begin_lookup("RWY-2024-999999", &clock);
    clock.advance(DEFAULT_LOOKUP_LATENCY_MS);
    let outcome = session.poll(&clock, &provider);

    assert_eq!(outcome, Some(LookupOutcome::NotFound));
    assert!(session.current_record().is_none());
    assert!(matches!(session.state(), TrackerState::NotFound { .. }));
}

/// Backend failure surfaces as a discriminated Upstream outcome, not a
/// panic or a silent hang.
#[test]
fn upstream_failure_is_discriminated() {
    let mut clock = PortalClock::new();
    let mut session = TrackerSession::default();
    session.begin_lookup("RWY-2024-001234", &clock);
    clock.advance(DEFAULT_LOOKUP_LATENCY_MS);

    let outcome = session.poll(&clock, &DownProvider);
    match outcome {
        Some(LookupOutcome::Failed(LookupFailure::Upstream(reason))) => {
            assert!(reason.contains("connection refused"));
        }
        other => panic!("expected upstream failure, got {other:?}"),
    }
    assert!(!session.is_loading());
}

/// Reset discards the record (view teardown semantics).
#[test]
fn reset_discards_record() {
    let mut clock = PortalClock::new();
    let mut session = TrackerSession::default();
    session.begin_lookup("RWY-2024-001234", &clock);
    clock.advance(DEFAULT_LOOKUP_LATENCY_MS);
    session.poll(&clock, &FixtureProvider);
    assert!(session.current_record().is_some());

    session.reset();
    assert!(session.current_record().is_none());
    assert_eq!(*session.state(), TrackerState::Idle);
}
