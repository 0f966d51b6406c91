//! Store tests — seeded reference data, timeline ordering, aggregates.

use chrono::{TimeZone, Utc};
use railcms_core::complaint::{ComplaintStatus, TimelineEntry};
use railcms_core::store::{PortalStore, REFERENCE_TOKEN};

fn seeded_store() -> PortalStore {
    let store = PortalStore::in_memory().unwrap();
    store.migrate().unwrap();
    store.seed_reference_data().unwrap();
    store
}

#[test]
fn reference_record_reads_back_with_full_timeline() {
    let store = seeded_store();
    let record = store
        .get_complaint(REFERENCE_TOKEN)
        .unwrap()
        .expect("reference record seeded");

    assert_eq!(record.id, REFERENCE_TOKEN);
    assert_eq!(record.status, ComplaintStatus::InProgress);
    assert_eq!(record.updates.len(), 4);
    for pair in record.updates.windows(2) {
        assert!(pair[0].date <= pair[1].date);
    }
}

#[test]
fn unknown_token_reads_back_none() {
    let store = seeded_store();
    assert!(store.get_complaint("RWY-2024-424242").unwrap().is_none());
}

/// Timeline rows come back in date order even when appended out of order.
#[test]
fn timeline_is_returned_in_date_order() {
    let store = seeded_store();
    let later = TimelineEntry {
        date: Utc.with_ymd_and_hms(2024, 1, 17, 12, 0, 0).unwrap(),
        status: ComplaintStatus::Resolved,
        message: "Refund processed and cleaning verified.".to_string(),
        officer: "John Doe".to_string(),
    };
    let earlier = TimelineEntry {
        date: Utc.with_ymd_and_hms(2024, 1, 16, 18, 0, 0).unwrap(),
        status: ComplaintStatus::InProgress,
        message: "Station manager statement recorded.".to_string(),
        officer: "John Doe".to_string(),
    };
    // Append newest first; the read side must still sort by date.
    store.append_timeline_entry(REFERENCE_TOKEN, &later).unwrap();
    store.append_timeline_entry(REFERENCE_TOKEN, &earlier).unwrap();

    let record = store.get_complaint(REFERENCE_TOKEN).unwrap().unwrap();
    assert_eq!(record.updates.len(), 6);
    for pair in record.updates.windows(2) {
        assert!(pair[0].date <= pair[1].date);
    }
    assert_eq!(record.updates.last().unwrap().status, ComplaintStatus::Resolved);
}

#[test]
fn counts_match_seed_data() {
    let store = seeded_store();

    assert_eq!(store.total_count().unwrap(), 4);
    assert_eq!(store.open_count().unwrap(), 3);
    assert_eq!(store.resolved_count().unwrap(), 1);

    // The one resolved complaint took a little over two days.
    let avg = store.avg_resolution_days().unwrap();
    assert!(avg > 2.0 && avg < 3.0, "avg resolution days out of range: {avg}");

    let priorities = store.priority_counts().unwrap();
    let total: i64 = priorities.iter().map(|r| r.count).sum();
    assert_eq!(total, 4);

    let categories = store.category_counts().unwrap();
    assert!(categories.iter().any(|r| r.label == "Technical" && r.count == 1));
}

#[test]
fn recent_complaints_are_newest_first_and_capped() {
    let store = seeded_store();

    let all = store.recent_complaints(10).unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].id, "RWY-2024-001235");

    let capped = store.recent_complaints(2).unwrap();
    assert_eq!(capped.len(), 2);
    assert_eq!(capped[0].id, "RWY-2024-001235");
    assert_eq!(capped[1].id, "RWY-2024-001236");
}
