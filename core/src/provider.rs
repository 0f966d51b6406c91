//! Data provider seam.
//!
//! RULE: View logic never owns data literals. Everything a page renders
//! comes through a ComplaintProvider, so the fixture source can be
//! swapped for the SQLite store (or a real backend) without touching the
//! tracker or dashboard.

use crate::{
    complaint::{ComplaintRecord, ComplaintStatus, Priority, Sentiment, TimelineEntry},
    error::{PortalError, PortalResult},
    store::PortalStore,
};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One stat card on the dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortalStat {
    pub label: String,
    pub value: String,
    /// Week-over-week delta in percent; negative is a drop.
    pub change_pct: i32,
}

/// A labelled count for the distribution panels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountRow {
    pub label: String,
    pub count: i64,
}

/// One row of the active-complaints table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplaintSummary {
    pub id: String,
    pub subject: String,
    pub category: String,
    pub priority: Priority,
    pub status: ComplaintStatus,
    pub created: DateTime<Utc>,
    pub sentiment: Sentiment,
    pub urgency_score: u8,
}

/// Everything the tracker and dashboard read.
pub trait ComplaintProvider {
    /// Keyed lookup. `Ok(None)` means no record for that token.
    fn fetch_complaint(&self, token: &str) -> PortalResult<Option<ComplaintRecord>>;

    fn portal_stats(&self) -> PortalResult<Vec<PortalStat>>;
    fn priority_distribution(&self) -> PortalResult<Vec<CountRow>>;
    fn category_breakdown(&self) -> PortalResult<Vec<CountRow>>;
    fn recent_complaints(&self) -> PortalResult<Vec<ComplaintSummary>>;
    fn analytics_insights(&self) -> PortalResult<Vec<String>>;
}

pub const MAX_TOKEN_LEN: usize = 64;

/// Token validation for real keyed lookups. Whitespace-only tokens
/// never get here (the tracker treats them as a no-op); this rejects
/// tokens that are structurally unusable as a key. The fixture source
/// skips it: the mock echoed anything.
pub fn validate_token(token: &str) -> PortalResult<()> {
    if token.len() > MAX_TOKEN_LEN || token.chars().any(|c| c.is_control()) {
        return Err(PortalError::InvalidToken {
            token: token.to_string(),
        });
    }
    Ok(())
}

// ── Fixture source ─────────────────────────────────────────────────

/// The portal's original hard-coded dataset, served through the provider
/// seam. Lookup reproduces the mock faithfully: any non-empty token
/// resolves to the reference record with `id` set to the token verbatim.
pub struct FixtureProvider;

pub(crate) fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    // Fixture literals; every call site is a valid calendar date.
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single().expect("valid fixture timestamp")
}

impl FixtureProvider {
    /// The reference record behind the tracking page, with the caller's
    /// token echoed into `id`.
    pub fn reference_record(token: &str) -> ComplaintRecord {
        ComplaintRecord {
            id: token.to_string(),
            subject: "Train delay and poor cleanliness".to_string(),
            category: "Train Delay/Cancellation".to_string(),
            priority: Priority::High,
            status: ComplaintStatus::InProgress,
            created: ts(2024, 1, 15, 10, 30),
            updated: ts(2024, 1, 16, 14, 20),
            estimated_resolution: ts(2024, 1, 18, 16, 0),
            assigned_to: "Railway Officer - John Doe".to_string(),
            sentiment: Sentiment::Negative,
            urgency_score: 85,
            updates: vec![
                TimelineEntry {
                    date: ts(2024, 1, 15, 10, 30),
                    status: ComplaintStatus::Submitted,
                    message: "Complaint received and assigned token ID".to_string(),
                    officer: "System".to_string(),
                },
                TimelineEntry {
                    date: ts(2024, 1, 15, 11, 15),
                    status: ComplaintStatus::Categorized,
                    message: "Complaint categorized as Train Delay/Cancellation with HIGH priority"
                        .to_string(),
                    officer: "AI System".to_string(),
                },
                TimelineEntry {
                    date: ts(2024, 1, 16, 9, 0),
                    status: ComplaintStatus::Assigned,
                    message: "Complaint assigned to Railway Officer - John Doe".to_string(),
                    officer: "Admin".to_string(),
                },
                TimelineEntry {
                    date: ts(2024, 1, 16, 14, 20),
                    status: ComplaintStatus::InProgress,
                    message: "Investigation started. Station manager contacted for details."
                        .to_string(),
                    officer: "John Doe".to_string(),
                },
            ],
        }
    }
}

impl ComplaintProvider for FixtureProvider {
    fn fetch_complaint(&self, token: &str) -> PortalResult<Option<ComplaintRecord>> {
        Ok(Some(Self::reference_record(token)))
    }

    fn portal_stats(&self) -> PortalResult<Vec<PortalStat>> {
        Ok(vec![
            PortalStat {
                label: "Total Complaints".into(),
                value: "1,247".into(),
                change_pct: 12,
            },
            PortalStat {
                label: "Pending Resolution".into(),
                value: "89".into(),
                change_pct: -8,
            },
            PortalStat {
                label: "Resolved Today".into(),
                value: "34".into(),
                change_pct: 15,
            },
            PortalStat {
                label: "Avg Resolution Time".into(),
                value: "2.3 days".into(),
                change_pct: -5,
            },
        ])
    }

    fn priority_distribution(&self) -> PortalResult<Vec<CountRow>> {
        Ok(vec![
            CountRow { label: "Urgent".into(), count: 23 },
            CountRow { label: "High".into(), count: 45 },
            CountRow { label: "Medium".into(), count: 78 },
            CountRow { label: "Low".into(), count: 34 },
        ])
    }

    fn category_breakdown(&self) -> PortalResult<Vec<CountRow>> {
        Ok(vec![
            CountRow { label: "Train Delays".into(), count: 67 },
            CountRow { label: "Cleanliness".into(), count: 45 },
            CountRow { label: "Staff Behavior".into(), count: 34 },
            CountRow { label: "Technical Issues".into(), count: 23 },
        ])
    }

    fn recent_complaints(&self) -> PortalResult<Vec<ComplaintSummary>> {
        Ok(vec![
            ComplaintSummary {
                id: "RWY-2024-001234".into(),
                subject: "Train delay and poor cleanliness".into(),
                category: "Train Delay".into(),
                priority: Priority::High,
                status: ComplaintStatus::InProgress,
                created: ts(2024, 1, 16, 14, 20),
                sentiment: Sentiment::Negative,
                urgency_score: 85,
            },
            ComplaintSummary {
                id: "RWY-2024-001235".into(),
                subject: "Staff behavior issue at platform".into(),
                category: "Staff Behavior".into(),
                priority: Priority::Medium,
                status: ComplaintStatus::Assigned,
                created: ts(2024, 1, 16, 13, 45),
                sentiment: Sentiment::Neutral,
                urgency_score: 62,
            },
            ComplaintSummary {
                id: "RWY-2024-001236".into(),
                subject: "Ticket booking system error".into(),
                category: "Technical".into(),
                priority: Priority::Urgent,
                status: ComplaintStatus::Submitted,
                created: ts(2024, 1, 16, 13, 20),
                sentiment: Sentiment::Negative,
                urgency_score: 92,
            },
        ])
    }

    fn analytics_insights(&self) -> PortalResult<Vec<String>> {
        Ok(vec![
            "Train delay complaints increased 15% this week".into(),
            "Peak complaint hours: 8-10 AM and 6-8 PM".into(),
            "89% accuracy in automated categorization".into(),
            "Average sentiment score improved by 12%".into(),
        ])
    }
}

// ── Store-backed source ────────────────────────────────────────────

/// Real keyed lookups and SQL aggregates over the portal store. Unknown
/// tokens come back `Ok(None)`, which the tracker surfaces as NotFound.
pub struct StoreProvider<'a> {
    store: &'a PortalStore,
    recent_limit: usize,
}

impl<'a> StoreProvider<'a> {
    pub fn new(store: &'a PortalStore, recent_limit: usize) -> Self {
        Self {
            store,
            recent_limit,
        }
    }
}

fn priority_display(label: &str) -> String {
    match Priority::parse(label) {
        Some(Priority::Low) => "Low".to_string(),
        Some(Priority::Medium) => "Medium".to_string(),
        Some(Priority::High) => "High".to_string(),
        Some(Priority::Urgent) => "Urgent".to_string(),
        None => label.to_string(),
    }
}

impl ComplaintProvider for StoreProvider<'_> {
    fn fetch_complaint(&self, token: &str) -> PortalResult<Option<ComplaintRecord>> {
        validate_token(token)?;
        self.store.get_complaint(token)
    }

    fn portal_stats(&self) -> PortalResult<Vec<PortalStat>> {
        let total = self.store.total_count()?;
        let open = self.store.open_count()?;
        let resolved = self.store.resolved_count()?;
        let avg_days = self.store.avg_resolution_days()?;
        // Week-over-week deltas need history the store does not keep yet.
        Ok(vec![
            PortalStat {
                label: "Total Complaints".into(),
                value: total.to_string(),
                change_pct: 0,
            },
            PortalStat {
                label: "Pending Resolution".into(),
                value: open.to_string(),
                change_pct: 0,
            },
            PortalStat {
                label: "Resolved".into(),
                value: resolved.to_string(),
                change_pct: 0,
            },
            PortalStat {
                label: "Avg Resolution Time".into(),
                value: format!("{avg_days:.1} days"),
                change_pct: 0,
            },
        ])
    }

    fn priority_distribution(&self) -> PortalResult<Vec<CountRow>> {
        let mut rows = self.store.priority_counts()?;
        // Severity order, most urgent first.
        rows.sort_by_key(|row| match Priority::parse(&row.label) {
            Some(p) => std::cmp::Reverse(p),
            None => std::cmp::Reverse(Priority::Low),
        });
        Ok(rows
            .into_iter()
            .map(|row| CountRow {
                label: priority_display(&row.label),
                count: row.count,
            })
            .collect())
    }

    fn category_breakdown(&self) -> PortalResult<Vec<CountRow>> {
        self.store.category_counts()
    }

    fn recent_complaints(&self) -> PortalResult<Vec<ComplaintSummary>> {
        self.store.recent_complaints(self.recent_limit)
    }

    fn analytics_insights(&self) -> PortalResult<Vec<String>> {
        let mut insights = Vec::new();
        if let Some(top) = self.store.category_counts()?.first() {
            insights.push(format!(
                "Top category this period: {} ({} complaints)",
                top.label, top.count
            ));
        }
        insights.push(format!(
            "{} complaints awaiting resolution",
            self.store.open_count()?
        ));
        insights.push(format!(
            "Average resolution time: {:.1} days",
            self.store.avg_resolution_days()?
        ));
        Ok(insights)
    }
}
