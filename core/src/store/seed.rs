//! Reference dataset for demos and tests.
//!
//! The same complaints the portal pages displayed, loaded as real rows
//! so the store-backed provider has something to serve out of the box.

use super::PortalStore;
use crate::{
    complaint::{ComplaintRecord, ComplaintStatus, Priority, Sentiment, TimelineEntry},
    error::PortalResult,
    provider::{ts, FixtureProvider},
};

/// Token of the fully worked reference complaint.
pub const REFERENCE_TOKEN: &str = "RWY-2024-001234";

impl PortalStore {
    /// Load the reference complaints. Idempotence is not needed; call
    /// once on a freshly migrated database.
    pub fn seed_reference_data(&self) -> PortalResult<()> {
        self.insert_complaint(&FixtureProvider::reference_record(REFERENCE_TOKEN))?;

        self.insert_complaint(&ComplaintRecord {
            id: "RWY-2024-001235".to_string(),
            subject: "Staff behavior issue at platform".to_string(),
            category: "Staff Behavior".to_string(),
            priority: Priority::Medium,
            status: ComplaintStatus::Assigned,
            created: ts(2024, 1, 16, 13, 45),
            updated: ts(2024, 1, 16, 16, 0),
            estimated_resolution: ts(2024, 1, 21, 13, 45),
            assigned_to: "Railway Officer - Priya Sharma".to_string(),
            sentiment: Sentiment::Neutral,
            urgency_score: 62,
            updates: vec![
                TimelineEntry {
                    date: ts(2024, 1, 16, 13, 45),
                    status: ComplaintStatus::Submitted,
                    message: "Complaint received and assigned token ID".to_string(),
                    officer: "System".to_string(),
                },
                TimelineEntry {
                    date: ts(2024, 1, 16, 14, 5),
                    status: ComplaintStatus::Categorized,
                    message: "Complaint categorized as Staff Behavior with MEDIUM priority"
                        .to_string(),
                    officer: "AI System".to_string(),
                },
                TimelineEntry {
                    date: ts(2024, 1, 16, 16, 0),
                    status: ComplaintStatus::Assigned,
                    message: "Complaint assigned to Railway Officer - Priya Sharma".to_string(),
                    officer: "Admin".to_string(),
                },
            ],
        })?;

        self.insert_complaint(&ComplaintRecord {
            id: "RWY-2024-001236".to_string(),
            subject: "Ticket booking system error".to_string(),
            category: "Technical".to_string(),
            priority: Priority::Urgent,
            status: ComplaintStatus::Submitted,
            created: ts(2024, 1, 16, 13, 20),
            updated: ts(2024, 1, 16, 13, 20),
            estimated_resolution: ts(2024, 1, 17, 13, 20),
            assigned_to: "Unassigned".to_string(),
            sentiment: Sentiment::Negative,
            urgency_score: 92,
            updates: vec![TimelineEntry {
                date: ts(2024, 1, 16, 13, 20),
                status: ComplaintStatus::Submitted,
                message: "Complaint received and assigned token ID".to_string(),
                officer: "System".to_string(),
            }],
        })?;

        // One resolved case so resolution-time aggregates are non-trivial.
        self.insert_complaint(&ComplaintRecord {
            id: "RWY-2024-001230".to_string(),
            subject: "Coach floor not cleaned overnight".to_string(),
            category: "Cleanliness".to_string(),
            priority: Priority::Low,
            status: ComplaintStatus::Resolved,
            created: ts(2024, 1, 12, 8, 10),
            updated: ts(2024, 1, 14, 17, 30),
            estimated_resolution: ts(2024, 1, 19, 8, 10),
            assigned_to: "Railway Officer - Anil Kumar".to_string(),
            sentiment: Sentiment::Negative,
            urgency_score: 44,
            updates: vec![
                TimelineEntry {
                    date: ts(2024, 1, 12, 8, 10),
                    status: ComplaintStatus::Submitted,
                    message: "Complaint received and assigned token ID".to_string(),
                    officer: "System".to_string(),
                },
                TimelineEntry {
                    date: ts(2024, 1, 12, 8, 55),
                    status: ComplaintStatus::Categorized,
                    message: "Complaint categorized as Cleanliness with LOW priority".to_string(),
                    officer: "AI System".to_string(),
                },
                TimelineEntry {
                    date: ts(2024, 1, 14, 17, 30),
                    status: ComplaintStatus::Resolved,
                    message: "Cleaning crew schedule corrected; passenger notified.".to_string(),
                    officer: "Anil Kumar".to_string(),
                },
            ],
        })?;

        Ok(())
    }
}
