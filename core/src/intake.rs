//! Complaint intake — submission, token issuance, and automated triage.
//!
//! The passenger-facing submission form ends here: validate the form,
//! issue a public token, let triage fill in category/priority/sentiment/
//! urgency, and open the timeline with the same two system entries the
//! portal always showed (received, then categorized).

use crate::{
    complaint::{ComplaintRecord, ComplaintStatus, TimelineEntry},
    config::PortalConfig,
    error::{PortalError, PortalResult},
    rng::{PortalRng, RngStream},
    store::PortalStore,
    triage,
};
use chrono::{DateTime, Datelike, Duration, Utc};
use uuid::Uuid;

/// What the submission form collects. Field set follows the upstream
/// complaint schema (passenger id, type of train, free-text description).
#[derive(Debug, Clone)]
pub struct ComplaintSubmission {
    pub passenger_id: String,
    pub subject: String,
    pub description: String,
    pub train_type: Option<String>,
}

/// A submission after intake: public record plus the metadata that never
/// reaches the tracking page.
#[derive(Debug, Clone)]
pub struct FiledComplaint {
    /// Internal receipt id, distinct from the public token.
    pub receipt_id: String,
    pub passenger_id: String,
    pub train_type: Option<String>,
    pub description: String,
    pub record: ComplaintRecord,
}

pub struct IntakeDesk {
    config: PortalConfig,
    rng: PortalRng,
}

impl IntakeDesk {
    pub fn new(config: PortalConfig, master_seed: u64) -> Self {
        Self {
            config,
            rng: RngStream::Intake.rng(master_seed),
        }
    }

    /// Process one submission. Does not persist; see [`file_into`].
    ///
    /// [`file_into`]: IntakeDesk::file_into
    pub fn submit(
        &mut self,
        submission: ComplaintSubmission,
        filed_at: DateTime<Utc>,
    ) -> PortalResult<FiledComplaint> {
        if submission.subject.trim().is_empty() {
            return Err(PortalError::InvalidSubmission {
                reason: "subject must not be empty".to_string(),
            });
        }
        if submission.description.trim().is_empty() {
            return Err(PortalError::InvalidSubmission {
                reason: "description must not be empty".to_string(),
            });
        }

        let token = self.issue_token(filed_at);
        let text = format!("{} {}", submission.subject, submission.description);
        let category = triage::categorize(&text);
        let sentiment = triage::sentiment(&text);
        let urgency_score = triage::urgency_score(&text);
        let priority = triage::priority_for(urgency_score);

        let categorized_at = filed_at + Duration::minutes(45);
        let updates = vec![
            TimelineEntry {
                date: filed_at,
                status: ComplaintStatus::Submitted,
                message: "Complaint received and assigned token ID".to_string(),
                officer: "System".to_string(),
            },
            TimelineEntry {
                date: categorized_at,
                status: ComplaintStatus::Categorized,
                message: format!(
                    "Complaint categorized as {} with {} priority",
                    category.label(),
                    priority.as_str().to_uppercase()
                ),
                officer: "AI System".to_string(),
            },
        ];

        let record = ComplaintRecord {
            id: token,
            subject: submission.subject,
            category: category.label().to_string(),
            priority,
            status: ComplaintStatus::Categorized,
            created: filed_at,
            updated: categorized_at,
            estimated_resolution: filed_at + Duration::days(self.config.resolution_days(priority)),
            assigned_to: "Unassigned".to_string(),
            sentiment,
            urgency_score,
            updates,
        };

        log::info!(
            "filed complaint token={} category={} priority={}",
            record.id,
            record.category,
            record.priority.as_str()
        );

        Ok(FiledComplaint {
            receipt_id: Uuid::new_v4().to_string(),
            passenger_id: submission.passenger_id,
            train_type: submission.train_type,
            description: submission.description,
            record,
        })
    }

    /// Process one submission and persist it.
    pub fn file_into(
        &mut self,
        store: &PortalStore,
        submission: ComplaintSubmission,
        filed_at: DateTime<Utc>,
    ) -> PortalResult<FiledComplaint> {
        let filed = self.submit(submission, filed_at)?;
        store.insert_filed(&filed)?;
        Ok(filed)
    }

    /// Public token: RWY-<year>-<6-digit serial>. The serial comes from
    /// the deterministic intake stream, so a fixed seed issues a fixed
    /// token sequence.
    fn issue_token(&mut self, filed_at: DateTime<Utc>) -> String {
        let serial = self.rng.next_u64_below(1_000_000);
        format!(
            "{}-{}-{:06}",
            self.config.token_prefix,
            filed_at.year(),
            serial
        )
    }
}
