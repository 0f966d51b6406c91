//! Complaint domain model.
//!
//! A `ComplaintRecord` is what the tracking page renders: the caller's
//! token echoed back as `id`, the triage verdict, assignment, and the
//! append-only progress timeline. Timeline insertion order is
//! chronological order; entries are never mutated after creation.

use crate::types::TokenId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Submitted,
    Categorized,
    Assigned,
    InProgress,
    Resolved,
    Closed,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Categorized => "categorized",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "submitted" => Some(Self::Submitted),
            "categorized" => Some(Self::Categorized),
            "assigned" => Some(Self::Assigned),
            "in_progress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Terminal statuses drop out of the active backlog.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Resolved | Self::Closed)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            "positive" => Some(Self::Positive),
            _ => None,
        }
    }
}

/// One historical status change attached to a complaint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEntry {
    pub date: DateTime<Utc>,
    pub status: ComplaintStatus,
    pub message: String,
    pub officer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplaintRecord {
    pub id: TokenId,
    pub subject: String,
    pub category: String,
    pub priority: Priority,
    pub status: ComplaintStatus,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub estimated_resolution: DateTime<Utc>,
    pub assigned_to: String,
    pub sentiment: Sentiment,
    /// 0–100 heuristic from triage.
    pub urgency_score: u8,
    pub updates: Vec<TimelineEntry>,
}

impl ComplaintRecord {
    /// Latest timeline entry. Records are never built with an empty
    /// timeline, but the accessor stays total.
    pub fn latest_update(&self) -> Option<&TimelineEntry> {
        self.updates.last()
    }
}
