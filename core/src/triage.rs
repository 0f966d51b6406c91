//! Automated triage — category, sentiment, and urgency for new complaints.
//!
//! The original backend shipped a five-example text classifier. The
//! observable behavior reduces to keyword evidence per category, so that
//! is what runs here: transparent, deterministic keyword scoring with no
//! model artifact to load.

use crate::complaint::{Priority, Sentiment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    TrainDelay,
    Cleanliness,
    StaffBehavior,
    FoodIssue,
    Technical,
    General,
}

impl Category {
    /// Display label as shown on the tracking and dashboard pages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TrainDelay => "Train Delay/Cancellation",
            Self::Cleanliness => "Cleanliness",
            Self::StaffBehavior => "Staff Behavior",
            Self::FoodIssue => "Food Issue",
            Self::Technical => "Technical",
            Self::General => "General",
        }
    }
}

/// Keyword evidence per category. One hit = one point; the category with
/// the most points wins, ties broken by list order below.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::TrainDelay,
        &[
            "late", "delay", "delayed", "cancelled", "cancellation", "waiting", "hours",
            "rescheduled", "missed connection",
        ],
    ),
    (
        Category::Cleanliness,
        &[
            "dirty", "toilet", "unclean", "filthy", "smell", "garbage", "hygiene", "cockroach",
            "cleanliness",
        ],
    ),
    (
        Category::StaffBehavior,
        &["rude", "staff", "unhelpful", "misbehaved", "behavior", "behaviour", "attendant"],
    ),
    (
        Category::FoodIssue,
        &["food", "stale", "meal", "catering", "pantry", "inedible", "undercooked"],
    ),
    (
        Category::Technical,
        &["booking", "website", "app", "refund", "payment", "error", "ticket", "system"],
    ),
];

const NEGATIVE_WORDS: &[&str] = &[
    "stale", "cold", "late", "dirty", "unclean", "rude", "unhelpful", "worst", "terrible",
    "awful", "broken", "filthy", "disgusting", "pathetic", "unacceptable", "horrible",
];

const POSITIVE_WORDS: &[&str] = &[
    "clean", "good", "excellent", "helpful", "comfortable", "maintained", "thank", "great",
    "punctual",
];

/// Terms that escalate urgency regardless of category.
const ESCALATION_WORDS: &[&str] = &[
    "safety", "accident", "emergency", "medical", "fire", "harassment", "injured", "stranded",
    "theft", "urgent",
];

/// Whole-word hits, so "unclean" never counts as "clean" nor
/// "unhelpful" as "helpful". Multi-word phrases match as substrings.
fn count_hits(text_lower: &str, words: &[&str]) -> u32 {
    words
        .iter()
        .filter(|w| {
            if w.contains(' ') {
                text_lower.contains(*w)
            } else {
                text_lower
                    .split(|c: char| !c.is_alphanumeric())
                    .any(|token| token == **w)
            }
        })
        .count() as u32
}

/// Pick the category with the strongest keyword evidence.
/// No evidence at all lands in General for manual routing.
pub fn categorize(text: &str) -> Category {
    let lower = text.to_lowercase();
    let mut best = Category::General;
    let mut best_hits = 0u32;
    for (category, keywords) in CATEGORY_KEYWORDS {
        let hits = count_hits(&lower, keywords);
        if hits > best_hits {
            best = *category;
            best_hits = hits;
        }
    }
    best
}

pub fn sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let neg = count_hits(&lower, NEGATIVE_WORDS);
    let pos = count_hits(&lower, POSITIVE_WORDS);
    if neg > pos {
        Sentiment::Negative
    } else if pos > neg {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    }
}

/// 0–100 urgency heuristic: a neutral base, plus weight per negative
/// keyword, plus a large step per escalation term. Always clamped.
pub fn urgency_score(text: &str) -> u8 {
    let lower = text.to_lowercase();
    let neg = count_hits(&lower, NEGATIVE_WORDS);
    let esc = count_hits(&lower, ESCALATION_WORDS);
    let pos = count_hits(&lower, POSITIVE_WORDS);

    let raw = 40i32 + 12 * neg as i32 + 25 * esc as i32 - 10 * pos as i32;
    raw.clamp(0, 100) as u8
}

/// Map an urgency score to the four-level priority scale.
/// Thresholds follow the reference data (urgent 92, high 85, medium 62).
pub fn priority_for(urgency: u8) -> Priority {
    match urgency {
        90..=u8::MAX => Priority::Urgent,
        75..=89 => Priority::High,
        50..=74 => Priority::Medium,
        _ => Priority::Low,
    }
}
