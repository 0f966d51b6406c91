//! railcms-core — interaction core of the railway complaint portal.
//!
//! Headless: the crate owns the lookup/tracking state machine, the
//! personnel-dashboard view state, complaint intake and triage, and the
//! SQLite reference store. Rendering is someone else's problem.

pub mod clock;
pub mod complaint;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod intake;
pub mod provider;
pub mod rng;
pub mod store;
pub mod tracker;
pub mod triage;
pub mod types;
