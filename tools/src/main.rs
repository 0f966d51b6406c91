//! portal-runner: headless demo of the railway complaint portal core.
//!
//! Usage:
//!   portal-runner --seed 12345 --db portal.db --data-dir ./data
//!   portal-runner --token RWY-2024-001236 --json

use anyhow::Result;
use chrono::Utc;
use railcms_core::{
    clock::PortalClock,
    config::PortalConfig,
    dashboard::{DashboardTab, DashboardView},
    intake::{ComplaintSubmission, IntakeDesk},
    provider::StoreProvider,
    store::{PortalStore, REFERENCE_TOKEN},
    tracker::{LookupOutcome, TrackerSession},
};
use std::env;

/// Everything a UI front end needs in one payload (--json mode).
#[derive(serde::Serialize)]
struct UiState {
    record: Option<railcms_core::complaint::ComplaintRecord>,
    stats: Vec<railcms_core::provider::PortalStat>,
    priority_distribution: Vec<railcms_core::provider::CountRow>,
    category_breakdown: Vec<railcms_core::provider::CountRow>,
    recent: Vec<railcms_core::provider::ComplaintSummary>,
}

fn build_ui_state(
    provider: &StoreProvider<'_>,
    record: Option<railcms_core::complaint::ComplaintRecord>,
) -> Result<UiState> {
    use railcms_core::provider::ComplaintProvider;
    Ok(UiState {
        record,
        stats: provider.portal_stats()?,
        priority_distribution: provider.priority_distribution()?,
        category_breakdown: provider.category_breakdown()?,
        recent: provider.recent_complaints()?,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let json_output = args.iter().any(|a| a == "--json");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");
    let token = args
        .windows(2)
        .find(|w| w[0] == "--token")
        .map(|w| w[1].to_string())
        .unwrap_or_else(|| REFERENCE_TOKEN.to_string());

    let config = PortalConfig::load(data_dir)?;

    println!("Railway Complaint Portal — portal-runner");
    println!("  seed:     {seed}");
    println!("  db:       {db}");
    println!("  data_dir: {data_dir}");
    println!("  token:    {token}");
    println!();

    let store = PortalStore::open(db)?;
    store.migrate()?;
    store.seed_reference_data()?;
    log::debug!("store ready at {db}, reference data seeded");

    // File one fresh complaint so the dashboard has live intake output.
    let mut desk = IntakeDesk::new(config.clone(), seed);
    let filed = desk.file_into(
        &store,
        ComplaintSubmission {
            passenger_id: "PNR-8841023".to_string(),
            subject: "Train arrived 3 hours late".to_string(),
            description: "Express from Pune delayed with no announcements on the platform."
                .to_string(),
            train_type: Some("Express".to_string()),
        },
        Utc::now(),
    )?;
    println!("Filed new complaint: {} (receipt {})", filed.record.id, filed.receipt_id);
    println!();

    let provider = StoreProvider::new(&store, config.recent_limit);

    // Replay the tracking-page flow against the explicit clock.
    let mut clock = PortalClock::new();
    let mut session = TrackerSession::new(config.lookup_latency_ms);
    session.begin_lookup(&token, &clock);
    println!("Searching for {token} ...");

    let mut outcome = None;
    while outcome.is_none() && clock.now_ms() < config.lookup_latency_ms * 2 {
        clock.advance(300);
        outcome = session.poll(&clock, &provider);
    }

    if json_output {
        let record = match outcome {
            Some(LookupOutcome::Found(record)) => Some(record),
            _ => None,
        };
        let state = build_ui_state(&provider, record)?;
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    match outcome {
        Some(LookupOutcome::Found(record)) => print_record(&record),
        Some(LookupOutcome::NotFound) => println!("No complaint found for token {token}"),
        Some(LookupOutcome::Failed(failure)) => println!("Lookup failed: {failure:?}"),
        None => println!("Lookup did not resolve (clock never reached the deadline)"),
    }

    println!();
    print_dashboard(&provider)?;
    Ok(())
}

fn print_record(record: &railcms_core::complaint::ComplaintRecord) {
    println!("=== COMPLAINT {} ===", record.id);
    println!("  subject:   {}", record.subject);
    println!("  category:  {}", record.category);
    println!("  priority:  {}", record.priority.as_str());
    println!("  status:    {}", record.status.as_str());
    println!("  assigned:  {}", record.assigned_to);
    println!("  sentiment: {}", record.sentiment.as_str());
    println!("  urgency:   {}%", record.urgency_score);
    println!("  est. resolution: {}", record.estimated_resolution);
    println!("  timeline:");
    for entry in &record.updates {
        println!(
            "    {} [{}] {} — by {}",
            entry.date,
            entry.status.as_str(),
            entry.message,
            entry.officer
        );
    }
}

fn print_dashboard(provider: &StoreProvider<'_>) -> Result<()> {
    let mut view = DashboardView::new();

    println!("=== PERSONNEL DASHBOARD ===");
    for tab in [
        DashboardTab::Overview,
        DashboardTab::Complaints,
        DashboardTab::Analytics,
    ] {
        view.select_tab(tab);
        let snapshot = view.snapshot(provider)?;
        println!("--- {} ---", tab.as_str());
        if tab == DashboardTab::Overview {
            for stat in &snapshot.stats {
                println!("  {:<22} {:>10}", stat.label, stat.value);
            }
        }
        match snapshot.panel {
            railcms_core::dashboard::TabPanel::Overview {
                priority_distribution,
                category_breakdown,
            } => {
                println!("  priority distribution:");
                for row in priority_distribution {
                    println!("    {:<16} {}", row.label, row.count);
                }
                println!("  category breakdown:");
                for row in category_breakdown {
                    println!("    {:<16} {}", row.label, row.count);
                }
            }
            railcms_core::dashboard::TabPanel::Complaints { recent } => {
                for c in recent {
                    println!(
                        "  {} | {:<36} | {:<8} | {:<12} | {}%",
                        c.id,
                        c.subject,
                        c.priority.as_str(),
                        c.status.as_str(),
                        c.urgency_score
                    );
                }
            }
            railcms_core::dashboard::TabPanel::Analytics { insights } => {
                for line in insights {
                    println!("  • {line}");
                }
            }
        }
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
