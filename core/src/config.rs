use crate::complaint::Priority;
use crate::types::Millis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlaTarget {
    pub priority: Priority,
    pub resolve_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
struct PortalConfigFile {
    lookup_latency_ms: Millis,
    token_prefix: String,
    recent_limit: usize,
    sla_targets: Vec<SlaTarget>,
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Artificial lookup latency shown to the passenger.
    pub lookup_latency_ms: Millis,
    /// Public token prefix, e.g. "RWY" in "RWY-2024-001234".
    pub token_prefix: String,
    /// Row cap for the active-complaints table.
    pub recent_limit: usize,
    pub sla_targets: Vec<SlaTarget>,
}

impl PortalConfig {
    /// Load from the data/ directory.
    /// In tests, use PortalConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/portal/portal_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: PortalConfigFile = serde_json::from_str(&content)?;
        Ok(Self {
            lookup_latency_ms: file.lookup_latency_ms,
            token_prefix: file.token_prefix,
            recent_limit: file.recent_limit,
            sla_targets: file.sla_targets,
        })
    }

    /// Resolution target in days for a priority. Falls back to the
    /// slowest configured target; 7 days when none are configured.
    pub fn resolution_days(&self, priority: Priority) -> i64 {
        self.sla_targets
            .iter()
            .find(|t| t.priority == priority)
            .map(|t| t.resolve_days)
            .or_else(|| self.sla_targets.iter().map(|t| t.resolve_days).max())
            .unwrap_or(7)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            lookup_latency_ms: 1500,
            token_prefix: "RWY".to_string(),
            recent_limit: 10,
            sla_targets: vec![
                SlaTarget { priority: Priority::Urgent, resolve_days: 1 },
                SlaTarget { priority: Priority::High, resolve_days: 3 },
                SlaTarget { priority: Priority::Medium, resolve_days: 5 },
                SlaTarget { priority: Priority::Low, resolve_days: 7 },
            ],
        }
    }
}
