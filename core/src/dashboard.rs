//! Personnel dashboard view state and read-only panel assembly.
//!
//! Tab selection is pure, synchronous, idempotent assignment — no
//! transition fails, nothing else changes. The panels are read-only
//! projections of whatever the provider serves.

use crate::{
    error::PortalResult,
    provider::{ComplaintProvider, ComplaintSummary, CountRow, PortalStat},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DashboardTab {
    #[default]
    Overview,
    Complaints,
    Analytics,
}

impl DashboardTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Complaints => "complaints",
            Self::Analytics => "analytics",
        }
    }
}

/// Tab-specific payload of a dashboard snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "tab", rename_all = "snake_case")]
pub enum TabPanel {
    Overview {
        priority_distribution: Vec<CountRow>,
        category_breakdown: Vec<CountRow>,
    },
    Complaints {
        recent: Vec<ComplaintSummary>,
    },
    Analytics {
        insights: Vec<String>,
    },
}

/// Everything the dashboard renders for the selected tab. Stat cards are
/// shown above the tab strip regardless of selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub selected: DashboardTab,
    pub stats: Vec<PortalStat>,
    pub panel: TabPanel,
}

pub struct DashboardView {
    selected: DashboardTab,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            selected: DashboardTab::default(),
        }
    }

    pub fn selected(&self) -> DashboardTab {
        self.selected
    }

    /// Select a tab. Selecting the active tab is a no-op; returns
    /// whether the selection changed.
    pub fn select_tab(&mut self, tab: DashboardTab) -> bool {
        if self.selected == tab {
            return false;
        }
        self.selected = tab;
        true
    }

    /// Assemble the read-only data for the current tab.
    pub fn snapshot(&self, provider: &dyn ComplaintProvider) -> PortalResult<DashboardSnapshot> {
        let stats = provider.portal_stats()?;
        let panel = match self.selected {
            DashboardTab::Overview => TabPanel::Overview {
                priority_distribution: provider.priority_distribution()?,
                category_breakdown: provider.category_breakdown()?,
            },
            DashboardTab::Complaints => TabPanel::Complaints {
                recent: provider.recent_complaints()?,
            },
            DashboardTab::Analytics => TabPanel::Analytics {
                insights: provider.analytics_insights()?,
            },
        };
        Ok(DashboardSnapshot {
            selected: self.selected,
            stats,
            panel,
        })
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}
