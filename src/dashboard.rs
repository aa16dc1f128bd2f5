//! Dashboard totals.

use crate::model::{Execution, Workflow};
use crate::remote::RemoteClient;
use crate::snapshot::{or_empty, or_none};

pub const VISITED_DASHBOARD: &str = "Visited dashboard";
const LOAD_FAILED: &str = "Failed to load dashboard.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct DashboardStats {
    pub workflows: usize,
    pub active_workflows: usize,
    pub executions: usize,
    pub running: usize,
    pub success: usize,
    pub failed: usize,
}

impl DashboardStats {
    pub fn compute(workflows: &[Workflow], executions: &[Execution]) -> Self {
        Self {
            workflows: workflows.len(),
            active_workflows: workflows.iter().filter(|w| w.active).count(),
            executions: executions.len(),
            running: executions.iter().filter(|e| e.is_running()).count(),
            success: executions.iter().filter(|e| e.is_success()).count(),
            failed: executions.iter().filter(|e| e.is_failed()).count(),
        }
    }

    /// Titled cards in display order.
    pub fn cards(&self) -> [(&'static str, usize); 6] {
        [
            ("Total Workflows", self.workflows),
            ("Active Workflows", self.active_workflows),
            ("Total Executions", self.executions),
            ("Running Executions", self.running),
            ("Successful Executions", self.success),
            ("Failed Executions", self.failed),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dashboard {
    pub message: String,
    pub stats: DashboardStats,
}

impl Dashboard {
    /// Records the visit, then fetches.
    pub fn load(client: &RemoteClient) -> Self {
        if let Err(err) = client.log_action(VISITED_DASHBOARD) {
            tracing::warn!(error = %err, "failed to log dashboard visit");
        }
        Self::fetch(client)
    }

    /// Greeting plus totals over the first page of workflows and executions.
    pub fn fetch(client: &RemoteClient) -> Self {
        let message = or_none("dashboard", client.dashboard())
            .map(|g| g.message)
            .unwrap_or_else(|| LOAD_FAILED.to_string());
        let workflows = or_empty("workflows", client.list_workflows(None));
        let executions = or_empty("executions", client.list_executions(None));
        Self {
            message,
            stats: DashboardStats::compute(&workflows, &executions),
        }
    }
}

#[cfg(test)]
#[path = "tests/dashboard_tests.rs"]
mod tests;
