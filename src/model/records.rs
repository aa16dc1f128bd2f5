//! Records returned by the proxy's REST API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::WorkflowId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Superadmin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Superadmin => "superadmin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "user" => Ok(Role::User),
            "superadmin" => Ok(Role::Superadmin),
            other => Err(format!("unknown role: {} (expected user|superadmin)", other)),
        }
    }
}

/// A console user. Also the shape of `GET /me`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn is_superadmin(&self) -> bool {
        self.role == Role::Superadmin
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireWorkflow")]
pub struct Workflow {
    pub id: WorkflowId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Workflow {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionStatus {
    Running,
    Success,
    Failed,
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireExecution")]
pub struct Execution {
    pub id: WorkflowId,
    pub workflow_id: Option<WorkflowId>,
    pub status: Option<String>,
    pub finished: Option<bool>,
    pub started_at: Option<String>,
    pub stopped_at: Option<String>,
}

/// First non-empty id; `null` and `""` count as absent.
fn first_id(candidates: [Option<WorkflowId>; 2]) -> Option<WorkflowId> {
    candidates
        .into_iter()
        .flatten()
        .find(|id| !id.as_str().is_empty())
}

// Rows may carry both the snake_case and the camelCase spelling of a key.
// Each spelling is read separately and the snake_case one wins.

#[derive(Deserialize)]
struct WireWorkflow {
    #[serde(default)]
    id: Option<WorkflowId>,
    #[serde(default, rename = "workflowId")]
    workflow_id: Option<WorkflowId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    active: bool,
    #[serde(default)]
    updated_at: Option<String>,
}

impl From<WireWorkflow> for Workflow {
    fn from(w: WireWorkflow) -> Self {
        Self {
            id: first_id([w.id, w.workflow_id]).unwrap_or_default(),
            name: w.name,
            active: w.active,
            updated_at: w.updated_at,
        }
    }
}

#[derive(Deserialize)]
struct WireExecution {
    #[serde(default)]
    id: Option<WorkflowId>,
    #[serde(default, rename = "executionId")]
    execution_id: Option<WorkflowId>,
    #[serde(default)]
    workflow_id: Option<WorkflowId>,
    #[serde(default, rename = "workflowId")]
    workflow_id_camel: Option<WorkflowId>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    finished: Option<bool>,
    #[serde(default)]
    started_at: Option<String>,
    #[serde(default, rename = "startedAt")]
    started_at_camel: Option<String>,
    #[serde(default)]
    stopped_at: Option<String>,
    #[serde(default, rename = "stoppedAt")]
    stopped_at_camel: Option<String>,
}

impl From<WireExecution> for Execution {
    fn from(w: WireExecution) -> Self {
        Self {
            id: first_id([w.id, w.execution_id]).unwrap_or_default(),
            workflow_id: first_id([w.workflow_id, w.workflow_id_camel]),
            status: w.status,
            finished: w.finished,
            started_at: w.started_at.or(w.started_at_camel),
            stopped_at: w.stopped_at.or(w.stopped_at_camel),
        }
    }
}

const SUCCESS_STATUSES: &[&str] = &["success", "succeeded", "ok", "completed"];
const FAILED_STATUSES: &[&str] = &["error", "failed", "failure", "cancelled"];

impl Execution {
    fn status_text(&self) -> Option<String> {
        self.status
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }

    /// Missing `finished` counts as finished.
    pub fn is_running(&self) -> bool {
        !self.finished.unwrap_or(true)
    }

    pub fn is_success(&self) -> bool {
        match self.status_text() {
            Some(s) => SUCCESS_STATUSES.contains(&s.as_str()),
            None => self.finished == Some(true),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status_text()
            .is_some_and(|s| FAILED_STATUSES.contains(&s.as_str()))
    }

    pub fn classify(&self) -> ExecutionStatus {
        if self.is_failed() {
            ExecutionStatus::Failed
        } else if self.is_success() {
            ExecutionStatus::Success
        } else if self.is_running() {
            ExecutionStatus::Running
        } else {
            ExecutionStatus::Other
        }
    }

    /// Status text as shown in listings.
    pub fn display_status(&self) -> String {
        match self.status.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => s.to_string(),
            None if self.finished.unwrap_or(false) => "Finished".to_string(),
            None => "Running".to_string(),
        }
    }
}

/// One `(user, workflow)` access pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessGrant {
    pub user_id: String,
    pub workflow_id: WorkflowId,
}

impl AccessGrant {
    pub fn new(user_id: impl Into<String>, workflow_id: impl Into<WorkflowId>) -> Self {
        Self {
            user_id: user_id.into(),
            workflow_id: workflow_id.into(),
        }
    }
}

/// Instance as managed from the admin panel. The API key never comes back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    #[serde(default)]
    pub identifier: Option<String>,
    pub name: String,
    pub base_url: String,
    #[serde(default)]
    pub active: bool,
}

/// Instance as listed to every signed-in user, keyed by id prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicInstance {
    pub prefix: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl PublicInstance {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.prefix)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[cfg(test)]
#[path = "../tests/model/records_tests.rs"]
mod tests;
