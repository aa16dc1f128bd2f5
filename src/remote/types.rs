//! Request and response payloads for the proxy API.

use std::fmt;

use crate::model::{Role, WorkflowId};

#[derive(Debug, serde::Serialize)]
pub(super) struct CreateUserRequest<'a> {
    pub(super) email: &'a str,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct SetRoleRequest<'a> {
    pub(super) user_id: &'a str,
    pub(super) role: Role,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct BulkAccessRequest<'a> {
    pub(super) user_id: &'a str,
    pub(super) workflow_ids: &'a [WorkflowId],
}

#[derive(Debug, serde::Serialize)]
pub(super) struct LogActionRequest<'a> {
    pub(super) action: &'a str,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GrantBulkResponse {
    #[serde(default)]
    pub granted: u64,
    #[serde(default)]
    pub skipped: u64,
    #[serde(default)]
    pub total_requested: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RevokeBulkResponse {
    #[serde(default)]
    pub revoked: u64,
    #[serde(default)]
    pub total_requested: u64,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct DashboardGreeting {
    #[serde(default)]
    pub message: String,
}

/// Body of `POST /admin/instances`. The API key is write-only and never printed.
#[derive(Clone, PartialEq, Eq, serde::Serialize)]
pub struct NewInstance {
    pub identifier: String,
    pub name: String,
    pub base_url: String,
    pub api_key: String,
    pub active: bool,
}

impl fmt::Debug for NewInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewInstance")
            .field("identifier", &self.identifier)
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("active", &self.active)
            .finish()
    }
}

/// Body of `PUT /admin/instances/:id`; only present fields are changed.
#[derive(Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct InstancePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl InstancePatch {
    pub fn active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Debug for InstancePatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstancePatch")
            .field("identifier", &self.identifier)
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("active", &self.active)
            .finish()
    }
}

/// Query string for paged listings (`q`, 1-based `page`, `page_size`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageQuery {
    pub q: String,
    pub page: u32,
    pub page_size: u32,
}

impl PageQuery {
    pub(super) fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.q.clone()),
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ]
    }
}
