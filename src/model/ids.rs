use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Category label for workflow ids without a `prefix:` part.
pub const DEFAULT_CATEGORY: &str = "default";

/// Instance prefix the proxy assigns to its primary (unprefixed) instance.
pub const PRIMARY_INSTANCE_PREFIX: &str = "env";

/// Workflow or execution id in canonical string form.
///
/// The proxy emits ids either as JSON strings or as bare numbers depending on
/// the upstream instance. Both decode to the same canonical string so that set
/// membership never depends on the wire type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WorkflowId(String);

impl WorkflowId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn category(&self) -> &str {
        category_of(&self.0)
    }

    pub fn instance_prefix(&self) -> &str {
        instance_prefix_of(&self.0)
    }
}

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for WorkflowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WorkflowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for WorkflowId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        canonical_id(&raw)
            .map(WorkflowId)
            .ok_or_else(|| serde::de::Error::custom("expected a string or numeric id"))
    }
}

/// Canonical string for an id value; `null` maps to the empty id.
pub fn canonical_id(raw: &serde_json::Value) -> Option<String> {
    match raw {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Null => Some(String::new()),
        _ => None,
    }
}

/// Splits `prefix:rest` at the first colon.
pub fn split_prefix(id: &str) -> Option<(&str, &str)> {
    id.split_once(':')
}

/// Category of a workflow id: the part before the first colon, else `"default"`.
pub fn category_of(id: &str) -> &str {
    split_prefix(id).map_or(DEFAULT_CATEGORY, |(category, _)| category)
}

/// Instance prefix of a workflow or execution id, else the primary instance.
pub fn instance_prefix_of(id: &str) -> &str {
    split_prefix(id).map_or(PRIMARY_INSTANCE_PREFIX, |(prefix, _)| prefix)
}

#[cfg(test)]
#[path = "../tests/model/ids_tests.rs"]
mod tests;
