use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::model::{User, Workflow, WorkflowId};

/// Access-state filter relative to the selected user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccessFilter {
    #[default]
    All,
    Has,
    Missing,
}

impl AccessFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessFilter::All => "all",
            AccessFilter::Has => "has",
            AccessFilter::Missing => "missing",
        }
    }

    /// all -> has -> missing -> all
    pub fn cycle(self) -> Self {
        match self {
            AccessFilter::All => AccessFilter::Has,
            AccessFilter::Has => AccessFilter::Missing,
            AccessFilter::Missing => AccessFilter::All,
        }
    }
}

impl fmt::Display for AccessFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AccessFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(AccessFilter::All),
            "has" => Ok(AccessFilter::Has),
            "missing" => Ok(AccessFilter::Missing),
            other => Err(format!(
                "unknown access filter: {} (expected all|has|missing)",
                other
            )),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "all" => CategoryFilter::All,
            other => CategoryFilter::Only(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(c) => c,
        }
    }
}

/// Conjunction of the category, free-text and access-state predicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkflowFilter {
    pub text: String,
    pub category: CategoryFilter,
    pub access: AccessFilter,
}

impl WorkflowFilter {
    pub fn matches(&self, wf: &Workflow, granted: Option<&HashSet<WorkflowId>>) -> bool {
        category_matches(&self.category, wf)
            && text_matches(&self.text, wf)
            && access_matches(self.access, wf, granted)
    }

    pub fn apply<'a>(
        &self,
        workflows: &'a [Workflow],
        granted: Option<&HashSet<WorkflowId>>,
    ) -> Vec<&'a Workflow> {
        workflows
            .iter()
            .filter(|wf| self.matches(wf, granted))
            .collect()
    }
}

pub fn category_matches(filter: &CategoryFilter, wf: &Workflow) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Only(c) => wf.id.category() == c,
    }
}

/// Case-insensitive substring over name or id; a blank query matches everything.
pub fn text_matches(query: &str, wf: &Workflow) -> bool {
    let q = query.trim().to_lowercase();
    q.is_empty()
        || wf.name().to_lowercase().contains(&q)
        || wf.id.as_str().to_lowercase().contains(&q)
}

pub fn access_matches(
    filter: AccessFilter,
    wf: &Workflow,
    granted: Option<&HashSet<WorkflowId>>,
) -> bool {
    let has = granted.is_some_and(|ids| ids.contains(&wf.id));
    match filter {
        AccessFilter::All => true,
        AccessFilter::Has => has,
        AccessFilter::Missing => !has,
    }
}

/// Users whose email contains `query` (trimmed, case-insensitive).
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let q = query.trim().to_lowercase();
    users
        .iter()
        .filter(|u| q.is_empty() || u.email.to_lowercase().contains(&q))
        .collect()
}

/// Distinct categories across the loaded workflows, in first-seen order.
pub fn categories(workflows: &[Workflow]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for wf in workflows {
        let c = wf.id.category();
        if seen.insert(c.to_string()) {
            out.push(c.to_string());
        }
    }
    out
}

/// Groups workflows by category, keeping first-seen category order.
pub fn group_by_category<'a>(workflows: &[&'a Workflow]) -> Vec<(String, Vec<&'a Workflow>)> {
    let mut groups: Vec<(String, Vec<&'a Workflow>)> = Vec::new();
    for wf in workflows.iter().copied() {
        let c = wf.id.category();
        match groups.iter_mut().find(|(name, _)| name == c) {
            Some((_, list)) => list.push(wf),
            None => groups.push((c.to_string(), vec![wf])),
        }
    }
    groups
}

#[cfg(test)]
#[path = "../tests/access/filter_tests.rs"]
mod tests;
