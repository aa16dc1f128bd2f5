use std::collections::{HashMap, HashSet};

use crate::model::{AccessGrant, WorkflowId};

/// Grants indexed by user id. Built from the grant list alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrantIndex {
    by_user: HashMap<String, HashSet<WorkflowId>>,
}

impl GrantIndex {
    pub fn build(grants: &[AccessGrant]) -> Self {
        let mut by_user: HashMap<String, HashSet<WorkflowId>> = HashMap::new();
        for g in grants {
            by_user
                .entry(g.user_id.clone())
                .or_default()
                .insert(g.workflow_id.clone());
        }
        Self { by_user }
    }

    pub fn workflows_for(&self, user_id: &str) -> Option<&HashSet<WorkflowId>> {
        self.by_user.get(user_id)
    }

    pub fn has(&self, user_id: &str, workflow_id: &WorkflowId) -> bool {
        self.by_user
            .get(user_id)
            .is_some_and(|ids| ids.contains(workflow_id))
    }

    pub fn count_for(&self, user_id: &str) -> usize {
        self.by_user.get(user_id).map_or(0, HashSet::len)
    }

    pub fn len(&self) -> usize {
        self.by_user.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &WorkflowId)> + '_ {
        self.by_user
            .iter()
            .flat_map(|(user, ids)| ids.iter().map(move |id| (user.as_str(), id)))
    }
}

#[cfg(test)]
#[path = "../tests/access/index_tests.rs"]
mod tests;
