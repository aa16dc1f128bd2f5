//! The access panel as a pure derivation over an [`AdminSnapshot`].

use crate::model::{User, Workflow, WorkflowId};
use crate::snapshot::AdminSnapshot;

use super::{
    BulkAction, BulkRequest, GrantIndex, WorkflowFilter, categories, filter_users,
    group_by_category, select_all_checked,
};

/// Operator-controlled inputs of the access panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessSelection {
    pub user_id: Option<String>,
    pub user_query: String,
    pub filter: WorkflowFilter,
}

/// Everything the access panel shows for one (snapshot, selection) pair.
#[derive(Debug)]
pub struct AccessMatrix<'a> {
    snapshot: &'a AdminSnapshot,
    index: GrantIndex,
    pub selected: Option<&'a User>,
    pub users: Vec<&'a User>,
    pub workflows: Vec<&'a Workflow>,
    pub categories: Vec<String>,
}

impl<'a> AccessMatrix<'a> {
    pub fn derive(snapshot: &'a AdminSnapshot, selection: &AccessSelection) -> Self {
        let index = GrantIndex::build(&snapshot.grants);
        let users = filter_users(&snapshot.users, &selection.user_query);
        // First user is the default selection.
        let selected = match selection.user_id.as_deref() {
            Some(id) => snapshot.user(id),
            None => snapshot.users.first(),
        };
        let granted = selected.and_then(|u| index.workflows_for(&u.id));
        let workflows = selection.filter.apply(&snapshot.workflows, granted);
        Self {
            snapshot,
            categories: categories(&snapshot.workflows),
            index,
            selected,
            users,
            workflows,
        }
    }

    pub fn index(&self) -> &GrantIndex {
        &self.index
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.map(|u| u.id.as_str())
    }

    // No edits while the workflow panel is hidden.
    fn editable_id(&self) -> Option<&str> {
        if self.workflow_panel_hidden() {
            return None;
        }
        self.selected_id()
    }

    pub fn has_access(&self, workflow_id: &WorkflowId) -> bool {
        self.selected_id()
            .is_some_and(|uid| self.index.has(uid, workflow_id))
    }

    pub fn groups(&self) -> Vec<(String, Vec<&'a Workflow>)> {
        group_by_category(&self.workflows)
    }

    pub fn all_filtered_granted(&self) -> bool {
        select_all_checked(self.selected_id(), &self.workflows, &self.index)
    }

    /// Hidden when both the operator and the selected user are superadmins.
    pub fn workflow_panel_hidden(&self) -> bool {
        self.snapshot.is_current_superadmin() && self.selected.is_some_and(User::is_superadmin)
    }

    pub fn show_grant_counts(&self) -> bool {
        !self.snapshot.is_current_superadmin()
    }

    pub fn grant_count(&self, user_id: &str) -> usize {
        self.index.count_for(user_id)
    }

    /// Request that flips the "select all" checkbox.
    pub fn select_all_request(&self) -> Option<BulkRequest> {
        let uid = self.editable_id()?;
        BulkRequest::select_all(uid, !self.all_filtered_granted(), &self.workflows)
    }

    /// Request that flips one workflow's checkbox.
    pub fn toggle_request(&self, workflow_id: &WorkflowId) -> Option<BulkRequest> {
        let uid = self.editable_id()?;
        let action = if self.index.has(uid, workflow_id) {
            BulkAction::Revoke
        } else {
            BulkAction::Grant
        };
        BulkRequest::new(uid, action, vec![workflow_id.clone()])
    }
}

#[cfg(test)]
#[path = "../tests/access/matrix_tests.rs"]
mod tests;
