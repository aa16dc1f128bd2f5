//! Bulk grant/revoke: one request per toggle, local merge only after the ack.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::model::{AccessGrant, Workflow, WorkflowId};
use crate::remote::{ApiError, RemoteClient};

use super::GrantIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkAction {
    Grant,
    Revoke,
}

impl BulkAction {
    pub fn label(self) -> &'static str {
        match self {
            BulkAction::Grant => "grant",
            BulkAction::Revoke => "revoke",
        }
    }
}

/// Seam over the two bulk endpoints.
pub trait AccessBackend {
    fn grant_bulk(&self, user_id: &str, ids: &[WorkflowId]) -> Result<(), ApiError>;
    fn revoke_bulk(&self, user_id: &str, ids: &[WorkflowId]) -> Result<(), ApiError>;
}

impl AccessBackend for RemoteClient {
    fn grant_bulk(&self, user_id: &str, ids: &[WorkflowId]) -> Result<(), ApiError> {
        let out = RemoteClient::grant_bulk(self, user_id, ids)?;
        tracing::info!(user_id, granted = out.granted, skipped = out.skipped, "access granted");
        Ok(())
    }

    fn revoke_bulk(&self, user_id: &str, ids: &[WorkflowId]) -> Result<(), ApiError> {
        let out = RemoteClient::revoke_bulk(self, user_id, ids)?;
        tracing::info!(user_id, revoked = out.revoked, "access revoked");
        Ok(())
    }
}

/// A grant or revoke for one user over a non-empty id list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkRequest {
    pub user_id: String,
    pub action: BulkAction,
    pub ids: Vec<WorkflowId>,
}

impl BulkRequest {
    /// `None` when there is nothing to send.
    pub fn new(user_id: &str, action: BulkAction, ids: Vec<WorkflowId>) -> Option<Self> {
        if ids.is_empty() {
            return None;
        }
        Some(Self {
            user_id: user_id.to_string(),
            action,
            ids,
        })
    }

    /// Desired end state of the "select all" checkbox over the filtered list.
    pub fn select_all(user_id: &str, checked: bool, filtered: &[&Workflow]) -> Option<Self> {
        let action = if checked {
            BulkAction::Grant
        } else {
            BulkAction::Revoke
        };
        let ids = filtered.iter().map(|w| w.id.clone()).collect();
        Self::new(user_id, action, ids)
    }

    pub fn send<B: AccessBackend + ?Sized>(&self, backend: &B) -> Result<(), ApiError> {
        match self.action {
            BulkAction::Grant => backend.grant_bulk(&self.user_id, &self.ids),
            BulkAction::Revoke => backend.revoke_bulk(&self.user_id, &self.ids),
        }
    }

    /// Grant list after the server acknowledged this request.
    pub fn apply_to(&self, grants: &[AccessGrant]) -> Vec<AccessGrant> {
        match self.action {
            BulkAction::Grant => merge_granted(grants, &self.user_id, &self.ids),
            BulkAction::Revoke => merge_revoked(grants, &self.user_id, &self.ids),
        }
    }
}

/// Appends each `(user_id, id)` pair not already present.
pub fn merge_granted(grants: &[AccessGrant], user_id: &str, ids: &[WorkflowId]) -> Vec<AccessGrant> {
    let mut seen: HashSet<(&str, &WorkflowId)> = grants
        .iter()
        .map(|g| (g.user_id.as_str(), &g.workflow_id))
        .collect();
    let mut additions = Vec::new();
    for id in ids {
        if seen.insert((user_id, id)) {
            additions.push(AccessGrant::new(user_id, id.clone()));
        }
    }
    let mut out = grants.to_vec();
    out.extend(additions);
    out
}

/// Drops every `(user_id, id)` pair whose id was revoked.
pub fn merge_revoked(grants: &[AccessGrant], user_id: &str, ids: &[WorkflowId]) -> Vec<AccessGrant> {
    let revoked: HashSet<&WorkflowId> = ids.iter().collect();
    grants
        .iter()
        .filter(|g| !(g.user_id == user_id && revoked.contains(&g.workflow_id)))
        .cloned()
        .collect()
}

/// "Select all" is checked iff a user is selected, the filtered set is
/// non-empty, and every filtered workflow is granted to that user.
pub fn select_all_checked(user_id: Option<&str>, filtered: &[&Workflow], index: &GrantIndex) -> bool {
    let Some(user_id) = user_id else {
        return false;
    };
    !filtered.is_empty() && filtered.iter().all(|w| index.has(user_id, &w.id))
}

#[derive(Debug, Error)]
pub enum BulkError {
    #[error("another access update is still in flight")]
    Busy,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Single in-flight flag shared by every grant/revoke control.
///
/// Advisory only: it stops overlapping bulk calls issued through the same
/// dispatcher, nothing more.
#[derive(Clone, Debug, Default)]
pub struct BulkDispatcher {
    in_flight: Arc<AtomicBool>,
}

/// Held while a bulk call is outstanding; clears the flag on drop.
#[derive(Debug)]
pub struct InFlight {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl BulkDispatcher {
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn begin(&self) -> Result<InFlight, BulkError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| BulkError::Busy)?;
        Ok(InFlight {
            flag: Arc::clone(&self.in_flight),
        })
    }

    /// Sends `request` and returns the merged grant list once acknowledged.
    /// On failure `grants` is left as it was.
    pub fn dispatch<B: AccessBackend + ?Sized>(
        &self,
        backend: &B,
        grants: &[AccessGrant],
        request: &BulkRequest,
    ) -> Result<Vec<AccessGrant>, BulkError> {
        let _guard = self.begin()?;
        request.send(backend)?;
        Ok(request.apply_to(grants))
    }
}

#[cfg(test)]
#[path = "../tests/access/bulk_tests.rs"]
mod tests;
