//! Immutable snapshot of the collections behind the admin panel.
//!
//! Every derived view (access matrix, listings, dashboard) is a pure function
//! of a snapshot; nothing is cached beyond it. Read failures degrade to empty
//! collections so a broken endpoint shows "no data" instead of an error.

use crate::model::{AccessGrant, ActionLog, Instance, User, Workflow};
use crate::remote::{ApiError, RemoteClient};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminSnapshot {
    pub users: Vec<User>,
    pub workflows: Vec<Workflow>,
    pub grants: Vec<AccessGrant>,
    pub logs: Vec<ActionLog>,
    pub instances: Vec<Instance>,
    pub current_user: Option<User>,
}

impl AdminSnapshot {
    pub fn load(client: &RemoteClient) -> Self {
        Self {
            users: or_empty("users", client.list_users()),
            workflows: or_empty("workflows", client.list_workflows(None)),
            grants: or_empty("workflow access", client.list_access()),
            logs: or_empty("action logs", client.list_action_logs()),
            instances: or_empty("instances", client.list_instances()),
            current_user: or_none("current user", client.me()),
        }
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    pub fn user_email(&self, user_id: &str) -> Option<&str> {
        self.user(user_id).map(|u| u.email.as_str())
    }

    pub fn is_current_superadmin(&self) -> bool {
        self.current_user.as_ref().is_some_and(User::is_superadmin)
    }

    pub fn reload_instances(&mut self, client: &RemoteClient) {
        self.instances = or_empty("instances", client.list_instances());
    }
}

pub fn or_empty<T>(what: &str, res: Result<Vec<T>, ApiError>) -> Vec<T> {
    match res {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(what, error = %err, "read failed; showing no data");
            Vec::new()
        }
    }
}

pub fn or_none<T>(what: &str, res: Result<T, ApiError>) -> Option<T> {
    match res {
        Ok(v) => Some(v),
        Err(err) => {
            tracing::warn!(what, error = %err, "read failed; showing placeholder");
            None
        }
    }
}
