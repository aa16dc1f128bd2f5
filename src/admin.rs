//! Admin writes: validate locally, call the proxy, then patch the snapshot.
//!
//! The snapshot is only changed after the proxy acknowledged the write; a
//! failed call leaves it untouched and reports one operator-facing message.

use crate::access::{BulkDispatcher, BulkError, BulkRequest};
use crate::forms::{FormError, InstanceForm, check_role_change, validate_email};
use crate::model::{Instance, Role, User};
use crate::remote::{ApiError, InstancePatch, RemoteClient};
use crate::snapshot::AdminSnapshot;

const CREATE_USER_FAILED: &str = "Failed to create user";
const SET_ROLE_FAILED: &str = "Failed to update role";
const CREATE_INSTANCE_FAILED: &str = "Failed to create instance";
const UPDATE_INSTANCE_FAILED: &str = "Failed to update instance";
const DELETE_INSTANCE_FAILED: &str = "Failed to delete instance";

fn rejected(err: ApiError, default: &str) -> FormError {
    tracing::warn!(error = %err, "{}", default);
    FormError::Rejected(err.user_message(default))
}

pub struct AdminActions<'a> {
    client: &'a RemoteClient,
    email_domain: &'a str,
}

impl<'a> AdminActions<'a> {
    pub fn new(client: &'a RemoteClient, email_domain: &'a str) -> Self {
        Self {
            client,
            email_domain,
        }
    }

    pub fn create_user(&self, snap: &mut AdminSnapshot, raw_email: &str) -> Result<User, FormError> {
        let email = validate_email(raw_email, self.email_domain)?;
        let user = self
            .client
            .create_user(&email)
            .map_err(|e| rejected(e, CREATE_USER_FAILED))?;
        tracing::info!(user_id = %user.id, email = %user.email, "user created");
        snap.users.push(user.clone());
        Ok(user)
    }

    pub fn set_role(&self, snap: &mut AdminSnapshot, user_id: &str, role: Role) -> Result<(), FormError> {
        if let Some(target) = snap.user(user_id) {
            check_role_change(snap.current_user.as_ref(), target, role)?;
        }
        self.client
            .set_role(user_id, role)
            .map_err(|e| rejected(e, SET_ROLE_FAILED))?;
        tracing::info!(user_id, %role, "role updated");
        if let Some(u) = snap.users.iter_mut().find(|u| u.id == user_id) {
            u.role = role;
        }
        Ok(())
    }

    /// Creates the instance and re-fetches the admin instance list.
    pub fn create_instance(&self, snap: &mut AdminSnapshot, form: &InstanceForm) -> Result<Instance, FormError> {
        let body = form.validate()?;
        let created = self
            .client
            .create_instance(&body)
            .map_err(|e| rejected(e, CREATE_INSTANCE_FAILED))?;
        tracing::info!(instance_id = %created.id, name = %created.name, "instance created");
        snap.reload_instances(self.client);
        Ok(created)
    }

    pub fn set_instance_active(&self, snap: &mut AdminSnapshot, id: &str, active: bool) -> Result<(), FormError> {
        self.client
            .update_instance(id, &InstancePatch::active(active))
            .map_err(|e| rejected(e, UPDATE_INSTANCE_FAILED))?;
        snap.reload_instances(self.client);
        Ok(())
    }

    pub fn update_instance(&self, snap: &mut AdminSnapshot, id: &str, patch: &InstancePatch) -> Result<(), FormError> {
        self.client
            .update_instance(id, patch)
            .map_err(|e| rejected(e, UPDATE_INSTANCE_FAILED))?;
        tracing::info!(instance_id = id, ?patch, "instance updated");
        snap.reload_instances(self.client);
        Ok(())
    }

    /// Callers confirm with the operator before calling this.
    pub fn delete_instance(&self, snap: &mut AdminSnapshot, id: &str) -> Result<(), FormError> {
        self.client
            .delete_instance(id)
            .map_err(|e| rejected(e, DELETE_INSTANCE_FAILED))?;
        tracing::info!(instance_id = id, "instance deleted");
        snap.instances.retain(|i| i.id != id);
        Ok(())
    }

    /// Sends a bulk grant/revoke and merges it into the snapshot once acknowledged.
    pub fn apply_bulk(
        &self,
        dispatcher: &BulkDispatcher,
        snap: &mut AdminSnapshot,
        request: &BulkRequest,
    ) -> Result<(), BulkError> {
        snap.grants = dispatcher.dispatch(self.client, &snap.grants, request)?;
        Ok(())
    }
}
