//! Superadmin writes: users, roles, workflow access, instances.

use super::*;

impl RemoteClient {
    pub fn create_user(&self, email: &str) -> Result<User, ApiError> {
        self.post_json("/admin/users", &CreateUserRequest { email }, "create user")
    }

    pub fn set_role(&self, user_id: &str, role: Role) -> Result<(), ApiError> {
        let req = self
            .client
            .post(self.url("/admin/users/role"))
            .json(&SetRoleRequest { user_id, role });
        self.send(req, "set role")?;
        Ok(())
    }

    pub fn grant_bulk(
        &self,
        user_id: &str,
        workflow_ids: &[WorkflowId],
    ) -> Result<GrantBulkResponse, ApiError> {
        self.post_json(
            "/admin/workflow-access/grant-bulk",
            &BulkAccessRequest {
                user_id,
                workflow_ids,
            },
            "grant workflow access",
        )
    }

    pub fn revoke_bulk(
        &self,
        user_id: &str,
        workflow_ids: &[WorkflowId],
    ) -> Result<RevokeBulkResponse, ApiError> {
        self.post_json(
            "/admin/workflow-access/revoke-bulk",
            &BulkAccessRequest {
                user_id,
                workflow_ids,
            },
            "revoke workflow access",
        )
    }

    pub fn create_instance(&self, instance: &NewInstance) -> Result<Instance, ApiError> {
        self.post_json("/admin/instances", instance, "create instance")
    }

    pub fn update_instance(&self, id: &str, patch: &InstancePatch) -> Result<(), ApiError> {
        let req = self
            .client
            .put(self.url(&format!("/admin/instances/{}", id)))
            .json(patch);
        self.send(req, "update instance")?;
        Ok(())
    }

    pub fn delete_instance(&self, id: &str) -> Result<(), ApiError> {
        let req = self
            .client
            .delete(self.url(&format!("/admin/instances/{}", id)));
        self.send(req, "delete instance")?;
        Ok(())
    }
}
