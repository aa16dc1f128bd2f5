//! Collection reads. Callers decide whether a failure degrades to "no data".

use super::*;

impl RemoteClient {
    pub fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_list("/admin/users", &[], "list users")
    }

    pub fn list_workflows(&self, page: Option<&PageQuery>) -> Result<Vec<Workflow>, ApiError> {
        let query = page.map(PageQuery::params).unwrap_or_default();
        self.get_list("/workflows", &query, "list workflows")
    }

    pub fn list_executions(&self, page: Option<&PageQuery>) -> Result<Vec<Execution>, ApiError> {
        let query = page.map(PageQuery::params).unwrap_or_default();
        self.get_list("/executions", &query, "list executions")
    }

    pub fn list_access(&self) -> Result<Vec<AccessGrant>, ApiError> {
        self.get_list("/admin/workflow-access", &[], "list workflow access")
    }

    pub fn list_action_logs(&self) -> Result<Vec<ActionLog>, ApiError> {
        self.get_list("/admin/action-logs", &[], "list action logs")
    }

    pub fn list_instances(&self) -> Result<Vec<Instance>, ApiError> {
        self.get_list("/admin/instances", &[], "list instances")
    }

    /// Prefix-to-name mapping visible to every signed-in user.
    pub fn list_public_instances(&self) -> Result<Vec<PublicInstance>, ApiError> {
        self.get_list("/instances", &[], "list public instances")
    }
}
