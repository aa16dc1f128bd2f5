//! Session-level calls: who am I, logout, action logging.

use super::*;

impl RemoteClient {
    pub fn me(&self) -> Result<User, ApiError> {
        self.get_json("/me", "me")
    }

    pub fn dashboard(&self) -> Result<DashboardGreeting, ApiError> {
        self.get_json("/dashboard", "dashboard")
    }

    /// Where an operator signs in; the proxy redirects to its OAuth provider.
    pub fn login_url(&self) -> String {
        self.endpoint.login_url()
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.send(self.client.post(self.url("/auth/logout")), "logout")?;
        Ok(())
    }

    pub fn log_action(&self, action: &str) -> Result<(), ApiError> {
        let req = self
            .client
            .post(self.url("/log-action"))
            .json(&LogActionRequest { action });
        self.send(req, "log action")?;
        Ok(())
    }
}
