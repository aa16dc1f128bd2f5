//! Client-side validation for the admin forms. Nothing here touches the network.

use thiserror::Error;

use crate::model::{Role, User};
use crate::remote::NewInstance;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Only {domain} email addresses are allowed")]
    EmailDomain { domain: String },
    #[error("Name is required")]
    NameRequired,
    #[error("Base URL is required")]
    BaseUrlRequired,
    #[error("API Key is required")]
    ApiKeyRequired,
    #[error("Cannot downgrade yourself")]
    SelfDowngrade,
    /// Server-side failure, already reduced to its user-facing text.
    #[error("{0}")]
    Rejected(String),
}

/// Trimmed email, provided it ends with `domain`.
pub fn validate_email(raw: &str, domain: &str) -> Result<String, FormError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(FormError::EmailRequired);
    }
    if !email.ends_with(domain) {
        return Err(FormError::EmailDomain {
            domain: domain.to_string(),
        });
    }
    Ok(email.to_string())
}

/// A superadmin may not demote their own account.
pub fn check_role_change(current: Option<&User>, target: &User, role: Role) -> Result<(), FormError> {
    let is_self = current.is_some_and(|c| c.id == target.id);
    if is_self && target.is_superadmin() && role == Role::User {
        return Err(FormError::SelfDowngrade);
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceForm {
    pub identifier: String,
    pub name: String,
    pub base_url: String,
    pub api_key: String,
    pub active: bool,
}

impl Default for InstanceForm {
    fn default() -> Self {
        Self {
            identifier: String::new(),
            name: String::new(),
            base_url: String::new(),
            api_key: String::new(),
            active: true,
        }
    }
}

impl InstanceForm {
    /// Checks required fields in form order and builds the request body.
    pub fn validate(&self) -> Result<NewInstance, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::NameRequired);
        }
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(FormError::BaseUrlRequired);
        }
        let api_key = self.api_key.trim();
        if api_key.is_empty() {
            return Err(FormError::ApiKeyRequired);
        }
        Ok(NewInstance {
            identifier: self.identifier.trim().to_string(),
            name: name.to_string(),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            active: self.active,
        })
    }
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
