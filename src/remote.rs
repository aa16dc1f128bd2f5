use anyhow::{Context, Result};

use crate::endpoint::Endpoint;
use crate::model::{
    AccessGrant, ActionLog, Execution, Instance, PublicInstance, Role, User, Workflow, WorkflowId,
};

mod http_client;

mod error;
pub use self::error::ApiError;

mod types;
pub use self::types::*;

mod admin;
mod collections;
mod session;

/// Blocking client for the proxy's REST API, authenticated by session cookie.
#[derive(Clone)]
pub struct RemoteClient {
    endpoint: Endpoint,
    session: Option<String>,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(endpoint: Endpoint, session: Option<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("flowgate")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            endpoint,
            session: session.filter(|s| !s.trim().is_empty()),
            client,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }
}
