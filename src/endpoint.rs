//! API base URL resolution.

use anyhow::{Context, Result};
use url::Url;

/// Port the proxy listens on when the base URL is inferred from a host name.
pub const DEFAULT_PORT: u16 = 4000;

pub const DEFAULT_HOST: &str = "localhost";

/// Path of the sync notification channel.
pub const SYNC_PATH: &str = "/ws/n8n";

/// Resolved proxy location: REST base plus the matching WebSocket base.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
    ws_base: String,
}

impl Endpoint {
    /// An explicit override wins; otherwise the base is inferred from `host`.
    pub fn resolve(explicit: Option<&str>, host: Option<&str>) -> Result<Self> {
        match explicit.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Self::parse(raw),
            None => Ok(Self::inferred(
                host.map(str::trim)
                    .filter(|h| !h.is_empty())
                    .unwrap_or(DEFAULT_HOST),
            )),
        }
    }

    pub fn inferred(host: &str) -> Self {
        let base = format!("http://{}:{}", host, DEFAULT_PORT);
        let ws_base = format!("ws://{}:{}", host, DEFAULT_PORT);
        Self { base, ws_base }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let base = raw.trim().trim_end_matches('/').to_string();
        let url = Url::parse(&base).with_context(|| format!("invalid API URL: {}", raw))?;
        let proto = match url.scheme() {
            "https" => "wss",
            "http" => "ws",
            other => anyhow::bail!("unsupported API URL scheme: {}", other),
        };
        let host = url
            .host_str()
            .with_context(|| format!("API URL has no host: {}", raw))?;
        let ws_base = match url.port() {
            Some(port) => format!("{}://{}:{}", proto, host, port),
            None => format!("{}://{}", proto, host),
        };
        Ok(Self { base, ws_base })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn api_url(&self, path: &str) -> String {
        join(&self.base, path)
    }

    pub fn ws_url(&self, path: &str) -> String {
        join(&self.ws_base, path)
    }

    pub fn sync_url(&self) -> String {
        self.ws_url(SYNC_PATH)
    }

    pub fn login_url(&self) -> String {
        self.api_url("/auth/login")
    }
}

fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
#[path = "tests/endpoint_tests.rs"]
mod tests;
