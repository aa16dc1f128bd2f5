use serde::{Deserialize, Serialize};

/// Email suffix new users must carry unless the config overrides it.
pub const DEFAULT_EMAIL_DOMAIN: &str = "@khalti.com";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub version: u32,

    /// Explicit API base URL; wins over host inference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Host used to infer the API base URL when no explicit one is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Default page size for workflow/execution listings (10, 20 or 50).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_domain: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            version: 1,
            api_url: None,
            host: None,
            page_size: None,
            email_domain: None,
        }
    }
}

impl ConsoleConfig {
    /// Configured suffix, always starting with `@`.
    pub fn email_domain(&self) -> String {
        self.email_domain
            .as_deref()
            .and_then(normalize_email_domain)
            .unwrap_or_else(|| DEFAULT_EMAIL_DOMAIN.to_string())
    }
}

/// `khalti.com` and `@khalti.com` both become `@khalti.com`; blank is `None`.
pub fn normalize_email_domain(raw: &str) -> Option<String> {
    let domain = raw.trim().trim_start_matches('@');
    (!domain.is_empty()).then(|| format!("@{}", domain))
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConsoleState {
    pub version: u32,

    /// Value of the proxy's `token` session cookie, keyed by API base URL.
    #[serde(default)]
    pub session_tokens: std::collections::HashMap<String, String>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            version: 1,
            session_tokens: std::collections::HashMap::new(),
        }
    }
}
