use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The proxy answered with a non-success status.
    #[error("{}", rejected_text(.status, .message))]
    Rejected { status: u16, message: Option<String> },

    #[error("{label}: request failed")]
    Transport {
        label: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{label}: unexpected response body")]
    Decode {
        label: String,
        #[source]
        source: serde_json::Error,
    },
}

fn rejected_text(status: &u16, message: &Option<String>) -> String {
    match (*status, message.as_deref()) {
        (_, Some(m)) => m.to_string(),
        (401, None) => "not authenticated (run `flowgate login`)".to_string(),
        (403, None) => "forbidden (superadmin role required)".to_string(),
        (s, None) => format!("request rejected with status {}", s),
    }
}

impl ApiError {
    /// Operator-facing text for a failed write: the proxy's `error` field, else `default`.
    pub fn user_message(&self, default: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(m), ..
            } => m.clone(),
            _ => default.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 401, .. })
    }
}

/// The `error` field of a proxy error body, if it is a non-empty string.
pub(super) fn error_field(body: &serde_json::Value) -> Option<String> {
    body.get("error")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
