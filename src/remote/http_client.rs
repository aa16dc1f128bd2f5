use reqwest::blocking::{RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::error_field;
use super::*;

/// Cookie the proxy reads its session from.
const SESSION_COOKIE: &str = "token";

impl RemoteClient {
    pub(super) fn url(&self, path: &str) -> String {
        self.endpoint.api_url(path)
    }

    fn with_session(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(token) => req.header(
                reqwest::header::COOKIE,
                format!("{}={}", SESSION_COOKIE, token),
            ),
            None => req,
        }
    }

    pub(super) fn send(&self, req: RequestBuilder, label: &str) -> Result<Response, ApiError> {
        tracing::debug!(label, "proxy request");
        let resp = self
            .with_session(req)
            .send()
            .map_err(|source| ApiError::Transport {
                label: label.to_string(),
                source,
            })?;
        self.ensure_ok(resp, label)
    }

    pub(super) fn ensure_ok(&self, resp: Response, label: &str) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp
            .json::<Value>()
            .ok()
            .as_ref()
            .and_then(error_field);
        tracing::debug!(label, status = status.as_u16(), ?message, "proxy rejected request");
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    pub(super) fn read_json<T: DeserializeOwned>(
        &self,
        resp: Response,
        label: &str,
    ) -> Result<T, ApiError> {
        let bytes = resp.bytes().map_err(|source| ApiError::Transport {
            label: label.to_string(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            label: label.to_string(),
            source,
        })
    }

    pub(super) fn get_json<T: DeserializeOwned>(&self, path: &str, label: &str) -> Result<T, ApiError> {
        let resp = self.send(self.client.get(self.url(path)), label)?;
        self.read_json(resp, label)
    }

    /// GETs a collection, tolerating envelope shapes and skipping malformed rows.
    pub(super) fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        label: &str,
    ) -> Result<Vec<T>, ApiError> {
        let resp = self.send(self.client.get(self.url(path)).query(query), label)?;
        let body: Value = self.read_json(resp, label)?;
        let mut out = Vec::new();
        for item in list_items(body) {
            match serde_json::from_value::<T>(item) {
                Ok(v) => out.push(v),
                Err(err) => tracing::warn!(label, error = %err, "skipping malformed row"),
            }
        }
        Ok(out)
    }

    pub(super) fn post_json<B, T>(&self, path: &str, body: &B, label: &str) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.send(self.client.post(self.url(path)).json(body), label)?;
        self.read_json(resp, label)
    }
}

/// A bare array, or an object carrying `items` or `data`; anything else is empty.
fn list_items(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("items").or_else(|| map.remove("data")) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "../tests/remote/http_client_tests.rs"]
mod tests;
