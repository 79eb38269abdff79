//! Blocking HTTP implementation of [`RemoteCollection`].

use super::traits::{RemoteCollection, RemoteResult};
use super::{RemoteError, extract_error_message};
use crate::models::ServerId;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;

/// Timeouts for the HTTP client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            connect_timeout_ms: 3_000,
        }
    }
}

impl HttpConfig {
    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout_ms(mut self, connect_timeout_ms: u64) -> Self {
        self.connect_timeout_ms = connect_timeout_ms;
        self
    }
}

/// Builds a blocking HTTP client with the configured timeouts.
#[must_use]
pub fn build_http_client(config: HttpConfig) -> Client {
    let mut builder = Client::builder().user_agent(concat!("fieldstore/", env!("CARGO_PKG_VERSION")));
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build HTTP client: {err}");
        Client::new()
    })
}

/// A REST collection reached over HTTP.
pub struct HttpCollection {
    client: Client,
    endpoint: String,
    token: Option<SecretString>,
}

impl HttpCollection {
    /// Creates a collection client for `endpoint` with default timeouts.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(build_http_client(HttpConfig::default()), endpoint)
    }

    /// Creates a collection client sharing an existing HTTP client.
    #[must_use]
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Sets the bearer token sent with every request.
    #[must_use]
    pub fn with_token(mut self, token: Option<SecretString>) -> Self {
        self.token = token.filter(|t| !t.expose_secret().trim().is_empty());
        self
    }

    /// Returns true if requests carry an `Authorization` header.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn item_url(&self, id: &ServerId) -> String {
        format!("{}/{}", self.endpoint, id.as_path_segment())
    }

    fn send(&self, method: &'static str, url: &str, request: RequestBuilder) -> RemoteResult<Response> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        };

        let response = request.send().map_err(|e| {
            let err = RemoteError::from_reqwest(&e);
            tracing::error!(
                method,
                url,
                error = %e,
                error_kind = err.kind(),
                "HTTP request failed"
            );
            err
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(method, url, status = status.as_u16(), "HTTP request succeeded");
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let message = extract_error_message(status.as_u16(), &body);
        tracing::error!(
            method,
            url,
            status = status.as_u16(),
            error_kind = "status",
            message = %message,
            "HTTP request returned error status"
        );
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(url, "Server rejected credentials; the auth token may be missing or expired");
        }
        Err(RemoteError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Reads an optional JSON body. `204 No Content` and blank bodies yield
/// `None`.
fn read_optional_json(response: Response) -> RemoteResult<Option<Value>> {
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    let text = response
        .text()
        .map_err(|e| RemoteError::Payload(format!("failed to read response body: {e}")))?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| RemoteError::Payload(format!("response is not JSON: {e}")))
}

impl RemoteCollection for HttpCollection {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn list(&self) -> RemoteResult<Vec<Value>> {
        let response = self.send("GET", &self.endpoint, self.client.get(&self.endpoint))?;
        match read_optional_json(response)? {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(RemoteError::Payload(format!(
                "expected a JSON array, got {}",
                json_type_name(&other)
            ))),
            None => Err(RemoteError::Payload("expected a JSON array, got an empty body".to_string())),
        }
    }

    fn create(&self, body: &Value) -> RemoteResult<Option<Value>> {
        let response = self.send("POST", &self.endpoint, self.client.post(&self.endpoint).json(body))?;
        read_optional_json(response)
    }

    fn update(&self, id: &ServerId, body: &Value) -> RemoteResult<Option<Value>> {
        let url = self.item_url(id);
        let response = self.send("PUT", &url, self.client.put(&url).json(body))?;
        read_optional_json(response)
    }

    fn delete(&self, id: &ServerId) -> RemoteResult<()> {
        let url = self.item_url(id);
        self.send("DELETE", &url, self.client.delete(&url))?;
        Ok(())
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
