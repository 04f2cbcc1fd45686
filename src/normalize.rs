//! Collapses every failure shape into the single message shown to the user.

use serde_json::Value;
use std::fmt;

pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection refused, DNS, TLS and the like.
    Transport,
    Timeout,
    /// The service answered with a non-2xx status.
    Server,
    /// A 2xx answer whose body was not a valid result.
    Decode,
    Other,
}

/// What came back from the service alongside a non-2xx status.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureResponse {
    pub status: u16,
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub kind: FailureKind,
    pub response: Option<FailureResponse>,
    pub message: Option<String>,
}

impl Failure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transport,
            response: None,
            message: Some(message.into()),
        }
    }

    pub fn timeout(timeout_ms: u128) -> Self {
        Self {
            kind: FailureKind::Timeout,
            response: None,
            message: Some(format!("timeout of {}ms exceeded", timeout_ms)),
        }
    }

    pub fn server(status: u16, data: Option<Value>) -> Self {
        Self {
            kind: FailureKind::Server,
            response: Some(FailureResponse { status, data }),
            message: Some(format!("Request failed with status code {}", status)),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Decode,
            response: None,
            message: Some(message.into()),
        }
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Self::from(message.to_string())
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self {
            kind: FailureKind::Other,
            response: None,
            message: Some(message),
        }
    }
}

impl From<reqwest::Error> for Failure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Self::decode(e.to_string());
        }
        let kind = if e.is_timeout() {
            FailureKind::Timeout
        } else {
            FailureKind::Transport
        };
        Self {
            kind,
            response: None,
            message: Some(e.to_string()),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) {
            return f.write_str(message);
        }
        match (&self.kind, &self.response) {
            (_, Some(resp)) => write!(f, "Error: HTTP {}", resp.status),
            (FailureKind::Timeout, None) => f.write_str("Error: timeout"),
            _ => f.write_str("Error"),
        }
    }
}

/// Strings pass through, everything else is rendered as JSON.
pub fn safe_stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Bodies that carry nothing worth showing.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

pub fn normalize(failure: Option<&Failure>) -> String {
    let Some(failure) = failure else {
        return UNKNOWN_ERROR.to_string();
    };

    let body = failure
        .response
        .as_ref()
        .and_then(|resp| resp.data.as_ref())
        .filter(|data| !is_blank(data));

    if let Some(data) = body {
        let detail = data.get("detail").filter(|d| !d.is_null());
        return safe_stringify(detail.unwrap_or(data));
    }

    if let Some(message) = failure.message.as_deref().filter(|m| !m.is_empty()) {
        return message.to_string();
    }

    failure.to_string()
}
