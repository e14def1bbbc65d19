//! Error types for the provider client.

use std::fmt;

use serde_json::Value;

/// Result alias for provider calls.
pub type AuthResult<T> = Result<T, AuthError>;

/// Error category for a failed provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// API-level error returned by the provider (bad credentials, rate limit).
    /// The message is suitable for verbatim display.
    Api,
    /// HTTP status error without a parseable provider message.
    HttpStatus,
    /// Failed to parse the response body.
    Parse,
    /// Connection, DNS or timeout failure before a response arrived.
    Transport,
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthErrorKind::Api => write!(f, "api_error"),
            AuthErrorKind::HttpStatus => write!(f, "http_status"),
            AuthErrorKind::Parse => write!(f, "parse"),
            AuthErrorKind::Transport => write!(f, "transport"),
        }
    }
}

/// Structured error from the provider with kind and details.
#[derive(Debug, Clone)]
pub struct AuthError {
    /// Error category.
    pub kind: AuthErrorKind,
    /// One-line summary suitable for display.
    pub message: String,
    /// Optional additional details (e.g. raw error body).
    pub details: Option<String>,
}

impl AuthError {
    /// Creates a new error with no details.
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Builds an error from a non-success HTTP response body.
    ///
    /// The provider reports errors as JSON with one of several message keys
    /// (`msg`, `message`, `error_description`); when one is found the error is
    /// an [`AuthErrorKind::Api`] error carrying that message verbatim.
    pub fn from_response(status: u16, body: &str) -> Self {
        if let Some(msg) = extract_provider_message(body) {
            return Self {
                kind: AuthErrorKind::Api,
                message: msg,
                details: Some(body.to_string()),
            };
        }
        Self {
            kind: AuthErrorKind::HttpStatus,
            message: format!("HTTP {status}"),
            details: if body.is_empty() {
                None
            } else {
                Some(body.to_string())
            },
        }
    }

    /// Maps a reqwest transport/decode error.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let kind = if err.is_decode() {
            AuthErrorKind::Parse
        } else {
            AuthErrorKind::Transport
        };
        Self::new(kind, err.to_string())
    }

    /// Returns true when the message came from the provider and should be
    /// shown verbatim; everything else is an unexpected failure the UI maps
    /// to a generic message.
    pub fn is_provider_reported(&self) -> bool {
        self.kind == AuthErrorKind::Api
    }
}

/// Pulls a human-readable message out of a provider error body.
fn extract_provider_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    for key in ["msg", "message", "error_description", "error"] {
        if let Some(msg) = json.get(key).and_then(Value::as_str) {
            let trimmed = msg.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthError {}
