//! Transient status messages shown at the bottom of a view.

use doorman_core::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

/// Builds the user-facing message for a failed auth flow.
///
/// Provider-reported failures carry a human-readable message and are shown
/// verbatim under the flow's label. Anything else (transport, parse) gets a
/// generic retry prompt so internals never leak into the form.
pub fn flow_error_message(label: &str, err: &AuthError) -> String {
    if err.is_provider_reported() {
        format!("{label} error: {err}")
    } else {
        format!("{label} failed. Please try again.")
    }
}
