//! Client for the hosted auth provider.
//!
//! The provider owns credential storage, password hashing, token issuance and
//! reset-email delivery. This module only speaks its HTTP API and keeps a
//! read-only cached copy of the current session for rendering.

pub mod cache;
pub mod client;
pub mod error;
pub mod events;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

pub use cache::SessionCache;
pub use client::AuthClient;
pub use error::{AuthError, AuthErrorKind, AuthResult};
pub use events::{AuthChange, AuthEvent, AuthEvents, Subscription};

/// Account as reported by the provider.
///
/// Timestamps are kept as the provider's RFC 3339 strings; display formatting
/// parses them on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
}

impl User {
    /// Returns true once the provider has recorded email confirmation.
    pub fn is_email_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}

/// An authenticated session issued by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Short-lived bearer token.
    pub access_token: String,
    /// Long-lived token used to mint new access tokens.
    pub refresh_token: String,
    /// Expiry timestamp in milliseconds since epoch.
    pub expires_at: u64,
    pub user: User,
}

impl Session {
    /// Returns true if the access token is expired or about to expire.
    pub fn is_expired(&self) -> bool {
        now_millis() >= self.expires_at
    }
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| u64::try_from(d.as_millis()).ok())
        .unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u-1".to_string(),
            email: Some("kim@example.com".to_string()),
            created_at: Some("2026-01-15T09:30:00Z".to_string()),
            email_confirmed_at: None,
        }
    }

    #[test]
    fn session_expiry_uses_wall_clock() {
        let expired = Session {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_at: 0,
            user: user(),
        };
        assert!(expired.is_expired());

        let live = Session {
            expires_at: now_millis() + 60_000,
            ..expired
        };
        assert!(!live.is_expired());
    }

    #[test]
    fn unconfirmed_user_reports_unconfirmed() {
        assert!(!user().is_email_confirmed());
        let confirmed = User {
            email_confirmed_at: Some("2026-01-16T00:00:00Z".to_string()),
            ..user()
        };
        assert!(confirmed.is_email_confirmed());
    }
}
