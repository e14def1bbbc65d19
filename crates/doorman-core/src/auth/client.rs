//! HTTP client for the provider's auth API (GoTrue-compatible).

use std::sync::{Arc, Mutex};

use serde::Deserialize;
use serde_json::json;

use super::cache::SessionCache;
use super::error::{AuthError, AuthResult};
use super::events::{AuthChange, AuthEvent, AuthEvents, Subscription};
use super::{Session, User, now_millis};

/// Standard User-Agent header for doorman API requests.
pub const USER_AGENT: &str = concat!("doorman/", env!("CARGO_PKG_VERSION"));

/// Client for one provider project.
///
/// Holds the publishable key, the in-memory session copy, the on-disk cache
/// and the state-change hub. Constructed once and passed explicitly to
/// whatever needs it; there is no process-wide singleton.
pub struct AuthClient {
    http: reqwest::Client,
    auth_base: String,
    publishable_key: String,
    events: Arc<AuthEvents>,
    session: Mutex<Option<Session>>,
    cache: SessionCache,
}

/// Token grant response from `POST /token`.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    /// Lifetime in seconds.
    #[serde(default)]
    expires_in: Option<u64>,
    /// Absolute expiry in seconds since epoch; preferred when present.
    #[serde(default)]
    expires_at: Option<u64>,
    user: User,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let expires_at = match (self.expires_at, self.expires_in) {
            (Some(secs), _) => secs.saturating_mul(1000),
            (None, Some(lifetime)) => now_millis().saturating_add(lifetime.saturating_mul(1000)),
            (None, None) => now_millis(),
        };
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

impl AuthClient {
    /// Creates a client from config, caching sessions at the default path.
    ///
    /// # Errors
    /// Returns an error if no provider URL is configured.
    pub fn from_config(config: &crate::config::Config) -> anyhow::Result<Self> {
        let provider_url = config.require_provider_url()?;
        Ok(Self::new(
            provider_url,
            &config.publishable_key,
            SessionCache::at_default_path(),
        ))
    }

    /// Creates a client for an explicit project URL and session cache.
    pub fn new(provider_url: &str, publishable_key: &str, cache: SessionCache) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth_base: format!("{}/auth/v1", provider_url.trim_end_matches('/')),
            publishable_key: publishable_key.to_string(),
            events: AuthEvents::new(),
            session: Mutex::new(None),
            cache,
        }
    }

    /// Subscribes to auth state changes.
    pub fn on_auth_state_change(&self) -> Subscription {
        self.events.subscribe()
    }

    /// Returns the in-memory session copy without touching disk or network.
    pub fn current_session(&self) -> Option<Session> {
        self.session.lock().expect("session lock poisoned").clone()
    }

    /// Returns the current session, refreshing it through the provider when
    /// the cached access token has expired.
    ///
    /// A provider-reported refresh rejection means the session is gone:
    /// the cache is cleared and `None` is returned. Transport failures
    /// propagate so the caller can decide (the TUI treats them as absent).
    ///
    /// # Errors
    /// Returns an error on transport or parse failures.
    pub async fn get_session(&self) -> AuthResult<Option<Session>> {
        let cached = match self.current_session() {
            Some(session) => Some(session),
            None => self.load_cached_session(),
        };

        let Some(session) = cached else {
            return Ok(None);
        };

        if !session.is_expired() {
            self.set_memory_session(Some(session.clone()));
            return Ok(Some(session));
        }

        tracing::debug!("cached session expired, refreshing");
        match self.refresh_session(&session.refresh_token).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(err) if err.is_provider_reported() => {
                tracing::info!(%err, "refresh rejected by provider, discarding session");
                self.forget_session();
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Signs in with email and password (`POST /token?grant_type=password`).
    ///
    /// # Errors
    /// Returns the provider's error verbatim or a transport error.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session> {
        let response: TokenResponse = self
            .send(
                self.http
                    .post(format!("{}/token", self.auth_base))
                    .query(&[("grant_type", "password")])
                    .json(&json!({ "email": email, "password": password })),
            )
            .await?;

        let session = response.into_session();
        self.store_session(&session, AuthChange::SignedIn);
        tracing::info!(user = %session.user.id, "signed in");
        Ok(session)
    }

    /// Registers a new account (`POST /signup`).
    ///
    /// Returns the session when the project auto-confirms email addresses;
    /// `None` means a confirmation email is on its way.
    ///
    /// # Errors
    /// Returns the provider's error verbatim or a transport error.
    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<Option<Session>> {
        let body: serde_json::Value = self
            .send(
                self.http
                    .post(format!("{}/signup", self.auth_base))
                    .json(&json!({ "email": email, "password": password })),
            )
            .await?;

        if body.get("access_token").is_some() {
            let response: TokenResponse = serde_json::from_value(body).map_err(|e| {
                AuthError::new(super::AuthErrorKind::Parse, format!("signup response: {e}"))
            })?;
            let session = response.into_session();
            self.store_session(&session, AuthChange::SignedIn);
            return Ok(Some(session));
        }

        tracing::info!("sign-up accepted, confirmation pending");
        Ok(None)
    }

    /// Signs out (`POST /logout`).
    ///
    /// The local session is discarded and `SignedOut` is emitted regardless
    /// of the request outcome; the returned error only reports whether the
    /// provider acknowledged the revocation.
    ///
    /// # Errors
    /// Returns an error if the provider rejects the revocation.
    pub async fn sign_out(&self) -> AuthResult<()> {
        let session = match self.current_session() {
            Some(session) => Some(session),
            None => self.load_cached_session(),
        };

        let result = match &session {
            Some(session) => {
                self.send_no_body(
                    self.http
                        .post(format!("{}/logout", self.auth_base))
                        .bearer_auth(&session.access_token),
                )
                .await
            }
            None => Ok(()),
        };

        self.forget_session();
        self.events.emit(&AuthEvent {
            change: AuthChange::SignedOut,
            session: None,
        });
        tracing::info!("signed out");
        result
    }

    /// Requests a password-reset email (`POST /recover`).
    ///
    /// `redirect_to` is where the emailed link lands, typically the
    /// reset-completion view on the companion app's origin.
    ///
    /// # Errors
    /// Returns the provider's error verbatim or a transport error.
    pub async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> AuthResult<()> {
        tracing::debug!(email, redirect_to, "requesting password reset");
        self.send_no_body(
            self.http
                .post(format!("{}/recover", self.auth_base))
                .query(&[("redirect_to", redirect_to)])
                .json(&json!({ "email": email })),
        )
        .await
    }

    /// Exchanges a refresh token for a new session
    /// (`POST /token?grant_type=refresh_token`).
    ///
    /// # Errors
    /// Returns the provider's error verbatim or a transport error.
    pub async fn refresh_session(&self, refresh_token: &str) -> AuthResult<Session> {
        let response: TokenResponse = self
            .send(
                self.http
                    .post(format!("{}/token", self.auth_base))
                    .query(&[("grant_type", "refresh_token")])
                    .json(&json!({ "refresh_token": refresh_token })),
            )
            .await?;

        let session = response.into_session();
        self.store_session(&session, AuthChange::TokenRefreshed);
        Ok(session)
    }

    /// Fetches the account behind an access token (`GET /user`).
    ///
    /// # Errors
    /// Returns the provider's error verbatim or a transport error.
    pub async fn get_user(&self, access_token: &str) -> AuthResult<User> {
        self.send(
            self.http
                .get(format!("{}/user", self.auth_base))
                .bearer_auth(access_token),
        )
        .await
    }

    // ========================================================================
    // Internals
    // ========================================================================

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> AuthResult<T> {
        let response = self
            .apply_headers(request)
            .send()
            .await
            .map_err(|e| AuthError::from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::from_response(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::from_transport(&e))
    }

    async fn send_no_body(&self, request: reqwest::RequestBuilder) -> AuthResult<()> {
        let response = self
            .apply_headers(request)
            .send()
            .await
            .map_err(|e| AuthError::from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::from_response(status.as_u16(), &body));
        }
        Ok(())
    }

    fn apply_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.publishable_key)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
    }

    fn load_cached_session(&self) -> Option<Session> {
        match self.cache.load() {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(%err, "ignoring unreadable session cache");
                None
            }
        }
    }

    fn set_memory_session(&self, session: Option<Session>) {
        *self.session.lock().expect("session lock poisoned") = session;
    }

    fn store_session(&self, session: &Session, change: AuthChange) {
        self.set_memory_session(Some(session.clone()));
        if let Err(err) = self.cache.save(session) {
            tracing::warn!(%err, "failed to persist session cache");
        }
        self.events.emit(&AuthEvent {
            change,
            session: Some(session.clone()),
        });
    }

    fn forget_session(&self) {
        self.set_memory_session(None);
        if let Err(err) = self.cache.clear() {
            tracing::warn!(%err, "failed to clear session cache");
        }
    }
}
