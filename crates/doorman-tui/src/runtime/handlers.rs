//! Effect handler implementations.
//!
//! Pure async functions that perform the provider I/O and return the
//! `UiEvent` carrying the outcome. The runtime wraps them in the task
//! lifecycle; none of them touch UI state directly.

use std::sync::Arc;

use doorman_core::AuthClient;

use crate::events::UiEvent;

/// Restores the persisted session, refreshing it when expired.
///
/// Failures degrade to "no session": the user can always sign in again, and
/// the error itself is only useful in the log.
pub async fn fetch_session(client: Arc<AuthClient>) -> UiEvent {
    match client.get_session().await {
        Ok(session) => UiEvent::SessionFetched(session),
        Err(err) => {
            tracing::warn!(error = %err, "session restore failed");
            UiEvent::SessionFetched(None)
        }
    }
}

pub async fn sign_in(client: Arc<AuthClient>, email: String, password: String) -> UiEvent {
    UiEvent::SignInResult(client.sign_in_with_password(&email, &password).await)
}

pub async fn sign_up(client: Arc<AuthClient>, email: String, password: String) -> UiEvent {
    UiEvent::SignUpResult(client.sign_up(&email, &password).await)
}

pub async fn sign_out(client: Arc<AuthClient>) -> UiEvent {
    UiEvent::SignOutResult(client.sign_out().await)
}

pub async fn request_password_reset(
    client: Arc<AuthClient>,
    email: String,
    redirect_to: String,
) -> UiEvent {
    UiEvent::ResetResult(client.reset_password_for_email(&email, &redirect_to).await)
}
