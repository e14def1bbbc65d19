//! Auth command handlers.
//!
//! Non-interactive counterparts of the TUI flows, built on the same client.
//! The password comes from `DOORMAN_PASSWORD` when set (for scripting),
//! otherwise from a prompt. The prompt echoes; prefer the env var on shared
//! terminals.

use std::io::{BufRead, Write, stdin, stdout};

use anyhow::{Context, Result};
use doorman_core::{AuthClient, Config, Session};

/// Environment variable supplying the password non-interactively.
const ENV_PASSWORD: &str = "DOORMAN_PASSWORD";

pub async fn login(config: &Config, email: Option<String>) -> Result<()> {
    let client = AuthClient::from_config(config)?;
    let email = resolve_email(email)?;
    let password = resolve_password()?;

    let session = client.sign_in_with_password(&email, &password).await?;
    print_session(&session);
    Ok(())
}

pub async fn signup(config: &Config, email: Option<String>) -> Result<()> {
    let client = AuthClient::from_config(config)?;
    let email = resolve_email(email)?;
    let password = resolve_password()?;

    match client.sign_up(&email, &password).await? {
        Some(session) => print_session(&session),
        None => println!("Account created. Check your email to confirm it."),
    }
    Ok(())
}

pub async fn logout(config: &Config) -> Result<()> {
    let client = AuthClient::from_config(config)?;
    if client.get_session().await?.is_none() {
        println!("Not signed in.");
        return Ok(());
    }
    client.sign_out().await?;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(config: &Config) -> Result<()> {
    let client = AuthClient::from_config(config)?;
    let Some(session) = client.get_session().await? else {
        anyhow::bail!("Not signed in.");
    };

    // Validate the token against the provider rather than trusting the cache.
    let user = client
        .get_user(&session.access_token)
        .await
        .context("verify session with provider")?;
    let email = user.email.as_deref().unwrap_or("(no email)");
    println!("Signed in as {email}");
    if let Some(created) = user.created_at.as_deref()
        && let Ok(dt) = chrono::DateTime::parse_from_rfc3339(created)
    {
        println!("Member since {}", dt.format("%Y-%m-%d"));
    }
    if !user.is_email_confirmed() {
        println!("Email not confirmed yet.");
    }
    Ok(())
}

pub async fn reset(config: &Config, email: Option<String>) -> Result<()> {
    let client = AuthClient::from_config(config)?;
    let email = resolve_email(email)?;

    client
        .reset_password_for_email(&email, &config.reset_redirect_url())
        .await?;
    println!("Password reset email sent to {email}.");
    Ok(())
}

fn print_session(session: &Session) {
    let email = session.user.email.as_deref().unwrap_or("(no email)");
    println!("Signed in as {email}");
    if let Some(created) = session.user.created_at.as_deref()
        && let Ok(dt) = chrono::DateTime::parse_from_rfc3339(created)
    {
        println!("Member since {}", dt.format("%Y-%m-%d"));
    }
}

fn resolve_email(email: Option<String>) -> Result<String> {
    match email {
        Some(email) if !email.trim().is_empty() => Ok(email.trim().to_string()),
        _ => prompt("Email: "),
    }
}

fn resolve_password() -> Result<String> {
    if let Ok(password) = std::env::var(ENV_PASSWORD) {
        if !password.is_empty() {
            return Ok(password);
        }
    }
    prompt("Password: ")
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    stdout().flush().context("flush prompt")?;

    let mut line = String::new();
    stdin()
        .lock()
        .read_line(&mut line)
        .context("read from stdin")?;
    let value = line.trim();
    if value.is_empty() {
        anyhow::bail!("No input provided.");
    }
    Ok(value.to_string())
}
