//! Configuration management for Doorman.
//!
//! Loads configuration from ${DOORMAN_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the provider project URL.
const ENV_PROVIDER_URL: &str = "DOORMAN_URL";
/// Environment variable overriding the publishable (anon) API key.
const ENV_PUBLISHABLE_KEY: &str = "DOORMAN_PUBLISHABLE_KEY";

/// Doorman configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the hosted auth provider project (e.g. `https://xyz.supabase.co`).
    pub provider_url: String,
    /// Publishable API key sent with every request. Not a secret.
    pub publishable_key: String,
    /// Origin of the companion web app; password-reset emails link back here.
    pub app_url: String,
    /// Default tracing filter (overridden by `DOORMAN_LOG`).
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider_url: String::new(),
            publishable_key: String::new(),
            app_url: "http://localhost:3000".to_string(),
            log_filter: "doorman=info".to_string(),
        }
    }
}

impl Config {
    /// Loads config from ${DOORMAN_HOME}/config.toml, then applies env overrides.
    ///
    /// A missing file yields defaults; the caller decides whether an empty
    /// `provider_url` is acceptable for the requested operation.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = paths::config_path();
        let mut config = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(ENV_PROVIDER_URL) {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                config.provider_url = trimmed.to_string();
            }
        }
        if let Ok(key) = std::env::var(ENV_PUBLISHABLE_KEY) {
            let trimmed = key.trim();
            if !trimmed.is_empty() {
                config.publishable_key = trimmed.to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates URL fields when present.
    fn validate(&self) -> Result<()> {
        if !self.provider_url.is_empty() {
            validate_url(&self.provider_url, "provider")?;
        }
        if !self.app_url.is_empty() {
            validate_url(&self.app_url, "app")?;
        }
        Ok(())
    }

    /// Returns the provider URL, failing with a setup hint when unset.
    ///
    /// # Errors
    /// Returns an error if no provider URL is configured.
    pub fn require_provider_url(&self) -> Result<&str> {
        if self.provider_url.is_empty() {
            anyhow::bail!(
                "No provider URL configured. Set {ENV_PROVIDER_URL} or provider_url in {}.",
                paths::config_path().display()
            );
        }
        Ok(&self.provider_url)
    }

    /// The redirect target embedded in password-reset emails.
    ///
    /// Points at the reset-completion view on the companion app's origin.
    pub fn reset_redirect_url(&self) -> String {
        format!("{}/reset-password", self.app_url.trim_end_matches('/'))
    }
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str, what: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid {what} URL: {url}"))?;
    Ok(())
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// This ensures new comments/sections from the template are always present,
/// while preserving user's customized values.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            _ => {}
        }
    }
}

/// Writes the config file, creating it from the template or merging an
/// existing file into a fresh template.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn init_config_file() -> Result<std::path::PathBuf> {
    let path = paths::config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let contents = if path.exists() {
        let existing = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        merge_with_template(&existing)?
    } else {
        default_config_template().to_string()
    };

    fs::write(&path, contents)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(path)
}

/// Filesystem locations used by Doorman.
pub mod paths {
    use std::path::PathBuf;

    /// Returns the user's home directory, if known.
    pub fn home_dir() -> Option<PathBuf> {
        std::env::var_os("HOME").map(PathBuf::from)
    }

    /// Returns the Doorman home directory.
    ///
    /// Uses `$DOORMAN_HOME` when set, otherwise `~/.doorman`.
    pub fn doorman_home() -> PathBuf {
        if let Some(home) = std::env::var_os("DOORMAN_HOME") {
            return PathBuf::from(home);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".doorman")
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        doorman_home().join("config.toml")
    }

    /// Path to the cached session file.
    pub fn session_cache_path() -> PathBuf {
        doorman_home().join("session.json")
    }

    /// Directory for log files.
    pub fn logs_dir() -> PathBuf {
        doorman_home().join("logs")
    }
}
