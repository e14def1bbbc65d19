//! On-disk session cache.
//!
//! Stores the current session in `session.json` with restricted permissions
//! (0600). Tokens are never logged or displayed in full. This mirrors what
//! the provider's browser SDK does with local storage: the provider stays
//! authoritative, the cache only survives process restarts.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::Session;

/// Session cache at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    /// Cache at the default location (${DOORMAN_HOME}/session.json).
    pub fn at_default_path() -> Self {
        Self {
            path: crate::config::paths::session_cache_path(),
        }
    }

    /// Cache at an explicit path (tests, alternate homes).
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the cached session, if any.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session cache {}", self.path.display()))?;
        let session = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session cache {}", self.path.display()))?;
        Ok(Some(session))
    }

    /// Saves a session with restricted permissions (0600).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Removes the cached session. Missing file is not an error.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}
