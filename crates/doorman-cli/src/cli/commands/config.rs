//! Config command handlers.

use anyhow::{Context, Result};
use doorman_core::config;

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let path = config::init_config_file().context("init config")?;
    println!("Wrote config to {}", path.display());
    Ok(())
}
