//! Full-screen TUI for Doorman.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use doorman_core::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive auth TUI.
pub async fn run(config: Config) -> Result<()> {
    // The TUI needs a terminal to render.
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `doorman login`, `doorman whoami`, etc. for scripted use."
        );
    }

    let mut runtime = TuiRuntime::new(config)?;
    runtime.run()
}
