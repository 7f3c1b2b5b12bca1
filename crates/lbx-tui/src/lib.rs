//! Full-screen TUI implementation for LBX.

pub mod effects;
pub mod events;
pub mod forms;
mod handlers;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{stderr, IsTerminal, Write};

use anyhow::Result;
use lbx_core::config::Config;
pub use runtime::Runtime;

/// Runs the interactive banking client.
pub async fn run(config: Config) -> Result<()> {
    // The client requires a terminal to render the screens
    if !stderr().is_terminal() {
        anyhow::bail!(
            "LBX requires a terminal.\n\
             Run `lbx --help` for the non-interactive commands."
        );
    }

    // Print pre-TUI info to stderr (will be replaced by alternate screen)
    let mut err = stderr();
    writeln!(err, "LBX Banking")?;
    writeln!(err, "Service: {}", config.base_url)?;
    err.flush()?;

    let mut runtime = Runtime::new(config)?;
    let result = runtime.run();
    drop(runtime); // restores the terminal
    result?;

    // Print goodbye after TUI exits (terminal restored)
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
