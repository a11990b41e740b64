//! Full-screen table viewer for roster.
//!
//! Elm-style: `events` feed the `update` reducer, which mutates `state` and
//! returns `effects` for the `runtime` to execute; `render` draws the state.

pub mod common;
pub mod effects;
pub mod events;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod toast;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::{Context, Result};
use roster_core::api::UsersClient;
use roster_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive user table until the user quits.
///
/// Copy on click starts enabled when either `copy_on_click` or the config
/// asks for it.
///
/// # Errors
/// Returns an error if stdout is not a terminal, the endpoint URL is
/// invalid, or terminal I/O fails.
pub async fn run_table_viewer(config: &Config, copy_on_click: bool) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The table viewer requires a terminal.\n\
             Use `roster list` for non-interactive output."
        );
    }

    let client = UsersClient::from_config(config).context("Invalid users endpoint")?;
    let mut runtime = TuiRuntime::new(client, copy_on_click || config.copy_on_click)?;
    runtime.run()
}
