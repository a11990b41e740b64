//! Interactive table viewer.

use anyhow::Result;
use roster_core::config::Config;

#[cfg(feature = "tui")]
pub async fn run(config: &Config, copy_on_click: bool) -> Result<()> {
    roster_tui::run_table_viewer(config, copy_on_click).await
}

#[cfg(not(feature = "tui"))]
#[allow(clippy::unused_async)]
pub async fn run(_config: &Config, _copy_on_click: bool) -> Result<()> {
    anyhow::bail!("This build has no table viewer. Use `roster list` instead.")
}
