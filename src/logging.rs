use anyhow::{format_err, Result};
use std::str::FromStr;
use tracing::Level;

/// Install a global fmt subscriber at `level`
///
/// Returns `false` if a subscriber was already installed, which is
/// what happens when several sessions are set up in one process.
pub fn init(level: &str) -> Result<bool> {
    let level = Level::from_str(level).map_err(|e| format_err!("bad log level `{level}`: {e}"))?;

    Ok(tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .is_ok())
}
