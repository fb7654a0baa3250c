//! Common paths for chirpmock
//!
//! Settings live under ~/.config/chirpmock/ on all platforms:
//! - config.toml - User configuration
//!
//! Exports go to the current directory unless the config says otherwise.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the chirpmock settings directory (~/.config/chirpmock/)
pub fn chirpmock_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".config").join("chirpmock");
    fs::create_dir_all(&dir).context("Failed to create chirpmock directory")?;
    Ok(dir)
}

/// Get the config file path (~/.config/chirpmock/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(chirpmock_dir()?.join("config.toml"))
}

/// Directory exports are written to when none is configured
pub fn default_export_dir() -> Result<PathBuf> {
    std::env::current_dir().context("Could not determine current directory")
}
