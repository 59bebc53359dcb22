//! Optional TOML configuration for the CLI.
//!
//! Config is read from `$XDG_CONFIG_HOME/quickscan/config.toml` (or
//! `~/.config/quickscan/config.toml`). Everything has a built-in default;
//! CLI flags override config values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use quickscan_core::history::HISTORY_FILE_NAME;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct QuickScanConfig {
    #[serde(default)]
    pub history: HistorySection,
    #[serde(default)]
    pub qr: QrSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct HistorySection {
    /// Path of the history log file.
    pub path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct QrSection {
    /// Minimum rendered symbol size in pixels.
    pub size: Option<u32>,
    /// Module color as "#RRGGBB".
    pub foreground: Option<String>,
    /// Background color as "#RRGGBB".
    pub background: Option<String>,
}

/// Load the config file if present; missing file means defaults.
pub fn load_config() -> anyhow::Result<QuickScanConfig> {
    let path = default_config_path()?;
    if !path.exists() {
        return Ok(QuickScanConfig::default());
    }
    read_config(&path)
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// Default history log location when neither flag, env, nor config set one.
pub fn default_history_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join(HISTORY_FILE_NAME))
}

pub fn read_config(path: &Path) -> anyhow::Result<QuickScanConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("quickscan"));
        }
    }
    Ok(home_dir()?.join(".config").join("quickscan"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("quickscan"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("quickscan"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
