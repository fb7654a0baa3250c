//! Configuration module for chirpmock

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::ColorTheme;
use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Editor chrome theme
    #[serde(default)]
    pub theme: Theme,

    /// Theme the post starts in
    #[serde(default)]
    pub initial_theme: ColorTheme,

    /// Where `tweet.png` is written (current directory when unset)
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Logical width of the exported image
    #[serde(default = "default_export_width")]
    pub export_width: u32,

    /// Pixel scale of the exported image (1-4)
    #[serde(default = "default_export_scale")]
    pub export_scale: u32,
}

fn default_export_width() -> u32 {
    600
}

fn default_export_scale() -> u32 {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            initial_theme: ColorTheme::default(),
            export_dir: None,
            export_width: default_export_width(),
            export_scale: default_export_scale(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        crate::paths::config_path()
    }

    /// Load config from the default path or create default
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Export directory, falling back to the current directory
    pub fn resolved_export_dir(&self) -> Result<PathBuf> {
        match &self.export_dir {
            Some(dir) => Ok(dir.clone()),
            None => crate::paths::default_export_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.export_width, 600);
        assert_eq!(config.export_scale, 2);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            initial_theme: ColorTheme::Dim,
            export_dir: Some(dir.path().join("out")),
            export_scale: 3,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "initial_theme = \"dark\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.initial_theme, ColorTheme::Dark);
        assert_eq!(config.export_width, 600);
    }

    #[test]
    fn test_bad_theme_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "initial_theme = \"sepia\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_configured_export_dir_wins() {
        let config = Config {
            export_dir: Some(PathBuf::from("/tmp/exports")),
            ..Config::default()
        };
        assert_eq!(
            config.resolved_export_dir().unwrap(),
            PathBuf::from("/tmp/exports")
        );
    }
}
