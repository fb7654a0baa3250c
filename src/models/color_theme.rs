//! Color theme of the mocked post

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// One of the three palettes a post can be shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    /// White background, black text
    #[default]
    Light,
    /// Dark blue-gray background, white text
    Dim,
    /// Near-black background, white text
    Dark,
}

/// Returned when a theme name is not one of `light`, `dim` or `dark`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown color theme: {0} (expected light, dim or dark)")]
pub struct ThemeParseError(pub String);

impl ColorTheme {
    /// Get all themes in selector order
    pub const fn all() -> &'static [Self] {
        &[Self::Light, Self::Dim, Self::Dark]
    }

    /// Get the display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dim => "Dim",
            Self::Dark => "Dark",
        }
    }

    /// Get the lowercase identifier used in config files and on the CLI
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dim => "dim",
            Self::Dark => "dark",
        }
    }

    /// Next theme in selector order (wraps around)
    pub const fn next(&self) -> Self {
        match self {
            Self::Light => Self::Dim,
            Self::Dim => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Previous theme in selector order (wraps around)
    pub const fn prev(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dim => Self::Light,
            Self::Dark => Self::Dim,
        }
    }
}

impl FromStr for ColorTheme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dim" => Ok(Self::Dim),
            "dark" => Ok(Self::Dark),
            _ => Err(ThemeParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_themes() {
        assert_eq!("light".parse::<ColorTheme>().unwrap(), ColorTheme::Light);
        assert_eq!("Dim".parse::<ColorTheme>().unwrap(), ColorTheme::Dim);
        assert_eq!(" dark ".parse::<ColorTheme>().unwrap(), ColorTheme::Dark);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "sepia".parse::<ColorTheme>().unwrap_err();
        assert_eq!(err, ThemeParseError("sepia".to_string()));
    }

    #[test]
    fn test_cycle_visits_all() {
        let mut theme = ColorTheme::Light;
        for expected in [ColorTheme::Dim, ColorTheme::Dark, ColorTheme::Light] {
            theme = theme.next();
            assert_eq!(theme, expected);
        }
        assert_eq!(ColorTheme::Light.prev(), ColorTheme::Dark);
    }
}
