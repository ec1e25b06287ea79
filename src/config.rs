//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML overlay text supplied by the caller
//! 3. Environment variables: `GENEALOGY_*` prefix

use config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while assembling [`Settings`].
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {message}")]
    Config { message: String },
}

fn config_err(e: impl std::fmt::Display) -> SettingsError {
    SettingsError::Config {
        message: e.to_string(),
    }
}

/// Unified configuration for genealogy queries.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Vampires converted strictly after this year count as millennials
    pub millennial_year: i32,
    /// Render tree labels with the conversion year
    pub show_years: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            millennial_year: 1980,
            show_years: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub millennial_year: Option<i32>,
    pub show_years: Option<bool>,
}

impl Settings {
    /// Parse a TOML overlay on top of the compiled defaults.
    ///
    /// Environment variables are not consulted.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let raw: RawSettings = toml::from_str(content).map_err(config_err)?;
        Ok(Self::default().merge_with(&raw))
    }

    /// Scalar options: overlay wins if Some, otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            millennial_year: overlay.millennial_year.unwrap_or(self.millennial_year),
            show_years: overlay.show_years.unwrap_or(self.show_years),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `overlay` - Optional TOML text applied on top of the defaults
    pub fn load(overlay: Option<&str>) -> Result<Self, SettingsError> {
        let mut current = match overlay {
            Some(content) => Self::from_toml_str(content)?,
            None => Self::default(),
        };
        current = Self::apply_env_overrides(current)?;
        tracing::debug!(?current, "loaded settings");
        Ok(current)
    }

    /// Apply GENEALOGY_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("GENEALOGY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if config.get_string("millennial_year").is_ok() {
            let year = config.get_int("millennial_year").map_err(config_err)?;
            settings.millennial_year = i32::try_from(year).map_err(config_err)?;
        }
        if config.get_string("show_years").is_ok() {
            settings.show_years = config.get_bool("show_years").map_err(config_err)?;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.millennial_year, 1980);
        assert!(settings.show_years);
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let raw = RawSettings {
            millennial_year: None,
            show_years: Some(false),
        };
        let merged = Settings::default().merge_with(&raw);
        assert_eq!(merged.millennial_year, 1980);
        assert!(!merged.show_years);
    }
}
