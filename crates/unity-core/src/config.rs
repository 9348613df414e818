//! Platform configuration
//!
//! Tunables for the wizard, mock data and landing timers. Every field has a
//! default, so an empty TOML document is a valid configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Platform configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Maximum characters accepted in the personality prompt
    pub persona_prompt_max_chars: usize,
    /// Initial text of the wizard's budget field
    pub default_monthly_budget: String,
    /// Days of history before today (window holds `history_days + 1` points)
    pub history_days: u32,
    /// Index from the start of the window carrying the version marker
    pub version_marker_offset: u32,
    /// Label written on the version marker entry
    pub version_label: String,
    /// Landing timers
    pub landing: LandingConfig,
}

impl PlatformConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With prompt length cap
    #[inline]
    #[must_use]
    pub fn with_prompt_max_chars(mut self, max: usize) -> Self {
        self.persona_prompt_max_chars = max;
        self
    }

    /// With default budget text
    #[inline]
    #[must_use]
    pub fn with_default_budget(mut self, budget: impl Into<String>) -> Self {
        self.default_monthly_budget = budget.into();
        self
    }

    /// With landing timer settings
    #[inline]
    #[must_use]
    pub fn with_landing(mut self, landing: LandingConfig) -> Self {
        self.landing = landing;
        self
    }

    /// Parse from a TOML document and validate.
    ///
    /// # Errors
    /// `ConfigError::Parse` on malformed TOML, `ConfigError::Invalid` when
    /// [`validate`](Self::validate) fails.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "Loaded platform config");
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    /// `ConfigError::Invalid` describing the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.persona_prompt_max_chars == 0 {
            return Err(ConfigError::Invalid(
                "persona_prompt_max_chars must be positive".to_string(),
            ));
        }
        if self.version_marker_offset > self.history_days {
            return Err(ConfigError::Invalid(format!(
                "version_marker_offset {} outside history window of {} days",
                self.version_marker_offset, self.history_days
            )));
        }
        self.landing.validate()
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            persona_prompt_max_chars: 500,
            default_monthly_budget: "5000".to_string(),
            history_days: 30,
            version_marker_offset: 15,
            version_label: "v1.1".to_string(),
            landing: LandingConfig::default(),
        }
    }
}

/// Landing page timer settings, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    /// Tour banner message rotation
    pub tour_message_interval_ms: u64,
    /// Typewriter speed, per character
    pub tour_typing_interval_ms: u64,
    /// Generation showcase rotation
    pub showcase_interval_ms: u64,
}

impl LandingConfig {
    #[inline]
    #[must_use]
    pub fn tour_message_interval(&self) -> Duration {
        Duration::from_millis(self.tour_message_interval_ms)
    }

    #[inline]
    #[must_use]
    pub fn tour_typing_interval(&self) -> Duration {
        Duration::from_millis(self.tour_typing_interval_ms)
    }

    #[inline]
    #[must_use]
    pub fn showcase_interval(&self) -> Duration {
        Duration::from_millis(self.showcase_interval_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let intervals = [
            ("tour_message_interval_ms", self.tour_message_interval_ms),
            ("tour_typing_interval_ms", self.tour_typing_interval_ms),
            ("showcase_interval_ms", self.showcase_interval_ms),
        ];
        match intervals.iter().find(|(_, v)| *v == 0) {
            Some((name, _)) => Err(ConfigError::Invalid(format!("{name} must be positive"))),
            None => Ok(()),
        }
    }
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            tour_message_interval_ms: 8000,
            tour_typing_interval_ms: 30,
            showcase_interval_ms: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = PlatformConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlatformConfig::default());
        assert_eq!(config.persona_prompt_max_chars, 500);
    }

    #[test]
    fn partial_override() {
        let config = PlatformConfig::from_toml_str(
            "persona_prompt_max_chars = 200\n[landing]\nshowcase_interval_ms = 1000\n",
        )
        .unwrap();
        assert_eq!(config.persona_prompt_max_chars, 200);
        assert_eq!(config.landing.showcase_interval(), Duration::from_millis(1000));
        assert_eq!(config.landing.tour_typing_interval_ms, 30);
    }

    #[test]
    fn rejects_zero_interval() {
        let result = PlatformConfig::from_toml_str("[landing]\ntour_typing_interval_ms = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_marker_outside_window() {
        let result = PlatformConfig::from_toml_str("history_days = 10\nversion_marker_offset = 11\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_malformed_toml() {
        let result = PlatformConfig::from_toml_str("persona_prompt_max_chars = \"many\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn builder_methods() {
        let config = PlatformConfig::new()
            .with_prompt_max_chars(64)
            .with_default_budget("");
        assert_eq!(config.persona_prompt_max_chars, 64);
        assert!(config.default_monthly_budget.is_empty());
    }
}
