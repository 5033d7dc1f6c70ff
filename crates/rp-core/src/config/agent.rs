//! Agent configuration

use rp_protocol::Assets;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::duration_secs;
use crate::error::ConfigError;

/// Configuration for the presence agent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Application identifier (overridden by `--client-id` / `DISCORD_CLIENT_ID`)
    pub client_id: Option<String>,

    /// Time between presence updates
    #[serde(with = "duration_secs")]
    pub update_interval: Duration,

    /// Bound on opening a single candidate endpoint
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,

    /// Bound on writing a single frame
    #[serde(with = "duration_secs")]
    pub write_timeout: Duration,

    /// How many full candidate sweeps the initial connect may make.
    ///
    /// 1 means a single sweep with no retry.
    pub connect_attempts: u32,

    /// Backoff between initial connect sweeps
    pub backoff: BackoffConfig,

    /// Images and hover texts shown with the presence
    pub assets: AssetsConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            update_interval: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(5),
            connect_attempts: 1,
            backoff: BackoffConfig::default(),
            assets: AssetsConfig::default(),
        }
    }
}

impl AgentConfig {
    /// Check values that parse as TOML but can't be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backoff.validate()
    }
}

/// Exponential backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Initial delay
    #[serde(with = "duration_secs")]
    pub initial: Duration,

    /// Maximum delay
    #[serde(with = "duration_secs")]
    pub max: Duration,

    /// Multiplier for each retry
    pub multiplier: f64,

    /// Jitter factor (0.0 to 1.0)
    pub jitter: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial: Duration::from_secs(1),
            max: Duration::from_secs(60),
            multiplier: 2.0,
            jitter: 0.25,
        }
    }
}

impl BackoffConfig {
    /// Multiplier must be finite and at least 1, jitter within 0..=1, and
    /// the initial delay no longer than the maximum
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "backoff.multiplier must be a finite number >= 1.0 (got {})",
                self.multiplier
            )));
        }
        if !(0.0..=1.0).contains(&self.jitter) {
            return Err(ConfigError::Invalid(format!(
                "backoff.jitter must be between 0.0 and 1.0 (got {})",
                self.jitter
            )));
        }
        if self.initial > self.max {
            return Err(ConfigError::Invalid(format!(
                "backoff.initial ({:?}) is longer than backoff.max ({:?})",
                self.initial, self.max
            )));
        }
        Ok(())
    }
}

/// Asset keys and hover texts; empty strings are left out of the payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub large_image: String,
    pub large_text: String,
    pub small_image: String,
    pub small_text: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            large_image: "clock_icon".to_string(),
            large_text: "Local Time Display".to_string(),
            small_image: "time_small".to_string(),
            small_text: "Live Time".to_string(),
        }
    }
}

impl AssetsConfig {
    /// Convert to the wire representation
    pub fn to_assets(&self) -> Assets {
        let field = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Assets {
            large_image: field(&self.large_image),
            large_text: field(&self.large_text),
            small_image: field(&self.small_image),
            small_text: field(&self.small_text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.update_interval, Duration::from_secs(30));
        assert_eq!(config.connect_attempts, 1);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AgentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_non_finite_backoff_values_rejected() {
        for text in [
            "[backoff]\njitter = nan\n",
            "[backoff]\nmultiplier = inf\n",
            "[backoff]\nmultiplier = nan\n",
            "[backoff]\njitter = 1.5\n",
            "[backoff]\nmultiplier = 0.5\n",
        ] {
            let config: AgentConfig = toml::from_str(text).unwrap();
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn test_initial_longer_than_max_rejected() {
        let config: AgentConfig = toml::from_str("[backoff]\ninitial = 120\nmax = 60\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("backoff.initial"));
    }

    #[test]
    fn test_to_assets_drops_empty_fields() {
        let assets = AssetsConfig {
            small_image: String::new(),
            small_text: String::new(),
            ..Default::default()
        }
        .to_assets();

        assert_eq!(assets.large_image.as_deref(), Some("clock_icon"));
        assert!(assets.small_image.is_none());
        assert!(assets.small_text.is_none());
    }
}
