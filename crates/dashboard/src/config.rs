//! Startup configuration from `SKYHUB_*` environment variables.

use thiserror::Error;

use skyhub_observability::{LogConfig, LogFormat};

pub const ENV_LOG_LEVEL: &str = "SKYHUB_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "SKYHUB_LOG_FORMAT";
pub const ENV_SEED: &str = "SKYHUB_SEED";
pub const ENV_ACTIVITY_LIMIT: &str = "SKYHUB_ACTIVITY_LIMIT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub log: LogConfig,
    /// Load the demo dataset on startup.
    pub seed: bool,
    /// Entries of recent activity included in the report.
    pub activity_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            seed: true,
            activity_limit: 10,
        }
    }
}

impl DashboardConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            let level = level.trim();
            if level.is_empty() {
                return Err(ConfigError::invalid(ENV_LOG_LEVEL, "cannot be empty"));
            }
            config.log.level = level.to_string();
        }

        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            config.log.format = format
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid(ENV_LOG_FORMAT, e.to_string()))?;
        }

        if let Some(seed) = lookup(ENV_SEED) {
            config.seed = parse_bool(&seed).ok_or_else(|| {
                ConfigError::invalid(ENV_SEED, format!("expected true/false, got {seed:?}"))
            })?;
        }

        if let Some(limit) = lookup(ENV_ACTIVITY_LIMIT) {
            config.activity_limit = limit
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(ENV_ACTIVITY_LIMIT, format!("{e}")))?;
        }

        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = DashboardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn reads_every_variable() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (ENV_LOG_LEVEL, "skyhub_inventory=debug"),
            (ENV_LOG_FORMAT, "pretty"),
            (ENV_SEED, "off"),
            (ENV_ACTIVITY_LIMIT, "3"),
        ]))
        .unwrap();
        assert_eq!(config.log.level, "skyhub_inventory=debug");
        assert_eq!(config.log.format, LogFormat::Pretty);
        assert!(!config.seed);
        assert_eq!(config.activity_limit, 3);
    }

    #[test]
    fn rejects_bad_values() {
        let err = DashboardConfig::from_lookup(lookup(&[(ENV_SEED, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: ENV_SEED, .. }));

        let err = DashboardConfig::from_lookup(lookup(&[(ENV_ACTIVITY_LIMIT, "-1")])).unwrap_err();
        assert!(err.to_string().starts_with(ENV_ACTIVITY_LIMIT));

        assert!(DashboardConfig::from_lookup(lookup(&[(ENV_LOG_FORMAT, "xml")])).is_err());
    }
}
