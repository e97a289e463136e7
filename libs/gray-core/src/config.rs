//! Gray routing configuration surface.

use std::env;

use serde::{Deserialize, Serialize};

/// Operator-facing gray routing switches.
///
/// Routing defaults to disabled, which behaves as a pure pass-through:
/// every request classifies as base and no header is rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrayConfig {
    /// Master switch for gray routing.
    #[serde(default)]
    pub enabled: bool,

    /// Reserved match rules.
    ///
    /// Only exact matching against the gray token is implemented; future
    /// rule kinds keep their slot here so enabling them is a config
    /// change, not a wire change.
    #[serde(default)]
    pub matches: Vec<String>,
}

impl GrayConfig {
    /// Load configuration from environment variables.
    /// Falls back to the disabled default when unset.
    ///
    /// `GRAY_ROUTING_ENABLED` accepts `1` / `true` / `TRUE`;
    /// `GRAY_ROUTING_MATCHES` is a comma-separated list.
    pub fn from_env() -> Self {
        Self {
            enabled: env::var("GRAY_ROUTING_ENABLED")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE"))
                .unwrap_or(false),
            matches: env::var("GRAY_ROUTING_MATCHES")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_is_disabled() {
        let config = GrayConfig::default();
        assert!(!config.enabled);
        assert!(config.matches.is_empty());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_when_unset() {
        env::remove_var("GRAY_ROUTING_ENABLED");
        env::remove_var("GRAY_ROUTING_MATCHES");

        let config = GrayConfig::from_env();
        assert_eq!(config, GrayConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_enabled_and_matches() {
        env::set_var("GRAY_ROUTING_ENABLED", "true");
        env::set_var("GRAY_ROUTING_MATCHES", "gray, canary ,");

        let config = GrayConfig::from_env();
        assert!(config.enabled);
        assert_eq!(config.matches, vec!["gray".to_string(), "canary".to_string()]);

        env::remove_var("GRAY_ROUTING_ENABLED");
        env::remove_var("GRAY_ROUTING_MATCHES");
    }

    #[test]
    #[serial]
    fn test_from_env_unrecognized_value_stays_disabled() {
        env::set_var("GRAY_ROUTING_ENABLED", "yes");

        let config = GrayConfig::from_env();
        assert!(!config.enabled);

        env::remove_var("GRAY_ROUTING_ENABLED");
    }
}
