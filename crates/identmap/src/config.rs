//! Identity map configuration

use serde::Deserialize;

/// Environment variable read by [`IdentityMapConfig::from_env`]
pub const ENABLED_ENV: &str = "IDENTMAP_ENABLED";

/// Settings applied when an identity map is created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IdentityMapConfig {
    /// Whether the map starts enabled
    pub enabled: bool,
}

impl IdentityMapConfig {
    /// Config with the map switched on
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Read settings from the environment (`IDENTMAP_ENABLED`)
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var(ENABLED_ENV)
                .map(|value| parse_flag(&value))
                .unwrap_or(false),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_disabled() {
        assert!(!IdentityMapConfig::default().enabled);
        assert!(IdentityMapConfig::enabled().enabled);
    }

    #[test]
    fn test_config_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("on"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("off"));
        assert!(!parse_flag(""));
    }

    // Only test in this crate touching IDENTMAP_ENABLED
    #[test]
    fn test_config_from_env() {
        std::env::set_var(ENABLED_ENV, "yes");
        assert!(IdentityMapConfig::from_env().enabled);

        std::env::set_var(ENABLED_ENV, "nope");
        assert!(!IdentityMapConfig::from_env().enabled);

        std::env::remove_var(ENABLED_ENV);
        assert_eq!(IdentityMapConfig::from_env(), IdentityMapConfig::default());
    }

    #[test]
    fn test_config_deserialize() {
        let config: IdentityMapConfig = serde_json::from_str(r#"{"enabled": true}"#).unwrap();
        assert!(config.enabled);

        let config: IdentityMapConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.enabled);
    }
}
