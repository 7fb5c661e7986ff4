//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::recording::Duration;

/// Default transcription service base URL
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Default opaque client identifier sent with every request
pub const DEFAULT_USER_ID: &str = "1234567890";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub max_duration: Option<String>,
    pub user_id: Option<String>,
    pub notify: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            endpoint: Some(DEFAULT_ENDPOINT.to_string()),
            max_duration: Some(Duration::default_limit().to_string()),
            user_id: Some(DEFAULT_USER_ID.to_string()),
            notify: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            endpoint: other.endpoint.or(self.endpoint),
            max_duration: other.max_duration.or(self.max_duration),
            user_id: other.user_id.or(self.user_id),
            notify: other.notify.or(self.notify),
        }
    }

    /// Get the endpoint, or the default if not set
    pub fn endpoint_or_default(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// Get max_duration as parsed Duration, or default if not set/invalid
    pub fn max_duration_or_default(&self) -> Duration {
        self.max_duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_limit)
    }

    /// Get the client identifier, or the default if not set
    pub fn user_id_or_default(&self) -> String {
        self.user_id
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string())
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.endpoint, Some("http://localhost:8000".to_string()));
        assert_eq!(config.max_duration, Some("5s".to_string()));
        assert_eq!(config.user_id, Some("1234567890".to_string()));
        assert_eq!(config.notify, Some(false));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.endpoint.is_none());
        assert!(config.max_duration.is_none());
        assert!(config.user_id.is_none());
        assert!(config.notify.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            endpoint: Some("http://base:8000".to_string()),
            max_duration: Some("5s".to_string()),
            user_id: Some("base-user".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            endpoint: Some("http://other:9000".to_string()),
            max_duration: None, // Should not override
            user_id: Some("other-user".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.endpoint, Some("http://other:9000".to_string()));
        assert_eq!(merged.max_duration, Some("5s".to_string())); // Kept from base
        assert_eq!(merged.user_id, Some("other-user".to_string()));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            endpoint: Some("http://base:8000".to_string()),
            notify: Some(true),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.endpoint, Some("http://base:8000".to_string()));
        assert_eq!(merged.notify, Some(true));
    }

    #[test]
    fn max_duration_or_default_parses() {
        let config = AppConfig {
            max_duration: Some("30s".to_string()),
            ..Default::default()
        };
        assert_eq!(config.max_duration_or_default().as_secs(), 30);
    }

    #[test]
    fn max_duration_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            max_duration: Some("invalid".to_string()),
            ..Default::default()
        };
        assert_eq!(config.max_duration_or_default().as_secs(), 5);
    }

    #[test]
    fn max_duration_or_default_uses_default_on_none() {
        let config = AppConfig::empty();
        assert_eq!(config.max_duration_or_default().as_secs(), 5);
    }

    #[test]
    fn accessor_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.endpoint_or_default(), "http://localhost:8000");
        assert_eq!(config.user_id_or_default(), "1234567890");
        assert!(!config.notify_or_default());
    }
}
