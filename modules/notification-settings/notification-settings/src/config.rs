//! Module configuration.

use secrecy::SecretString;
use serde::Deserialize;

/// Configuration for the notification-settings module.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationSettingsConfig {
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

/// Remote API connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    /// API root, e.g. `https://play.example.org/api`. Paths are joined below it.
    pub base_url: String,
    /// Basic auth user; no `Authorization` header is sent when unset.
    pub username: Option<String>,
    pub password: Option<SecretString>,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_owned(),
            username: None,
            password: None,
            timeout_ms: 30_000,
        }
    }
}

/// Log output settings applied by the hosting binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `notification_settings=debug`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let cfg: NotificationSettingsConfig =
            serde_json::from_value(serde_json::json!({"backend": {"username": "admin"}})).unwrap();
        assert_eq!(cfg.backend.base_url, "http://localhost:8080/api");
        assert_eq!(cfg.backend.username.as_deref(), Some("admin"));
        assert!(cfg.backend.password.is_none());
        assert_eq!(cfg.backend.timeout_ms, 30_000);
        assert_eq!(cfg.logging.level, "warn");
        assert_eq!(cfg.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_password_is_redacted_in_debug() {
        let cfg: BackendConfig =
            serde_json::from_value(serde_json::json!({"password": "district"})).unwrap();
        assert_eq!(
            cfg.password.as_ref().map(|p| p.expose_secret()),
            Some("district")
        );
        assert!(!format!("{cfg:?}").contains("district"));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_json::from_value::<BackendConfig>(serde_json::json!({"url": "x"}));
        assert!(result.is_err());
    }
}
