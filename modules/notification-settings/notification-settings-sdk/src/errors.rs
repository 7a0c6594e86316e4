//! Error types for the notification-settings SDK.

use thiserror::Error;

use crate::models::{SettingKey, ValueKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Server-side metadata the settings depend on is missing.
    #[error("{0}")]
    Configuration(String),

    #[error("Setting not found: {key}")]
    NotFound { key: String },

    #[error("Setting '{key}' expects a {expected} value")]
    TypeMismatch { key: SettingKey, expected: ValueKind },

    /// The backend failed or rejected the request.
    #[error("Backend error: {0}")]
    Remote(String),
}

impl SettingsError {
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    #[must_use]
    pub fn type_mismatch(key: SettingKey) -> Self {
        Self::TypeMismatch {
            key,
            expected: key.kind(),
        }
    }

    #[must_use]
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }
}
