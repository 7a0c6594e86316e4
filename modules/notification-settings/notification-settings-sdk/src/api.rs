//! `NotificationSettingsClientV1` trait definition.
//!
//! This trait defines the public API for the notification-settings module (Version 1).

use async_trait::async_trait;

use crate::errors::SettingsError;
use crate::models::{NotificationSettings, SettingKey, SettingValue, UpdateOutcome};

/// Public API trait for the notification-settings module (Version 1).
///
/// Works on plain snapshots: the implementation keeps whatever server-side
/// metadata it resolved during [`load`](Self::load) and uses it for later
/// writes.
#[async_trait]
pub trait NotificationSettingsClientV1: Send + Sync {
    /// Resolve the current user's settings from the backend.
    async fn load(&self) -> Result<NotificationSettings, SettingsError>;

    /// Validate and persist `value` for `key`, starting from `current`.
    ///
    /// Remote failures are reported in the outcome, not as `Err`. The returned
    /// snapshot always carries the attempted value.
    async fn set(
        &self,
        current: &NotificationSettings,
        key: SettingKey,
        value: SettingValue,
    ) -> Result<UpdateOutcome, SettingsError>;
}
