//! Notification Settings Module Implementation
//!
//! The public API is defined in `notification-settings-sdk` and re-exported here.

pub use notification_settings_sdk::{
    Feedback, NotificationSettings, NotificationSettingsClientV1, SettingKey, SettingValue,
    SettingsError, UpdateOutcome, ValueKind,
};

pub use config::{BackendConfig, LogFormat, LoggingConfig, NotificationSettingsConfig};
pub use domain::form::{FormField, form_fields};
pub use domain::service::SettingsModel;
pub use domain::validators::validate;
pub use infra::rest::RestBackend;
pub use local_client::LocalClient;

pub mod config;
pub mod local_client;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
