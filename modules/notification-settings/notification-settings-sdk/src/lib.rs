//! Notification Settings SDK
//!
//! This crate provides the public API for the notification-settings module:
//! - `NotificationSettingsClientV1` trait for consumers
//! - Model types (`SettingKey`, `SettingValue`, `NotificationSettings`, `UpdateOutcome`)
//! - Error type (`SettingsError`)
//!
//! ```ignore
//! let settings = client.load().await?;
//! let outcome = client
//!     .set(&settings, SettingKey::Phone, SettingValue::from("4321"))
//!     .await?;
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::NotificationSettingsClientV1;
pub use errors::SettingsError;
pub use models::{
    AttributeDescriptor, Feedback, NotificationSettings, SETTING_UPDATED, SettingKey,
    SettingValue, UpdateOutcome, ValueKind,
};
