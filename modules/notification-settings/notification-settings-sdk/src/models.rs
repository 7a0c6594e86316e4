//! Public models for the notification-settings module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the notification-settings module and its consumers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;

/// Message shown to the user after a setting has been persisted.
pub const SETTING_UPDATED: &str = "Setting updated";

/// Logical identifier of a user-facing notification setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingKey {
    Email,
    Phone,
    EmailNotifications,
    SmsNotifications,
    NoMentionNotifications,
    NoNewsletters,
}

impl SettingKey {
    /// Every known key, in declaration order.
    pub const ALL: [SettingKey; 6] = [
        SettingKey::Email,
        SettingKey::Phone,
        SettingKey::EmailNotifications,
        SettingKey::SmsNotifications,
        SettingKey::NoMentionNotifications,
        SettingKey::NoNewsletters,
    ];

    /// Wire name of the key (`emailNotifications`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::EmailNotifications => "emailNotifications",
            Self::SmsNotifications => "smsNotifications",
            Self::NoMentionNotifications => "noMentionNotifications",
            Self::NoNewsletters => "noNewsletters",
        }
    }

    /// Kind of value this key holds.
    #[must_use]
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::Email | Self::Phone => ValueKind::Text,
            Self::EmailNotifications
            | Self::SmsNotifications
            | Self::NoMentionNotifications
            | Self::NoNewsletters => ValueKind::Flag,
        }
    }

    /// Human-readable label used by form front ends.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::EmailNotifications => "Enable message email notifications",
            Self::SmsNotifications => "Enable message SMS notifications",
            Self::NoMentionNotifications => "OptOut @notification emails",
            Self::NoNewsletters => "OptOut weekly digest email",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| SettingsError::not_found(s))
    }
}

/// Shape of a setting value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Flag,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Flag => f.write_str("boolean"),
        }
    }
}

/// Value of a single setting.
///
/// Serialized untagged, so a flag is a JSON boolean and text is a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Text(String),
}

impl SettingValue {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Flag(_) => ValueKind::Flag,
            Self::Text(_) => ValueKind::Text,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Flag(_) => None,
        }
    }

    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            Self::Text(_) => None,
        }
    }

    /// Parses user input into the value kind expected by `key`.
    ///
    /// Flags accept `true`/`false` (case-insensitive); text is taken verbatim.
    ///
    /// # Errors
    /// Returns [`SettingsError::TypeMismatch`] if a flag key receives anything
    /// other than `true` or `false`.
    pub fn parse_for(key: SettingKey, raw: &str) -> Result<Self, SettingsError> {
        match key.kind() {
            ValueKind::Text => Ok(Self::Text(raw.to_owned())),
            ValueKind::Flag => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Self::Flag(true)),
                "false" => Ok(Self::Flag(false)),
                _ => Err(SettingsError::type_mismatch(key)),
            },
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Immutable, fully populated snapshot of the user's notification settings.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email: String,
    pub phone: String,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub no_mention_notifications: bool,
    pub no_newsletters: bool,
}

impl NotificationSettings {
    /// Current value for `key`.
    #[must_use]
    pub fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::Email => SettingValue::Text(self.email.clone()),
            SettingKey::Phone => SettingValue::Text(self.phone.clone()),
            SettingKey::EmailNotifications => SettingValue::Flag(self.email_notifications),
            SettingKey::SmsNotifications => SettingValue::Flag(self.sms_notifications),
            SettingKey::NoMentionNotifications => {
                SettingValue::Flag(self.no_mention_notifications)
            }
            SettingKey::NoNewsletters => SettingValue::Flag(self.no_newsletters),
        }
    }

    /// Current value for the key named `name`.
    ///
    /// # Errors
    /// Returns [`SettingsError::NotFound`] if `name` is not a known key.
    pub fn get_by_name(&self, name: &str) -> Result<SettingValue, SettingsError> {
        name.parse::<SettingKey>().map(|key| self.get(key))
    }

    /// Returns a copy of this snapshot with `key` replaced by `value`.
    ///
    /// # Errors
    /// Returns [`SettingsError::TypeMismatch`] if `value` is not of the kind
    /// `key` holds.
    pub fn with_value(&self, key: SettingKey, value: SettingValue) -> Result<Self, SettingsError> {
        let mut next = self.clone();
        match (key, value) {
            (SettingKey::Email, SettingValue::Text(text)) => next.email = text,
            (SettingKey::Phone, SettingValue::Text(text)) => next.phone = text,
            (SettingKey::EmailNotifications, SettingValue::Flag(flag)) => {
                next.email_notifications = flag;
            }
            (SettingKey::SmsNotifications, SettingValue::Flag(flag)) => {
                next.sms_notifications = flag;
            }
            (SettingKey::NoMentionNotifications, SettingValue::Flag(flag)) => {
                next.no_mention_notifications = flag;
            }
            (SettingKey::NoNewsletters, SettingValue::Flag(flag)) => next.no_newsletters = flag,
            (key, _) => return Err(SettingsError::type_mismatch(key)),
        }
        Ok(next)
    }
}

/// Server-defined extensible attribute, resolved by code at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub display_name: String,
}

/// Result of setting a value.
///
/// `settings` always carries the attempted value, even when validation failed
/// or the backend rejected the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome<S = NotificationSettings> {
    pub is_valid: bool,
    pub error: Option<String>,
    pub updated: bool,
    pub settings: S,
}

impl<S> UpdateOutcome<S> {
    /// Outcome for a value rejected by client-side validation.
    #[must_use]
    pub fn invalid(settings: S) -> Self {
        Self {
            is_valid: false,
            error: None,
            updated: false,
            settings,
        }
    }

    /// Outcome for a valid value after the write attempt.
    #[must_use]
    pub fn written(settings: S, error: Option<String>) -> Self {
        Self {
            is_valid: true,
            updated: error.is_none(),
            error,
            settings,
        }
    }

    #[must_use]
    pub fn map_settings<T>(self, f: impl FnOnce(S) -> T) -> UpdateOutcome<T> {
        UpdateOutcome {
            is_valid: self.is_valid,
            error: self.error,
            updated: self.updated,
            settings: f(self.settings),
        }
    }

    /// Notification a front end should show for this outcome, if any.
    ///
    /// Invalid input yields nothing; the validator message is shown inline.
    #[must_use]
    pub fn feedback(&self) -> Option<Feedback> {
        if let Some(error) = &self.error {
            Some(Feedback::Error(error.clone()))
        } else if self.updated {
            Some(Feedback::Success(SETTING_UPDATED.to_owned()))
        } else {
            None
        }
    }
}

/// User-facing notification after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

impl Feedback {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
