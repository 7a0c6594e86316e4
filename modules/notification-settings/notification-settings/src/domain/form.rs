//! Presentation-neutral description of the notification settings form.

use notification_settings_sdk::{NotificationSettings, SettingKey, SettingValue, ValueKind};

/// Order in which fields are presented.
pub const FORM_ORDER: [SettingKey; 6] = [
    SettingKey::Email,
    SettingKey::Phone,
    SettingKey::EmailNotifications,
    SettingKey::SmsNotifications,
    SettingKey::NoNewsletters,
    SettingKey::NoMentionNotifications,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: SettingKey,
    pub label: &'static str,
    pub kind: ValueKind,
    pub value: SettingValue,
    pub disabled: bool,
}

/// Fields to render for `settings`.
///
/// The mention opt-out is locked while message email notifications are on.
#[must_use]
pub fn form_fields(settings: &NotificationSettings) -> Vec<FormField> {
    FORM_ORDER
        .into_iter()
        .map(|key| FormField {
            key,
            label: key.label(),
            kind: key.kind(),
            value: settings.get(key),
            disabled: key == SettingKey::NoMentionNotifications && settings.email_notifications,
        })
        .collect()
}
