use notification_settings_sdk::SettingKey;

/// Where a logical setting lives on the backend, with its store-specific name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackingStore {
    /// Field of the user profile record (`/me`).
    ProfileField(&'static str),
    /// Key of the server-side user settings store (`/userSettings`).
    UserSetting(&'static str),
    /// Code of an extensible attribute stored in the user's `attributeValues`.
    Attribute(&'static str),
}

pub struct SettingsFields;

impl SettingsFields {
    pub const EMAIL: &'static str = "email";
    pub const PHONE_NUMBER: &'static str = "phoneNumber";

    pub const MESSAGE_EMAIL_NOTIFICATION: &'static str = "keyMessageEmailNotification";
    pub const MESSAGE_SMS_NOTIFICATION: &'static str = "keyMessageSmsNotification";

    pub const NO_MENTION_NOTIFICATIONS: &'static str = "user_noInterpretationMentionNotifications";
    pub const NO_NEWSLETTERS: &'static str = "user_noInterpretationSubcriptionNotifications";
}

/// Attribute codes that must exist on the backend for settings to load.
pub const ATTRIBUTE_CODES: [&str; 2] = [
    SettingsFields::NO_MENTION_NOTIFICATIONS,
    SettingsFields::NO_NEWSLETTERS,
];

#[must_use]
pub const fn backing_store(key: SettingKey) -> BackingStore {
    match key {
        SettingKey::Email => BackingStore::ProfileField(SettingsFields::EMAIL),
        SettingKey::Phone => BackingStore::ProfileField(SettingsFields::PHONE_NUMBER),
        SettingKey::EmailNotifications => {
            BackingStore::UserSetting(SettingsFields::MESSAGE_EMAIL_NOTIFICATION)
        }
        SettingKey::SmsNotifications => {
            BackingStore::UserSetting(SettingsFields::MESSAGE_SMS_NOTIFICATION)
        }
        SettingKey::NoMentionNotifications => {
            BackingStore::Attribute(SettingsFields::NO_MENTION_NOTIFICATIONS)
        }
        SettingKey::NoNewsletters => BackingStore::Attribute(SettingsFields::NO_NEWSLETTERS),
    }
}
