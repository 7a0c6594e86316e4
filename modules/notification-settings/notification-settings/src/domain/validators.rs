//! Client-side validation applied before any write.

use std::sync::LazyLock;

use notification_settings_sdk::{SettingKey, SettingValue};
use regex::Regex;

/// A single predicate over text input with the message shown when it fails.
pub struct Validator {
    pub check: fn(&str) -> bool,
    pub message: &'static str,
}

#[allow(clippy::unwrap_used)]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .unwrap()
});

#[allow(clippy::unwrap_used)]
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9\s+]*$").unwrap());

// Empty means "no address" and is accepted.
fn is_email(value: &str) -> bool {
    value.is_empty() || EMAIL_RE.is_match(value)
}

fn is_phone_number(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

const EMAIL_VALIDATORS: &[Validator] = &[Validator {
    check: is_email,
    message: "Invalid email",
}];

const PHONE_VALIDATORS: &[Validator] = &[Validator {
    check: is_phone_number,
    message: "Invalid phone number",
}];

/// Validators registered for `key`, in evaluation order.
#[must_use]
pub fn validators_for(key: SettingKey) -> &'static [Validator] {
    match key {
        SettingKey::Email => EMAIL_VALIDATORS,
        SettingKey::Phone => PHONE_VALIDATORS,
        SettingKey::EmailNotifications
        | SettingKey::SmsNotifications
        | SettingKey::NoMentionNotifications
        | SettingKey::NoNewsletters => &[],
    }
}

/// Runs every validator for `key` against `value`.
///
/// Flag values are never validated.
///
/// # Errors
/// Returns the message of the first failing validator.
pub fn validate(key: SettingKey, value: &SettingValue) -> Result<(), &'static str> {
    let Some(text) = value.as_text() else {
        return Ok(());
    };
    match validators_for(key).iter().find(|v| !(v.check)(text)) {
        Some(failed) => Err(failed.message),
        None => Ok(()),
    }
}
