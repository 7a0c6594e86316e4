//! Port to the remote case-management API and the records it exchanges.

use async_trait::async_trait;
use notification_settings_sdk::{AttributeDescriptor, SettingValue};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Status literal the backend uses for accepted writes.
pub const STATUS_OK: &str = "OK";

/// Reference to an attribute by id, as nested inside attribute values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRef {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of a user's `attributeValues`; unknown fields survive a write-back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub attribute: AttributeRef,
    pub value: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AttributeValue {
    #[must_use]
    pub fn new(attribute_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: AttributeRef {
                id: attribute_id.into(),
                extra: Map::new(),
            },
            value: value.into(),
            extra: Map::new(),
        }
    }
}

/// Current user record.
///
/// Fields this module does not interpret are kept in `extra` so that a full
/// write-back does not drop them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub attribute_values: Vec<AttributeValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// Replaces the value stored for `attribute_id`, keeping every other entry.
    pub fn set_attribute_value(&mut self, attribute_id: &str, value: impl Into<String>) {
        self.attribute_values
            .retain(|entry| entry.attribute.id != attribute_id);
        self.attribute_values
            .push(AttributeValue::new(attribute_id, value));
    }
}

/// Contents of the server-side user settings store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsStore {
    #[serde(default, deserialize_with = "null_as_false")]
    pub key_message_email_notification: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub key_message_sms_notification: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Write acknowledgement returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: Some(STATUS_OK.to_owned()),
            message: None,
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(STATUS_OK)
    }

    /// Message to surface to the user when the write was not accepted.
    #[must_use]
    pub fn rejection(&self) -> Option<String> {
        if self.is_ok() {
            return None;
        }
        Some(self.message.clone().unwrap_or_else(|| {
            format!(
                "Backend responded with status {}",
                self.status.as_deref().unwrap_or("<none>")
            )
        }))
    }
}

/// Operations the settings model needs from the remote API.
#[async_trait]
pub trait NotificationsBackend: Send + Sync {
    /// `GET /attributes` filtered server-side to the given codes.
    async fn fetch_attributes(&self, codes: &[&str]) -> anyhow::Result<Vec<AttributeDescriptor>>;

    /// `GET /me`
    async fn fetch_current_user(&self) -> anyhow::Result<UserRecord>;

    /// `GET /userSettings`
    async fn fetch_user_settings(&self) -> anyhow::Result<UserSettingsStore>;

    /// Partial update of the current user with `{field: value}`.
    async fn update_current_user(&self, field: &str, value: &SettingValue) -> anyhow::Result<()>;

    /// `POST /userSettings/{key}` with the raw value as body.
    async fn post_user_setting(
        &self,
        key: &str,
        value: &SettingValue,
    ) -> anyhow::Result<StatusResponse>;

    /// `PUT /users/{id}` with the full record.
    async fn replace_user(&self, user: &UserRecord) -> anyhow::Result<StatusResponse>;
}
