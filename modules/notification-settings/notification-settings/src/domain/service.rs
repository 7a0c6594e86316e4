use std::sync::Arc;

use notification_settings_sdk::{
    NotificationSettings, SettingKey, SettingValue, SettingsError, UpdateOutcome,
};
use tracing::{debug, info, instrument, warn};

use super::attributes::AttributeIndex;
use super::backend::{NotificationsBackend, UserRecord, UserSettingsStore};
use super::error::DomainError;
use super::fields::{ATTRIBUTE_CODES, BackingStore, SettingsFields, backing_store};
use super::validators;

// ============================================================================
// Settings Model
// ============================================================================

/// Resolved notification settings bound to the backend they came from.
///
/// Immutable: [`set`](Self::set) returns a new model and never touches `self`.
/// Concurrent `set` calls are not serialized; two attribute writes may race
/// and the later read-modify-write wins.
pub struct SettingsModel<B: NotificationsBackend> {
    backend: Arc<B>,
    attributes: Arc<AttributeIndex>,
    settings: NotificationSettings,
}

impl<B: NotificationsBackend> Clone for SettingsModel<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            attributes: Arc::clone(&self.attributes),
            settings: self.settings.clone(),
        }
    }
}

impl<B: NotificationsBackend> std::fmt::Debug for SettingsModel<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsModel")
            .field("attributes", &self.attributes)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl<B: NotificationsBackend> SettingsModel<B> {
    /// Fetches attribute metadata, then the current user and settings store.
    ///
    /// # Errors
    /// [`DomainError::MissingAttributes`] if a required attribute code is not
    /// defined on the backend; [`DomainError::Backend`] for any request failure.
    #[instrument(skip_all)]
    pub async fn load(backend: Arc<B>) -> Result<Self, DomainError> {
        let attributes = backend.fetch_attributes(&ATTRIBUTE_CODES).await?;
        let attributes = AttributeIndex::resolve(attributes).inspect_err(|e| {
            warn!(error = %e, "required user attributes are not configured");
        })?;

        let (user, store) =
            tokio::try_join!(backend.fetch_current_user(), backend.fetch_user_settings())?;
        let settings = resolve_settings(&attributes, &user, &store);

        info!(user_id = %user.id, "notification settings loaded");
        Ok(Self::from_parts(backend, Arc::new(attributes), settings))
    }

    #[must_use]
    pub fn from_parts(
        backend: Arc<B>,
        attributes: Arc<AttributeIndex>,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            backend,
            attributes,
            settings,
        }
    }

    #[must_use]
    pub fn get(&self, key: SettingKey) -> SettingValue {
        self.settings.get(key)
    }

    /// # Errors
    /// [`SettingsError::NotFound`] if `name` is not a known setting.
    pub fn get_by_name(&self, name: &str) -> Result<SettingValue, SettingsError> {
        self.settings.get_by_name(name)
    }

    #[must_use]
    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    #[must_use]
    pub fn attributes(&self) -> &Arc<AttributeIndex> {
        &self.attributes
    }

    #[must_use]
    pub fn into_settings(self) -> NotificationSettings {
        self.settings
    }

    /// Validates and persists `value`, returning the outcome with a new model.
    ///
    /// Backend failures are reported through [`UpdateOutcome::error`]; the
    /// returned model carries `value` either way.
    ///
    /// # Errors
    /// [`SettingsError::TypeMismatch`] (wrapped) if `value` has the wrong kind
    /// for `key`.
    #[instrument(skip_all, fields(key = %key))]
    pub async fn set(
        &self,
        key: SettingKey,
        value: SettingValue,
    ) -> Result<UpdateOutcome<Self>, DomainError> {
        let settings = self.settings.with_value(key, value.clone())?;
        let next = self.with_settings(settings);

        if let Err(message) = validators::validate(key, &value) {
            debug!(reason = message, "rejected by validation");
            return Ok(UpdateOutcome::invalid(next));
        }

        let error = match self.write(key, &value).await {
            Ok(None) => None,
            Ok(Some(rejection)) => {
                warn!(%rejection, "backend rejected setting");
                Some(rejection)
            }
            Err(e) => {
                let message = format!("{e:#}");
                warn!(error = %message, "failed to persist setting");
                Some(message)
            }
        };
        if error.is_none() {
            info!("setting updated");
        }
        Ok(UpdateOutcome::written(next, error))
    }

    /// Like [`set`](Self::set) with the key given by name.
    ///
    /// # Errors
    /// [`SettingsError::NotFound`] (wrapped) for an unknown name, plus the
    /// errors of [`set`](Self::set).
    pub async fn set_by_name(
        &self,
        name: &str,
        value: SettingValue,
    ) -> Result<UpdateOutcome<Self>, DomainError> {
        let key: SettingKey = name.parse()?;
        self.set(key, value).await
    }

    fn with_settings(&self, settings: NotificationSettings) -> Self {
        Self::from_parts(Arc::clone(&self.backend), Arc::clone(&self.attributes), settings)
    }

    /// Writes to the store backing `key`. `Ok(Some(_))` is a backend rejection.
    async fn write(&self, key: SettingKey, value: &SettingValue) -> anyhow::Result<Option<String>> {
        match backing_store(key) {
            BackingStore::ProfileField(field) => {
                self.backend.update_current_user(field, value).await?;
                Ok(None)
            }
            BackingStore::UserSetting(setting) => {
                let response = self.backend.post_user_setting(setting, value).await?;
                Ok(response.rejection())
            }
            BackingStore::Attribute(code) => {
                // Attribute values can only be written as part of the whole
                // user record, so re-read it to keep unrelated entries.
                let mut user = self.backend.fetch_current_user().await?;
                let attribute_id = self
                    .attributes
                    .id_for_code(code)
                    .ok_or_else(|| anyhow::anyhow!("Attributes not found: {code}"))?;
                user.set_attribute_value(attribute_id, value.to_string());
                let response = self.backend.replace_user(&user).await?;
                Ok(response.rejection())
            }
        }
    }
}

fn resolve_settings(
    attributes: &AttributeIndex,
    user: &UserRecord,
    store: &UserSettingsStore,
) -> NotificationSettings {
    NotificationSettings {
        email: user.email.clone().unwrap_or_default(),
        phone: user.phone_number.clone().unwrap_or_default(),
        email_notifications: store.key_message_email_notification,
        sms_notifications: store.key_message_sms_notification,
        no_mention_notifications: attributes.flag(
            &user.attribute_values,
            SettingsFields::NO_MENTION_NOTIFICATIONS,
        ),
        no_newsletters: attributes.flag(&user.attribute_values, SettingsFields::NO_NEWSLETTERS),
    }
}
