use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use notification_settings_sdk::{
    NotificationSettings, NotificationSettingsClientV1, SettingKey, SettingValue, SettingsError,
    UpdateOutcome,
};

use crate::domain::attributes::AttributeIndex;
use crate::domain::backend::NotificationsBackend;
use crate::domain::error::DomainError;
use crate::domain::service::SettingsModel;

/// Snapshot-level client over [`SettingsModel`].
///
/// Keeps the attribute index of the most recent successful load.
pub struct LocalClient<B: NotificationsBackend + 'static> {
    backend: Arc<B>,
    attributes: ArcSwapOption<AttributeIndex>,
}

impl<B: NotificationsBackend + 'static> LocalClient<B> {
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            attributes: ArcSwapOption::empty(),
        }
    }

    fn model(&self, current: &NotificationSettings) -> Result<SettingsModel<B>, DomainError> {
        let attributes = self.attributes.load_full().ok_or(DomainError::NotLoaded)?;
        Ok(SettingsModel::from_parts(
            Arc::clone(&self.backend),
            attributes,
            current.clone(),
        ))
    }
}

#[async_trait]
impl<B: NotificationsBackend + 'static> NotificationSettingsClientV1 for LocalClient<B> {
    async fn load(&self) -> Result<NotificationSettings, SettingsError> {
        let model = SettingsModel::load(Arc::clone(&self.backend)).await?;
        self.attributes.store(Some(Arc::clone(model.attributes())));
        Ok(model.into_settings())
    }

    async fn set(
        &self,
        current: &NotificationSettings,
        key: SettingKey,
        value: SettingValue,
    ) -> Result<UpdateOutcome, SettingsError> {
        let outcome = self.model(current)?.set(key, value).await?;
        Ok(outcome.map_settings(SettingsModel::into_settings))
    }
}
