use notification_settings_sdk::errors::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Attributes not found: {}", .0.join(", "))]
    MissingAttributes(Vec<String>),

    #[error("Settings have not been loaded")]
    NotLoaded,

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Backend error: {0:#}")]
    Backend(#[from] anyhow::Error),
}

impl From<DomainError> for SettingsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MissingAttributes(_) | DomainError::NotLoaded => {
                Self::configuration(e.to_string())
            }
            DomainError::Settings(inner) => inner,
            DomainError::Backend(source) => Self::remote(format!("{source:#}")),
        }
    }
}
