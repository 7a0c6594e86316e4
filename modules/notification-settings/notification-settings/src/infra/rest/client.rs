use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use notification_settings_sdk::{AttributeDescriptor, SettingValue};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{Instrument, debug, debug_span, field};
use url::Url;

use super::error::RestError;
use crate::config::BackendConfig;
use crate::domain::backend::{NotificationsBackend, StatusResponse, UserRecord, UserSettingsStore};

const ATTRIBUTE_FIELDS: &str = "id,code,displayName";

#[derive(Debug, Deserialize)]
struct AttributesPage {
    #[serde(default)]
    attributes: Vec<AttributeDescriptor>,
}

/// [`NotificationsBackend`] over the remote JSON API.
pub struct RestBackend {
    client: reqwest::Client,
    base_url: Url,
    username: Option<String>,
    password: Option<SecretString>,
}

impl std::fmt::Debug for RestBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestBackend")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl RestBackend {
    /// # Errors
    /// Fails if `base_url` is not an absolute URL or the HTTP client cannot
    /// be built.
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(&config.base_url)
            .with_context(|| format!("invalid backend base_url '{}'", config.base_url))?;
        // Url::join replaces the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, RestError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| RestError::Url {
                path: path.to_owned(),
                source,
            })
    }

    /// Sends one request and returns the body of a 2xx response.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<String, RestError> {
        let span = debug_span!("backend_request", %method, path, status = field::Empty);
        async move {
            let mut builder = self.client.request(method.clone(), self.url(path)?);
            if !query.is_empty() {
                builder = builder.query(query);
            }
            if let Some(user) = &self.username {
                builder = builder.basic_auth(
                    user,
                    self.password.as_ref().map(ExposeSecret::expose_secret),
                );
            }
            if let Some(body) = body {
                builder = builder.json(body);
            }

            let transport = |source| RestError::Transport {
                method: method.clone(),
                path: path.to_owned(),
                source,
            };
            let response = builder.send().await.map_err(transport)?;
            let status = response.status();
            tracing::Span::current().record("status", status.as_u16());
            let text = response.text().await.map_err(transport)?;

            if !status.is_success() {
                return Err(RestError::status(method, path, status, &text));
            }
            debug!(body_size = text.len(), "backend request completed");
            Ok(text)
        }
        .instrument(span)
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RestError> {
        let text = self.send(Method::GET, path, query, None).await?;
        decode(Method::GET, path, &text)
    }

    /// Decodes a write acknowledgement; an empty body counts as accepted.
    async fn send_for_status(
        &self,
        method: Method,
        path: &str,
        body: &Value,
    ) -> Result<StatusResponse, RestError> {
        let text = self.send(method.clone(), path, &[], Some(body)).await?;
        if text.trim().is_empty() {
            return Ok(StatusResponse::ok());
        }
        decode(method, path, &text)
    }
}

fn decode<T: DeserializeOwned>(method: Method, path: &str, text: &str) -> Result<T, RestError> {
    serde_json::from_str(text).map_err(|source| RestError::Decode {
        method,
        path: path.to_owned(),
        source,
    })
}

#[async_trait]
impl NotificationsBackend for RestBackend {
    async fn fetch_attributes(&self, codes: &[&str]) -> anyhow::Result<Vec<AttributeDescriptor>> {
        let filter = format!("code:in:[{}]", codes.join(","));
        let page: AttributesPage = self
            .get_json(
                "attributes",
                &[
                    ("paging", "false"),
                    ("fields", ATTRIBUTE_FIELDS),
                    ("filter", filter.as_str()),
                ],
            )
            .await
            .context("failed to fetch user attributes")?;
        Ok(page.attributes)
    }

    async fn fetch_current_user(&self) -> anyhow::Result<UserRecord> {
        self.get_json("me", &[])
            .await
            .context("failed to fetch current user")
    }

    async fn fetch_user_settings(&self) -> anyhow::Result<UserSettingsStore> {
        self.get_json("userSettings", &[])
            .await
            .context("failed to fetch user settings")
    }

    async fn update_current_user(&self, field: &str, value: &SettingValue) -> anyhow::Result<()> {
        let mut body = Map::new();
        body.insert(field.to_owned(), serde_json::to_value(value)?);
        self.send(Method::PUT, "me", &[], Some(&Value::Object(body)))
            .await?;
        Ok(())
    }

    async fn post_user_setting(
        &self,
        key: &str,
        value: &SettingValue,
    ) -> anyhow::Result<StatusResponse> {
        let body = serde_json::to_value(value)?;
        Ok(self
            .send_for_status(Method::POST, &format!("userSettings/{key}"), &body)
            .await?)
    }

    async fn replace_user(&self, user: &UserRecord) -> anyhow::Result<StatusResponse> {
        let body = serde_json::to_value(user)?;
        Ok(self
            .send_for_status(Method::PUT, &format!("users/{}", user.id), &body)
            .await?)
    }
}
