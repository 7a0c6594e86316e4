#![allow(dead_code, clippy::unwrap_used)]

//! Shared fixtures for REST backend tests.

use httpmock::prelude::*;
use httpmock::Mock;
use notification_settings::{BackendConfig, RestBackend};
use secrecy::SecretString;
use serde_json::{Value, json};

pub const USER_ID: &str = "xE7jOejl9FI";
pub const MENTION_ID: &str = "U7AVQqIeUKh";
pub const NEWSLETTER_ID: &str = "DvrNE5xVYvg";
pub const OTHER_ID: &str = "f6gGk3fgw56";

pub const MENTION_CODE: &str = "user_noInterpretationMentionNotifications";
pub const NEWSLETTER_CODE: &str = "user_noInterpretationSubcriptionNotifications";

/// `admin:district`
pub const BASIC_AUTH: &str = "Basic YWRtaW46ZGlzdHJpY3Q=";

pub fn backend_for(server: &MockServer) -> RestBackend {
    RestBackend::new(&BackendConfig {
        base_url: server.url("/api"),
        username: Some("admin".to_owned()),
        password: Some(SecretString::from("district")),
        timeout_ms: 5_000,
    })
    .unwrap()
}

pub fn attributes_json() -> Value {
    json!({
        "attributes": [
            {"code": MENTION_CODE, "id": MENTION_ID, "displayName": "OptOut @notification emails"},
            {"code": NEWSLETTER_CODE, "id": NEWSLETTER_ID, "displayName": "OptOut weekly digest email"}
        ]
    })
}

pub fn me_json() -> Value {
    json!({
        "id": USER_ID,
        "email": "john@server.org",
        "phoneNumber": "1234",
        "firstName": "John",
        "surname": "Traore",
        "attributeValues": [
            {"attribute": {"id": NEWSLETTER_ID}, "value": "true"},
            {"attribute": {"id": MENTION_ID}, "value": "true"},
            {"attribute": {"id": OTHER_ID}, "value": "some text"}
        ]
    })
}

pub fn user_settings_json() -> Value {
    json!({
        "keyMessageEmailNotification": true,
        "keyMessageSmsNotification": false,
        "keyUiLocale": "en"
    })
}

pub async fn mock_attributes(server: &MockServer, body: Value) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/attributes")
                .header("authorization", BASIC_AUTH)
                .query_param("paging", "false")
                .query_param("fields", "id,code,displayName")
                .query_param("filter", format!("code:in:[{MENTION_CODE},{NEWSLETTER_CODE}]"));
            then.status(200).json_body(body);
        })
        .await
}

pub async fn mock_me(server: &MockServer) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/me")
                .header("authorization", BASIC_AUTH);
            then.status(200).json_body(me_json());
        })
        .await
}

pub async fn mock_user_settings(server: &MockServer) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/userSettings")
                .header("authorization", BASIC_AUTH);
            then.status(200).json_body(user_settings_json());
        })
        .await
}

/// Mocks every read issued by a successful load.
pub async fn mock_load(server: &MockServer) -> (Mock<'_>, Mock<'_>, Mock<'_>) {
    (
        mock_attributes(server, attributes_json()).await,
        mock_me(server).await,
        mock_user_settings(server).await,
    )
}
