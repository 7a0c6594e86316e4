#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests of the settings model over the REST backend.

mod common;

use std::sync::Arc;

use common::*;
use httpmock::prelude::*;
use notification_settings::{
    Feedback, LocalClient, NotificationSettingsClientV1, SettingKey, SettingValue, SettingsError,
    SettingsModel,
};
use serde_json::json;

#[tokio::test]
async fn load_resolves_settings_from_all_sources() {
    let server = MockServer::start_async().await;
    let (attributes, me, user_settings) = mock_load(&server).await;

    let model = SettingsModel::load(Arc::new(backend_for(&server)))
        .await
        .unwrap();

    assert_eq!(model.get(SettingKey::Email), SettingValue::from("john@server.org"));
    assert_eq!(model.get(SettingKey::Phone), SettingValue::from("1234"));
    assert_eq!(model.get(SettingKey::EmailNotifications), SettingValue::Flag(true));
    assert_eq!(model.get(SettingKey::SmsNotifications), SettingValue::Flag(false));
    assert_eq!(model.get(SettingKey::NoMentionNotifications), SettingValue::Flag(true));
    assert_eq!(model.get(SettingKey::NoNewsletters), SettingValue::Flag(true));

    attributes.assert_calls_async(1).await;
    me.assert_calls_async(1).await;
    user_settings.assert_calls_async(1).await;
}

#[tokio::test]
async fn load_without_attribute_metadata_is_a_configuration_error() {
    let server = MockServer::start_async().await;
    let attributes = mock_attributes(
        &server,
        json!({"attributes": [{"code": MENTION_CODE, "id": MENTION_ID, "displayName": "x"}]}),
    )
    .await;
    let me = mock_me(&server).await;

    let client = LocalClient::new(Arc::new(backend_for(&server)));
    let err = client.load().await.unwrap_err();

    assert_eq!(
        err,
        SettingsError::configuration(format!("Attributes not found: {NEWSLETTER_CODE}"))
    );
    attributes.assert_calls_async(1).await;
    me.assert_calls_async(0).await;
}

#[tokio::test]
async fn load_reports_http_failures() {
    let server = MockServer::start_async().await;
    mock_attributes(&server, attributes_json()).await;
    mock_user_settings(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/me");
            then.status(401).body("Unauthorized");
        })
        .await;

    let client = LocalClient::new(Arc::new(backend_for(&server)));
    let err = client.load().await.unwrap_err();

    let SettingsError::Remote(message) = err else {
        panic!("expected a remote error, got {err:?}");
    };
    assert!(message.contains("failed to fetch current user"), "{message}");
    assert!(message.contains("401"), "{message}");
}

#[tokio::test]
async fn set_email_updates_current_user() {
    let server = MockServer::start_async().await;
    mock_load(&server).await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/me")
                .header("authorization", BASIC_AUTH)
                .json_body(json!({"email": "john-new@server.org"}));
            then.status(200).json_body(json!({"status": "OK"}));
        })
        .await;

    let model = SettingsModel::load(Arc::new(backend_for(&server)))
        .await
        .unwrap();
    let outcome = model
        .set(SettingKey::Email, SettingValue::from("john-new@server.org"))
        .await
        .unwrap();

    assert!(outcome.is_valid);
    assert!(outcome.updated);
    assert_eq!(outcome.feedback(), Some(Feedback::Success("Setting updated".to_owned())));
    update.assert_calls_async(1).await;
}

#[tokio::test]
async fn invalid_phone_is_never_sent() {
    let server = MockServer::start_async().await;
    mock_load(&server).await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/me");
            then.status(200);
        })
        .await;

    let model = SettingsModel::load(Arc::new(backend_for(&server)))
        .await
        .unwrap();
    let outcome = model
        .set(SettingKey::Phone, SettingValue::from("4321abc"))
        .await
        .unwrap();

    assert!(!outcome.is_valid);
    assert!(!outcome.updated);
    assert_eq!(outcome.feedback(), None);
    update.assert_calls_async(0).await;
}

#[tokio::test]
async fn set_email_notifications_posts_raw_boolean() {
    let server = MockServer::start_async().await;
    mock_load(&server).await;
    let post = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/userSettings/keyMessageEmailNotification")
                .header("authorization", BASIC_AUTH)
                .json_body(json!(false));
            then.status(200)
                .json_body(json!({"httpStatus": "OK", "status": "OK", "message": "User setting saved"}));
        })
        .await;

    let model = SettingsModel::load(Arc::new(backend_for(&server)))
        .await
        .unwrap();
    let outcome = model
        .set(SettingKey::EmailNotifications, SettingValue::Flag(false))
        .await
        .unwrap();

    assert!(outcome.is_valid);
    assert!(outcome.updated);
    assert_eq!(outcome.error, None);
    assert_eq!(
        outcome.settings.get(SettingKey::EmailNotifications),
        SettingValue::Flag(false)
    );
    post.assert_calls_async(1).await;
}

#[tokio::test]
async fn rejected_user_setting_keeps_attempted_value() {
    let server = MockServer::start_async().await;
    mock_load(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/userSettings/keyMessageSmsNotification");
            then.status(409).json_body(json!({
                "httpStatus": "Conflict",
                "status": "ERROR",
                "message": "SMS gateway is not configured"
            }));
        })
        .await;

    let client = LocalClient::new(Arc::new(backend_for(&server)));
    let settings = client.load().await.unwrap();
    let outcome = client
        .set(&settings, SettingKey::SmsNotifications, SettingValue::Flag(true))
        .await
        .unwrap();

    assert!(outcome.is_valid);
    assert!(!outcome.updated);
    assert!(outcome.settings.sms_notifications);
    let feedback = outcome.feedback().unwrap();
    assert!(feedback.is_error());
    assert!(
        feedback.message().contains("SMS gateway is not configured"),
        "{}",
        feedback.message()
    );
}

#[tokio::test]
async fn set_mention_opt_out_rewrites_user_attributes() {
    let server = MockServer::start_async().await;
    let (_, me, _) = mock_load(&server).await;
    let mut expected = me_json();
    expected["attributeValues"] = json!([
        {"attribute": {"id": NEWSLETTER_ID}, "value": "true"},
        {"attribute": {"id": OTHER_ID}, "value": "some text"},
        {"attribute": {"id": MENTION_ID}, "value": "false"}
    ]);
    let put = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(format!("/api/users/{USER_ID}"))
                .header("authorization", BASIC_AUTH)
                .json_body(expected);
            then.status(200);
        })
        .await;

    let model = SettingsModel::load(Arc::new(backend_for(&server)))
        .await
        .unwrap();
    let outcome = model
        .set(SettingKey::NoMentionNotifications, SettingValue::Flag(false))
        .await
        .unwrap();

    assert!(outcome.is_valid);
    assert!(outcome.updated, "{:?}", outcome.error);
    assert_eq!(
        outcome.settings.get(SettingKey::NoMentionNotifications),
        SettingValue::Flag(false)
    );
    // Once for load, once for the read-modify-write.
    me.assert_calls_async(2).await;
    put.assert_calls_async(1).await;
}

#[tokio::test]
async fn attribute_write_status_is_checked() {
    let server = MockServer::start_async().await;
    mock_load(&server).await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path(format!("/api/users/{USER_ID}"));
            then.status(200)
                .json_body(json!({"status": "WARNING", "message": "Attribute is not assignable"}));
        })
        .await;

    let model = SettingsModel::load(Arc::new(backend_for(&server)))
        .await
        .unwrap();
    let outcome = model
        .set(SettingKey::NoNewsletters, SettingValue::Flag(false))
        .await
        .unwrap();

    assert!(!outcome.updated);
    assert_eq!(outcome.error.as_deref(), Some("Attribute is not assignable"));
    assert!(!outcome.settings.get(SettingKey::NoNewsletters).as_flag().unwrap());
}
