mod common;

use axum::http::{StatusCode, header};
use common::*;
use serde_json::{Value, json};
use vitrine_core::prelude::*;
use vitrine_memory::{InMemoryRealms, InMemoryThemes};
use vitrine_server::prelude::*;

fn themes() -> InMemoryThemes {
    InMemoryThemes::new()
        .with_messages(ThemeType::Account, "base", "en", [("a", "X"), ("b", "Y")])
        .with_messages(
            ThemeType::Account,
            "base",
            "de",
            [("reminder", "Don''t forget {0} and { 1 }"), ("quoted", "'{0}'")],
        )
        .with_theme(ThemeType::Account, "empty")
}

fn realms() -> InMemoryRealms {
    InMemoryRealms::new()
        .with_overrides("master", "en", [("a", "Z")])
        .with_overrides("master", "und", [("fallback", "It''s {0}")])
        .with_realm("bare")
}

fn app<T: ThemeProvider>(themes: T) -> axum::Router {
    VitrineServer::default().build(themes, realms(), NoEncoding)
}

fn uri(realm: &str, theme_type: &str, theme_name: &str, locale: &str) -> String {
    format!(
        "/resources/localizations?realm={realm}&themeType={theme_type}&themeName={theme_name}&locale={locale}"
    )
}

async fn error_description(response: axum::http::Response<axum::body::Body>) -> String {
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "internal_server_error");
    body["error_description"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn realm_overrides_replace_theme_messages() {
    let response = get(app(themes()), &uri("master", "account", "base", "en")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, json!({ "a": "Z", "b": "Y" }));
}

#[tokio::test]
async fn messages_are_converted_for_the_client() {
    let response = get(app(themes()), &uri("master", "ACCOUNT", "base", "de")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        body,
        json!({
            "reminder": "Don't forget {{param_0}} and {{param_1}}",
            "quoted": "{{param_0}}",
        })
    );
}

#[tokio::test]
async fn empty_bundle_is_an_empty_string() {
    let response = get(app(themes()), &uri("bare", "account", "empty", "en")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "");
}

#[tokio::test]
async fn malformed_locale_degrades_to_undetermined() {
    let response = get(app(themes()), &uri("master", "account", "empty", "en_US")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, json!({ "fallback": "It's {{param_0}}" }));
}

#[tokio::test]
async fn missing_locale_is_undetermined() {
    let uri = "/resources/localizations?realm=master&themeType=account&themeName=base";
    let response = get(app(themes()), uri).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, json!({ "fallback": "It's {{param_0}}" }));
}

#[tokio::test]
async fn unknown_theme_type_is_a_fault() {
    let response = get(app(themes()), &uri("master", "dashboard", "base", "en")).await;
    assert_eq!(
        error_description(response).await,
        "Unknown theme type: dashboard"
    );
}

#[tokio::test]
async fn missing_query_parameters_are_faults() {
    let uri = "/resources/localizations?realm=master&themeName=base&locale=en";
    let response = get(app(themes()), uri).await;
    assert_eq!(error_description(response).await, "Unknown theme type: ");

    let uri = "/resources/localizations?realm=master&themeType=account&locale=en";
    let response = get(app(themes()), uri).await;
    assert_eq!(error_description(response).await, "Failed to create theme");

    let uri = "/resources/localizations?themeType=account&themeName=base&locale=en";
    let response = get(app(themes()), uri).await;
    assert_eq!(error_description(response).await, "Realm not found: ");
}

#[tokio::test]
async fn missing_theme_is_a_fault() {
    let response = get(app(themes()), &uri("master", "account", "nope", "en")).await;
    assert_eq!(error_description(response).await, "Failed to create theme");
}

#[tokio::test]
async fn message_failure_is_a_fault() {
    let response = get(app(BrokenThemes), &uri("master", "account", "base", "de-CH")).await;
    assert_eq!(
        error_description(response).await,
        "Unable to get messages for locale: de-CH"
    );
}

#[tokio::test]
async fn missing_realm_is_a_fault() {
    let response = get(app(themes()), &uri("nope", "account", "base", "en")).await;
    assert_eq!(error_description(response).await, "Realm not found: nope");
}

#[tokio::test]
async fn operation_is_usable_without_a_router() {
    let state = AppState::new(
        themes(),
        realms(),
        NoEncoding,
        VitrineServerConfig::default(),
    );

    let json = get_localizations(&state, "bare", "account", "empty", Some("fr"))
        .await
        .unwrap();
    assert_eq!(json, "");

    let err = get_localizations(&state, "bare", "login", "base", Some("en"))
        .await
        .unwrap_err();
    assert_eq!(err.description, "Failed to create theme");
}
