use crate::state::AppState;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, instrument};
use vitrine_core::prelude::*;

/// A localization failure whose description is echoed to the client.
#[derive(Error, Debug)]
#[error("{description}")]
pub struct LocalizationError {
    pub description: String,
    pub cause: anyhow::Error,
}

impl LocalizationError {
    fn new(description: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        let description = description.into();
        let cause = cause.into();
        error!("{description}: {cause:#}");
        Self { description, cause }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    error_description: &'a str,
}

impl IntoResponse for LocalizationError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: "internal_server_error",
            error_description: &self.description,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Builds the client-side message bundle for a realm, theme and locale.
///
/// The theme's messages are overlaid with the realm's overrides and converted with
/// [`convert_message`]. The result is a flat JSON object, or the empty string when there are
/// no messages at all.
#[instrument(skip(state))]
pub async fn get_localizations<T, R, E>(
    state: &AppState<T, R, E>,
    realm_name: &str,
    theme_type: &str,
    theme_name: &str,
    locale_tag: Option<&str>,
) -> Result<String, LocalizationError>
where
    T: ThemeProvider,
    R: RealmProvider,
    E: ResourceEncoding,
{
    let locale = Locale::from_language_tag(locale_tag.unwrap_or_default());

    let theme_type: ThemeType = theme_type
        .parse()
        .map_err(|e: ThemeError| LocalizationError::new(e.to_string(), e))?;

    let theme = state
        .themes
        .theme(theme_name, theme_type)
        .await
        .map_err(|e| LocalizationError::new("Failed to create theme", e))?;

    let messages = theme.messages(&locale).await.map_err(|e| {
        LocalizationError::new(format!("Unable to get messages for locale: {locale}"), e)
    })?;

    let realm = state
        .realms
        .realm_by_name(realm_name)
        .await
        .map_err(|e| LocalizationError::new(format!("Failed to load realm: {realm_name}"), e))?
        .ok_or_else(|| {
            LocalizationError::new(
                format!("Realm not found: {realm_name}"),
                RealmError::NotFound(realm_name.to_string()),
            )
        })?;

    let tag = locale.to_language_tag();
    let overrides = realm.localization_overrides(&tag).await.map_err(|e| {
        LocalizationError::new(
            format!("Unable to get realm localizations for locale: {tag}"),
            e,
        )
    })?;

    let merged = merge_overrides(messages, overrides);
    Ok(bundle_to_json(&convert_bundle(&merged)))
}
