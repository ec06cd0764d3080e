use crate::localizations::{LocalizationError, get_localizations};
use crate::resources::{ResourceOutcome, get_resource};
use crate::state::AppState;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;
use vitrine_core::prelude::*;

/// A resource fault. Logged here, answered with an empty 500 so nothing internal leaks.
pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Failed to get theme request: {:?}", self.0);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

#[derive(serde::Deserialize)]
pub struct ResourcePath {
    version: String,
    theme_type: String,
    theme_name: String,
    path: String,
}

/// GET /resources/{version}/{theme_type}/{theme_name}/{*path}
pub async fn theme_resource<T: ThemeProvider, R: RealmProvider, E: ResourceEncoding>(
    State(state): State<AppState<T, R, E>>,
    Path(params): Path<ResourcePath>,
) -> Result<Response, ApiError> {
    let outcome = get_resource(
        &state,
        &params.version,
        &params.theme_type,
        &params.theme_name,
        &params.path,
    )
    .await?;

    let ResourceOutcome::Found(resource) = outcome else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let content_type = HeaderValue::from_str(&resource.content_type)?;
    let encoding = resource
        .encoding
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()?;

    let mut response = Body::from_stream(resource.stream).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(
        header::CACHE_CONTROL,
        state.config.cache_control.header_value(),
    );
    if let Some(encoding) = encoding {
        headers.insert(header::CONTENT_ENCODING, encoding);
    }

    Ok(response)
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizationParams {
    realm: Option<String>,
    theme_type: Option<String>,
    theme_name: Option<String>,
    locale: Option<String>,
}

/// GET /resources/localizations?realm=&themeType=&themeName=&locale=
///
/// Absent parameters are looked up as empty values and fail as faults, never as bad requests.
pub async fn localizations<T: ThemeProvider, R: RealmProvider, E: ResourceEncoding>(
    State(state): State<AppState<T, R, E>>,
    Query(params): Query<LocalizationParams>,
) -> Result<impl IntoResponse, LocalizationError> {
    let body = get_localizations(
        &state,
        params.realm.as_deref().unwrap_or_default(),
        params.theme_type.as_deref().unwrap_or_default(),
        params.theme_name.as_deref().unwrap_or_default(),
        params.locale.as_deref(),
    )
    .await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}
