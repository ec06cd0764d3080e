use crate::state::AppState;

use futures::FutureExt;
use std::path::MAIN_SEPARATOR_STR;
use tracing::{debug, instrument};
use vitrine_core::prelude::*;

/// A resource ready to be written as a response body.
pub struct ThemeResource {
    pub stream: ByteStream,
    pub content_type: String,
    /// Set only when the stream went through an [`EncodingProvider`].
    pub encoding: Option<String>,
}

pub enum ResourceOutcome {
    Found(ThemeResource),
    NotFound,
}

impl ResourceOutcome {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceOutcome::NotFound)
    }
}

/// Resolves a versioned theme resource.
///
/// A stale `version` or a missing resource is [`ResourceOutcome::NotFound`]. Everything else that
/// goes wrong, including an unknown `theme_type`, is an error.
#[instrument(skip(state))]
pub async fn get_resource<T, R, E>(
    state: &AppState<T, R, E>,
    version: &str,
    theme_type: &str,
    theme_name: &str,
    path: &str,
) -> anyhow::Result<ResourceOutcome>
where
    T: ThemeProvider,
    R: RealmProvider,
    E: ResourceEncoding,
{
    if version != state.config.resources_version {
        debug!(
            "Resource version mismatch, expected {}",
            state.config.resources_version
        );
        return Ok(ResourceOutcome::NotFound);
    }

    let theme_type: ThemeType = theme_type.parse()?;
    let content_type = content_type_of(path);
    let theme = state.themes.theme(theme_name, theme_type).await?;

    let provider = if state.encoding.is_caching_enabled() {
        state.encoding.provider_for(&content_type)
    } else {
        None
    };

    let stream = match &provider {
        Some(provider) => {
            let supplier = resource_supplier(theme, path.to_string());
            provider
                .encoded_stream(supplier, theme_type, theme_name, &cache_key(path))
                .await?
        }
        None => theme.resource_stream(path).await?,
    };

    let Some(stream) = stream else {
        debug!("Resource not found");
        return Ok(ResourceOutcome::NotFound);
    };

    Ok(ResourceOutcome::Found(ThemeResource {
        stream,
        content_type,
        encoding: provider.map(|p| p.encoding().to_string()),
    }))
}

fn resource_supplier<T: Theme>(theme: T, path: String) -> ResourceSupplier {
    Box::new(move || async move { theme.resource_stream(&path).await }.boxed())
}

/// The resource path with `/` replaced by the host's path separator.
pub fn cache_key(path: &str) -> String {
    path.replace('/', MAIN_SEPARATOR_STR)
}
