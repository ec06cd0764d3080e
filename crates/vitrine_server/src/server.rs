use crate::{api, cache::CachePolicy, state::AppState};
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use vitrine_core::prelude::*;

/// The builder for the Vitrine Server.
#[derive(Clone, Debug, Default)]
pub struct VitrineServer {
    config: VitrineServerConfig,
}

impl VitrineServer {
    pub fn new(config: VitrineServerConfig) -> Self {
        Self { config }
    }
}

#[derive(Clone, Debug)]
pub struct VitrineServerConfig {
    /// The version token resource URLs must carry.
    ///
    /// Defaults to [`RESOURCES_VERSION`].
    pub resources_version: String,
    /// `Cache-Control` for served resources.
    ///
    /// Defaults to `public, max-age=2592000`.
    pub cache_control: CachePolicy,
}

impl Default for VitrineServerConfig {
    fn default() -> Self {
        Self {
            resources_version: RESOURCES_VERSION.to_string(),
            cache_control: CachePolicy::default(),
        }
    }
}

impl VitrineServer {
    pub fn build<T: ThemeProvider, R: RealmProvider, E: ResourceEncoding>(
        self,
        themes: T,
        realms: R,
        encoding: E,
    ) -> Router {
        if self.config.resources_version.is_empty() {
            warn!("Empty resources version, resource URLs will carry no cache-busting token!");
        }
        info!(
            "Serving theme resources for version {}",
            self.config.resources_version
        );
        let state = AppState::new(themes, realms, encoding, self.config);

        Router::new()
            .route("/health", get(|| async { "OK" }))
            .route("/resources/localizations", get(api::localizations))
            .route(
                "/resources/{version}/{theme_type}/{theme_name}/{*path}",
                get(api::theme_resource),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
