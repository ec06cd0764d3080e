use crate::server::VitrineServerConfig;
use std::sync::Arc;
use vitrine_core::traits::{RealmProvider, ResourceEncoding, ThemeProvider};

/// Everything a request needs, passed explicitly into each operation.
#[derive(Clone)]
pub struct AppState<T: ThemeProvider, R: RealmProvider, E: ResourceEncoding> {
    pub themes: T,
    pub realms: R,
    pub encoding: E,
    pub config: Arc<VitrineServerConfig>,
}

impl<T: ThemeProvider, R: RealmProvider, E: ResourceEncoding> AppState<T, R, E> {
    pub fn new(themes: T, realms: R, encoding: E, config: VitrineServerConfig) -> Self {
        Self {
            themes,
            realms,
            encoding,
            config: Arc::new(config),
        }
    }
}
