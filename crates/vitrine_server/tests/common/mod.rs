#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use vitrine_core::prelude::*;
use vitrine_memory::{InMemoryTheme, InMemoryThemes};

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_string(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Counts theme lookups.
#[derive(Clone)]
pub struct CountingThemes {
    pub inner: InMemoryThemes,
    pub calls: Arc<AtomicUsize>,
}

impl CountingThemes {
    pub fn new(inner: InMemoryThemes) -> Self {
        Self {
            inner,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ThemeProvider for CountingThemes {
    type Theme = InMemoryTheme;

    async fn theme(&self, name: &str, theme_type: ThemeType) -> Result<InMemoryTheme, ThemeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.theme(name, theme_type).await
    }
}

/// Resolves every theme, then fails on every read.
#[derive(Clone)]
pub struct BrokenThemes;

#[derive(Clone)]
pub struct BrokenTheme;

impl ThemeProvider for BrokenThemes {
    type Theme = BrokenTheme;

    async fn theme(&self, _name: &str, _theme_type: ThemeType) -> Result<BrokenTheme, ThemeError> {
        Ok(BrokenTheme)
    }
}

impl Theme for BrokenTheme {
    fn name(&self) -> &str {
        "broken"
    }

    fn theme_type(&self) -> ThemeType {
        ThemeType::Login
    }

    async fn messages(&self, _locale: &Locale) -> Result<MessageBundle, ThemeError> {
        Err(ThemeError::Io(std::io::Error::other("disk on fire")))
    }

    async fn resource_stream(&self, _path: &str) -> Result<Option<ByteStream>, ThemeError> {
        Err(ThemeError::Io(std::io::Error::other("disk on fire")))
    }
}

/// Passes resources through unchanged, recording the cache keys it was asked for.
#[derive(Clone)]
pub struct RecordingEncoding {
    pub enabled: bool,
    pub keys: Arc<Mutex<Vec<String>>>,
}

impl RecordingEncoding {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            keys: Arc::default(),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

pub struct RecordingProvider {
    keys: Arc<Mutex<Vec<String>>>,
}

impl ResourceEncoding for RecordingEncoding {
    type Provider = RecordingProvider;

    fn is_caching_enabled(&self) -> bool {
        self.enabled
    }

    fn provider_for(&self, content_type: &str) -> Option<RecordingProvider> {
        (content_type == "text/css").then(|| RecordingProvider {
            keys: self.keys.clone(),
        })
    }
}

impl EncodingProvider for RecordingProvider {
    fn encoding(&self) -> &str {
        "x-test"
    }

    async fn encoded_stream(
        &self,
        supplier: ResourceSupplier,
        theme_type: ThemeType,
        theme_name: &str,
        key: &str,
    ) -> Result<Option<ByteStream>, EncodingError> {
        self.keys
            .lock()
            .unwrap()
            .push(format!("{theme_type}:{theme_name}:{key}"));
        Ok(supplier().await?)
    }
}
