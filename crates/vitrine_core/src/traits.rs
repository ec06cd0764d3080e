use crate::error::*;
use crate::locale::Locale;
use crate::messages::MessageBundle;
use crate::theme::ThemeType;

use bytes::Bytes;
use futures::Stream;
use futures::future::BoxFuture;
use std::convert::Infallible;
use std::pin::Pin;

/// A resource body. Dropping it closes the underlying source.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Lazily opens the raw resource stream. Encoding providers only call it on a cache miss.
pub type ResourceSupplier =
    Box<dyn FnOnce() -> BoxFuture<'static, Result<Option<ByteStream>, ThemeError>> + Send>;

/// A resolved theme handle.
pub trait Theme: Send + Sync + 'static + Clone {
    fn name(&self) -> &str;
    fn theme_type(&self) -> ThemeType;

    /// Message templates for `locale`. May be empty.
    fn messages(
        &self,
        locale: &Locale,
    ) -> impl Future<Output = Result<MessageBundle, ThemeError>> + Send;

    /// Opens the resource at `path`, or `None` if the theme has no such resource.
    ///
    /// `path` is untrusted; implementations must not resolve it outside the theme.
    fn resource_stream(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<Option<ByteStream>, ThemeError>> + Send;
}

pub trait ThemeProvider: Send + Sync + 'static + Clone {
    type Theme: Theme;

    fn theme(
        &self,
        name: &str,
        theme_type: ThemeType,
    ) -> impl Future<Output = Result<Self::Theme, ThemeError>> + Send;
}

pub trait Realm: Send + Sync {
    fn name(&self) -> &str;

    /// Realm specific message overrides for a language tag. Empty if there are none.
    fn localization_overrides(
        &self,
        locale_tag: &str,
    ) -> impl Future<Output = Result<MessageBundle, RealmError>> + Send;
}

pub trait RealmProvider: Send + Sync + 'static + Clone {
    type Realm: Realm;

    fn realm_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Self::Realm>, RealmError>> + Send;
}

pub trait EncodingProvider: Send + Sync {
    /// The `Content-Encoding` token, e.g. `gzip`.
    fn encoding(&self) -> &str;

    /// Returns the encoded resource, serving from cache where possible.
    ///
    /// `key` is the resource path with separators normalized to the host's separator.
    /// Returns `None` when the supplier reports the resource as absent.
    fn encoded_stream(
        &self,
        supplier: ResourceSupplier,
        theme_type: ThemeType,
        theme_name: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<ByteStream>, EncodingError>> + Send;
}

/// Selects an [`EncodingProvider`] for a content type.
pub trait ResourceEncoding: Send + Sync + 'static + Clone {
    type Provider: EncodingProvider;

    fn is_caching_enabled(&self) -> bool;

    /// `None` if no provider handles this content type, e.g. already compressed images.
    fn provider_for(&self, content_type: &str) -> Option<Self::Provider>;
}

impl EncodingProvider for Infallible {
    fn encoding(&self) -> &str {
        match *self {}
    }

    fn encoded_stream(
        &self,
        _supplier: ResourceSupplier,
        _theme_type: ThemeType,
        _theme_name: &str,
        _key: &str,
    ) -> impl Future<Output = Result<Option<ByteStream>, EncodingError>> + Send {
        let never = *self;
        async move {
            let unreachable: Result<Option<ByteStream>, EncodingError> = match never {};
            unreachable
        }
    }
}

/// Serves every resource as-is.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEncoding;

impl ResourceEncoding for NoEncoding {
    type Provider = Infallible;

    fn is_caching_enabled(&self) -> bool {
        false
    }

    fn provider_for(&self, _content_type: &str) -> Option<Self::Provider> {
        None
    }
}
