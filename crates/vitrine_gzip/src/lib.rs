//! # Vitrine Gzip Encoding
//!
//! A [`ResourceEncoding`] that gzips text resources and keeps the compressed files in a cache
//! directory, laid out as `<cache_dir>/<resources_version>/<type>/<theme>/<path>`. A new build
//! gets a fresh cache root, so a versioned URL never serves another build's bytes.
//!
//! ## Usage
//!
//! ```no_run
//! use vitrine_gzip::GzipEncoding;
//!
//! let encoding = GzipEncoding::new("./cache/gzip").with_resources_version("build-42");
//! ```

use bytes::Bytes;
use flate2::Compression;
use flate2::write::GzEncoder;
use futures::{StreamExt, stream};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::{debug, instrument, warn};
use vitrine_core::prelude::*;

pub const DEFAULT_CONTENT_TYPES: [&str; 5] = [
    "text/css",
    "text/javascript",
    "application/javascript",
    "application/json",
    "image/svg+xml",
];

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

async fn atomic_write(path: &Path, data: Bytes) -> Result<(), EncodingError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(
        ".{file_name}.{}.{}.tmp",
        std::process::id(),
        TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    fs::write(&tmp_path, data).await?;
    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(e.into());
    }
    Ok(())
}

fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[derive(Clone)]
pub struct GzipEncoding {
    cache_dir: PathBuf,
    resources_version: String,
    enabled: bool,
    content_types: Arc<Vec<String>>,
}

impl GzipEncoding {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            resources_version: RESOURCES_VERSION.to_string(),
            enabled: true,
            content_types: Arc::new(DEFAULT_CONTENT_TYPES.map(String::from).to_vec()),
        }
    }

    /// Must match the server's `resources_version`. Defaults to [`RESOURCES_VERSION`].
    pub fn with_resources_version(mut self, version: impl Into<String>) -> Self {
        self.resources_version = version.into();
        self
    }

    /// Directory holding this version's compressed resources.
    pub fn version_dir(&self) -> PathBuf {
        self.cache_dir.join(&self.resources_version)
    }

    /// Removes cache roots left behind by other resource versions.
    pub async fn prune_stale_versions(&self) -> Result<(), EncodingError> {
        let mut entries = match fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name() == self.resources_version.as_str()
                || !entry.file_type().await?.is_dir()
            {
                continue;
            }
            debug!("Pruning stale gzip cache {}", entry.path().display());
            fs::remove_dir_all(entry.path()).await?;
        }
        Ok(())
    }

    /// Disabled encoding serves every resource unencoded.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_content_types<S: Into<String>>(
        mut self,
        content_types: impl IntoIterator<Item = S>,
    ) -> Self {
        self.content_types = Arc::new(
            content_types
                .into_iter()
                .map(|t| t.into().to_ascii_lowercase())
                .collect(),
        );
        self
    }
}

impl ResourceEncoding for GzipEncoding {
    type Provider = GzipProvider;

    fn is_caching_enabled(&self) -> bool {
        self.enabled
    }

    fn provider_for(&self, content_type: &str) -> Option<GzipProvider> {
        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        self.content_types
            .iter()
            .any(|t| *t == media_type)
            .then(|| GzipProvider {
                cache_dir: self.cache_dir.clone(),
                resources_version: self.resources_version.clone(),
            })
    }
}

#[derive(Clone)]
pub struct GzipProvider {
    cache_dir: PathBuf,
    resources_version: String,
}

impl GzipProvider {
    fn cache_path(&self, theme_type: ThemeType, theme_name: &str, key: &str) -> Option<PathBuf> {
        let contained = |p: &Path| {
            p.components().next().is_some()
                && p.components().all(|c| matches!(c, Component::Normal(_)))
        };
        let single = |p: &Path| contained(p) && p.components().count() == 1;
        let version = Path::new(&self.resources_version);
        let (name, key) = (Path::new(theme_name), Path::new(key));
        (single(version) && single(name) && contained(key)).then(|| {
            self.cache_dir
                .join(version)
                .join(theme_type.as_str())
                .join(name)
                .join(key)
        })
    }
}

async fn open_cached(path: &Path) -> Result<Option<ByteStream>, EncodingError> {
    let file = match fs::File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if !file.metadata().await?.is_file() {
        return Ok(None);
    }
    let stream: ByteStream = Box::pin(ReaderStream::new(file));
    Ok(Some(stream))
}

impl EncodingProvider for GzipProvider {
    fn encoding(&self) -> &str {
        "gzip"
    }

    #[instrument(skip(self, supplier))]
    async fn encoded_stream(
        &self,
        supplier: ResourceSupplier,
        theme_type: ThemeType,
        theme_name: &str,
        key: &str,
    ) -> Result<Option<ByteStream>, EncodingError> {
        let Some(path) = self.cache_path(theme_type, theme_name, key) else {
            warn!("Rejected cache key outside of the cache directory");
            return Ok(None);
        };

        if let Some(cached) = open_cached(&path).await? {
            debug!("Serving cached gzip resource");
            return Ok(Some(cached));
        }

        let Some(mut raw) = supplier().await? else {
            return Ok(None);
        };
        let mut data = Vec::new();
        while let Some(chunk) = raw.next().await {
            data.extend_from_slice(&chunk?);
        }
        drop(raw);

        let compressed = tokio::task::spawn_blocking(move || gzip(&data))
            .await
            .map_err(|e| EncodingError::Generic(format!("Gzip task failed: {e}")))??;
        let compressed = Bytes::from(compressed);

        debug!("Caching gzip resource at {}", path.display());
        atomic_write(&path, compressed.clone()).await?;

        let stream: ByteStream =
            Box::pin(stream::once(async move { Ok::<_, std::io::Error>(compressed) }));
        Ok(Some(stream))
    }
}
