//! # Vitrine FileSystem Themes
//!
//! A local filesystem [`ThemeProvider`] for vitrine.
//!
//! Themes live under `<root>/<type>/<name>/`:
//!
//! ```text
//! themes/
//! └── login/
//!     └── custom/
//!         ├── theme.properties              # optional, e.g. `parent=base`
//!         ├── resources/css/login.css
//!         └── messages/messages_en.properties
//! ```
//!
//! ## Features
//!
//! * **Parent themes**: resources resolve in the theme first, then its parents. Messages are
//!   merged parent first so a child overrides individual keys.
//! * **Locale chain**: `messages_de.properties` is overlaid with `messages_de_CH.properties`.
//! * **Contained paths**: resource paths that are absolute or contain `..` are never opened.
//!
//! ## Usage
//!
//! ```no_run
//! use vitrine_fs::FileSystemThemes;
//!
//! let themes = FileSystemThemes::new("./themes").with_default_theme("base");
//! ```

pub mod properties;

use properties::parse_properties;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};
use vitrine_core::prelude::*;

const THEME_PROPERTIES: &str = "theme.properties";

#[derive(Clone)]
pub struct FileSystemThemes {
    root: PathBuf,
    default_theme: Option<String>,
}

impl FileSystemThemes {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            root: path.into(),
            default_theme: None,
        }
    }

    /// Theme served in place of a theme that does not exist.
    pub fn with_default_theme(mut self, name: impl Into<String>) -> Self {
        self.default_theme = Some(name.into());
        self
    }

    fn get_path(&self, theme_type: ThemeType, name: &str) -> PathBuf {
        self.root.join(theme_type.as_str()).join(name)
    }

    async fn exists(&self, theme_type: ThemeType, name: &str) -> bool {
        is_plain_name(name)
            && fs::metadata(self.get_path(theme_type, name))
                .await
                .is_ok_and(|m| m.is_dir())
    }

    /// Directories of `name` and all of its parents, child first.
    async fn theme_chain(
        &self,
        theme_type: ThemeType,
        name: &str,
    ) -> Result<Vec<PathBuf>, ThemeError> {
        let mut dirs = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(name.to_string());

        while let Some(name) = current.take() {
            if !visited.insert(name.clone()) {
                warn!("Theme {theme_type}/{name} is its own ancestor, ignoring parent");
                break;
            }
            if !self.exists(theme_type, &name).await {
                return Err(ThemeError::NotFound(format!("{theme_type}/{name}")));
            }

            let dir = self.get_path(theme_type, &name);
            current = read_optional(&dir.join(THEME_PROPERTIES))
                .await?
                .map(|text| parse_properties(&text))
                .and_then(|mut props| props.remove("parent"))
                .filter(|parent| !parent.is_empty());
            dirs.push(dir);
        }

        Ok(dirs)
    }
}

impl ThemeProvider for FileSystemThemes {
    type Theme = FileSystemTheme;

    async fn theme(
        &self,
        name: &str,
        theme_type: ThemeType,
    ) -> Result<FileSystemTheme, ThemeError> {
        let mut resolved = name;
        if let Some(default) = &self.default_theme
            && default != name
            && !self.exists(theme_type, name).await
        {
            warn!("Theme {theme_type}/{name} not found, using {default}");
            resolved = default.as_str();
        }

        let dirs = self.theme_chain(theme_type, resolved).await?;
        debug!("Resolved theme {theme_type}/{resolved} with {} dirs", dirs.len());

        Ok(FileSystemTheme {
            name: resolved.to_string(),
            theme_type,
            dirs: Arc::new(dirs),
        })
    }
}

#[derive(Clone)]
pub struct FileSystemTheme {
    name: String,
    theme_type: ThemeType,
    dirs: Arc<Vec<PathBuf>>,
}

impl Theme for FileSystemTheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn theme_type(&self) -> ThemeType {
        self.theme_type
    }

    async fn messages(&self, locale: &Locale) -> Result<MessageBundle, ThemeError> {
        let mut bundle = MessageBundle::new();
        for dir in self.dirs.iter().rev() {
            for suffix in locale.bundle_suffixes() {
                let path = dir.join("messages").join(format!("messages_{suffix}.properties"));
                if let Some(text) = read_optional(&path).await? {
                    bundle.extend(parse_properties(&text));
                }
            }
        }
        Ok(bundle)
    }

    async fn resource_stream(&self, path: &str) -> Result<Option<ByteStream>, ThemeError> {
        if !is_contained(path) {
            warn!("Rejected resource path {path:?} for theme {}", self.name);
            return Ok(None);
        }

        for dir in self.dirs.iter() {
            let candidate = dir.join("resources").join(path);
            let file = match fs::File::open(&candidate).await {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(ThemeError::Io(e)),
            };
            if !file.metadata().await?.is_file() {
                continue;
            }
            let stream: ByteStream = Box::pin(ReaderStream::new(file));
            return Ok(Some(stream));
        }

        Ok(None)
    }
}

async fn read_optional(path: &Path) -> Result<Option<String>, ThemeError> {
    match fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ThemeError::Io(e)),
    }
}

/// A non-empty relative path made only of normal components.
fn is_contained(path: &str) -> bool {
    let path = Path::new(path);
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
