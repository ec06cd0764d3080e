//! # Vitrine In-Memory Providers
//!
//! [`InMemoryThemes`] and [`InMemoryRealms`] keep everything in process memory. Useful for
//! tests and demos, and for serving realm message overrides loaded from a JSON file.
//!
//! ```
//! use vitrine_core::prelude::*;
//! use vitrine_memory::{InMemoryRealms, InMemoryThemes};
//!
//! let themes = InMemoryThemes::new()
//!     .with_resource(ThemeType::Login, "base", "css/login.css", "body {}")
//!     .with_messages(ThemeType::Login, "base", "en", [("doLogIn", "Sign In")]);
//!
//! let realms = InMemoryRealms::new().with_overrides("master", "en", [("doLogIn", "Log in")]);
//! ```

use bytes::Bytes;
use futures::stream;
use std::collections::HashMap;
use std::sync::Arc;
use vitrine_core::prelude::*;

#[derive(Clone, Default)]
pub struct InMemoryThemes {
    themes: Arc<HashMap<(ThemeType, String), InMemoryTheme>>,
}

impl InMemoryThemes {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, theme_type: ThemeType, name: &str) -> &mut InMemoryTheme {
        Arc::make_mut(&mut self.themes)
            .entry((theme_type, name.to_string()))
            .or_insert_with(|| InMemoryTheme {
                name: name.to_string(),
                theme_type,
                resources: Default::default(),
                messages: Default::default(),
            })
    }

    /// Registers an empty theme.
    pub fn with_theme(mut self, theme_type: ThemeType, name: &str) -> Self {
        self.entry(theme_type, name);
        self
    }

    pub fn with_resource(
        mut self,
        theme_type: ThemeType,
        name: &str,
        path: &str,
        data: impl Into<Bytes>,
    ) -> Self {
        let theme = self.entry(theme_type, name);
        Arc::make_mut(&mut theme.resources).insert(path.to_string(), data.into());
        self
    }

    /// Adds messages for a language tag, e.g. `en` or `de-CH`.
    pub fn with_messages<K, V>(
        mut self,
        theme_type: ThemeType,
        name: &str,
        locale_tag: &str,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let theme = self.entry(theme_type, name);
        Arc::make_mut(&mut theme.messages)
            .entry(locale_tag.to_string())
            .or_default()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

impl ThemeProvider for InMemoryThemes {
    type Theme = InMemoryTheme;

    async fn theme(&self, name: &str, theme_type: ThemeType) -> Result<InMemoryTheme, ThemeError> {
        self.themes
            .get(&(theme_type, name.to_string()))
            .cloned()
            .ok_or_else(|| ThemeError::NotFound(format!("{theme_type}/{name}")))
    }
}

#[derive(Clone)]
pub struct InMemoryTheme {
    name: String,
    theme_type: ThemeType,
    resources: Arc<HashMap<String, Bytes>>,
    messages: Arc<HashMap<String, MessageBundle>>,
}

impl Theme for InMemoryTheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn theme_type(&self) -> ThemeType {
        self.theme_type
    }

    /// Messages of the bare language overlaid with those of the full tag.
    async fn messages(&self, locale: &Locale) -> Result<MessageBundle, ThemeError> {
        let tag = locale.to_language_tag();
        let mut bundle = MessageBundle::new();
        for key in locale.language().into_iter().chain([tag.as_str()]) {
            if let Some(entries) = self.messages.get(key) {
                bundle.extend(entries.clone());
            }
        }
        Ok(bundle)
    }

    async fn resource_stream(&self, path: &str) -> Result<Option<ByteStream>, ThemeError> {
        Ok(self.resources.get(path).cloned().map(|data| {
            let stream: ByteStream =
                Box::pin(stream::once(async move { Ok::<_, std::io::Error>(data) }));
            stream
        }))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryRealms {
    realms: Arc<HashMap<String, InMemoryRealm>>,
}

impl InMemoryRealms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads realm overrides shaped as `{ "<realm>": { "<locale>": { "<key>": "<value>" } } }`.
    pub fn from_json(json: &str) -> Result<Self, RealmError> {
        let parsed: HashMap<String, HashMap<String, MessageBundle>> = serde_json::from_str(json)?;
        let realms = parsed
            .into_iter()
            .map(|(name, localizations)| {
                let realm = InMemoryRealm {
                    name: name.clone(),
                    localizations: Arc::new(localizations),
                };
                (name, realm)
            })
            .collect();
        Ok(Self {
            realms: Arc::new(realms),
        })
    }

    fn entry(&mut self, name: &str) -> &mut InMemoryRealm {
        Arc::make_mut(&mut self.realms)
            .entry(name.to_string())
            .or_insert_with(|| InMemoryRealm {
                name: name.to_string(),
                localizations: Default::default(),
            })
    }

    /// Registers a realm without overrides.
    pub fn with_realm(mut self, name: &str) -> Self {
        self.entry(name);
        self
    }

    pub fn with_overrides<K, V>(
        mut self,
        realm: &str,
        locale_tag: &str,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let realm = self.entry(realm);
        Arc::make_mut(&mut realm.localizations)
            .entry(locale_tag.to_string())
            .or_default()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

impl RealmProvider for InMemoryRealms {
    type Realm = InMemoryRealm;

    async fn realm_by_name(&self, name: &str) -> Result<Option<InMemoryRealm>, RealmError> {
        Ok(self.realms.get(name).cloned())
    }
}

#[derive(Clone)]
pub struct InMemoryRealm {
    name: String,
    localizations: Arc<HashMap<String, MessageBundle>>,
}

impl Realm for InMemoryRealm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn localization_overrides(&self, locale_tag: &str) -> Result<MessageBundle, RealmError> {
        Ok(self
            .localizations
            .get(locale_tag)
            .cloned()
            .unwrap_or_default())
    }
}
