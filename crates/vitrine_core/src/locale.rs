use std::fmt;
use unic_langid::LanguageIdentifier;

/// The tag rendered for a locale without a language.
pub const UNDETERMINED: &str = "und";

/// A parsed language tag, e.g. `de-CH` or `sr-Latn-RS`.
///
/// Parsing never fails: a malformed tag degrades to the undetermined locale (`und`), and a
/// tag that starts well-formed keeps its longest well-formed prefix. Extension and private-use
/// subtags (`-u-co-phonebk`, `-x-private`) are kept verbatim, lowercased, after the identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Locale {
    id: LanguageIdentifier,
    extensions: Option<String>,
}

impl Locale {
    /// Best-effort parse of a BCP 47 language tag.
    ///
    /// Only `-` separates subtags, so `en_US` is ill-formed and yields [`Locale::undetermined`].
    pub fn from_language_tag(tag: &str) -> Self {
        let subtags: Vec<&str> = tag
            .trim()
            .split('-')
            .take_while(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()))
            .collect();

        // Extensions start at the first singleton, which no identifier subtag can be.
        let identifier_end = subtags
            .iter()
            .position(|s| s.len() == 1)
            .unwrap_or(subtags.len());
        let (id, parsed) = (1..=identifier_end)
            .rev()
            .find_map(|n| {
                subtags[..n]
                    .join("-")
                    .parse::<LanguageIdentifier>()
                    .ok()
                    .map(|id| (id, n))
            })
            .unwrap_or_default();

        Self {
            id,
            extensions: extensions(&subtags[parsed..]),
        }
    }

    pub fn undetermined() -> Self {
        Self::default()
    }

    pub fn language_identifier(&self) -> &LanguageIdentifier {
        &self.id
    }

    pub fn language(&self) -> Option<&str> {
        (!self.id.language.is_empty()).then(|| self.id.language.as_str())
    }

    pub fn script(&self) -> Option<&str> {
        self.id.script.as_ref().map(|s| s.as_str())
    }

    pub fn region(&self) -> Option<&str> {
        self.id.region.as_ref().map(|r| r.as_str())
    }

    pub fn variants(&self) -> Vec<&str> {
        self.id.variants().map(|v| v.as_str()).collect()
    }

    pub fn extensions(&self) -> Option<&str> {
        self.extensions.as_deref()
    }

    pub fn is_undetermined(&self) -> bool {
        self.id.language.is_empty()
    }

    /// Canonical language tag, e.g. `de-CH`. The undetermined locale renders as `und`.
    pub fn to_language_tag(&self) -> String {
        match &self.extensions {
            Some(extensions) => format!("{}-{extensions}", self.id),
            None => self.id.to_string(),
        }
    }

    /// Resource-bundle suffixes from least to most specific, e.g. `["de", "de_CH"]`.
    ///
    /// Empty for the undetermined locale. Extensions never take part.
    pub fn bundle_suffixes(&self) -> Vec<String> {
        let Some(language) = self.language() else {
            return Vec::new();
        };

        let mut suffixes = vec![language.to_string()];
        let mut current = language.to_string();
        if let Some(region) = self.region() {
            current = format!("{current}_{region}");
            suffixes.push(current.clone());
        }
        let variants = self.variants();
        if !variants.is_empty() {
            if self.region().is_none() {
                current.push('_');
            }
            suffixes.push(format!("{current}_{}", variants.join("_")));
        }
        suffixes
    }
}

impl From<LanguageIdentifier> for Locale {
    fn from(id: LanguageIdentifier) -> Self {
        Self {
            id,
            extensions: None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_language_tag())
    }
}

/// Well-formed singleton groups following the identifier. An incomplete group ends the tail.
fn extensions(subtags: &[&str]) -> Option<String> {
    let mut kept: Vec<String> = Vec::new();
    let mut rest = subtags;

    while let Some((singleton, tail)) = rest.split_first() {
        if singleton.len() != 1 {
            break;
        }
        // Private use swallows everything after it, singletons included.
        let min = if singleton.eq_ignore_ascii_case("x") { 1 } else { 2 };
        let len = tail
            .iter()
            .take_while(|s| (min..=8).contains(&s.len()))
            .count();
        if len == 0 {
            break;
        }
        kept.extend(rest[..=len].iter().map(|s| s.to_ascii_lowercase()));
        rest = &tail[len..];
    }

    (!kept.is_empty()).then(|| kept.join("-"))
}
