use axum::http::HeaderValue;

/// 30 days.
pub const DEFAULT_STATIC_MAX_AGE: u64 = 2_592_000;

/// The `Cache-Control` policy for versioned resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CachePolicy {
    /// `public, max-age=<seconds>`
    MaxAge(u64),
    /// `no-cache`, useful while developing themes.
    NoCache,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::MaxAge(DEFAULT_STATIC_MAX_AGE)
    }
}

impl CachePolicy {
    pub fn header_value(&self) -> HeaderValue {
        match self {
            CachePolicy::MaxAge(seconds) => {
                HeaderValue::from_str(&format!("public, max-age={seconds}"))
                    .unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
            }
            CachePolicy::NoCache => HeaderValue::from_static("no-cache"),
        }
    }
}
