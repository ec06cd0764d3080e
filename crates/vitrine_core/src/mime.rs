/// Content type for a resource path, derived from its extension.
///
/// Unknown extensions fall back to `application/octet-stream`.
pub fn content_type_of(path: &str) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}
