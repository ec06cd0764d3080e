/// The token embedded in versioned resource URLs.
///
/// Set at build time through `VITRINE_RESOURCES_VERSION`, otherwise the crate version. Clients
/// may cache resources forever; a new build changes the token and busts their caches.
pub const RESOURCES_VERSION: &str = match option_env!("VITRINE_RESOURCES_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};
