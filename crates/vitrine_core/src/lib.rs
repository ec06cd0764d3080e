//! # Vitrine Core
//!
//! Types and traits shared by the vitrine crates.
//!
//! - **[`ThemeType`](theme::ThemeType)** and **[`Locale`](locale::Locale)**: request-level identifiers.
//! - **[`ThemeProvider`](traits::ThemeProvider)**, **[`RealmProvider`](traits::RealmProvider)** and
//!   **[`ResourceEncoding`](traits::ResourceEncoding)**: the collaborators a server is built from.
//! - **[`convert_message`](format::convert_message)**: turns message templates into the
//!   `{{param_N}}` form understood by client-side templating.

pub mod error;
pub mod format;
pub mod locale;
pub mod messages;
pub mod mime;
pub mod theme;
pub mod traits;
pub mod version;

pub mod prelude {
    pub use super::error::*;
    pub use super::format::*;
    pub use super::locale::*;
    pub use super::messages::*;
    pub use super::mime::*;
    pub use super::theme::*;
    pub use super::traits::*;
    pub use super::version::*;
}
