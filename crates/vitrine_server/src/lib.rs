mod api;

pub mod cache;
pub mod localizations;
pub mod resources;
pub mod server;
pub mod state;

pub mod prelude {
    pub use crate::cache::*;
    pub use crate::localizations::*;
    pub use crate::resources::*;
    pub use crate::server::*;
    pub use crate::state::*;
}
