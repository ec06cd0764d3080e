pub use vitrine_core::*;

#[cfg(feature = "server")]
pub mod server {
    pub use vitrine_server::*;
}

#[cfg(feature = "fs")]
pub mod fs {
    pub use vitrine_fs::*;
}

#[cfg(feature = "gzip")]
pub mod gzip {
    pub use vitrine_gzip::*;
}

#[cfg(feature = "memory")]
pub mod memory {
    pub use vitrine_memory::*;
}

pub mod prelude {
    pub use vitrine_core::prelude::*;

    #[cfg(feature = "server")]
    pub use vitrine_server::prelude::*;

    #[cfg(feature = "fs")]
    pub use vitrine_fs::FileSystemThemes;

    #[cfg(feature = "gzip")]
    pub use vitrine_gzip::GzipEncoding;

    #[cfg(feature = "memory")]
    pub use vitrine_memory::{InMemoryRealms, InMemoryThemes};
}
