use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown theme type: {0}")]
    UnknownType(String),

    #[error("Theme not found: {0}")]
    NotFound(String),

    #[error("Theme provider error: {0}")]
    Generic(String),
}

#[derive(Error, Debug)]
pub enum RealmError {
    #[error("Realm not found: {0}")]
    NotFound(String),

    #[error("Realm overrides serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Realm provider error: {0}")]
    Generic(String),
}

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error("Encoding provider error: {0}")]
    Generic(String),
}
