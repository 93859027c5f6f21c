use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChronosError {
    #[error("Corrupted save: {0}")]
    CorruptedSave(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Remote store error: {0}")]
    RemoteStore(String),

    #[error("Auth error: {0}")]
    Auth(#[from] crate::auth::AuthError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChronosError>;
