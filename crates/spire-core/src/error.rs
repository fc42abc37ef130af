use thiserror::Error;

/// Top-level error type for Spire.
#[derive(Debug, Error)]
pub enum SpireError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// A piece could not be built or stored.
    #[error("piece error: {0}")]
    Piece(String),

    /// A language definition is malformed.
    #[error("language error: {0}")]
    Language(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
