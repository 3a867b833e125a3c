use thiserror::Error;

/// airdash error types
#[derive(Error, Debug)]
pub enum AirdashError {
    /// Year text could not be parsed as an integer
    #[error("invalid year {input:?}: expected a whole number")]
    InvalidYear { input: String },

    /// Dataset content could not be interpreted
    #[error("parse error: {0}")]
    Parse(String),

    /// Malformed CSV structure (bad header, unbalanced quotes, ...)
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset download failed
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Cache operation failed
    #[error("cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for airdash
pub type Result<T> = std::result::Result<T, AirdashError>;
