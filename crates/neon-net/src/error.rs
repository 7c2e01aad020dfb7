//! Error types

/// Network errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// DNS error
    #[error("DNS error: {0}")]
    Dns(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Settings error
    #[error("Invalid settings: {0}")]
    Settings(String),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
