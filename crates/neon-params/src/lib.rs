//! NEO network parameters and wallet policy constants
//!
//! This crate provides network-specific version bytes, NEP-2 key derivation
//! parameters and the login policy shared by the session layer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod kdf;
pub mod network;

pub use kdf::ScryptParams;
pub use network::{Network, NetworkType};

/// Minimum passphrase length accepted for encrypted-key logins
pub const MIN_PASSPHRASE_LENGTH: usize = 4;

/// Hostname resolved by the connectivity probe
pub const DEFAULT_CONNECTIVITY_HOST: &str = "google.com";

/// Error types for parameter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid network specified
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    /// Invalid key derivation parameters
    #[error("Invalid scrypt parameters: {0}")]
    InvalidScryptParams(String),
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, Error>;
