//! Error types for Neon Core
//!
//! Error taxonomy for key parsing, address encoding and NEP-2 handling.

use std::fmt;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Neon Core errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid private key (hex or WIF)
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// Invalid public key encoding or point
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Malformed NEP-2 envelope
    #[error("Invalid encrypted key: {0}")]
    InvalidEncryptedKey(String),

    /// Decryption produced no usable key (wrong passphrase or corrupt data)
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// Key derivation error
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Parameter error
    #[error(transparent)]
    Params(#[from] neon_params::Error),
}

impl Error {
    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidKey(_) | Error::InvalidPublicKey(_) | Error::KeyDerivation(_) => {
                ErrorCategory::Keys
            }
            Error::InvalidAddress(_) => ErrorCategory::Address,
            Error::InvalidEncryptedKey(_) | Error::Decryption(_) => ErrorCategory::Encryption,
            Error::Params(_) => ErrorCategory::Internal,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Key-related errors
    Keys,
    /// Address-related errors
    Address,
    /// Encrypted key errors
    Encryption,
    /// Internal/system errors
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Keys => write!(f, "Keys"),
            ErrorCategory::Address => write!(f, "Address"),
            ErrorCategory::Encryption => write!(f, "Encryption"),
            ErrorCategory::Internal => write!(f, "Internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            Error::InvalidKey("test".to_string()).category(),
            ErrorCategory::Keys
        );
        assert_eq!(
            Error::InvalidAddress("test".to_string()).category(),
            ErrorCategory::Address
        );
        assert_eq!(
            Error::Decryption("test".to_string()).category(),
            ErrorCategory::Encryption
        );
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Keys.to_string(), "Keys");
        assert_eq!(ErrorCategory::Encryption.to_string(), "Encryption");
    }
}
