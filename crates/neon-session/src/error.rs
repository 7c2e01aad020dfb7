//! Error types for the session layer
//!
//! Login failures fall into four kinds the view layer renders differently:
//! an unusable credential, a short passphrase, a failed decryption and a
//! failing collaborator. The remaining variants cover session bookkeeping,
//! post-login signing and configuration.

use std::fmt;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Credential form that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// WIF or hex private key
    PrivateKey,
    /// Watch-only address
    Address,
    /// NEP-2 encrypted key
    EncryptedKey,
    /// Hardware device public key
    PublicKey,
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialKind::PrivateKey => write!(f, "private key"),
            CredentialKind::Address => write!(f, "address"),
            CredentialKind::EncryptedKey => write!(f, "encrypted key"),
            CredentialKind::PublicKey => write!(f, "public key"),
        }
    }
}

/// External component a login depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    /// Key decryption
    Decryptor,
    /// Address-book upgrade
    AddressBook,
    /// Hardware signing bridge
    HardwareBridge,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collaborator::Decryptor => write!(f, "key decryptor"),
            Collaborator::AddressBook => write!(f, "address book"),
            Collaborator::HardwareBridge => write!(f, "hardware bridge"),
        }
    }
}

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Credential failed shape validation or key derivation
    #[error("Invalid {kind}: {reason}")]
    InvalidCredential {
        /// Which credential was rejected
        kind: CredentialKind,
        /// Why it was rejected
        reason: String,
    },

    /// Passphrase shorter than the configured minimum
    #[error("Passphrase too short: {actual} characters, at least {min} required")]
    PassphraseTooShort {
        /// Configured minimum
        min: usize,
        /// Length of the supplied passphrase
        actual: usize,
    },

    /// Wrong passphrase or corrupt ciphertext
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// A collaborator reported an error
    #[error("{collaborator} failed: {reason}")]
    CollaboratorFailure {
        /// Failing collaborator
        collaborator: Collaborator,
        /// Error reported by the collaborator
        reason: String,
    },

    /// A newer login or a logout started before this login completed
    #[error("Login superseded by a newer request")]
    LoginSuperseded,

    /// Hardware device refused or failed to sign
    #[error("Hardware signing failed: {0}")]
    HardwareSigning(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(kind: CredentialKind, reason: impl fmt::Display) -> Self {
        Error::InvalidCredential {
            kind,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn collaborator(collaborator: Collaborator, reason: impl fmt::Display) -> Self {
        Error::CollaboratorFailure {
            collaborator,
            reason: reason.to_string(),
        }
    }

    /// Check if error is a user-facing error (vs internal error)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidCredential { .. }
                | Error::PassphraseTooShort { .. }
                | Error::DecryptionFailed(_)
        )
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidCredential { kind, .. } => match kind {
                CredentialKind::PrivateKey => "That is not a valid private key".to_string(),
                CredentialKind::Address => "That is not a valid address".to_string(),
                CredentialKind::EncryptedKey => "That is not a valid encrypted key".to_string(),
                CredentialKind::PublicKey => {
                    "The hardware device returned an invalid public key".to_string()
                }
            },
            Error::PassphraseTooShort { min, .. } => {
                format!("Passphrase must be at least {} characters", min)
            }
            Error::DecryptionFailed(_) => {
                "Unable to decrypt the key. Please check your passphrase and try again."
                    .to_string()
            }
            Error::CollaboratorFailure { collaborator, .. } => match collaborator {
                Collaborator::AddressBook => {
                    "Logged in key could not be saved to the wallet".to_string()
                }
                Collaborator::HardwareBridge => {
                    "The hardware device is not available".to_string()
                }
                Collaborator::Decryptor => "The key could not be decrypted".to_string(),
            },
            Error::LoginSuperseded => "Login was replaced by a newer request".to_string(),
            Error::HardwareSigning(_) => "The hardware device did not sign".to_string(),
            _ => self.to_string(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidCredential { .. } => ErrorCategory::Credential,
            Error::PassphraseTooShort { .. } => ErrorCategory::Passphrase,
            Error::DecryptionFailed(_) => ErrorCategory::Decryption,
            Error::CollaboratorFailure { .. } | Error::HardwareSigning(_) => {
                ErrorCategory::Collaborator
            }
            Error::LoginSuperseded => ErrorCategory::Session,
            Error::Config(_) | Error::Io(_) | Error::Serialization(_) => ErrorCategory::Internal,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected credential
    Credential,
    /// Passphrase policy
    Passphrase,
    /// Decryption
    Decryption,
    /// External collaborator
    Collaborator,
    /// Session bookkeeping
    Session,
    /// Internal/system errors
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Credential => write!(f, "Credential"),
            ErrorCategory::Passphrase => write!(f, "Passphrase"),
            ErrorCategory::Decryption => write!(f, "Decryption"),
            ErrorCategory::Collaborator => write!(f, "Collaborator"),
            ErrorCategory::Session => write!(f, "Session"),
            ErrorCategory::Internal => write!(f, "Internal"),
        }
    }
}
