//! Session record

use crate::signing::SigningDelegate;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// How a session was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoginMethod {
    /// WIF or hex private key
    PrivateKey,
    /// Address only, no key material
    WatchOnly,
    /// NEP-2 encrypted key and passphrase
    EncryptedKey,
    /// Hardware signing device
    Hardware,
}

impl LoginMethod {
    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::PrivateKey => "Private key",
            Self::WatchOnly => "Watch only",
            Self::EncryptedKey => "Encrypted key",
            Self::Hardware => "Hardware device",
        }
    }
}

/// Credential material carried by a session
///
/// Exactly one variant applies, so a WIF and a hardware public key can never
/// coexist.
#[derive(Clone)]
pub enum SessionCredentials {
    /// Software key (raw or decrypted)
    PrivateKey {
        /// Canonical WIF
        wif: Zeroizing<String>,
    },
    /// No key material
    WatchOnly,
    /// Key held on a hardware device
    Hardware {
        /// Public key exactly as reported by the device
        public_key: String,
        /// Signing capability bound to the device account
        signer: SigningDelegate,
    },
}

/// An authenticated account session
///
/// Sessions are built complete and never mutated; a new login replaces the
/// whole record.
#[derive(Clone)]
pub struct Session {
    address: String,
    method: LoginMethod,
    credentials: SessionCredentials,
    has_internet_connectivity: bool,
}

impl Session {
    pub(crate) fn new(
        address: String,
        method: LoginMethod,
        credentials: SessionCredentials,
        has_internet_connectivity: bool,
    ) -> Self {
        Self {
            address,
            method,
            credentials,
            has_internet_connectivity,
        }
    }

    /// Account address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Login method
    pub fn method(&self) -> LoginMethod {
        self.method
    }

    /// Credential material
    pub fn credentials(&self) -> &SessionCredentials {
        &self.credentials
    }

    /// Canonical WIF for software-key sessions
    pub fn wif(&self) -> Option<&str> {
        match &self.credentials {
            SessionCredentials::PrivateKey { wif } => Some(wif.as_str()),
            _ => None,
        }
    }

    /// Device public key for hardware sessions
    pub fn public_key(&self) -> Option<&str> {
        match &self.credentials {
            SessionCredentials::Hardware { public_key, .. } => Some(public_key.as_str()),
            _ => None,
        }
    }

    /// Signing capability for hardware sessions
    pub fn signing_delegate(&self) -> Option<&SigningDelegate> {
        match &self.credentials {
            SessionCredentials::Hardware { signer, .. } => Some(signer),
            _ => None,
        }
    }

    /// True only for hardware sessions
    pub fn is_hardware_login(&self) -> bool {
        matches!(self.credentials, SessionCredentials::Hardware { .. })
    }

    /// True only for watch-only sessions
    pub fn is_watch_only(&self) -> bool {
        matches!(self.credentials, SessionCredentials::WatchOnly)
    }

    /// Result of the connectivity probe run during login
    pub fn has_internet_connectivity(&self) -> bool {
        self.has_internet_connectivity
    }

    /// Snapshot for the view layer
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            address: self.address.clone(),
            login_method: self.method,
            is_hardware_login: self.is_hardware_login(),
            is_watch_only: self.is_watch_only(),
            has_private_key: self.wif().is_some(),
            public_key: self.public_key().map(str::to_string),
            account_index: self.signing_delegate().map(SigningDelegate::account_index),
            has_internet_connectivity: self.has_internet_connectivity,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("address", &self.address)
            .field("method", &self.method)
            .field("public_key", &self.public_key())
            .field("has_internet_connectivity", &self.has_internet_connectivity)
            .finish_non_exhaustive()
    }
}

/// Serializable view of a session
///
/// Carries no secret material and no signing capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Account address
    pub address: String,
    /// Login method
    pub login_method: LoginMethod,
    /// Hardware session
    pub is_hardware_login: bool,
    /// Watch-only session
    pub is_watch_only: bool,
    /// Session holds a WIF
    pub has_private_key: bool,
    /// Device public key (hardware only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// Device account index (hardware only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_index: Option<u32>,
    /// Connectivity at login
    pub has_internet_connectivity: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_session() -> Session {
        Session::new(
            "ALq7AWrhAueN6mJNqk6FHJjnsEoPRytLdW".to_string(),
            LoginMethod::PrivateKey,
            SessionCredentials::PrivateKey {
                wif: Zeroizing::new(
                    "L1QqQJnpBwbsPGAuutuzPTac8piqvbR1HRjrY5qHup48TBCBFe4g".to_string(),
                ),
            },
            true,
        )
    }

    #[test]
    fn test_key_session_flags() {
        let session = key_session();
        assert!(session.wif().is_some());
        assert!(session.public_key().is_none());
        assert!(session.signing_delegate().is_none());
        assert!(!session.is_hardware_login());
        assert!(!session.is_watch_only());
    }

    #[test]
    fn test_debug_redacts_wif() {
        let session = key_session();
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("L1QqQJnp"));
        assert!(rendered.contains("ALq7AWrh"));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let session = Session::new(
            "ALq7AWrhAueN6mJNqk6FHJjnsEoPRytLdW".to_string(),
            LoginMethod::WatchOnly,
            SessionCredentials::WatchOnly,
            false,
        );
        let json = serde_json::to_value(session.summary()).unwrap();

        assert_eq!(json["loginMethod"], "watchOnly");
        assert_eq!(json["isWatchOnly"], true);
        assert_eq!(json["hasPrivateKey"], false);
        assert_eq!(json["hasInternetConnectivity"], false);
        assert!(json.get("publicKey").is_none());
        assert!(json.get("wif").is_none());
    }
}
