//! Encrypted key decryption

use crate::error::{Collaborator, CredentialKind};
use crate::{Error, Result};
use async_trait::async_trait;
use neon_core::{nep2, PrivateKey};
use neon_params::{Network, ScryptParams};
use tracing::debug;

/// Decrypts NEP-2 keys
///
/// Implementations report a wrong passphrase as [`Error::DecryptionFailed`];
/// anything else is a collaborator failure.
#[async_trait]
pub trait KeyDecryptor: Send + Sync {
    /// Decrypt `encrypted_key` with `passphrase`
    async fn decrypt(&self, encrypted_key: &str, passphrase: &str) -> Result<PrivateKey>;
}

/// NEP-2 decryption on the blocking thread pool
#[derive(Debug, Clone)]
pub struct Nep2Decryptor {
    params: ScryptParams,
    network: Network,
}

impl Nep2Decryptor {
    /// Create a decryptor for `network` using `params`
    pub fn new(params: ScryptParams, network: Network) -> Self {
        Self { params, network }
    }

    /// Scrypt parameters in use
    pub fn params(&self) -> &ScryptParams {
        &self.params
    }
}

#[async_trait]
impl KeyDecryptor for Nep2Decryptor {
    async fn decrypt(&self, encrypted_key: &str, passphrase: &str) -> Result<PrivateKey> {
        let encrypted_key = encrypted_key.to_string();
        let passphrase = zeroize::Zeroizing::new(passphrase.to_string());
        let params = self.params;
        let network = self.network.clone();

        debug!("Running scrypt (log_n={}) on blocking pool", params.log_n);
        let outcome = tokio::task::spawn_blocking(move || {
            nep2::decrypt(&encrypted_key, &passphrase, &params, &network)
        })
        .await
        .map_err(|e| Error::collaborator(Collaborator::Decryptor, e))?;

        outcome.map_err(|e| match e {
            neon_core::Error::Decryption(reason) => Error::DecryptionFailed(reason),
            neon_core::Error::InvalidEncryptedKey(reason) => {
                Error::invalid(CredentialKind::EncryptedKey, reason)
            }
            other => Error::collaborator(Collaborator::Decryptor, other),
        })
    }
}
