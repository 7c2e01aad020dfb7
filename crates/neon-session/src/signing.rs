//! Hardware signing delegation

use crate::{Error, Result};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Bridge to a hardware signing device
#[async_trait]
pub trait HardwareBridge: Send + Sync {
    /// Ask the device to sign `payload` with the key at `account_index`
    async fn request_signature(
        &self,
        account_index: u32,
        payload: &[u8],
    ) -> anyhow::Result<Vec<u8>>;
}

/// Signing capability bound to one device account
///
/// The account index is fixed at login; callers only supply the digest.
#[derive(Clone)]
pub struct SigningDelegate {
    account_index: u32,
    bridge: Arc<dyn HardwareBridge>,
}

impl SigningDelegate {
    /// Bind `bridge` to `account_index`
    pub fn new(account_index: u32, bridge: Arc<dyn HardwareBridge>) -> Self {
        Self {
            account_index,
            bridge,
        }
    }

    /// Device account index this delegate signs with
    pub fn account_index(&self) -> u32 {
        self.account_index
    }

    /// Sign a transaction digest on the device
    pub async fn sign(&self, digest: &[u8]) -> Result<Vec<u8>> {
        debug!(
            "Requesting hardware signature for account {} ({} bytes)",
            self.account_index,
            digest.len()
        );
        self.bridge
            .request_signature(self.account_index, digest)
            .await
            .map_err(|e| {
                warn!("Hardware signing failed: {:#}", e);
                Error::HardwareSigning(format!("{:#}", e))
            })
    }
}

impl fmt::Debug for SigningDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningDelegate")
            .field("account_index", &self.account_index)
            .finish_non_exhaustive()
    }
}
