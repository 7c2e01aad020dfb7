//! Interfaces to the components a login depends on

use crate::decryptor::KeyDecryptor;
use crate::signing::HardwareBridge;
use async_trait::async_trait;
use neon_core::PrivateKey;
use neon_net::ConnectivityProbe;
use std::sync::Arc;

/// Wallet address book
#[async_trait]
pub trait AddressBook: Send + Sync {
    /// Record a decrypted account alongside its encrypted key
    ///
    /// Called once per successful encrypted-key login, before the session is
    /// committed. An error fails the login.
    async fn upgrade(&self, encrypted_key: &str, key: &PrivateKey) -> anyhow::Result<()>;
}

/// Balance cache owned by the wallet
pub trait BalanceState: Send + Sync {
    /// Drop cached balances
    fn reset(&self);
}

impl<F> BalanceState for F
where
    F: Fn() + Send + Sync,
{
    fn reset(&self) {
        self()
    }
}

/// Address book that records nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAddressBook;

#[async_trait]
impl AddressBook for NoopAddressBook {
    async fn upgrade(&self, _encrypted_key: &str, _key: &PrivateKey) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Everything a [`SessionService`](crate::SessionService) calls out to
#[derive(Clone)]
pub struct Collaborators {
    /// NEP-2 decryption
    pub decryptor: Arc<dyn KeyDecryptor>,
    /// Address-book upgrade after encrypted logins
    pub address_book: Arc<dyn AddressBook>,
    /// Balance cache reset on logout
    pub balance: Arc<dyn BalanceState>,
    /// Connectivity probe run on every login
    pub probe: Arc<dyn ConnectivityProbe>,
    /// Hardware signing bridge, if a device integration is present
    pub hardware: Option<Arc<dyn HardwareBridge>>,
}

impl Collaborators {
    /// Bundle the required collaborators
    pub fn new(
        decryptor: Arc<dyn KeyDecryptor>,
        address_book: Arc<dyn AddressBook>,
        balance: Arc<dyn BalanceState>,
        probe: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self {
            decryptor,
            address_book,
            balance,
            probe,
            hardware: None,
        }
    }

    /// Attach a hardware signing bridge
    pub fn with_hardware_bridge(mut self, bridge: Arc<dyn HardwareBridge>) -> Self {
        self.hardware = Some(bridge);
        self
    }
}
