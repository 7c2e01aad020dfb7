//! Login and logout entry points
//!
//! Every login runs validate, derive or decrypt, (address-book upgrade),
//! probe, then commits one complete session. A failure at any step returns
//! before the store is touched, so the previous session survives.

use crate::collaborators::Collaborators;
use crate::config::SessionConfig;
use crate::error::{Collaborator, CredentialKind};
use crate::session::{LoginMethod, Session, SessionCredentials};
use crate::signing::SigningDelegate;
use crate::store::{LoginTicket, SessionReader, SessionState, SessionStore};
use crate::{Error, Result};
use neon_core::{nep2, Account, Address, PrivateKey, PublicKey};
use neon_params::Network;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Session service
pub struct SessionService {
    config: SessionConfig,
    network: Network,
    collaborators: Collaborators,
    store: Arc<SessionStore>,
}

impl SessionService {
    /// Create a service with an empty session
    pub fn new(config: SessionConfig, collaborators: Collaborators) -> Result<Self> {
        config.validate()?;
        let network = config.network();
        info!("Session service ready on {}", network.name);
        Ok(Self {
            config,
            network,
            collaborators,
            store: SessionStore::new(),
        })
    }

    /// Read-only session handle
    pub fn reader(&self) -> SessionReader {
        self.store.reader()
    }

    /// Current session, if any
    pub fn current(&self) -> Option<Arc<Session>> {
        self.reader().current()
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.reader().state()
    }

    /// Network in use
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Log in with a WIF or 64-character hex private key
    pub async fn login_with_key(&self, key: &str) -> Result<Arc<Session>> {
        let ticket = self.store.begin_login();
        debug!("Login attempt {}: private key", ticket.token());

        let key = PrivateKey::parse(key, &self.network)
            .map_err(|e| rejected(CredentialKind::PrivateKey, e))?;
        let credentials = SessionCredentials::PrivateKey {
            wif: key.to_wif(&self.network),
        };
        let account = Account::from_private_key(key, &self.network);

        self.finish(&ticket, &account, LoginMethod::PrivateKey, credentials)
            .await
    }

    /// Log in to an address without key material
    pub async fn login_watch_only(&self, address: &str) -> Result<Arc<Session>> {
        let ticket = self.store.begin_login();
        debug!("Login attempt {}: watch only", ticket.token());

        let address = Address::decode(address.trim(), &self.network)
            .map_err(|e| rejected(CredentialKind::Address, e))?;

        let connected = self.probe().await;
        let session = Session::new(
            address.to_string(),
            LoginMethod::WatchOnly,
            SessionCredentials::WatchOnly,
            connected,
        );
        self.commit(&ticket, session)
    }

    /// Log in with a NEP-2 encrypted key and its passphrase
    ///
    /// The passphrase is checked before the key format and neither check
    /// reaches the decryptor when it fails.
    pub async fn login_with_encrypted_key(
        &self,
        passphrase: &str,
        encrypted_key: &str,
    ) -> Result<Arc<Session>> {
        // Taken before validation: even a rejected attempt supersedes older ones.
        let ticket = self.store.begin_login();
        debug!("Login attempt {}: encrypted key", ticket.token());

        let length = passphrase.chars().count();
        if length < self.config.min_passphrase_length {
            return Err(Error::PassphraseTooShort {
                min: self.config.min_passphrase_length,
                actual: length,
            });
        }

        let encrypted_key = encrypted_key.trim();
        if !nep2::is_valid_nep2(encrypted_key) {
            return Err(Error::invalid(
                CredentialKind::EncryptedKey,
                "not a NEP-2 encrypted key",
            ));
        }

        let key = self
            .collaborators
            .decryptor
            .decrypt(encrypted_key, passphrase)
            .await?;
        let credentials = SessionCredentials::PrivateKey {
            wif: key.to_wif(&self.network),
        };
        let account = Account::from_private_key(key.clone(), &self.network);
        debug!("Decrypted key for {}", account.address());

        self.collaborators
            .address_book
            .upgrade(encrypted_key, &key)
            .await
            .map_err(|e| {
                warn!("Address book upgrade failed: {:#}", e);
                Error::collaborator(Collaborator::AddressBook, format!("{:#}", e))
            })?;

        self.finish(&ticket, &account, LoginMethod::EncryptedKey, credentials)
            .await
    }

    /// Log in with a hardware device public key and account index
    pub async fn login_with_hardware_device(
        &self,
        public_key: &str,
        account_index: u32,
    ) -> Result<Arc<Session>> {
        let ticket = self.store.begin_login();
        debug!(
            "Login attempt {}: hardware account {}",
            ticket.token(),
            account_index
        );

        let decoded = PublicKey::from_hex(public_key)
            .map_err(|e| rejected(CredentialKind::PublicKey, e))?;
        let bridge = self.collaborators.hardware.clone().ok_or_else(|| {
            Error::collaborator(Collaborator::HardwareBridge, "no hardware bridge configured")
        })?;

        let account = Account::from_public_key(decoded, &self.network);
        let credentials = SessionCredentials::Hardware {
            public_key: public_key.to_string(),
            signer: SigningDelegate::new(account_index, bridge),
        };

        self.finish(&ticket, &account, LoginMethod::Hardware, credentials)
            .await
    }

    /// Clear the session and reset the balance cache
    ///
    /// Always succeeds, with or without a session, and invalidates any login
    /// still in flight.
    pub fn logout(&self) {
        self.store.clear();
        self.collaborators.balance.reset();
        info!("Logged out");
    }

    async fn finish(
        &self,
        ticket: &LoginTicket,
        account: &Account,
        method: LoginMethod,
        credentials: SessionCredentials,
    ) -> Result<Arc<Session>> {
        let connected = self.probe().await;
        let session = Session::new(
            account.address().to_string(),
            method,
            credentials,
            connected,
        );
        self.commit(ticket, session)
    }

    async fn probe(&self) -> bool {
        let connected = self.collaborators.probe.has_internet_connectivity().await;
        if !connected {
            warn!("No internet connectivity detected");
        }
        connected
    }

    fn commit(&self, ticket: &LoginTicket, session: Session) -> Result<Arc<Session>> {
        let method = session.method();
        let session = self.store.commit(ticket, session)?;
        info!("Logged in ({}) as {}", method.name(), session.address());
        Ok(session)
    }
}

fn rejected(kind: CredentialKind, err: neon_core::Error) -> Error {
    debug!("Rejected {} ({}): {}", kind, err.category(), err);
    Error::invalid(kind, err)
}
