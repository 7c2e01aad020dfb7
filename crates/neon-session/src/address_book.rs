//! JSON wallet file acting as the address book
//!
//! Accounts are keyed by address. An encrypted-key login upgrades the file:
//! the account is added with its encrypted key, or an existing key-less entry
//! gains one. Re-upgrading with the same key changes nothing.

use crate::collaborators::AddressBook;
use crate::{Error, Result};
use async_trait::async_trait;
use neon_core::{Account, PrivateKey};
use neon_params::{Network, ScryptParams};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Wallet file format version
pub const WALLET_VERSION: &str = "1.0";

/// Maximum label length
pub const MAX_LABEL_LENGTH: usize = 100;

/// One account in the wallet file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAccount {
    /// Account address
    pub address: String,
    /// Display label
    pub label: Option<String>,
    /// Default account flag
    #[serde(default)]
    pub is_default: bool,
    /// NEP-2 encrypted key, absent for watch entries
    pub key: Option<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

impl WalletAccount {
    fn new(address: String, label: Option<String>, key: Option<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            address,
            label,
            is_default: false,
            key,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WalletFile {
    name: Option<String>,
    version: String,
    scrypt: ScryptParams,
    #[serde(default)]
    accounts: Vec<WalletAccount>,
}

impl WalletFile {
    fn empty(scrypt: ScryptParams) -> Self {
        Self {
            name: None,
            version: WALLET_VERSION.to_string(),
            scrypt,
            accounts: Vec::new(),
        }
    }
}

/// Result of an upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// A new account was added
    Added,
    /// An existing entry received a new encrypted key
    KeyUpdated,
    /// The entry already held this key
    Unchanged,
}

/// Address book persisted as a JSON wallet file
#[derive(Debug)]
pub struct Nep6AddressBook {
    path: PathBuf,
    network: Network,
    scrypt: ScryptParams,
    write_lock: Mutex<()>,
}

impl Nep6AddressBook {
    /// Open the wallet at `path`; the file is created on first write
    pub fn open(path: impl Into<PathBuf>, network: Network, scrypt: ScryptParams) -> Self {
        Self {
            path: path.into(),
            network,
            scrypt,
            write_lock: Mutex::new(()),
        }
    }

    /// Wallet file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All accounts in the wallet
    pub async fn accounts(&self) -> Result<Vec<WalletAccount>> {
        Ok(self.read().await?.accounts)
    }

    /// Look up one account by address
    pub async fn get(&self, address: &str) -> Result<Option<WalletAccount>> {
        Ok(self
            .read()
            .await?
            .accounts
            .into_iter()
            .find(|account| account.address == address))
    }

    /// Add a key-less entry
    pub async fn add_watch(&self, address: &str, label: Option<&str>) -> Result<()> {
        if let Some(label) = label {
            if label.chars().count() > MAX_LABEL_LENGTH {
                return Err(Error::Config(format!(
                    "Label exceeds {} characters",
                    MAX_LABEL_LENGTH
                )));
            }
        }

        let _guard = self.write_lock.lock().await;
        let mut wallet = self.read().await?;
        if wallet.accounts.iter().any(|a| a.address == address) {
            debug!("Address {} already in wallet", address);
            return Ok(());
        }
        wallet.accounts.push(WalletAccount::new(
            address.to_string(),
            label.map(str::to_string),
            None,
        ));
        self.write(&wallet).await
    }

    /// Record `key` under its address together with `encrypted_key`
    pub async fn upgrade_account(
        &self,
        encrypted_key: &str,
        key: &PrivateKey,
    ) -> Result<UpgradeOutcome> {
        let address = Account::from_private_key(key.clone(), &self.network)
            .address()
            .to_string();

        let _guard = self.write_lock.lock().await;
        let mut wallet = self.read().await?;

        let outcome = match wallet.accounts.iter_mut().find(|a| a.address == address) {
            Some(existing) if existing.key.as_deref() == Some(encrypted_key) => {
                UpgradeOutcome::Unchanged
            }
            Some(existing) => {
                existing.key = Some(encrypted_key.to_string());
                existing.updated_at = chrono::Utc::now().to_rfc3339();
                UpgradeOutcome::KeyUpdated
            }
            None => {
                let mut account =
                    WalletAccount::new(address.clone(), None, Some(encrypted_key.to_string()));
                account.is_default = wallet.accounts.is_empty();
                wallet.accounts.push(account);
                UpgradeOutcome::Added
            }
        };

        if outcome != UpgradeOutcome::Unchanged {
            self.write(&wallet).await?;
        }
        info!("Address book upgrade for {}: {:?}", address, outcome);
        Ok(outcome)
    }

    async fn read(&self) -> Result<WalletFile> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(WalletFile::empty(self.scrypt))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    async fn write(&self, wallet: &WalletFile) -> Result<()> {
        let json = serde_json::to_string_pretty(wallet)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl AddressBook for Nep6AddressBook {
    async fn upgrade(&self, encrypted_key: &str, key: &PrivateKey) -> anyhow::Result<()> {
        self.upgrade_account(encrypted_key, key).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(dir: &tempfile::TempDir) -> Nep6AddressBook {
        Nep6AddressBook::open(
            dir.path().join("wallet.json"),
            Network::mainnet(),
            ScryptParams::NEP2,
        )
    }

    #[tokio::test]
    async fn test_upgrade_adds_account() {
        let dir = tempfile::tempdir().unwrap();
        let book = book(&dir);
        let key = PrivateKey::generate();
        let address = Account::from_private_key(key.clone(), &Network::mainnet())
            .address()
            .to_string();

        let outcome = book.upgrade_account("6Pencrypted", &key).await.unwrap();
        assert_eq!(outcome, UpgradeOutcome::Added);

        let entry = book.get(&address).await.unwrap().unwrap();
        assert_eq!(entry.key.as_deref(), Some("6Pencrypted"));
        assert!(entry.is_default);
    }

    #[tokio::test]
    async fn test_upgrade_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let book = book(&dir);
        let key = PrivateKey::generate();

        book.upgrade_account("6Pencrypted", &key).await.unwrap();
        let outcome = book.upgrade_account("6Pencrypted", &key).await.unwrap();

        assert_eq!(outcome, UpgradeOutcome::Unchanged);
        assert_eq!(book.accounts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upgrade_fills_watch_entry() {
        let dir = tempfile::tempdir().unwrap();
        let book = book(&dir);
        let key = PrivateKey::generate();
        let address = Account::from_private_key(key.clone(), &Network::mainnet())
            .address()
            .to_string();

        book.add_watch(&address, Some("cold storage")).await.unwrap();
        let outcome = book.upgrade_account("6Pencrypted", &key).await.unwrap();
        assert_eq!(outcome, UpgradeOutcome::KeyUpdated);

        let entry = book.get(&address).await.unwrap().unwrap();
        assert_eq!(entry.label.as_deref(), Some("cold storage"));
        assert_eq!(entry.key.as_deref(), Some("6Pencrypted"));
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(book(&dir).accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let book = book(&dir);
        std::fs::write(book.path(), "{ not json").unwrap();

        let key = PrivateKey::generate();
        let err = book.upgrade_account("6Pencrypted", &key).await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[tokio::test]
    async fn test_rejects_long_label() {
        let dir = tempfile::tempdir().unwrap();
        let label = "x".repeat(MAX_LABEL_LENGTH + 1);
        assert!(book(&dir).add_watch("AddressA", Some(&label)).await.is_err());
    }
}
