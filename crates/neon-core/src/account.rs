//! Account identity derivation

use crate::address::{Address, ScriptHash};
use crate::keys::{PrivateKey, PublicKey};
use neon_params::Network;
use zeroize::Zeroizing;

/// An account identity: address plus whatever key material the login exposed
#[derive(Debug, Clone)]
pub struct Account {
    address: Address,
    public_key: PublicKey,
    private_key: Option<PrivateKey>,
    network: Network,
}

impl Account {
    /// Derive a full account from a private key
    pub fn from_private_key(private_key: PrivateKey, network: &Network) -> Self {
        let public_key = private_key.public_key();
        let address = Address::from_public_key(&public_key, network);
        Self {
            address,
            public_key,
            private_key: Some(private_key),
            network: network.clone(),
        }
    }

    /// Derive a key-less account from a public key
    pub fn from_public_key(public_key: PublicKey, network: &Network) -> Self {
        let address = Address::from_public_key(&public_key, network);
        Self {
            address,
            public_key,
            private_key: None,
            network: network.clone(),
        }
    }

    /// Account address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Script hash backing the address
    pub fn script_hash(&self) -> ScriptHash {
        self.address.script_hash()
    }

    /// Public key
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Private key, if this account holds one
    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    /// Canonical WIF, if this account holds a private key
    pub fn wif(&self) -> Option<Zeroizing<String>> {
        self.private_key.as_ref().map(|key| key.to_wif(&self.network))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_and_public_derivations_agree() {
        let network = Network::mainnet();
        let key = PrivateKey::generate();

        let full = Account::from_private_key(key.clone(), &network);
        let watch = Account::from_public_key(key.public_key(), &network);

        assert_eq!(full.address(), watch.address());
        assert!(full.wif().is_some());
        assert!(watch.wif().is_none());
        assert!(watch.private_key().is_none());
    }

    #[test]
    fn test_known_account() {
        let network = Network::mainnet();
        let key = PrivateKey::from_hex(
            "7d128a6d096f0c14c3a25a2b0c41cf79661bfcb4a8cc95aaaea28bde4d732344",
        )
        .unwrap();
        let account = Account::from_private_key(key, &network);

        assert_eq!(
            account.wif().unwrap().as_str(),
            "L1QqQJnpBwbsPGAuutuzPTac8piqvbR1HRjrY5qHup48TBCBFe4g"
        );
        assert_eq!(
            account.address().as_str(),
            "ALq7AWrhAueN6mJNqk6FHJjnsEoPRytLdW"
        );

        let watch = Account::from_public_key(account.public_key().clone(), &network);
        assert_eq!(watch.address(), account.address());
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let network = Network::mainnet();
        let key = PrivateKey::generate();

        let first = Account::from_private_key(key.clone(), &network);
        let second = Account::from_private_key(key, &network);

        assert_eq!(first.address(), second.address());
        assert_eq!(first.wif(), second.wif());
    }
}
