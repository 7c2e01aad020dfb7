//! Address derivation and validation
//!
//! An address is the base58check encoding of `address_version || script_hash`,
//! where the script hash is RIPEMD160(SHA256(verification script)).

use crate::keys::PublicKey;
use crate::{Error, Result};
use neon_params::Network;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use std::fmt;

/// Script hash length in bytes
pub const SCRIPT_HASH_LENGTH: usize = 20;

/// Encoded address length in characters
pub const ADDRESS_LENGTH: usize = 34;

const PUSHBYTES33: u8 = 0x21;
const CHECKSIG: u8 = 0xac;

/// Hash160 of a verification script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScriptHash([u8; SCRIPT_HASH_LENGTH]);

impl ScriptHash {
    /// Hash an arbitrary verification script
    pub fn from_script(script: &[u8]) -> Self {
        let sha = Sha256::digest(script);
        let ripemd = Ripemd160::digest(sha);
        let mut out = [0u8; SCRIPT_HASH_LENGTH];
        out.copy_from_slice(&ripemd);
        Self(out)
    }

    /// Script hash of the single-signature contract for `public_key`
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        Self::from_script(&verification_script(public_key))
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; SCRIPT_HASH_LENGTH] {
        &self.0
    }
}

impl fmt::Display for ScriptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Displayed big-endian, as block explorers show it
        let mut reversed = self.0;
        reversed.reverse();
        write!(f, "{}", hex::encode(reversed))
    }
}

/// Single-signature verification script: PUSHBYTES33 <pubkey> CHECKSIG
pub fn verification_script(public_key: &PublicKey) -> Vec<u8> {
    let mut script = Vec::with_capacity(35);
    script.push(PUSHBYTES33);
    script.extend_from_slice(&public_key.to_encoded());
    script.push(CHECKSIG);
    script
}

/// Account address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    encoded: String,
    script_hash: ScriptHash,
}

impl Address {
    /// Encode a script hash for the given network
    pub fn from_script_hash(script_hash: ScriptHash, network: &Network) -> Self {
        let mut payload = Vec::with_capacity(1 + SCRIPT_HASH_LENGTH);
        payload.push(network.address_version);
        payload.extend_from_slice(script_hash.as_bytes());
        let encoded = bs58::encode(payload).with_check().into_string();
        Self {
            encoded,
            script_hash,
        }
    }

    /// Address of the single-signature contract for `public_key`
    pub fn from_public_key(public_key: &PublicKey, network: &Network) -> Self {
        Self::from_script_hash(ScriptHash::from_public_key(public_key), network)
    }

    /// Decode and validate an address string
    pub fn decode(address: &str, network: &Network) -> Result<Self> {
        if address.len() != ADDRESS_LENGTH {
            return Err(Error::InvalidAddress("Invalid address length".to_string()));
        }

        let payload = bs58::decode(address)
            .with_check(None)
            .into_vec()
            .map_err(|e| Error::InvalidAddress(format!("base58check decode failed: {e}")))?;

        if payload.len() != 1 + SCRIPT_HASH_LENGTH {
            return Err(Error::InvalidAddress("Invalid address payload".to_string()));
        }
        if payload[0] != network.address_version {
            return Err(Error::InvalidAddress(format!(
                "Invalid address version 0x{:02x}",
                payload[0]
            )));
        }

        let mut hash = [0u8; SCRIPT_HASH_LENGTH];
        hash.copy_from_slice(&payload[1..]);
        Ok(Self {
            encoded: address.to_string(),
            script_hash: ScriptHash(hash),
        })
    }

    /// Encoded address string
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// Underlying script hash
    pub fn script_hash(&self) -> ScriptHash {
        self.script_hash
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

/// Check whether `address` is a valid address on `network`
pub fn is_valid_address(address: &str, network: &Network) -> bool {
    Address::decode(address, network).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::PrivateKey;

    #[test]
    fn test_address_shape() {
        let network = Network::mainnet();
        let public_key = PrivateKey::generate().public_key();
        let address = Address::from_public_key(&public_key, &network);

        assert_eq!(address.as_str().len(), ADDRESS_LENGTH);
        assert!(address.as_str().starts_with('A'));
    }

    #[test]
    fn test_decode_roundtrip_preserves_script_hash() {
        let network = Network::mainnet();
        let public_key = PrivateKey::generate().public_key();
        let address = Address::from_public_key(&public_key, &network);

        let decoded = Address::decode(address.as_str(), &network).unwrap();
        assert_eq!(decoded, address);
        assert_eq!(decoded.script_hash(), ScriptHash::from_public_key(&public_key));
    }

    #[test]
    fn test_verification_script_layout() {
        let public_key = PrivateKey::generate().public_key();
        let script = verification_script(&public_key);
        assert_eq!(script.len(), 35);
        assert_eq!(script[0], 0x21);
        assert_eq!(script[34], 0xac);
        assert_eq!(&script[1..34], &public_key.to_encoded());
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        let network = Network::mainnet();
        assert!(!is_valid_address("", &network));
        assert!(!is_valid_address("not-an-address", &network));
        // Right length, but '0' is outside the base58 alphabet
        assert!(!is_valid_address(&format!("A{}", "0".repeat(33)), &network));
    }

    #[test]
    fn test_rejects_wrong_version() {
        let network = Network::mainnet();
        let script_hash = ScriptHash::from_script(b"script");
        let foreign = Network {
            address_version: 0x35,
            ..Network::mainnet()
        };
        let address = Address::from_script_hash(script_hash, &foreign);
        assert!(!is_valid_address(address.as_str(), &network));
    }
}
