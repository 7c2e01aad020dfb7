//! Key parsing and encoding
//!
//! Private keys are secp256r1 scalars, accepted either as 64 hex characters or
//! as WIF (base58check of `wif_version || key || 0x01`). Public keys are SEC1
//! points and are always re-encoded in compressed form.

use crate::{Error, Result};
use neon_params::Network;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use std::fmt;
use zeroize::Zeroizing;

/// Raw private key length in bytes
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Compressed SEC1 public key length in bytes
pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;

/// Uncompressed SEC1 public key length in bytes
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;

/// WIF payload: version byte, key, compression flag
const WIF_PAYLOAD_LENGTH: usize = 1 + PRIVATE_KEY_LENGTH + 1;
const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// secp256r1 private key
#[derive(Clone)]
pub struct PrivateKey {
    inner: p256::SecretKey,
}

impl PrivateKey {
    /// Create from raw 32-byte scalar
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(Error::InvalidKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_LENGTH,
                bytes.len()
            )));
        }
        let inner = p256::SecretKey::from_bytes(p256::FieldBytes::from_slice(bytes))
            .map_err(|_| Error::InvalidKey("scalar out of range".to_string()))?;
        Ok(Self { inner })
    }

    /// Parse a raw private key given as 64 hex characters
    pub fn from_hex(key: &str) -> Result<Self> {
        if key.len() != PRIVATE_KEY_LENGTH * 2 {
            return Err(Error::InvalidKey("hex key must be 64 characters".to_string()));
        }
        let bytes = Zeroizing::new(
            hex::decode(key).map_err(|_| Error::InvalidKey("Invalid hex encoding".to_string()))?,
        );
        Self::from_bytes(&bytes)
    }

    /// Parse a WIF-encoded private key
    pub fn from_wif(wif: &str, network: &Network) -> Result<Self> {
        let payload = Zeroizing::new(
            bs58::decode(wif)
                .with_check(None)
                .into_vec()
                .map_err(|e| Error::InvalidKey(format!("WIF decode failed: {e}")))?,
        );

        if payload.len() != WIF_PAYLOAD_LENGTH {
            return Err(Error::InvalidKey("Invalid WIF length".to_string()));
        }
        if payload[0] != network.wif_version {
            return Err(Error::InvalidKey(format!(
                "Invalid WIF version byte 0x{:02x}",
                payload[0]
            )));
        }
        if payload[WIF_PAYLOAD_LENGTH - 1] != WIF_COMPRESSED_FLAG {
            return Err(Error::InvalidKey(
                "WIF must encode a compressed key".to_string(),
            ));
        }

        Self::from_bytes(&payload[1..=PRIVATE_KEY_LENGTH])
    }

    /// Parse either a WIF string or a hex private key
    pub fn parse(key: &str, network: &Network) -> Result<Self> {
        let key = key.trim();
        if key.len() == PRIVATE_KEY_LENGTH * 2 {
            Self::from_hex(key)
        } else {
            Self::from_wif(key, network)
        }
    }

    /// Generate a new random key
    pub fn generate() -> Self {
        Self {
            inner: p256::SecretKey::random(&mut OsRng),
        }
    }

    /// Raw scalar bytes
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_LENGTH]> {
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        bytes.copy_from_slice(&self.inner.to_bytes());
        bytes
    }

    /// Hex encoding of the raw scalar
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.to_bytes().as_slice()))
    }

    /// Canonical WIF encoding
    pub fn to_wif(&self, network: &Network) -> Zeroizing<String> {
        let mut payload = Zeroizing::new(Vec::with_capacity(WIF_PAYLOAD_LENGTH));
        payload.push(network.wif_version);
        payload.extend_from_slice(self.to_bytes().as_slice());
        payload.push(WIF_COMPRESSED_FLAG);
        Zeroizing::new(bs58::encode(payload.as_slice()).with_check().into_string())
    }

    /// Derive the public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.public_key(),
        }
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// secp256r1 public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    inner: p256::PublicKey,
}

impl PublicKey {
    /// Decode a SEC1 point (compressed or uncompressed)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COMPRESSED_PUBLIC_KEY_LENGTH
            && bytes.len() != UNCOMPRESSED_PUBLIC_KEY_LENGTH
        {
            return Err(Error::InvalidPublicKey(format!(
                "unexpected length {}",
                bytes.len()
            )));
        }
        let inner = p256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|_| Error::InvalidPublicKey("not a point on secp256r1".to_string()))?;
        Ok(Self { inner })
    }

    /// Decode a hex SEC1 point (compressed or uncompressed)
    pub fn from_hex(key: &str) -> Result<Self> {
        let bytes = hex::decode(key.trim())
            .map_err(|_| Error::InvalidPublicKey("Invalid hex encoding".to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Compressed SEC1 encoding
    pub fn to_encoded(&self) -> [u8; COMPRESSED_PUBLIC_KEY_LENGTH] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_PUBLIC_KEY_LENGTH];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Compressed SEC1 encoding as hex
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_encoded())
    }
}

/// Encode a public key given as hex into its canonical compressed hex form
pub fn encode_public_key(key: &str) -> Result<String> {
    PublicKey::from_hex(key).map(|pk| pk.to_hex())
}

/// Check whether `key` is a valid WIF-encoded private key
pub fn is_valid_wif(key: &str, network: &Network) -> bool {
    PrivateKey::from_wif(key, network).is_ok()
}

/// Check whether `key` is a valid 64-character hex private key
pub fn is_valid_private_key(key: &str) -> bool {
    PrivateKey::from_hex(key).is_ok()
}

/// Check whether `key` is either a valid WIF or a valid hex private key
pub fn is_valid_wif_or_private_key(key: &str, network: &Network) -> bool {
    is_valid_wif(key, network) || is_valid_private_key(key)
}

/// Check whether `key` is a valid hex public key
pub fn is_valid_public_key(key: &str) -> bool {
    PublicKey::from_hex(key).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wif_encoding_shape() {
        let network = Network::mainnet();
        let key = PrivateKey::generate();
        let wif = key.to_wif(&network);
        assert_eq!(wif.len(), 52);
        assert!(wif.starts_with('K') || wif.starts_with('L'));
    }

    #[test]
    fn test_parse_accepts_hex_and_wif() {
        let network = Network::mainnet();
        let key = PrivateKey::generate();

        let from_hex = PrivateKey::parse(&key.to_hex(), &network).unwrap();
        let from_wif = PrivateKey::parse(&key.to_wif(&network), &network).unwrap();

        assert_eq!(from_hex, key);
        assert_eq!(from_wif, key);
    }

    #[test]
    fn test_rejects_zero_scalar() {
        let zero = "0".repeat(64);
        assert!(matches!(PrivateKey::from_hex(&zero), Err(Error::InvalidKey(_))));
        assert!(!is_valid_private_key(&zero));
    }

    #[test]
    fn test_rejects_bad_checksum() {
        let network = Network::mainnet();
        let wif = PrivateKey::generate().to_wif(&network);
        let mut tampered: Vec<char> = wif.chars().collect();
        let last = tampered.len() - 1;
        tampered[last] = if tampered[last] == 'a' { 'b' } else { 'a' };
        let tampered: String = tampered.into_iter().collect();
        assert!(!is_valid_wif(&tampered, &network));
    }

    #[test]
    fn test_predicates_reject_garbage() {
        let network = Network::mainnet();
        for input in ["", "not a key", "0x1234", "zz".repeat(32).as_str()] {
            assert!(!is_valid_wif_or_private_key(input, &network), "{input}");
        }
    }

    #[test]
    fn test_public_key_compression() {
        let key = PrivateKey::generate();
        let compressed = key.public_key().to_hex();
        assert_eq!(compressed.len(), COMPRESSED_PUBLIC_KEY_LENGTH * 2);

        let uncompressed = hex::encode(key.public_key().inner.to_encoded_point(false).as_bytes());
        assert_eq!(encode_public_key(&uncompressed).unwrap(), compressed);
        assert_eq!(encode_public_key(&compressed).unwrap(), compressed);
    }

    #[test]
    fn test_public_key_rejects_invalid_points() {
        assert!(!is_valid_public_key("02"));
        assert!(!is_valid_public_key(&format!("05{}", "11".repeat(32))));
        assert!(!is_valid_public_key("not hex"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = PrivateKey::generate();
        let rendered = format!("{key:?}");
        assert!(!rendered.contains(key.to_hex().as_str()));
    }
}
