//! NEP-2 passphrase-protected private keys
//!
//! Envelope: base58check(`0x01 0x42 0xE0 || address_hash[4] || encrypted[32]`).
//! The scrypt output is split in two halves: the first is XORed into the key,
//! the second keys AES-256 (ECB, two blocks) over the XORed key.

use crate::address::Address;
use crate::keys::{PrivateKey, PRIVATE_KEY_LENGTH};
use crate::{Error, Result};
use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use neon_params::kdf::NEP2_DERIVED_KEY_LENGTH;
use neon_params::{Network, ScryptParams};
use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroizing;

/// Encoded NEP-2 key length in characters
pub const NEP2_ENCODED_LENGTH: usize = 58;

const NEP2_PREFIX: [u8; 2] = [0x01, 0x42];
const NEP2_FLAG: u8 = 0xe0;
const ADDRESS_HASH_LENGTH: usize = 4;
const NEP2_PAYLOAD_LENGTH: usize = 3 + ADDRESS_HASH_LENGTH + PRIVATE_KEY_LENGTH;
const AES_BLOCK_LENGTH: usize = 16;

/// Decoded NEP-2 envelope
struct Envelope {
    address_hash: [u8; ADDRESS_HASH_LENGTH],
    encrypted: [u8; PRIVATE_KEY_LENGTH],
}

fn decode_envelope(encrypted: &str) -> Result<Envelope> {
    if encrypted.len() != NEP2_ENCODED_LENGTH {
        return Err(Error::InvalidEncryptedKey(format!(
            "expected {} characters, got {}",
            NEP2_ENCODED_LENGTH,
            encrypted.len()
        )));
    }

    let payload = bs58::decode(encrypted)
        .with_check(None)
        .into_vec()
        .map_err(|e| Error::InvalidEncryptedKey(format!("base58check decode failed: {e}")))?;

    if payload.len() != NEP2_PAYLOAD_LENGTH {
        return Err(Error::InvalidEncryptedKey("Invalid payload length".to_string()));
    }
    if payload[..2] != NEP2_PREFIX || payload[2] != NEP2_FLAG {
        return Err(Error::InvalidEncryptedKey("Invalid NEP-2 prefix".to_string()));
    }

    let mut address_hash = [0u8; ADDRESS_HASH_LENGTH];
    address_hash.copy_from_slice(&payload[3..3 + ADDRESS_HASH_LENGTH]);
    let mut encrypted = [0u8; PRIVATE_KEY_LENGTH];
    encrypted.copy_from_slice(&payload[3 + ADDRESS_HASH_LENGTH..]);

    Ok(Envelope {
        address_hash,
        encrypted,
    })
}

/// First four bytes of SHA256(SHA256(address))
fn address_hash(address: &Address) -> [u8; ADDRESS_HASH_LENGTH] {
    let digest = Sha256::digest(Sha256::digest(address.as_str().as_bytes()));
    let mut out = [0u8; ADDRESS_HASH_LENGTH];
    out.copy_from_slice(&digest[..ADDRESS_HASH_LENGTH]);
    out
}

fn derive_key(
    passphrase: &str,
    salt: &[u8],
    params: &ScryptParams,
) -> Result<Zeroizing<[u8; NEP2_DERIVED_KEY_LENGTH]>> {
    params.validate()?;
    let scrypt_params = scrypt::Params::new(params.log_n, params.r, params.p, NEP2_DERIVED_KEY_LENGTH)
        .map_err(|e| Error::KeyDerivation(format!("scrypt parameters rejected: {e}")))?;

    let mut derived = Zeroizing::new([0u8; NEP2_DERIVED_KEY_LENGTH]);
    scrypt::scrypt(passphrase.as_bytes(), salt, &scrypt_params, derived.as_mut_slice())
        .map_err(|e| Error::KeyDerivation(format!("scrypt failed: {e}")))?;
    Ok(derived)
}

fn xor_in_place(target: &mut [u8], mask: &[u8]) {
    for (byte, m) in target.iter_mut().zip(mask) {
        *byte ^= m;
    }
}

/// Check whether `encrypted` is a well-formed NEP-2 string
///
/// Only the envelope is checked; whether a passphrase opens it is not.
pub fn is_valid_nep2(encrypted: &str) -> bool {
    decode_envelope(encrypted).is_ok()
}

/// Encrypt a private key with a passphrase
pub fn encrypt(
    key: &PrivateKey,
    passphrase: &str,
    params: &ScryptParams,
    network: &Network,
) -> Result<String> {
    let address = Address::from_public_key(&key.public_key(), network);
    let salt = address_hash(&address);
    let derived = derive_key(passphrase, &salt, params)?;

    let mut block = Zeroizing::new(*key.to_bytes());
    xor_in_place(block.as_mut_slice(), &derived[..PRIVATE_KEY_LENGTH]);

    let cipher = Aes256::new(GenericArray::from_slice(&derived[PRIVATE_KEY_LENGTH..]));
    for chunk in block.chunks_exact_mut(AES_BLOCK_LENGTH) {
        cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
    }

    let mut payload = Vec::with_capacity(NEP2_PAYLOAD_LENGTH);
    payload.extend_from_slice(&NEP2_PREFIX);
    payload.push(NEP2_FLAG);
    payload.extend_from_slice(&salt);
    payload.extend_from_slice(block.as_slice());

    Ok(bs58::encode(payload).with_check().into_string())
}

/// Decrypt a NEP-2 key
///
/// Fails with [`Error::InvalidEncryptedKey`] when the envelope is malformed
/// and with [`Error::Decryption`] when the passphrase does not open it.
pub fn decrypt(
    encrypted: &str,
    passphrase: &str,
    params: &ScryptParams,
    network: &Network,
) -> Result<PrivateKey> {
    let envelope = decode_envelope(encrypted)?;
    let derived = derive_key(passphrase, &envelope.address_hash, params)?;

    let mut block = Zeroizing::new(envelope.encrypted);
    let cipher = Aes256::new(GenericArray::from_slice(&derived[PRIVATE_KEY_LENGTH..]));
    for chunk in block.chunks_exact_mut(AES_BLOCK_LENGTH) {
        cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
    }
    xor_in_place(block.as_mut_slice(), &derived[..PRIVATE_KEY_LENGTH]);

    let key = PrivateKey::from_bytes(block.as_slice())
        .map_err(|_| Error::Decryption("Wrong passphrase".to_string()))?;

    let address = Address::from_public_key(&key.public_key(), network);
    if address_hash(&address) != envelope.address_hash {
        debug!("NEP-2 address hash mismatch");
        return Err(Error::Decryption("Wrong passphrase".to_string()));
    }

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: ScryptParams = ScryptParams {
        log_n: 8,
        r: 8,
        p: 1,
    };

    #[test]
    fn test_envelope_shape() {
        let network = Network::mainnet();
        let key = PrivateKey::generate();
        let encrypted = encrypt(&key, "city of zion", &FAST, &network).unwrap();

        assert_eq!(encrypted.len(), NEP2_ENCODED_LENGTH);
        assert!(encrypted.starts_with("6P"));
        assert!(is_valid_nep2(&encrypted));
    }

    #[test]
    fn test_decrypt_recovers_key() {
        let network = Network::mainnet();
        let key = PrivateKey::generate();
        let encrypted = encrypt(&key, "city of zion", &FAST, &network).unwrap();

        let decrypted = decrypt(&encrypted, "city of zion", &FAST, &network).unwrap();
        assert_eq!(decrypted, key);
    }

    #[test]
    fn test_wrong_passphrase_is_decryption_error() {
        let network = Network::mainnet();
        let key = PrivateKey::generate();
        let encrypted = encrypt(&key, "city of zion", &FAST, &network).unwrap();

        let err = decrypt(&encrypted, "city of gotham", &FAST, &network).unwrap_err();
        assert!(matches!(err, Error::Decryption(_)), "{err:?}");
    }

    #[test]
    fn test_malformed_envelope_is_format_error() {
        let network = Network::mainnet();
        let err = decrypt("6PYnotreallyakey", "city of zion", &FAST, &network).unwrap_err();
        assert!(matches!(err, Error::InvalidEncryptedKey(_)), "{err:?}");

        // A valid WIF has a valid checksum but not the NEP-2 prefix
        let wif = PrivateKey::generate().to_wif(&network);
        assert!(!is_valid_nep2(&wif));
    }

    #[test]
    fn test_known_encrypted_key() {
        let network = Network::mainnet();
        let encrypted = "6PYVPVe1fQznphjbUxXP9KZJqPMVnVwCx5s5pr5axRJ8uHkMtZg97eT5kL";

        let key =
            decrypt(encrypted, "TestingOneTwoThree", &ScryptParams::NEP2, &network).unwrap();
        assert_eq!(
            key.to_wif(&network).as_str(),
            "L44B5gGEpqEDRS9vVPz7QT35jcBG2r3CZwSwQ4fCewXAhAhqGVpP"
        );

        let reencrypted =
            encrypt(&key, "TestingOneTwoThree", &ScryptParams::NEP2, &network).unwrap();
        assert_eq!(reencrypted, encrypted);
    }

    #[test]
    fn test_standard_strength_params() {
        let network = Network::mainnet();
        let key = PrivateKey::generate();
        let encrypted = encrypt(&key, "TestingOneTwoThree", &ScryptParams::NEP2, &network).unwrap();
        let decrypted =
            decrypt(&encrypted, "TestingOneTwoThree", &ScryptParams::NEP2, &network).unwrap();
        assert_eq!(decrypted, key);
    }
}
