//! NEO wallet key core
//!
//! This crate implements the key-management primitives the session layer
//! relies on: private/public key parsing, WIF encoding, address derivation
//! and NEP-2 passphrase encryption.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod address;
pub mod error;
pub mod keys;
pub mod nep2;

pub use account::Account;
pub use address::{is_valid_address, Address, ScriptHash};
pub use error::{Error, ErrorCategory, Result};
pub use keys::{
    encode_public_key, is_valid_private_key, is_valid_public_key, is_valid_wif,
    is_valid_wif_or_private_key, PrivateKey, PublicKey,
};
pub use nep2::is_valid_nep2;
