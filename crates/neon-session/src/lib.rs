//! Wallet account sessions
//!
//! Four login methods (private key, watch-only address, NEP-2 encrypted key,
//! hardware device) produce one session shape, held in a store that replaces
//! it atomically. Logout clears it and resets the wallet's balance cache.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod address_book;
pub mod collaborators;
pub mod config;
pub mod decryptor;
pub mod error;
pub mod service;
pub mod session;
pub mod signing;
pub mod store;

pub use address_book::{Nep6AddressBook, UpgradeOutcome, WalletAccount};
pub use collaborators::{AddressBook, BalanceState, Collaborators, NoopAddressBook};
pub use config::SessionConfig;
pub use decryptor::{KeyDecryptor, Nep2Decryptor};
pub use error::{Collaborator, CredentialKind, Error, ErrorCategory, Result};
pub use service::SessionService;
pub use session::{LoginMethod, Session, SessionCredentials, SessionSummary};
pub use signing::{HardwareBridge, SigningDelegate};
pub use store::{SessionReader, SessionState, SessionStore};
