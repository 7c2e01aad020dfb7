//! Network reachability for the wallet session layer
//!
//! Provides DNS resolution (system resolver or DoH) and the single-shot
//! connectivity probe attached to every login.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod connectivity;
pub mod dns;
pub mod error;
pub mod settings;

pub use connectivity::{AssumeConnectivity, ConnectivityProbe, DnsConnectivityProbe};
pub use dns::{DnsConfig, DnsProvider, DnsResolver};
pub use error::{Error, Result};
pub use settings::{ProbeSettings, StoredDnsProvider};
