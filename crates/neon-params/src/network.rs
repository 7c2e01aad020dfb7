//! NEO network definitions

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Network type enumeration
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// MainNet
    #[default]
    MainNet,
    /// TestNet
    TestNet,
    /// Private network (local development)
    PrivateNet,
}

impl FromStr for NetworkType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::MainNet),
            "testnet" => Ok(Self::TestNet),
            "privatenet" | "private" => Ok(Self::PrivateNet),
            other => Err(crate::Error::InvalidNetwork(other.to_string())),
        }
    }
}

/// Network configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    /// Network type
    pub network_type: NetworkType,
    /// Human-readable name
    pub name: &'static str,
    /// Network magic used in the P2P handshake
    pub magic: u32,
    /// Leading byte of every base58check address
    pub address_version: u8,
    /// Leading byte of every WIF-encoded private key
    pub wif_version: u8,
}

impl Network {
    /// Get MainNet parameters
    pub const fn mainnet() -> Self {
        Self {
            network_type: NetworkType::MainNet,
            name: "MainNet",
            magic: 7_630_401,
            address_version: 0x17,
            wif_version: 0x80,
        }
    }

    /// Get TestNet parameters
    pub const fn testnet() -> Self {
        Self {
            network_type: NetworkType::TestNet,
            name: "TestNet",
            magic: 1_953_787_457,
            address_version: 0x17,
            wif_version: 0x80,
        }
    }

    /// Get private network parameters
    pub const fn privatenet() -> Self {
        Self {
            network_type: NetworkType::PrivateNet,
            name: "PrivateNet",
            magic: 56_753,
            address_version: 0x17,
            wif_version: 0x80,
        }
    }

    /// Get network by type
    pub const fn from_type(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::MainNet => Self::mainnet(),
            NetworkType::TestNet => Self::testnet(),
            NetworkType::PrivateNet => Self::privatenet(),
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::mainnet()
    }
}
