//! Persistent connectivity probe settings

use crate::dns::{DnsConfig, DnsProvider};
use crate::{Error, Result};
use neon_params::DEFAULT_CONNECTIVITY_HOST;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connectivity probe settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Hostname whose A records are resolved
    pub hostname: String,
    /// DNS provider
    pub provider: StoredDnsProvider,
    /// Custom DoH URL (used when provider is `custom`)
    pub custom_doh_url: Option<String>,
    /// Upper bound on a single probe, in milliseconds
    pub timeout_ms: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_CONNECTIVITY_HOST.to_string(),
            provider: StoredDnsProvider::System,
            custom_doh_url: None,
            timeout_ms: 5_000,
        }
    }
}

impl ProbeSettings {
    /// Probe timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.hostname.trim().is_empty() {
            return Err(Error::Settings("probe hostname is empty".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(Error::Settings("probe timeout must be non-zero".to_string()));
        }
        if self.provider == StoredDnsProvider::Custom {
            match &self.custom_doh_url {
                Some(url) if url.starts_with("https://") => {}
                Some(url) => {
                    return Err(Error::Settings(format!(
                        "custom DoH URL must use https: {}",
                        url
                    )))
                }
                None => {
                    return Err(Error::Settings(
                        "custom DoH provider requires a URL".to_string(),
                    ))
                }
            }
        }
        Ok(())
    }

    /// Resolver configuration for these settings
    pub fn to_dns_config(&self) -> DnsConfig {
        let provider = match self.provider {
            StoredDnsProvider::System => DnsProvider::System,
            StoredDnsProvider::Cloudflare => DnsProvider::CloudflareDoH,
            StoredDnsProvider::Quad9 => DnsProvider::Quad9DoH,
            StoredDnsProvider::Google => DnsProvider::GoogleDoH,
            StoredDnsProvider::Custom => match &self.custom_doh_url {
                Some(url) => DnsProvider::CustomDoH(url.clone()),
                None => DnsProvider::System,
            },
        };
        DnsConfig { provider }
    }
}

/// DNS provider (serializable)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StoredDnsProvider {
    /// System resolver
    #[serde(rename = "system")]
    System,
    /// Cloudflare DoH
    #[serde(rename = "cloudflare")]
    Cloudflare,
    /// Quad9 DoH
    #[serde(rename = "quad9")]
    Quad9,
    /// Google DoH
    #[serde(rename = "google")]
    Google,
    /// Custom DoH
    #[serde(rename = "custom")]
    Custom,
}
