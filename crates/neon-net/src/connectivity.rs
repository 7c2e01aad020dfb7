//! Connectivity probe
//!
//! A probe is one DNS A lookup of a well-known hostname. Every failure,
//! including a timeout, reads as "offline"; there is no retry and no caching.

use crate::dns::DnsResolver;
use crate::settings::ProbeSettings;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Answers "does this machine have internet connectivity right now"
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Run a single probe. Never fails.
    async fn has_internet_connectivity(&self) -> bool;
}

/// Probe backed by a DNS A lookup
#[derive(Debug, Clone)]
pub struct DnsConnectivityProbe {
    resolver: DnsResolver,
    hostname: String,
    timeout: Duration,
}

impl DnsConnectivityProbe {
    /// Create a probe for `hostname`
    pub fn new(resolver: DnsResolver, hostname: impl Into<String>, timeout: Duration) -> Self {
        Self {
            resolver,
            hostname: hostname.into(),
            timeout,
        }
    }

    /// Create a probe from persisted settings
    pub fn from_settings(settings: &ProbeSettings) -> Self {
        Self::new(
            DnsResolver::new(settings.to_dns_config()),
            settings.hostname.clone(),
            settings.timeout(),
        )
    }

    /// Hostname being probed
    pub fn hostname(&self) -> &str {
        &self.hostname
    }
}

#[async_trait]
impl ConnectivityProbe for DnsConnectivityProbe {
    async fn has_internet_connectivity(&self) -> bool {
        match tokio::time::timeout(self.timeout, self.resolver.resolve_ipv4(&self.hostname)).await
        {
            Ok(Ok(addrs)) => {
                debug!("Connectivity probe resolved {} to {:?}", self.hostname, addrs);
                true
            }
            Ok(Err(e)) => {
                warn!("Connectivity probe failed for {}: {}", self.hostname, e);
                false
            }
            Err(_) => {
                warn!(
                    "Connectivity probe for {} timed out after {:?}",
                    self.hostname, self.timeout
                );
                false
            }
        }
    }
}

/// Probe with a fixed answer, for offline tooling and tests
#[derive(Debug, Clone, Copy)]
pub struct AssumeConnectivity(pub bool);

#[async_trait]
impl ConnectivityProbe for AssumeConnectivity {
    async fn has_internet_connectivity(&self) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_assume_connectivity() {
        assert!(AssumeConnectivity(true).has_internet_connectivity().await);
        assert!(!AssumeConnectivity(false).has_internet_connectivity().await);
    }

    #[test]
    fn test_from_settings_uses_hostname() {
        let settings = ProbeSettings {
            hostname: "example.org".to_string(),
            ..ProbeSettings::default()
        };
        let probe = DnsConnectivityProbe::from_settings(&settings);
        assert_eq!(probe.hostname(), "example.org");
        assert_eq!(probe.timeout, settings.timeout());
    }
}
