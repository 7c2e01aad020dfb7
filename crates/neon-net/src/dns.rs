//! DNS resolution via the system resolver or DoH.

use crate::{Error, Result};
use std::net::{IpAddr, Ipv4Addr};
use tracing::{debug, info, warn};

/// DNS resolver provider
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DnsProvider {
    /// System resolver
    #[default]
    System,
    /// Cloudflare DoH (1.1.1.1)
    CloudflareDoH,
    /// Quad9 DoH (9.9.9.9)
    Quad9DoH,
    /// Google DoH (8.8.8.8)
    GoogleDoH,
    /// Custom DoH endpoint
    CustomDoH(String),
}

impl DnsProvider {
    /// Get DoH endpoint URL
    pub fn doh_url(&self) -> Option<&str> {
        match self {
            Self::CloudflareDoH => Some("https://cloudflare-dns.com/dns-query"),
            Self::Quad9DoH => Some("https://dns.quad9.net/dns-query"),
            Self::GoogleDoH => Some("https://dns.google/dns-query"),
            Self::CustomDoH(url) => Some(url.as_str()),
            Self::System => None,
        }
    }

    /// Get provider name for display
    pub fn name(&self) -> &str {
        match self {
            Self::System => "System",
            Self::CloudflareDoH => "Cloudflare (1.1.1.1)",
            Self::Quad9DoH => "Quad9 (9.9.9.9)",
            Self::GoogleDoH => "Google (8.8.8.8)",
            Self::CustomDoH(_) => "Custom DoH",
        }
    }
}

/// DNS resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DnsConfig {
    /// DNS provider
    pub provider: DnsProvider,
}

/// DNS resolver
#[derive(Debug, Clone, Default)]
pub struct DnsResolver {
    config: DnsConfig,
}

impl DnsResolver {
    /// Create new DNS resolver
    pub fn new(config: DnsConfig) -> Self {
        info!("Creating DNS resolver: {}", config.provider.name());
        Self { config }
    }

    /// Resolve hostname to IPv4 addresses only
    ///
    /// Fails when the lookup errors or yields no A records.
    pub async fn resolve_ipv4(&self, hostname: &str) -> Result<Vec<Ipv4Addr>> {
        debug!(
            "Resolving hostname: {} via {}",
            hostname,
            self.config.provider.name()
        );

        let addrs = match self.config.provider.doh_url() {
            Some(url) => self.resolve_doh_a(url, hostname).await?,
            None => self.resolve_system(hostname).await?,
        };

        let v4: Vec<Ipv4Addr> = addrs
            .into_iter()
            .filter_map(|addr| match addr {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .collect();

        if v4.is_empty() {
            return Err(Error::Dns(format!("No A records for {}", hostname)));
        }
        Ok(v4)
    }

    async fn resolve_doh_a(&self, doh_url: &str, hostname: &str) -> Result<Vec<IpAddr>> {
        debug!("DoH resolution: {} via {}", hostname, doh_url);

        let response = reqwest::Client::new()
            .get(doh_url)
            .query(&[("name", hostname), ("type", "A")])
            .header("Accept", "application/dns-json")
            .send()
            .await
            .map_err(|e| Error::Network(format!("DoH query failed: {}", e)))?;

        if !response.status().is_success() {
            warn!(
                "DoH query failed with status {} for {}",
                response.status(),
                hostname
            );
            return Err(Error::Dns(format!(
                "DoH endpoint returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read DoH response: {}", e)))?;

        Ok(parse_doh_response(&body))
    }

    async fn resolve_system(&self, hostname: &str) -> Result<Vec<IpAddr>> {
        let addrs: Vec<IpAddr> = tokio::net::lookup_host(format!("{}:443", hostname))
            .await
            .map_err(|e| Error::Dns(format!("DNS resolution failed: {}", e)))?
            .map(|addr| addr.ip())
            .collect();

        debug!("Resolved {} to {:?}", hostname, addrs);
        Ok(addrs)
    }
}

#[derive(serde::Deserialize)]
struct DohResponse {
    #[serde(rename = "Answer")]
    answer: Option<Vec<DohAnswer>>,
}

#[derive(serde::Deserialize)]
struct DohAnswer {
    data: String,
}

/// Extract IP addresses from a `application/dns-json` body
///
/// Answers that are not addresses (CNAME targets) are skipped.
fn parse_doh_response(body: &str) -> Vec<IpAddr> {
    let Ok(response) = serde_json::from_str::<DohResponse>(body) else {
        return Vec::new();
    };

    response
        .answer
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| entry.data.parse::<IpAddr>().ok())
        .collect()
}
