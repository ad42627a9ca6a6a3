//! Configuration management for the domain tools API
//!
//! This module handles loading configuration from environment variables
//! and configuration files using the figment crate.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub lookup: LookupConfig,
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Outbound lookup configuration: DoH resolvers, WHOIS API, and the IC
/// dashboard used for canister verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Outbound HTTP timeout in seconds (DoH, WHOIS, website probes)
    pub http_timeout_secs: u64,
    /// Primary DNS-over-HTTPS JSON endpoint
    pub doh_primary: String,
    /// Fallback DNS-over-HTTPS JSON endpoint
    pub doh_secondary: String,
    /// WHOIS JSON API endpoint
    pub whois_endpoint: String,
    /// Internet Computer dashboard endpoint
    pub dashboard_endpoint: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: 10,
            doh_primary: "https://dns.google/resolve".to_string(),
            doh_secondary: "https://cloudflare-dns.com/dns-query".to_string(),
            whois_endpoint: domain_core::availability::DEFAULT_WHOIS_ENDPOINT.to_string(),
            dashboard_endpoint: domain_core::icp::DEFAULT_DASHBOARD_ENDPOINT.to_string(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Enable JSON structured logging
    pub json_logs: bool,
    /// Log level filter
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.observability.json_logs);
    }

    #[test]
    fn test_lookup_config_defaults() {
        let config = LookupConfig::default();
        assert_eq!(config.http_timeout_secs, 10);
        assert_eq!(config.doh_primary, "https://dns.google/resolve");
        assert_eq!(config.doh_secondary, "https://cloudflare-dns.com/dns-query");
        assert!(config.whois_endpoint.contains("whoisjson.com"));
        assert!(config.dashboard_endpoint.contains("dashboard.internetcomputer.org"));
    }
}
