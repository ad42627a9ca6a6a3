//! # domain_core
//!
//! Domain and DNS analysis library behind the RECORDSS.AI toolkit: domain
//! availability checks, DNS record inspection, email authentication
//! analysis (SPF/DKIM/DMARC/MTA-STS/TLS-RPT), Internet Computer custom-domain
//! verification, and per-registrar DNS configuration templates.
//!
//! ## Features
//!
//! - **DNS-over-HTTPS lookups** with Google→Cloudflare resolver fallback
//! - **Email security scoring** from a fixed weighted rubric
//! - **Availability heuristics** chaining DNS evidence, WHOIS, and name lists
//! - **ICP custom-domain checklist** against the official DNS setup guide
//! - **Registrar-dialect templates** (Namecheap/Cloudflare/GoDaddy) rendered
//!   from one internal record-row representation
//! - **Unstoppable Domains checks** for blockchain TLDs (`.crypto`, `.nft`, ...)
//!
//! ## Example
//!
//! ```rust,no_run
//! use domain_core::doh::{DohClient, RecordType};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DohClient::new(Duration::from_secs(5))?;
//!     let report = domain_core::email_security::analyze_email_security(&client, "example.com").await;
//!     println!("score: {}", report.security_score.score);
//!     Ok(())
//! }
//! ```

pub mod availability;
pub mod doh;
pub mod email_security;
pub mod icp;
pub mod templates;
pub mod unstoppable;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome classification for a single analysis or sub-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
    Warning,
    Error,
    Info,
}

/// Human-readable analysis of one mechanism (an SPF record, a DMARC record,
/// the DKIM selector scan, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub status: AnalysisStatus,
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

impl Analysis {
    pub fn new(status: AnalysisStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AnalysisStatus::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(AnalysisStatus::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(AnalysisStatus::Info, message)
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }
}

/// One security mechanism's lookup outcome.
///
/// `exists == false` implies `value` is `None` and the analysis explains the
/// absence; partial data is never reported for a missing mechanism.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityFinding {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub is_from_parent: bool,
    pub analysis: Analysis,
}

impl SecurityFinding {
    /// A mechanism that was found on the domain itself.
    pub fn found(value: String, analysis: Analysis) -> Self {
        Self {
            exists: true,
            value: Some(value),
            is_from_parent: false,
            analysis,
        }
    }

    /// A mechanism inherited from the parent domain of a subdomain.
    pub fn inherited(value: String, analysis: Analysis) -> Self {
        Self {
            exists: true,
            value: Some(value),
            is_from_parent: true,
            analysis,
        }
    }

    /// A mechanism that is absent (or whose lookup failed).
    pub fn missing(analysis: Analysis) -> Self {
        Self {
            exists: false,
            value: None,
            is_from_parent: false,
            analysis,
        }
    }
}

/// Errors produced by the core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    DnsLookup(#[from] DnsLookupError),
    #[error("Unsupported DNS record type: {0}")]
    UnsupportedRecordType(String),
    #[error("Invalid canister ID format: {0}")]
    InvalidCanisterId(String),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

/// Both resolvers failed for a single lookup. Carries both underlying error
/// messages so the caller can see which side broke.
#[derive(Error, Debug)]
#[error("DNS API errors: Google: {primary}, Cloudflare: {secondary}")]
pub struct DnsLookupError {
    pub name: String,
    pub record_type: String,
    pub primary: String,
    pub secondary: String,
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Split a domain into its subdomain relationship: `sub.example.com` has the
/// parent `example.com`; `example.com` is its own parent.
pub fn parent_domain(domain: &str) -> (bool, String) {
    let parts: Vec<&str> = domain.split('.').collect();
    if parts.len() > 2 {
        (true, parts[parts.len() - 2..].join("."))
    } else {
        (false, domain.to_string())
    }
}

/// Strip a leading `www.` label for apex-relative record generation.
pub fn base_domain(domain: &str) -> &str {
    domain.strip_prefix("www.").unwrap_or(domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parent_domain_detection() {
        assert_eq!(parent_domain("example.com"), (false, "example.com".to_string()));
        assert_eq!(parent_domain("sub.example.com"), (true, "example.com".to_string()));
        assert_eq!(parent_domain("a.b.example.co"), (true, "example.co".to_string()));
    }

    #[test]
    fn test_base_domain() {
        assert_eq!(base_domain("www.example.com"), "example.com");
        assert_eq!(base_domain("example.com"), "example.com");
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AnalysisStatus::Warning).unwrap(),
            "\"warning\""
        );
    }

    #[test]
    fn test_finding_invariant() {
        let finding = SecurityFinding::missing(Analysis::warning("No SPF record found"));
        assert!(!finding.exists);
        assert!(finding.value.is_none());

        let json = serde_json::to_value(&finding).unwrap();
        assert!(json.get("value").is_none());
        assert!(json.get("isFromParent").is_none());

        let inherited = SecurityFinding::inherited("v=spf1 ~all".into(), Analysis::info("x"));
        let json = serde_json::to_value(&inherited).unwrap();
        assert_eq!(json["isFromParent"], true);
    }
}
