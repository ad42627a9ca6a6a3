//! DNS resolution over DNS-over-HTTPS JSON APIs
//!
//! This module wraps the Google and Cloudflare DoH JSON endpoints behind a
//! single client with primary/secondary fallback, and provides typed
//! extractors for the raw answer sets.

use crate::{DnsLookupError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default primary DoH endpoint (Google).
pub const DEFAULT_PRIMARY_ENDPOINT: &str = "https://dns.google/resolve";
/// Default secondary DoH endpoint (Cloudflare).
pub const DEFAULT_SECONDARY_ENDPOINT: &str = "https://cloudflare-dns.com/dns-query";

/// DNS record types supported by the lookup adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Soa,
    Txt,
}

impl RecordType {
    /// All record types covered by a comprehensive domain sweep.
    pub const SWEEP: [RecordType; 7] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Mx,
        RecordType::Ns,
        RecordType::Txt,
        RecordType::Soa,
        RecordType::Cname,
    ];

    /// Mnemonic string used in DoH query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
            RecordType::Mx => "MX",
            RecordType::Ns => "NS",
            RecordType::Soa => "SOA",
            RecordType::Txt => "TXT",
        }
    }

    /// IANA resource-record type number.
    pub fn code(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::Ns => 2,
            RecordType::Cname => 5,
            RecordType::Soa => 6,
            RecordType::Mx => 15,
            RecordType::Txt => 16,
            RecordType::Aaaa => 28,
        }
    }
}

impl std::str::FromStr for RecordType {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::Aaaa),
            "CNAME" => Ok(RecordType::Cname),
            "MX" => Ok(RecordType::Mx),
            "NS" => Ok(RecordType::Ns),
            "SOA" => Ok(RecordType::Soa),
            "TXT" => Ok(RecordType::Txt),
            other => Err(crate::CoreError::UnsupportedRecordType(other.to_string())),
        }
    }
}

/// A single answer entry from a DoH JSON response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsAnswer {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub rr_type: u16,
    #[serde(rename = "TTL", default)]
    pub ttl: u32,
    pub data: String,
}

/// Raw DoH JSON response. Only the fields the analyzers need are modeled;
/// `answer` is absent when the domain has no records of the queried type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DnsResponse {
    #[serde(rename = "Status", default)]
    pub status: i32,
    #[serde(rename = "Answer", skip_serializing_if = "Option::is_none")]
    pub answer: Option<Vec<DnsAnswer>>,
}

impl DnsResponse {
    /// Answers matching the wanted numeric record type. Missing `Answer`
    /// yields an empty list, never an error.
    pub fn answers_of_type(&self, rr_type: u16) -> Vec<&DnsAnswer> {
        self.answer
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|a| a.rr_type == rr_type)
            .collect()
    }

    /// Whether any answer of any type is present.
    pub fn has_answers(&self) -> bool {
        self.answer.as_deref().map(|a| !a.is_empty()).unwrap_or(false)
    }

    /// Decoded TXT record payloads, in answer order.
    pub fn txt_values(&self) -> Vec<String> {
        self.answers_of_type(RecordType::Txt.code())
            .into_iter()
            .map(|a| strip_txt_quotes(&a.data).to_string())
            .collect()
    }

    /// First TXT value whose lowercased form starts with `prefix`.
    pub fn find_txt_with_prefix(&self, prefix: &str) -> Option<String> {
        self.txt_values()
            .into_iter()
            .find(|txt| txt.to_lowercase().starts_with(prefix))
    }

    /// Parsed MX answers.
    pub fn mx_records(&self) -> Vec<MxRecord> {
        self.answers_of_type(RecordType::Mx.code())
            .into_iter()
            .filter_map(|a| MxRecord::parse(&a.data))
            .collect()
    }

    /// First CNAME target with the trailing dot stripped.
    pub fn first_cname(&self) -> Option<String> {
        self.answers_of_type(RecordType::Cname.code())
            .first()
            .map(|a| strip_trailing_dot(&a.data).to_string())
    }
}

/// A parsed MX answer (`"<priority> <exchange>"` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxRecord {
    pub priority: u16,
    pub value: String,
}

impl MxRecord {
    /// Split on the first space, parse the priority, strip the trailing dot
    /// from the exchange host.
    pub fn parse(data: &str) -> Option<Self> {
        let (priority, exchange) = data.split_once(' ')?;
        let priority = priority.parse().ok()?;
        Some(Self {
            priority,
            value: strip_trailing_dot(exchange.trim()).to_string(),
        })
    }
}

/// Strip one pair of surrounding double quotes from a TXT payload.
/// Idempotent: a value without surrounding quotes passes through unchanged.
pub fn strip_txt_quotes(data: &str) -> &str {
    data.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(data)
}

/// Strip the trailing dot from an absolute DNS name.
pub fn strip_trailing_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// DNS-over-HTTPS client with primary/secondary endpoint fallback.
///
/// Each call is independent: no caching, no retry backoff. A failure against
/// the primary endpoint is retried once against the secondary before the
/// lookup is reported as failed with both error messages.
#[derive(Debug, Clone)]
pub struct DohClient {
    http: reqwest::Client,
    primary: String,
    secondary: String,
}

impl DohClient {
    /// Create a client against the default Google/Cloudflare endpoints.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_endpoints(timeout, DEFAULT_PRIMARY_ENDPOINT, DEFAULT_SECONDARY_ENDPOINT)
    }

    /// Create a client against custom endpoints (used by configuration and
    /// by tests pointing at a stub resolver).
    pub fn with_endpoints(timeout: Duration, primary: &str, secondary: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::CoreError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            primary: primary.to_string(),
            secondary: secondary.to_string(),
        })
    }

    /// Wrap an existing reqwest client (shares connection pools with other
    /// outbound callers).
    pub fn with_http_client(http: reqwest::Client, primary: &str, secondary: &str) -> Self {
        Self {
            http,
            primary: primary.to_string(),
            secondary: secondary.to_string(),
        }
    }

    /// Query `name` for `record_type`, falling back to the secondary
    /// resolver on any primary failure.
    pub async fn query(&self, name: &str, record_type: RecordType) -> Result<DnsResponse> {
        debug!("DoH query: {} {}", name, record_type.as_str());

        let primary_err = match self.query_endpoint(&self.primary, name, record_type, false).await {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };

        debug!(
            "Primary resolver failed for {} {}: {}, trying secondary",
            name,
            record_type.as_str(),
            primary_err
        );

        match self.query_endpoint(&self.secondary, name, record_type, true).await {
            Ok(response) => Ok(response),
            Err(secondary_err) => {
                warn!(
                    "Both resolvers failed for {} {}: primary: {}, secondary: {}",
                    name,
                    record_type.as_str(),
                    primary_err,
                    secondary_err
                );
                Err(DnsLookupError {
                    name: name.to_string(),
                    record_type: record_type.as_str().to_string(),
                    primary: primary_err,
                    secondary: secondary_err,
                }
                .into())
            }
        }
    }

    async fn query_endpoint(
        &self,
        endpoint: &str,
        name: &str,
        record_type: RecordType,
        dns_json_accept: bool,
    ) -> std::result::Result<DnsResponse, String> {
        let mut request = self
            .http
            .get(endpoint)
            .query(&[("name", name), ("type", record_type.as_str())]);

        // Cloudflare's endpoint rejects requests without this Accept header.
        if dns_json_accept {
            request = request.header(reqwest::header::ACCEPT, "application/dns-json");
        }

        let response = request.send().await.map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("DNS API error: {}", response.status()));
        }

        response.json::<DnsResponse>().await.map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn answer(rr_type: u16, data: &str) -> DnsAnswer {
        DnsAnswer {
            name: "example.com.".to_string(),
            rr_type,
            ttl: 300,
            data: data.to_string(),
        }
    }

    fn response(answers: Vec<DnsAnswer>) -> DnsResponse {
        DnsResponse {
            status: 0,
            answer: Some(answers),
        }
    }

    #[test]
    fn test_record_type_codes() {
        assert_eq!(RecordType::A.code(), 1);
        assert_eq!(RecordType::Ns.code(), 2);
        assert_eq!(RecordType::Cname.code(), 5);
        assert_eq!(RecordType::Soa.code(), 6);
        assert_eq!(RecordType::Mx.code(), 15);
        assert_eq!(RecordType::Txt.code(), 16);
        assert_eq!(RecordType::Aaaa.code(), 28);
    }

    #[test]
    fn test_record_type_parsing() {
        assert_eq!("txt".parse::<RecordType>().unwrap(), RecordType::Txt);
        assert_eq!("MX".parse::<RecordType>().unwrap(), RecordType::Mx);
        assert!("SRV".parse::<RecordType>().is_err());
    }

    #[test]
    fn test_txt_quote_stripping_is_idempotent() {
        assert_eq!(strip_txt_quotes("\"v=spf1 ~all\""), "v=spf1 ~all");
        // Second pass finds no surrounding quotes and is a no-op.
        assert_eq!(strip_txt_quotes("v=spf1 ~all"), "v=spf1 ~all");
        // Embedded quotes survive.
        assert_eq!(strip_txt_quotes("\"a \"quoted\" word\""), "a \"quoted\" word");
        assert_eq!(strip_txt_quotes("\""), "\"");
    }

    #[test]
    fn test_mx_parsing() {
        let mx = MxRecord::parse("10 aspmx.l.google.com.").unwrap();
        assert_eq!(mx.priority, 10);
        assert_eq!(mx.value, "aspmx.l.google.com");

        assert_eq!(MxRecord::parse("not-an-mx"), None);
        assert_eq!(MxRecord::parse("x mail.example.com"), None);
    }

    #[test]
    fn test_missing_answer_yields_empty() {
        let resp = DnsResponse::default();
        assert!(!resp.has_answers());
        assert!(resp.answers_of_type(16).is_empty());
        assert!(resp.txt_values().is_empty());
        assert!(resp.mx_records().is_empty());
        assert_eq!(resp.first_cname(), None);
    }

    #[test]
    fn test_type_filtering() {
        let resp = response(vec![
            answer(16, "\"v=spf1 -all\""),
            answer(15, "10 mail.example.com."),
            answer(16, "\"some-verification=abc\""),
        ]);

        assert_eq!(resp.answers_of_type(16).len(), 2);
        assert_eq!(
            resp.txt_values(),
            vec!["v=spf1 -all".to_string(), "some-verification=abc".to_string()]
        );
        assert_eq!(
            resp.find_txt_with_prefix("v=spf1"),
            Some("v=spf1 -all".to_string())
        );
        assert_eq!(resp.find_txt_with_prefix("v=dmarc1"), None);
    }

    #[test]
    fn test_first_cname_strips_trailing_dot() {
        let resp = response(vec![answer(5, "aaaaa-bbbbb-ccccc-ddddd-eee.icp0.io.")]);
        assert_eq!(
            resp.first_cname(),
            Some("aaaaa-bbbbb-ccccc-ddddd-eee.icp0.io".to_string())
        );
    }

    #[test]
    fn test_response_deserialization() {
        let raw = r#"{"Status":0,"TC":false,"Answer":[{"name":"example.com.","type":16,"TTL":300,"data":"\"v=spf1 ~all\""}]}"#;
        let resp: DnsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.status, 0);
        assert_eq!(resp.txt_values(), vec!["v=spf1 ~all".to_string()]);
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_live_lookup_with_fallback() {
        let client = DohClient::new(Duration::from_secs(5)).unwrap();
        let resp = client.query("google.com", RecordType::A).await.unwrap();
        assert!(resp.has_answers());
    }
}
