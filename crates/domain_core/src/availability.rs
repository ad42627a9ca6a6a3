//! Domain availability checks.
//!
//! Availability is decided by an ordered chain of strategies, each consulted
//! only when the previous one was inconclusive:
//!
//! 1. DNS sweep: any resolvable record means the domain is registered.
//! 2. WHOIS lookup against a JSON WHOIS API.
//! 3. Name-shape heuristics (well-known brands, dictionary words, short
//!    names in popular TLDs).
//!
//! Every strategy failure degrades to the next step; only a domain that
//! cannot even be split into name and TLD yields an undetermined result.

use crate::doh::{DohClient, RecordType};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

/// Default WHOIS JSON API endpoint.
pub const DEFAULT_WHOIS_ENDPOINT: &str = "https://whoisjson.com/api/v1/whois";

/// Brand names that are never available regardless of TLD.
const POPULAR_DOMAINS: [&str; 25] = [
    "google",
    "facebook",
    "amazon",
    "apple",
    "microsoft",
    "twitter",
    "instagram",
    "youtube",
    "netflix",
    "linkedin",
    "github",
    "reddit",
    "wikipedia",
    "yahoo",
    "ebay",
    "paypal",
    "adobe",
    "spotify",
    "tiktok",
    "whatsapp",
    "zoom",
    "slack",
    "dropbox",
    "airbnb",
    "uber",
];

/// Common English words; single-word domains built from these are assumed
/// taken or premium in the big TLDs.
const COMMON_WORDS: [&str; 64] = [
    "about", "above", "across", "act", "active", "activity", "add", "afraid", "after", "again",
    "age", "agree", "air", "all", "alone", "along", "always", "amount", "angry", "answer", "any",
    "area", "arrive", "art", "ask", "attack", "base", "beautiful", "begin", "best", "better",
    "blue", "body", "book", "bring", "build", "business", "buy", "call", "care", "carry",
    "change", "clean", "clear", "close", "cloud", "cold", "come", "cook", "cool", "count",
    "cover", "cross", "dance", "dark", "deal", "deep", "design", "dream", "drive", "earth",
    "easy", "end", "energy",
];

/// A DNS record survey across the common record types plus the
/// `_canister-id` TXT marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsSweep {
    pub has_records: bool,
    pub has_web_records: bool,
    pub has_icp_configuration: bool,
    pub records_found: Map<String, Value>,
    pub icp_compatible: bool,
}

/// Registration metadata extracted from the WHOIS API response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WhoisRecord {
    #[serde(default)]
    pub registered: bool,
    #[serde(default)]
    pub registrar: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub expires: Option<String>,
}

/// WHOIS fields surfaced to API clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisData {
    pub registrar: String,
    pub creation_date: String,
    pub expiry_date: String,
}

impl From<WhoisRecord> for WhoisData {
    fn from(record: WhoisRecord) -> Self {
        let or_unknown = |field: Option<String>| field.unwrap_or_else(|| "Unknown".to_string());
        Self {
            registrar: or_unknown(record.registrar),
            creation_date: or_unknown(record.created),
            expiry_date: or_unknown(record.expires),
        }
    }
}

/// Existing DNS setup reported for a registered, configured domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingConfiguration {
    pub has_icp_configuration: bool,
    pub records: Map<String, Value>,
}

/// Outcome of the availability chain. `available`/`registered` are `None`
/// only when every strategy was inconclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    pub available: Option<bool>,
    pub registered: Option<bool>,
    pub has_configuration: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_check_result: Option<DnsSweep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_configuration: Option<ExistingConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois_data: Option<WhoisData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_links: Option<Value>,
    pub message: String,
}

/// Thin client for the WHOIS JSON API.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    http: reqwest::Client,
    endpoint: String,
}

impl WhoisClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_endpoint(http, DEFAULT_WHOIS_ENDPOINT)
    }

    pub fn with_endpoint(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Fetch registration data for `domain`.
    pub async fn lookup(&self, domain: &str) -> Result<WhoisRecord> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("domain", domain)])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

/// Survey all common record types for `domain`, plus the `_canister-id` TXT
/// record. Lookup failures for individual types are skipped so one broken
/// resolver path never empties the whole sweep.
pub async fn dns_sweep(client: &DohClient, domain: &str) -> DnsSweep {
    let mut results = Map::new();
    let mut has_records = false;
    let mut has_web_records = false;
    let mut has_icp_configuration = false;

    for record_type in RecordType::SWEEP {
        match client.query(domain, record_type).await {
            Ok(response) => {
                if response.has_answers() {
                    has_records = true;
                    if matches!(
                        record_type,
                        RecordType::A | RecordType::Aaaa | RecordType::Cname
                    ) {
                        has_web_records = true;
                        if record_type == RecordType::Cname {
                            let points_to_ic = response
                                .answer
                                .iter()
                                .flatten()
                                .any(|answer| answer.data.contains("icp0.io"));
                            if points_to_ic {
                                has_icp_configuration = true;
                            }
                        }
                    }
                }
                if let Ok(value) = serde_json::to_value(&response) {
                    results.insert(record_type.as_str().to_string(), value);
                }
            }
            Err(e) => warn!("{} sweep failed for {}: {}", record_type.as_str(), domain, e),
        }
    }

    match client
        .query(&format!("_canister-id.{}", domain), RecordType::Txt)
        .await
    {
        Ok(response) => {
            if response.has_answers() {
                has_records = true;
                has_icp_configuration = true;
            }
            if let Ok(value) = serde_json::to_value(&response) {
                results.insert("_canister-id".to_string(), value);
            }
        }
        Err(e) => warn!("_canister-id sweep failed for {}: {}", domain, e),
    }

    DnsSweep {
        has_records,
        has_web_records,
        has_icp_configuration,
        records_found: results,
        // A domain can host an IC canister if it has no conflicting web
        // records or is already pointed at the IC.
        icp_compatible: !has_web_records || has_icp_configuration,
    }
}

/// One-line state summary for a domain profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainSummary {
    pub status: String,
    pub message: String,
}

/// Snapshot of a domain's current footprint: registration evidence, email
/// and web records, and HTTPS reachability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainInfo {
    pub registered: bool,
    pub has_website: bool,
    pub has_email: bool,
    #[serde(rename = "hasSSL")]
    pub has_ssl: bool,
    pub dns_records: Map<String, Value>,
    pub summary: DomainSummary,
}

fn sweep_has_mx(sweep: &DnsSweep) -> bool {
    sweep
        .records_found
        .get(RecordType::Mx.as_str())
        .and_then(|value| value.get("Answer"))
        .and_then(Value::as_array)
        .map(|answers| !answers.is_empty())
        .unwrap_or(false)
}

/// Probe whether the domain serves a website, and whether it does so over
/// HTTPS. Tries HTTPS first and falls back to plain HTTP for the website
/// check.
async fn probe_website(http: &reqwest::Client, domain: &str) -> (bool, bool) {
    match http.head(format!("https://{}", domain)).send().await {
        Ok(response) if response.status().is_success() || response.status().is_redirection() => {
            return (true, true);
        }
        Ok(_) | Err(_) => {}
    }

    let has_website = matches!(
        http.head(format!("http://{}", domain)).send().await,
        Ok(response) if response.status().is_success() || response.status().is_redirection()
    );
    (has_website, false)
}

/// Build the domain footprint used by the configuration endpoint.
pub async fn check_domain_info(client: &DohClient, http: &reqwest::Client, domain: &str) -> DomainInfo {
    let sweep = dns_sweep(client, domain).await;
    let has_email = sweep_has_mx(&sweep);
    let (has_website, has_ssl) = if sweep.has_web_records {
        probe_website(http, domain).await
    } else {
        (false, false)
    };

    let summary = if sweep.has_records {
        DomainSummary {
            status: "active".to_string(),
            message: "Domain is registered and has DNS configuration".to_string(),
        }
    } else {
        DomainSummary {
            status: "available".to_string(),
            message: "Domain appears to be available for registration".to_string(),
        }
    };

    DomainInfo {
        registered: sweep.has_records,
        has_website,
        has_email,
        has_ssl,
        dns_records: sweep.records_found,
        summary,
    }
}

struct HeuristicVerdict {
    available: bool,
    method: &'static str,
    note: &'static str,
}

fn heuristic_check(domain_name: &str, tld: &str) -> HeuristicVerdict {
    let name = domain_name.to_lowercase();
    let tld = tld.to_lowercase();

    if POPULAR_DOMAINS.contains(&name.as_str()) {
        return HeuristicVerdict {
            available: false,
            method: "known-domain",
            note: "This is a well-known brand or service and is not available.",
        };
    }

    if ["com", "net", "org"].contains(&tld.as_str()) && COMMON_WORDS.contains(&name.as_str()) {
        return HeuristicVerdict {
            available: false,
            method: "dictionary-word",
            note: "Single-word dictionary domains in popular TLDs are typically already registered or premium.",
        };
    }

    if ["com", "net", "org", "io", "co", "app"].contains(&tld.as_str()) && name.len() <= 4 {
        return HeuristicVerdict {
            available: false,
            method: "short-domain",
            note: "Short domain names in popular TLDs are typically already registered or premium.",
        };
    }

    HeuristicVerdict {
        available: true,
        method: "heuristic",
        note: "Domain may be available, but please verify with a registrar for final confirmation.",
    }
}

/// Registrar search links for an available domain.
pub fn purchase_links(domain_name: &str, tld: &str) -> Value {
    let domain = format!("{}.{}", domain_name, tld);
    json!({
        "namecheap": format!("https://www.namecheap.com/domains/registration/results/?domain={}", domain),
        "godaddy": format!("https://www.godaddy.com/domainsearch/find?domainToCheck={}", domain),
        "porkbun": format!("https://porkbun.com/checkout/search?q={}", domain),
        "dynadot": format!("https://www.dynadot.com/domain/search?domain={}", domain),
        "gandi": format!("https://www.gandi.net/en/domain/suggest?search={}", domain),
        "cloudflare": format!("https://dash.cloudflare.com/?to=/:account/domains/register/{}", domain),
        "google": format!("https://domains.google.com/registrar/search?searchTerm={}", domain),
        "hover": format!("https://www.hover.com/domains/results?q={}", domain),
    })
}

fn undetermined(message: &str) -> AvailabilityReport {
    AvailabilityReport {
        available: None,
        registered: None,
        has_configuration: false,
        dns_check_result: None,
        existing_configuration: None,
        whois_data: None,
        purchase_links: None,
        message: message.to_string(),
    }
}

/// Run the availability chain for `domain`.
pub async fn check_domain_availability(
    client: &DohClient,
    whois: &WhoisClient,
    domain: &str,
) -> AvailabilityReport {
    debug!("Checking availability of {}", domain);

    let Some((domain_name, tld)) = domain.split_once('.').filter(|(name, tld)| {
        !name.is_empty() && !tld.is_empty()
    }) else {
        return undetermined("Could not determine domain availability.");
    };

    // Strategy 1: any DNS record proves registration.
    let sweep = dns_sweep(client, domain).await;
    if sweep.has_records {
        let existing = ExistingConfiguration {
            has_icp_configuration: sweep.has_icp_configuration,
            records: sweep.records_found.clone(),
        };
        return AvailabilityReport {
            available: Some(false),
            registered: Some(true),
            has_configuration: true,
            dns_check_result: Some(sweep),
            existing_configuration: Some(existing),
            whois_data: None,
            purchase_links: None,
            message: "Domain is registered and has DNS configuration.".to_string(),
        };
    }

    // Strategy 2: WHOIS. A failed lookup falls through to the heuristics.
    match whois.lookup(domain).await {
        Ok(record) if record.registered => {
            return AvailabilityReport {
                available: Some(false),
                registered: Some(true),
                has_configuration: false,
                dns_check_result: None,
                existing_configuration: None,
                whois_data: Some(record.into()),
                purchase_links: None,
                message: "Domain is registered but has no DNS configuration.".to_string(),
            };
        }
        Ok(_) => {
            return AvailabilityReport {
                available: Some(true),
                registered: Some(false),
                has_configuration: false,
                dns_check_result: None,
                existing_configuration: None,
                whois_data: None,
                purchase_links: Some(purchase_links(domain_name, tld)),
                message: "Domain is available for registration.".to_string(),
            };
        }
        Err(e) => warn!("WHOIS lookup failed for {}: {}", domain, e),
    }

    // Strategy 3: name-shape heuristics.
    let verdict = heuristic_check(domain_name, tld);
    if verdict.available {
        AvailabilityReport {
            available: Some(true),
            registered: Some(false),
            has_configuration: false,
            dns_check_result: None,
            existing_configuration: None,
            whois_data: None,
            purchase_links: Some(purchase_links(domain_name, tld)),
            message: "Domain appears to be available for registration.".to_string(),
        }
    } else {
        debug!(
            "Heuristic {} marks {} as unavailable: {}",
            verdict.method, domain, verdict.note
        );
        AvailabilityReport {
            available: Some(false),
            registered: Some(true),
            has_configuration: false,
            dns_check_result: None,
            existing_configuration: None,
            whois_data: None,
            purchase_links: None,
            message: "Domain appears to be registered but has no DNS configuration.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_brand_is_taken() {
        let verdict = heuristic_check("google", "com");
        assert!(!verdict.available);
        assert_eq!(verdict.method, "known-domain");

        // Brand names are taken regardless of TLD.
        let verdict = heuristic_check("Google", "xyz");
        assert_eq!(verdict.method, "known-domain");
    }

    #[test]
    fn test_dictionary_word_in_popular_tld() {
        let verdict = heuristic_check("active", "com");
        assert!(!verdict.available);
        assert_eq!(verdict.method, "dictionary-word");

        // The same word in an uncommon TLD falls through to available.
        let verdict = heuristic_check("active", "xyz");
        assert!(verdict.available);
        assert_eq!(verdict.method, "heuristic");
    }

    #[test]
    fn test_short_name_in_popular_tld() {
        let verdict = heuristic_check("abcd", "io");
        assert!(!verdict.available);
        assert_eq!(verdict.method, "short-domain");

        let verdict = heuristic_check("abcde", "io");
        assert!(verdict.available);
    }

    #[test]
    fn test_random_name_appears_available() {
        let verdict = heuristic_check("xk7qz9", "com");
        assert!(verdict.available);
        assert_eq!(verdict.method, "heuristic");
    }

    #[test]
    fn test_purchase_links_embed_domain() {
        let links = purchase_links("example", "com");
        let namecheap = links["namecheap"].as_str().unwrap();
        assert!(namecheap.contains("example.com"));
        assert!(links["godaddy"].as_str().unwrap().contains("example.com"));
        assert_eq!(links.as_object().unwrap().len(), 8);
    }

    #[test]
    fn test_whois_record_defaults() {
        let record: WhoisRecord = serde_json::from_str("{}").unwrap();
        assert!(!record.registered);

        let data = WhoisData::from(record);
        assert_eq!(data.registrar, "Unknown");
        assert_eq!(data.creation_date, "Unknown");
        assert_eq!(data.expiry_date, "Unknown");
    }

    #[test]
    fn test_whois_record_fields() {
        let record: WhoisRecord = serde_json::from_str(
            r#"{"registered": true, "registrar": "Example Registrar", "created": "2020-01-01", "expires": "2030-01-01"}"#,
        )
        .unwrap();
        assert!(record.registered);

        let data = WhoisData::from(record);
        assert_eq!(data.registrar, "Example Registrar");
        assert_eq!(data.expiry_date, "2030-01-01");
    }

    #[test]
    fn test_sweep_mx_detection() {
        let mut records = Map::new();
        records.insert(
            "MX".to_string(),
            json!({ "Status": 0, "Answer": [{ "name": "example.com.", "type": 15, "TTL": 300, "data": "10 mail.example.com." }] }),
        );
        let sweep = DnsSweep {
            has_records: true,
            has_web_records: false,
            has_icp_configuration: false,
            records_found: records,
            icp_compatible: true,
        };
        assert!(sweep_has_mx(&sweep));

        let empty = DnsSweep {
            has_records: false,
            has_web_records: false,
            has_icp_configuration: false,
            records_found: Map::new(),
            icp_compatible: true,
        };
        assert!(!sweep_has_mx(&empty));
    }

    #[test]
    fn test_domain_info_serialization_keys() {
        let info = DomainInfo {
            registered: true,
            has_website: true,
            has_email: false,
            has_ssl: true,
            dns_records: Map::new(),
            summary: DomainSummary {
                status: "active".to_string(),
                message: "Domain is registered and has DNS configuration".to_string(),
            },
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["hasWebsite"], true);
        assert_eq!(json["hasSSL"], true);
        assert_eq!(json["hasEmail"], false);
        assert_eq!(json["summary"]["status"], "active");
    }

    #[test]
    fn test_report_serialization_keys() {
        let report = undetermined("Could not determine domain availability.");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["available"], Value::Null);
        assert_eq!(json["registered"], Value::Null);
        assert_eq!(json["hasConfiguration"], false);
        assert!(json.get("whoisData").is_none());
        assert!(json.get("purchaseLinks").is_none());
    }
}
