//! Single-record-type DNS lookup route
//!
//! Looks up one record type for a domain and returns a typed projection of
//! the answers. Beyond the plain record types, four pseudo-types are
//! supported: `spf` (TXT records starting with `v=spf1`), `dmarc` (TXT at
//! `_dmarc.<domain>`), `dkim` (a scan over common selectors), and `all`
//! (every supported record type in one response).

use crate::{
    api_handler::{require_json, sanitize_domain, ApiError, ApiResult},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use domain_core::doh::{strip_trailing_dot, DnsResponse, DohClient, MxRecord, RecordType};
use domain_core::email_security::COMMON_DKIM_SELECTORS;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

fn default_lookup_type() -> String {
    "mx".to_string()
}

/// Request body for POST /api/dns-lookup
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsLookupRequest {
    pub domain: String,
    #[serde(default = "default_lookup_type")]
    pub lookup_type: String,
}

/// Response body for POST /api/dns-lookup
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsLookupResponse {
    pub domain: String,
    pub lookup_type: String,
    pub records: Vec<Value>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /api/dns-lookup
#[instrument(skip_all, fields(domain, lookup_type, request_id))]
pub async fn dns_lookup_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DnsLookupRequest>, JsonRejection>,
) -> ApiResult<DnsLookupResponse> {
    let request_id = Uuid::new_v4().to_string();
    tracing::Span::current().record("request_id", request_id.as_str());

    let request = require_json(payload)?;
    let domain = sanitize_domain(&request.domain)?;
    let lookup_type = request.lookup_type.trim().to_lowercase();
    tracing::Span::current().record("domain", domain.as_str());
    tracing::Span::current().record("lookup_type", lookup_type.as_str());

    info!("DNS lookup for {} ({})", domain, lookup_type);

    if lookup_type == "dkim" {
        return Ok(Json(dkim_lookup(&state.doh, &domain).await));
    }
    if lookup_type == "all" {
        return Ok(Json(all_lookup(&state.doh, &domain).await));
    }

    // SPF and DMARC ride on TXT lookups; DMARC additionally moves to the
    // _dmarc subdomain.
    let (query_name, record_type) = match lookup_type.as_str() {
        "spf" => (domain.clone(), RecordType::Txt),
        "dmarc" => (format!("_dmarc.{}", domain), RecordType::Txt),
        other => {
            let record_type: RecordType = other.parse().map_err(|_| {
                ApiError::InvalidRequest(format!("Unsupported DNS record type: {}", other))
            })?;
            (domain.clone(), record_type)
        }
    };
    let reported_type = lookup_type.to_uppercase();

    let response = match state.doh.query(&query_name, record_type).await {
        Ok(response) => response,
        Err(e) => {
            warn!("DNS lookup failed for {} ({}): {}", query_name, reported_type, e);
            return Ok(Json(DnsLookupResponse {
                domain,
                lookup_type: reported_type,
                records: Vec::new(),
                status: "error".to_string(),
                message: Some(e.to_string()),
            }));
        }
    };

    let records = project_records(&response, &lookup_type);
    debug!("{} {} records for {}", records.len(), reported_type, query_name);

    let message = records
        .is_empty()
        .then(|| format!("No {} records found", reported_type));
    Ok(Json(DnsLookupResponse {
        domain,
        lookup_type: reported_type,
        records,
        status: "success".to_string(),
        message,
    }))
}

/// Scan the common DKIM selectors and collect every `v=DKIM1` TXT record.
async fn dkim_lookup(client: &DohClient, domain: &str) -> DnsLookupResponse {
    let mut records = Vec::new();
    for selector in COMMON_DKIM_SELECTORS {
        let selector_domain = format!("{}._domainkey.{}", selector, domain);
        match client.query(&selector_domain, RecordType::Txt).await {
            Ok(response) => {
                for value in response.txt_values() {
                    if value.to_lowercase().contains("v=dkim1") {
                        records.push(json!({
                            "selector": selector,
                            "value": value,
                            "type": "DKIM",
                        }));
                    }
                }
            }
            Err(e) => debug!("No DKIM record for selector {}: {}", selector, e),
        }
    }

    let message = records
        .is_empty()
        .then(|| "No DKIM records found with common selectors".to_string());
    DnsLookupResponse {
        domain: domain.to_string(),
        lookup_type: "DKIM".to_string(),
        records,
        status: "success".to_string(),
        message,
    }
}

/// Query every supported record type and return the typed projections in
/// one response. Failed per-type lookups are skipped, so one broken type
/// never empties the whole answer set.
async fn all_lookup(client: &DohClient, domain: &str) -> DnsLookupResponse {
    let mut records = Vec::new();
    for record_type in RecordType::SWEEP {
        match client.query(domain, record_type).await {
            Ok(response) => {
                records.extend(project_records(&response, &record_type.as_str().to_lowercase()));
            }
            Err(e) => warn!(
                "{} lookup failed for {} during full sweep: {}",
                record_type.as_str(),
                domain,
                e
            ),
        }
    }

    let message = records.is_empty().then(|| "No DNS records found".to_string());
    DnsLookupResponse {
        domain: domain.to_string(),
        lookup_type: "ALL".to_string(),
        records,
        status: "success".to_string(),
        message,
    }
}

/// Shape raw answers into the per-type record objects clients expect.
fn project_records(response: &DnsResponse, lookup_type: &str) -> Vec<Value> {
    match lookup_type {
        "a" => response
            .answers_of_type(RecordType::A.code())
            .iter()
            .map(|answer| json!({ "value": answer.data, "type": "A" }))
            .collect(),
        "aaaa" => response
            .answers_of_type(RecordType::Aaaa.code())
            .iter()
            .map(|answer| json!({ "value": answer.data, "type": "AAAA" }))
            .collect(),
        "mx" => response
            .mx_records()
            .iter()
            .map(|MxRecord { priority, value }| {
                json!({ "priority": priority, "value": value, "type": "MX" })
            })
            .collect(),
        "ns" => response
            .answers_of_type(RecordType::Ns.code())
            .iter()
            .map(|answer| json!({ "value": strip_trailing_dot(&answer.data), "type": "NS" }))
            .collect(),
        "txt" => response
            .txt_values()
            .iter()
            .map(|value| json!({ "value": value, "type": "TXT" }))
            .collect(),
        "spf" => response
            .txt_values()
            .iter()
            .filter(|value| value.to_lowercase().starts_with("v=spf1"))
            .map(|value| json!({ "value": value, "type": "SPF" }))
            .collect(),
        "dmarc" => response
            .txt_values()
            .iter()
            .filter(|value| value.to_lowercase().starts_with("v=dmarc1"))
            .map(|value| json!({ "value": value, "type": "DMARC" }))
            .collect(),
        "soa" => response
            .answers_of_type(RecordType::Soa.code())
            .iter()
            .filter_map(|answer| parse_soa(&answer.data))
            .collect(),
        _ => response
            .answer
            .iter()
            .flatten()
            .map(|answer| {
                json!({ "type": lookup_type.to_uppercase(), "value": strip_trailing_dot(&answer.data) })
            })
            .collect(),
    }
}

/// Split an SOA record's seven space-separated fields into named values.
fn parse_soa(data: &str) -> Option<Value> {
    let parts: Vec<&str> = data.split_whitespace().collect();
    if parts.len() < 7 {
        return None;
    }
    Some(json!({
        "type": "SOA",
        "primary": strip_trailing_dot(parts[0]),
        "admin": strip_trailing_dot(parts[1]),
        "serial": parts[2].parse::<u64>().ok()?,
        "refresh": parts[3].parse::<u64>().ok()?,
        "retry": parts[4].parse::<u64>().ok()?,
        "expire": parts[5].parse::<u64>().ok()?,
        "ttl": parts[6].parse::<u64>().ok()?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_core::doh::DnsAnswer;
    use pretty_assertions::assert_eq;

    fn response_with(answers: Vec<DnsAnswer>) -> DnsResponse {
        DnsResponse {
            status: 0,
            answer: Some(answers),
        }
    }

    fn answer(rr_type: u16, data: &str) -> DnsAnswer {
        DnsAnswer {
            name: "example.com.".to_string(),
            rr_type,
            ttl: 300,
            data: data.to_string(),
        }
    }

    #[test]
    fn test_mx_projection() {
        let response = response_with(vec![
            answer(15, "10 mail.example.com."),
            answer(15, "20 backup.example.com."),
        ]);
        let records = project_records(&response, "mx");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["priority"], 10);
        assert_eq!(records[0]["value"], "mail.example.com");
        assert_eq!(records[0]["type"], "MX");
    }

    #[test]
    fn test_spf_projection_filters_other_txt() {
        let response = response_with(vec![
            answer(16, "\"v=spf1 include:_spf.google.com ~all\""),
            answer(16, "\"google-site-verification=abc\""),
        ]);
        let records = project_records(&response, "spf");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["value"], "v=spf1 include:_spf.google.com ~all");
        assert_eq!(records[0]["type"], "SPF");
    }

    #[test]
    fn test_soa_projection() {
        let response = response_with(vec![answer(
            6,
            "ns1.example.com. admin.example.com. 2024010101 7200 3600 1209600 300",
        )]);
        let records = project_records(&response, "soa");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["primary"], "ns1.example.com");
        assert_eq!(records[0]["admin"], "admin.example.com");
        assert_eq!(records[0]["serial"], 2024010101u64);
        assert_eq!(records[0]["ttl"], 300);
    }

    #[test]
    fn test_cname_falls_back_to_generic_projection() {
        let response = response_with(vec![answer(5, "target.example.com.")]);
        let records = project_records(&response, "cname");
        assert_eq!(records[0]["type"], "CNAME");
        assert_eq!(records[0]["value"], "target.example.com");
    }

    #[test]
    fn test_malformed_soa_is_skipped() {
        let response = response_with(vec![answer(6, "too short")]);
        assert!(project_records(&response, "soa").is_empty());
    }

    #[tokio::test]
    async fn test_all_lookup_degrades_to_empty() {
        // Both resolvers unreachable: every per-type query fails and is
        // skipped, leaving a well-formed empty response.
        let client = DohClient::with_endpoints(
            std::time::Duration::from_millis(50),
            "http://127.0.0.1:1/resolve",
            "http://127.0.0.1:1/dns-query",
        )
        .unwrap();

        let response = all_lookup(&client, "example.com").await;
        assert_eq!(response.lookup_type, "ALL");
        assert_eq!(response.status, "success");
        assert!(response.records.is_empty());
        assert_eq!(response.message, Some("No DNS records found".to_string()));
    }
}
