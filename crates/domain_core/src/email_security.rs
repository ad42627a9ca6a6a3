//! Email authentication analysis: SPF, DKIM, DMARC, MTA-STS, and TLS-RPT
//!
//! The analyzers are pure string functions; `analyze_email_security` drives
//! the full lookup pipeline over DNS-over-HTTPS, with every sub-check
//! degrading to a "not found" finding on lookup failure instead of aborting
//! the whole analysis.

use crate::doh::{DohClient, MxRecord, RecordType};
use crate::templates::{self, EmailSecurityPresence};
use crate::{parent_domain, Analysis, AnalysisStatus, SecurityFinding};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// DKIM selectors probed when no selector is known.
pub const COMMON_DKIM_SELECTORS: [&str; 5] = ["default", "google", "selector1", "selector2", "k1"];

/// SPF mechanisms that consume one of RFC 7208's 10 permitted DNS lookups.
/// Only top-level keywords are counted; nested includes are not resolved, so
/// this is a deliberate undercount that flags records close to the limit.
const SPF_LOOKUP_MECHANISMS: [&str; 5] = ["include:", "a:", "mx:", "ptr:", "exists:"];

/// Analyze an SPF record's `all` mechanism and lookup-mechanism count.
pub fn analyze_spf(spf_text: &str) -> Analysis {
    let text = spf_text.to_lowercase();
    let mut analysis = Analysis::success("SPF record found");

    if text.contains(" -all") {
        analysis.details.push("Uses -all (strict mode)".to_string());
    } else if text.contains(" ~all") {
        analysis.details.push("Uses ~all (soft fail mode)".to_string());
    } else if text.contains(" ?all") {
        analysis.status = AnalysisStatus::Warning;
        analysis
            .details
            .push("Uses ?all (neutral mode) - consider using ~all or -all instead".to_string());
    } else if text.contains(" +all") {
        analysis.status = AnalysisStatus::Error;
        analysis
            .details
            .push("Uses +all (allow all) - this is insecure and allows email spoofing".to_string());
    } else {
        analysis.status = AnalysisStatus::Warning;
        analysis
            .details
            .push("No all mechanism found - SPF record should end with ~all or -all".to_string());
    }

    let lookup_mechanisms: usize = SPF_LOOKUP_MECHANISMS
        .iter()
        .map(|mechanism| text.matches(mechanism).count())
        .sum();
    if lookup_mechanisms > 8 {
        analysis.status = AnalysisStatus::Warning;
        analysis.details.push(format!(
            "Contains {} lookup mechanisms - approaching the limit of 10",
            lookup_mechanisms
        ));
    }

    analysis
}

/// Parse a DMARC record's `tag=value` pairs into a map with lowercased keys.
fn parse_dmarc_tags(record: &str) -> HashMap<String, String> {
    let mut tags = HashMap::new();
    for part in record.split(';') {
        if let Some((key, value)) = part.trim().split_once('=') {
            tags.insert(key.trim().to_lowercase(), value.trim().to_string());
        }
    }
    tags
}

/// Analyze a DMARC record's policy, subdomain policy, reporting, and rollout
/// percentage.
pub fn analyze_dmarc(dmarc_text: &str) -> Analysis {
    let mut analysis = Analysis::success("DMARC record found");
    let tags = parse_dmarc_tags(dmarc_text);

    match tags.get("p").map(|p| p.to_lowercase()).as_deref() {
        Some("reject") => {
            analysis
                .details
                .push("Policy: reject (strongest protection)".to_string());
        }
        Some("quarantine") => {
            analysis
                .details
                .push("Policy: quarantine (medium protection)".to_string());
        }
        Some("none") => {
            analysis.status = AnalysisStatus::Warning;
            analysis
                .details
                .push("Policy: none (monitoring only) - consider using quarantine or reject".to_string());
        }
        _ => {
            analysis.status = AnalysisStatus::Warning;
            analysis.details.push("No policy found or invalid policy".to_string());
        }
    }

    if let Some(sub_policy) = tags.get("sp") {
        analysis
            .details
            .push(format!("Subdomain policy: {}", sub_policy.to_lowercase()));
    }

    if tags.contains_key("rua") {
        analysis.details.push("Aggregate reports configured".to_string());
    } else {
        analysis.details.push("No aggregate reporting configured".to_string());
    }

    if tags.contains_key("ruf") {
        analysis.details.push("Forensic reports configured".to_string());
    }

    if let Some(pct) = tags.get("pct").and_then(|pct| pct.parse::<u32>().ok()) {
        if pct < 100 {
            analysis.status = AnalysisStatus::Warning;
            analysis.details.push(format!(
                "Partial implementation: {}% - consider increasing to 100%",
                pct
            ));
        } else {
            analysis.details.push("Applied to 100% of messages".to_string());
        }
    }

    analysis
}

/// Presence flags feeding the weighted score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecuritySignals {
    pub spf: bool,
    pub dmarc: bool,
    pub dkim: bool,
    pub mta_sts: bool,
    pub tls_rpt: bool,
}

/// Qualitative rating derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityRating {
    Poor,
    Fair,
    Good,
}

/// Weighted 0-100 email security score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityScore {
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub rating: SecurityRating,
}

/// Weighted sum over the five mechanisms: SPF 25, DMARC 25, DKIM 25,
/// MTA-STS 15, TLS-RPT 10. Total function: every input combination yields a
/// score in `[0, 100]`.
pub fn calculate_security_score(signals: SecuritySignals) -> SecurityScore {
    let mut score = 0u32;
    let total = 100u32;

    if signals.spf {
        score += 25;
    }
    if signals.dmarc {
        score += 25;
    }
    if signals.dkim {
        score += 25;
    }
    if signals.mta_sts {
        score += 15;
    }
    if signals.tls_rpt {
        score += 10;
    }

    let rating = if score >= 75 {
        SecurityRating::Good
    } else if score >= 50 {
        SecurityRating::Fair
    } else {
        SecurityRating::Poor
    };

    SecurityScore {
        score,
        total,
        percentage: score * 100 / total,
        rating,
    }
}

/// DMARC finding with the extra subdomain-applicability note used when the
/// record is inherited from a parent domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmarcFinding {
    #[serde(flatten)]
    pub finding: SecurityFinding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<String>,
}

/// One discovered DKIM record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DkimRecordFinding {
    pub selector: String,
    pub exists: bool,
    pub value: String,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub is_from_parent: bool,
}

/// Aggregate DKIM scan result over the common selectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DkimSummary {
    pub found: bool,
    pub records: Vec<DkimRecordFinding>,
    pub analysis: Analysis,
}

/// Full `/api/email-security` analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSecurityReport {
    pub domain: String,
    pub is_subdomain: bool,
    pub parent_domain: Option<String>,
    pub timestamp: String,
    pub has_mx_records: bool,
    pub is_using_parent_mx: bool,
    pub has_address_records: bool,
    pub mx_records: Vec<MxRecord>,
    pub security_score: SecurityScore,
    pub spf: SecurityFinding,
    pub dmarc: DmarcFinding,
    pub dkim: DkimSummary,
    pub mta_sts: SecurityFinding,
    pub tls_rpt: SecurityFinding,
    pub dns_config: serde_json::Value,
    pub status: String,
}

/// First TXT record at `name` whose lowercased value starts with `prefix`.
/// Lookup failures surface as `None` (with a warning) so one broken
/// mechanism never fails the whole report.
async fn prefixed_txt(client: &DohClient, name: &str, prefix: &str) -> Option<String> {
    match client.query(name, RecordType::Txt).await {
        Ok(response) => response.find_txt_with_prefix(prefix),
        Err(e) => {
            warn!("TXT lookup failed for {}: {}", name, e);
            None
        }
    }
}

async fn lookup_mechanism(
    client: &DohClient,
    domain: &str,
    parent: Option<&str>,
    record_name: impl Fn(&str) -> String,
    prefix: &str,
    found_message: &str,
    missing_message: &str,
) -> SecurityFinding {
    if let Some(value) = prefixed_txt(client, &record_name(domain), prefix).await {
        return SecurityFinding::found(value.clone(), Analysis::success(found_message));
    }

    if let Some(parent) = parent {
        if let Some(value) = prefixed_txt(client, &record_name(parent), prefix).await {
            let analysis = Analysis::info(format!("Using parent domain's {}", found_message.trim_end_matches(" found")));
            return SecurityFinding::inherited(value, analysis);
        }
    }

    SecurityFinding::missing(Analysis::warning(missing_message))
}

async fn scan_dkim_selectors(client: &DohClient, domain: &str, from_parent: bool) -> Vec<DkimRecordFinding> {
    let mut records = Vec::new();
    for selector in COMMON_DKIM_SELECTORS {
        let name = format!("{}._domainkey.{}", selector, domain);
        match client.query(&name, RecordType::Txt).await {
            Ok(response) => {
                for value in response.txt_values() {
                    if value.to_lowercase().contains("v=dkim1") {
                        records.push(DkimRecordFinding {
                            selector: selector.to_string(),
                            exists: true,
                            value,
                            is_from_parent: from_parent,
                        });
                    }
                }
            }
            Err(e) => {
                // One unreachable selector must not abort the scan.
                debug!("DKIM lookup failed for selector {} on {}: {}", selector, domain, e);
            }
        }
    }
    records
}

/// Run the complete email security analysis for `domain`.
///
/// Issues MX, SPF, DMARC, DKIM, MTA-STS, TLS-RPT, and address-record lookups
/// (with parent-domain fallbacks when `domain` is a subdomain), scores the
/// result, and attaches recommended-record templates for every missing
/// mechanism.
pub async fn analyze_email_security(client: &DohClient, domain: &str) -> EmailSecurityReport {
    debug!("Analyzing email security for {}", domain);

    let (is_subdomain, parent) = parent_domain(domain);
    let parent_ref = is_subdomain.then_some(parent.as_str());

    // MX records, falling back to the parent domain for subdomains.
    let mut mx_records = Vec::new();
    let mut is_using_parent_mx = false;
    match client.query(domain, RecordType::Mx).await {
        Ok(response) => mx_records = response.mx_records(),
        Err(e) => warn!("MX lookup failed for {}: {}", domain, e),
    }
    if mx_records.is_empty() {
        if let Some(parent) = parent_ref {
            if let Ok(response) = client.query(parent, RecordType::Mx).await {
                let parent_mx = response.mx_records();
                if !parent_mx.is_empty() {
                    is_using_parent_mx = true;
                    mx_records = parent_mx;
                }
            }
        }
    }
    let has_mx_records = !mx_records.is_empty();

    // SPF at the domain apex.
    let mut spf = match prefixed_txt(client, domain, "v=spf1").await {
        Some(value) => {
            let analysis = analyze_spf(&value);
            SecurityFinding::found(value, analysis)
        }
        None => SecurityFinding::missing(Analysis::warning("No SPF record found")),
    };
    if !spf.exists {
        if let Some(parent) = parent_ref {
            if let Some(value) = prefixed_txt(client, parent, "v=spf1").await {
                let mut analysis = Analysis::info("Using parent domain's SPF record");
                analysis.details = analyze_spf(&value).details;
                spf = SecurityFinding::inherited(value, analysis);
            }
        }
    }

    // DMARC at _dmarc.<domain>.
    let mut dmarc = match prefixed_txt(client, &format!("_dmarc.{}", domain), "v=dmarc1").await {
        Some(value) => {
            let analysis = analyze_dmarc(&value);
            DmarcFinding {
                finding: SecurityFinding::found(value, analysis),
                applies_to: None,
            }
        }
        None => DmarcFinding {
            finding: SecurityFinding::missing(Analysis::warning("No DMARC record found")),
            applies_to: None,
        },
    };
    if !dmarc.finding.exists {
        if let Some(parent) = parent_ref {
            if let Some(value) = prefixed_txt(client, &format!("_dmarc.{}", parent), "v=dmarc1").await {
                let applies_to = if parse_dmarc_tags(&value).contains_key("sp") {
                    "Explicit subdomain policy"
                } else {
                    "Inherited from parent"
                };
                let mut analysis = Analysis::info("Using parent domain's DMARC record");
                analysis.details = analyze_dmarc(&value).details;
                dmarc = DmarcFinding {
                    finding: SecurityFinding::inherited(value, analysis),
                    applies_to: Some(applies_to.to_string()),
                };
            }
        }
    }

    // DKIM selector scan, then the parent domain if nothing was found.
    let mut dkim_records = scan_dkim_selectors(client, domain, false).await;
    if dkim_records.is_empty() {
        if let Some(parent) = parent_ref {
            dkim_records = scan_dkim_selectors(client, parent, true).await;
        }
    }
    let dkim_found = !dkim_records.is_empty();
    let dkim = DkimSummary {
        found: dkim_found,
        analysis: if dkim_found {
            Analysis::success(format!("Found {} DKIM record(s)", dkim_records.len()))
        } else {
            Analysis::warning("No DKIM records found with common selectors")
        },
        records: dkim_records,
    };

    // MTA-STS and TLS-RPT policies.
    let mta_sts = lookup_mechanism(
        client,
        domain,
        parent_ref,
        |d| format!("_mta-sts.{}", d),
        "v=sts1",
        "MTA-STS record found",
        "No MTA-STS record found",
    )
    .await;
    let tls_rpt = lookup_mechanism(
        client,
        domain,
        parent_ref,
        |d| format!("_smtp._tls.{}", d),
        "v=tlsrpt",
        "TLS-RPT record found",
        "No TLS-RPT record found",
    )
    .await;

    // A/AAAA presence marks the domain as actively hosted.
    let mut has_address_records = false;
    match client.query(domain, RecordType::A).await {
        Ok(response) if response.has_answers() => has_address_records = true,
        _ => {
            if let Ok(response) = client.query(domain, RecordType::Aaaa).await {
                has_address_records = response.has_answers();
            }
        }
    }

    let security_score = calculate_security_score(SecuritySignals {
        spf: spf.exists,
        dmarc: dmarc.finding.exists,
        dkim: dkim.found,
        mta_sts: mta_sts.exists,
        tls_rpt: tls_rpt.exists,
    });

    let dns_config = templates::email_security_config(
        domain,
        &EmailSecurityPresence {
            has_mx_records,
            spf: spf.exists,
            dmarc: dmarc.finding.exists,
            dkim: dkim.found,
            mta_sts: mta_sts.exists,
            tls_rpt: tls_rpt.exists,
        },
    );

    EmailSecurityReport {
        domain: domain.to_string(),
        is_subdomain,
        parent_domain: is_subdomain.then_some(parent),
        timestamp: chrono::Utc::now().to_rfc3339(),
        has_mx_records,
        is_using_parent_mx,
        has_address_records,
        mx_records,
        security_score,
        spf,
        dmarc,
        dkim,
        mta_sts,
        tls_rpt,
        dns_config,
        status: "success".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spf_strict_mode() {
        let analysis = analyze_spf("v=spf1 include:_spf.google.com -all");
        assert_eq!(analysis.status, AnalysisStatus::Success);
        assert!(analysis.details.iter().any(|d| d.contains("strict mode")));
    }

    #[test]
    fn test_spf_soft_fail() {
        let analysis = analyze_spf("v=spf1 include:_spf.google.com ~all");
        assert_eq!(analysis.status, AnalysisStatus::Success);
        assert!(analysis.details.iter().any(|d| d.contains("soft fail mode")));
    }

    #[test]
    fn test_spf_neutral_and_allow_all() {
        let analysis = analyze_spf("v=spf1 ?all");
        assert_eq!(analysis.status, AnalysisStatus::Warning);

        let analysis = analyze_spf("v=spf1 +all");
        assert_eq!(analysis.status, AnalysisStatus::Error);
        assert!(analysis.details.iter().any(|d| d.contains("spoofing")));
    }

    #[test]
    fn test_spf_missing_all_mechanism() {
        let analysis = analyze_spf("v=spf1 include:_spf.google.com");
        assert_eq!(analysis.status, AnalysisStatus::Warning);
        assert!(analysis.details.iter().any(|d| d.contains("No all mechanism")));
    }

    #[test]
    fn test_spf_case_insensitive() {
        let analysis = analyze_spf("V=SPF1 INCLUDE:_SPF.GOOGLE.COM -ALL");
        assert_eq!(analysis.status, AnalysisStatus::Success);
        assert!(analysis.details.iter().any(|d| d.contains("strict mode")));
    }

    #[test]
    fn test_spf_lookup_mechanism_warning() {
        let record = "v=spf1 include:a.com include:b.com include:c.com include:d.com \
                      include:e.com include:f.com a:g.com mx:h.com exists:i.com -all";
        let analysis = analyze_spf(record);
        assert_eq!(analysis.status, AnalysisStatus::Warning);
        assert!(analysis
            .details
            .iter()
            .any(|d| d.contains("9 lookup mechanisms")));
    }

    #[test]
    fn test_spf_lookup_count_not_flagged_at_eight() {
        let record = "v=spf1 include:a include:b include:c include:d \
                      include:e include:f include:g include:h -all";
        let analysis = analyze_spf(record);
        assert!(!analysis.details.iter().any(|d| d.contains("lookup mechanisms")));
    }

    #[test]
    fn test_dmarc_reject_with_reporting() {
        let analysis = analyze_dmarc("v=DMARC1; p=reject; rua=mailto:x@y.com");
        assert_eq!(analysis.status, AnalysisStatus::Success);
        assert!(analysis
            .details
            .contains(&"Policy: reject (strongest protection)".to_string()));
        assert!(analysis
            .details
            .contains(&"Aggregate reports configured".to_string()));
    }

    #[test]
    fn test_dmarc_none_with_partial_rollout() {
        let analysis = analyze_dmarc("v=DMARC1; p=none; pct=50");
        assert_eq!(analysis.status, AnalysisStatus::Warning);
        assert!(analysis.details.iter().any(|d| d.contains("monitoring only")));
        assert!(analysis
            .details
            .iter()
            .any(|d| d.contains("Partial implementation: 50%")));
    }

    #[test]
    fn test_dmarc_full_rollout_and_subdomain_policy() {
        let analysis = analyze_dmarc("v=DMARC1; p=quarantine; sp=reject; pct=100; ruf=mailto:f@y.com");
        assert_eq!(analysis.status, AnalysisStatus::Success);
        assert!(analysis.details.contains(&"Subdomain policy: reject".to_string()));
        assert!(analysis.details.contains(&"Applied to 100% of messages".to_string()));
        assert!(analysis.details.contains(&"Forensic reports configured".to_string()));
    }

    #[test]
    fn test_dmarc_subdomain_policy_does_not_shadow_policy() {
        // A tag map keyed on exact tag names cannot confuse `sp=` with `p=`.
        let analysis = analyze_dmarc("v=DMARC1; sp=none; p=reject");
        assert!(analysis
            .details
            .contains(&"Policy: reject (strongest protection)".to_string()));
    }

    #[test]
    fn test_dmarc_missing_policy() {
        let analysis = analyze_dmarc("v=DMARC1; rua=mailto:x@y.com");
        assert_eq!(analysis.status, AnalysisStatus::Warning);
        assert!(analysis
            .details
            .contains(&"No policy found or invalid policy".to_string()));
    }

    #[test]
    fn test_score_weights() {
        let all = calculate_security_score(SecuritySignals {
            spf: true,
            dmarc: true,
            dkim: true,
            mta_sts: true,
            tls_rpt: true,
        });
        assert_eq!(all.score, 100);
        assert_eq!(all.rating, SecurityRating::Good);

        let none = calculate_security_score(SecuritySignals::default());
        assert_eq!(none.score, 0);
        assert_eq!(none.percentage, 0);
        assert_eq!(none.rating, SecurityRating::Poor);

        let spf_dmarc = calculate_security_score(SecuritySignals {
            spf: true,
            dmarc: true,
            ..Default::default()
        });
        assert_eq!(spf_dmarc.score, 50);
        assert_eq!(spf_dmarc.rating, SecurityRating::Fair);
    }

    #[test]
    fn test_score_monotonic_over_all_combinations() {
        // Enabling any additional mechanism never decreases the score, and
        // every combination stays within [0, 100].
        let from_bits = |bits: u8| SecuritySignals {
            spf: bits & 1 != 0,
            dmarc: bits & 2 != 0,
            dkim: bits & 4 != 0,
            mta_sts: bits & 8 != 0,
            tls_rpt: bits & 16 != 0,
        };

        for bits in 0u8..32 {
            let base = calculate_security_score(from_bits(bits));
            assert!(base.score <= 100);

            for flag in 0..5 {
                if bits & (1 << flag) == 0 {
                    let upgraded = calculate_security_score(from_bits(bits | (1 << flag)));
                    assert!(upgraded.score > base.score);
                }
            }
        }
    }

    #[test]
    fn test_rating_thresholds() {
        // DKIM + DMARC + MTA-STS + TLS-RPT = 75 -> Good.
        let score = calculate_security_score(SecuritySignals {
            dmarc: true,
            dkim: true,
            mta_sts: true,
            tls_rpt: true,
            ..Default::default()
        });
        assert_eq!(score.score, 75);
        assert_eq!(score.rating, SecurityRating::Good);

        // SPF + MTA-STS + TLS-RPT = 50 -> Fair.
        let score = calculate_security_score(SecuritySignals {
            spf: true,
            mta_sts: true,
            tls_rpt: true,
            ..Default::default()
        });
        assert_eq!(score.score, 50);
        assert_eq!(score.rating, SecurityRating::Fair);

        // MTA-STS + TLS-RPT = 25 -> Poor.
        let score = calculate_security_score(SecuritySignals {
            mta_sts: true,
            tls_rpt: true,
            ..Default::default()
        });
        assert_eq!(score.score, 25);
        assert_eq!(score.rating, SecurityRating::Poor);
    }

    #[test]
    fn test_rating_serialization() {
        assert_eq!(serde_json::to_string(&SecurityRating::Good).unwrap(), "\"Good\"");
        assert_eq!(serde_json::to_string(&SecurityRating::Poor).unwrap(), "\"Poor\"");
    }

    #[tokio::test]
    async fn test_pipeline_degrades_to_empty_report() {
        // Both resolvers unreachable: every lookup fails and degrades to
        // "not found", so the report scores zero instead of erroring out.
        let client = crate::doh::DohClient::with_endpoints(
            std::time::Duration::from_millis(50),
            "http://127.0.0.1:1/resolve",
            "http://127.0.0.1:1/dns-query",
        )
        .unwrap();

        let report = analyze_email_security(&client, "example.com").await;
        assert!(!report.has_mx_records);
        assert!(report.mx_records.is_empty());
        assert!(!report.spf.exists);
        assert!(!report.dmarc.finding.exists);
        assert!(!report.dkim.found);
        assert!(!report.mta_sts.exists);
        assert!(!report.tls_rpt.exists);
        assert_eq!(report.security_score.score, 0);
        assert_eq!(report.security_score.rating, SecurityRating::Poor);
        // Every mechanism is missing, so the recommended config carries all
        // five records.
        assert_eq!(
            report.dns_config["namecheap"]["records"].as_array().unwrap().len(),
            5
        );
        assert_eq!(report.status, "success");
    }
}
