//! Internet Computer custom-domain verification.
//!
//! Implements the DNS checklist from the official custom-domains setup guide
//! (apex CNAME, `_canister-id` TXT, `_acme-challenge` TXT), canister
//! existence probing against the IC dashboard, Web3 readiness advisories,
//! and the downloadable configuration files for boundary-node registration.

use crate::doh::{DnsResponse, DohClient, RecordType};
use crate::{CoreError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Default IC dashboard base URL.
pub const DEFAULT_DASHBOARD_ENDPOINT: &str = "https://dashboard.internetcomputer.org";

lazy_static! {
    /// Canister IDs in textual form: five dash-separated base32 groups.
    static ref CANISTER_ID_RE: Regex =
        Regex::new(r"^[a-z0-9]+-[a-z0-9]+-[a-z0-9]+-[a-z0-9]+-[a-z0-9]+$").unwrap();
}

/// Validate the textual shape of a canister ID.
pub fn validate_canister_id(canister_id: &str) -> Result<()> {
    if CANISTER_ID_RE.is_match(canister_id) {
        Ok(())
    } else {
        Err(CoreError::InvalidCanisterId(canister_id.to_string()))
    }
}

/// Progress state of one DNS check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pending,
    Checked,
    Missing,
    Error,
    Info,
}

/// The record a check expects to find.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub expected: String,
}

/// One entry of the custom-domain DNS checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsCheck {
    pub required: bool,
    pub record: ExpectedRecord,
    pub status: CheckStatus,
    pub actual: Option<String>,
    pub valid: bool,
    pub notes: String,
}

impl DnsCheck {
    fn pending(required: bool, record: ExpectedRecord, notes: &str) -> Self {
        Self {
            required,
            record,
            status: CheckStatus::Pending,
            actual: None,
            valid: false,
            notes: notes.to_string(),
        }
    }

    fn apply(&mut self, outcome: CheckOutcome) {
        self.status = outcome.status;
        self.actual = outcome.actual;
        self.valid = outcome.valid;
        if let Some(notes) = outcome.notes {
            self.notes = notes;
        }
    }
}

/// Informational entry with no lookup behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoCheck {
    pub required: bool,
    pub status: CheckStatus,
    pub notes: String,
}

/// Checklist rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSummary {
    pub valid: bool,
    pub missing_required: Vec<String>,
    pub ready_for_ic: bool,
}

/// The full custom-domain DNS checklist result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcpDnsChecks {
    pub apex: DnsCheck,
    pub www: DnsCheck,
    pub canister_id: DnsCheck,
    pub acme_challenge: DnsCheck,
    pub boundary_nodes: InfoCheck,
    pub summary: ChecklistSummary,
}

struct CheckOutcome {
    status: CheckStatus,
    actual: Option<String>,
    valid: bool,
    notes: Option<String>,
}

impl CheckOutcome {
    fn error(notes: &str) -> Self {
        Self {
            status: CheckStatus::Error,
            actual: None,
            valid: false,
            notes: Some(notes.to_string()),
        }
    }
}

/// Evaluate a CNAME response against the expected target. The answer's
/// trailing dot is stripped before comparison.
fn evaluate_cname(response: &DnsResponse, expected: &str, missing_note: &str) -> CheckOutcome {
    match response.first_cname() {
        Some(cname) => CheckOutcome {
            valid: cname == expected,
            status: CheckStatus::Checked,
            actual: Some(cname),
            notes: None,
        },
        None => CheckOutcome {
            status: CheckStatus::Missing,
            actual: None,
            valid: false,
            notes: Some(missing_note.to_string()),
        },
    }
}

/// Evaluate a TXT response with a per-check validity predicate.
fn evaluate_txt(
    response: &DnsResponse,
    missing_note: &str,
    is_valid: impl Fn(&str) -> bool,
) -> CheckOutcome {
    match response.txt_values().into_iter().next() {
        Some(value) => CheckOutcome {
            valid: is_valid(&value),
            status: CheckStatus::Checked,
            actual: Some(value),
            notes: None,
        },
        None => CheckOutcome {
            status: CheckStatus::Missing,
            actual: None,
            valid: false,
            notes: Some(missing_note.to_string()),
        },
    }
}

/// Run the custom-domain DNS checklist for `domain` against `canister_id`.
///
/// Every lookup failure is recorded on its own checklist entry; the other
/// checks still run.
pub async fn perform_icp_dns_checks(
    client: &DohClient,
    domain: &str,
    canister_id: &str,
) -> IcpDnsChecks {
    let base = crate::base_domain(domain);
    let expected_cname = format!("{}.icp0.io", canister_id);
    debug!("Running IC DNS checklist for {} ({})", base, canister_id);

    let mut apex = DnsCheck::pending(
        true,
        ExpectedRecord {
            record_type: "CNAME".to_string(),
            host: None,
            expected: expected_cname.clone(),
        },
        "Points your apex domain to your canister",
    );
    let mut www = DnsCheck::pending(
        false,
        ExpectedRecord {
            record_type: "CNAME".to_string(),
            host: None,
            expected: expected_cname.clone(),
        },
        "Points www subdomain to your canister (recommended)",
    );
    let mut canister_check = DnsCheck::pending(
        true,
        ExpectedRecord {
            record_type: "TXT".to_string(),
            host: Some("_canister-id".to_string()),
            expected: canister_id.to_string(),
        },
        "Associates your domain with your canister ID",
    );
    let mut acme = DnsCheck::pending(
        true,
        ExpectedRecord {
            record_type: "TXT".to_string(),
            host: Some("_acme-challenge".to_string()),
            expected: "delegated to ic".to_string(),
        },
        "Allows the IC to manage SSL certificates",
    );

    match client.query(base, RecordType::Cname).await {
        Ok(response) => apex.apply(evaluate_cname(
            &response,
            &expected_cname,
            "No CNAME record found for apex domain",
        )),
        Err(e) => {
            warn!("Apex CNAME check failed for {}: {}", base, e);
            apex.apply(CheckOutcome::error("Error checking apex domain CNAME record"));
        }
    }

    match client.query(&format!("www.{}", base), RecordType::Cname).await {
        Ok(response) => www.apply(evaluate_cname(
            &response,
            &expected_cname,
            "No CNAME record found for www subdomain",
        )),
        Err(e) => {
            warn!("www CNAME check failed for {}: {}", base, e);
            www.apply(CheckOutcome::error("Error checking www subdomain CNAME record"));
        }
    }

    match client
        .query(&format!("_canister-id.{}", base), RecordType::Txt)
        .await
    {
        Ok(response) => canister_check.apply(evaluate_txt(
            &response,
            "No TXT record found for _canister-id",
            |value| value == canister_id,
        )),
        Err(e) => {
            warn!("_canister-id check failed for {}: {}", base, e);
            canister_check.apply(CheckOutcome::error("Error checking _canister-id TXT record"));
        }
    }

    match client
        .query(&format!("_acme-challenge.{}", base), RecordType::Txt)
        .await
    {
        Ok(response) => acme.apply(evaluate_txt(
            &response,
            "No TXT record found for _acme-challenge",
            |value| value.to_lowercase() == "delegated to ic",
        )),
        Err(e) => {
            warn!("_acme-challenge check failed for {}: {}", base, e);
            acme.apply(CheckOutcome::error("Error checking _acme-challenge TXT record"));
        }
    }

    let mut missing_required = Vec::new();
    if apex.required && !apex.valid {
        missing_required.push("apex CNAME".to_string());
    }
    if canister_check.required && !canister_check.valid {
        missing_required.push("_canister-id TXT".to_string());
    }
    if acme.required && !acme.valid {
        missing_required.push("_acme-challenge TXT".to_string());
    }
    let valid = missing_required.is_empty();

    IcpDnsChecks {
        apex,
        www,
        canister_id: canister_check,
        acme_challenge: acme,
        boundary_nodes: InfoCheck {
            required: false,
            status: CheckStatus::Info,
            notes: "The IC automatically routes traffic through boundary nodes".to_string(),
        },
        summary: ChecklistSummary {
            valid,
            missing_required,
            ready_for_ic: valid,
        },
    }
}

/// What is known about a canister, and where that knowledge came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanisterInfo {
    pub exists: bool,
    pub details: Option<Value>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CanisterInfo {
    fn assumed(note: &str) -> Self {
        Self {
            exists: true,
            details: None,
            source: "assumed".to_string(),
            dashboard_url: None,
            note: Some(note.to_string()),
        }
    }
}

/// Probe the IC dashboard for canister metadata.
///
/// Tries the dashboard JSON API, then a HEAD request against the dashboard
/// page, and finally assumes existence. The probe never fails the request.
pub async fn canister_info(
    http: &reqwest::Client,
    dashboard_endpoint: &str,
    canister_id: &str,
) -> CanisterInfo {
    let api_url = format!("{}/api/v3/canisters/{}", dashboard_endpoint, canister_id);
    match http
        .get(&api_url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
    {
        Ok(response) if response.status().is_success() => {
            if let Ok(details) = response.json::<Value>().await {
                return CanisterInfo {
                    exists: true,
                    details: Some(details),
                    source: "api".to_string(),
                    dashboard_url: None,
                    note: None,
                };
            }
        }
        Ok(response) => debug!(
            "Dashboard API returned {} for canister {}",
            response.status(),
            canister_id
        ),
        Err(e) => {
            warn!("Dashboard API error for canister {}: {}", canister_id, e);
            return CanisterInfo::assumed("Error occurred while checking canister, assuming it exists");
        }
    }

    let page_url = format!("{}/canister/{}", dashboard_endpoint, canister_id);
    match http.head(&page_url).send().await {
        Ok(response) if response.status().is_success() => CanisterInfo {
            exists: true,
            details: None,
            source: "dashboard".to_string(),
            dashboard_url: Some(page_url),
            note: None,
        },
        _ => CanisterInfo::assumed("Could not verify canister details, assuming it exists"),
    }
}

/// All Web3 readiness features known to the advisory generator.
pub const WEB3_FEATURES: [&str; 8] = [
    "internetIdentity",
    "wallets",
    "tokens",
    "nfts",
    "crosschain",
    "storage",
    "security",
    "cors",
];

fn internet_identity_advisory() -> Value {
    json!({
        "configured": true,
        "notes": "Internet Identity integration appears to be configured",
        "implementation": {
            "type": "assumed",
            "details": "Full verification requires canister interface analysis",
        },
        "recommendations": [
            "Ensure your frontend implements the Internet Identity authentication flow",
            "Consider supporting multiple authentication methods (II, NFID, Plug wallet)",
            "Implement session management for authenticated users",
        ],
        "resources": [
            {
                "name": "Internet Identity Integration Guide",
                "url": "https://internetcomputer.org/docs/current/developer-docs/integrations/internet-identity/integrate-identity",
            },
            {
                "name": "Authentication Library (auth-client)",
                "url": "https://github.com/dfinity/agent-js/tree/main/packages/auth-client",
            },
        ],
    })
}

fn wallet_advisory() -> Value {
    json!({
        "compatible": true,
        "wallets": [
            {
                "name": "Plug",
                "status": "recommended",
                "url": "https://plugwallet.ooo/",
                "notes": "Popular wallet with good developer support",
            },
            {
                "name": "Stoic Wallet",
                "status": "supported",
                "url": "https://www.stoicwallet.com/",
                "notes": "Web-based wallet with simple interface",
            },
            {
                "name": "AstroX ME",
                "status": "supported",
                "url": "https://astrox.me/",
                "notes": "Mobile wallet with additional features",
            },
            {
                "name": "InfinitySwap",
                "status": "supported",
                "url": "https://app.infinityswap.one/",
                "notes": "DeFi-focused wallet with swap functionality",
            },
        ],
        "recommendations": [
            "Implement support for multiple wallets to maximize user reach",
            "Use the @dfinity/agent library for wallet integration",
            "Test your dApp with different wallets before deployment",
        ],
        "resources": [
            { "name": "Plug Wallet Integration", "url": "https://docs.plugwallet.ooo/" },
            { "name": "Agent-JS Library", "url": "https://github.com/dfinity/agent-js" },
        ],
    })
}

fn token_advisory() -> Value {
    json!({
        "detected": false,
        "standards": [],
        "notes": "Token functionality could not be automatically detected",
        "recommendations": [
            "If implementing a token, follow the ICRC-1/ICRC-2 token standards",
            "Consider using existing token canisters rather than implementing your own",
            "Implement proper token security measures",
        ],
        "resources": [
            { "name": "ICRC-1 Token Standard", "url": "https://github.com/dfinity/ICRC-1" },
            { "name": "ICRC-2 Token Standard", "url": "https://github.com/dfinity/ICRC-2" },
            {
                "name": "SNS Tokenomics",
                "url": "https://internetcomputer.org/docs/current/developer-docs/integrations/sns/tokenomics/",
            },
        ],
    })
}

fn nft_advisory() -> Value {
    json!({
        "detected": false,
        "standards": [],
        "notes": "NFT functionality could not be automatically detected",
        "recommendations": [
            "If implementing NFTs, follow established standards like EXT or DIP-721",
            "Consider using existing NFT canisters or frameworks",
            "Implement proper metadata storage for NFTs",
        ],
        "resources": [
            { "name": "EXT NFT Standard", "url": "https://github.com/Toniq-Labs/extendable-token" },
            { "name": "DIP-721 NFT Standard", "url": "https://github.com/dfinity/DIP721" },
            { "name": "NFT Studio", "url": "https://nftonstudio.com/" },
        ],
    })
}

fn crosschain_advisory() -> Value {
    json!({
        "integrations": [
            {
                "chain": "Bitcoin",
                "status": "available",
                "notes": "IC has native Bitcoin integration",
                "url": "https://internetcomputer.org/bitcoin-integration",
            },
            {
                "chain": "Ethereum",
                "status": "available",
                "notes": "Available through chain-key ECDSA and threshold ECDSA",
                "url": "https://internetcomputer.org/ethereum-integration",
            },
        ],
        "recommendations": [
            "Use the Bitcoin API for direct Bitcoin integration",
            "Use chain-key ECDSA for Ethereum and other EVM chains",
            "Consider using existing bridges for cross-chain functionality",
        ],
        "resources": [
            {
                "name": "Bitcoin Integration",
                "url": "https://internetcomputer.org/docs/current/developer-docs/integrations/bitcoin/",
            },
            {
                "name": "Chain-Key ECDSA",
                "url": "https://internetcomputer.org/docs/current/developer-docs/integrations/t-ecdsa/",
            },
            { "name": "Terabethia Bridge", "url": "https://terabethia.ooo/" },
        ],
    })
}

fn storage_advisory() -> Value {
    json!({
        "options": [
            {
                "name": "Asset Canister",
                "status": "native",
                "notes": "Built-in solution for storing assets on the IC",
                "url": "https://internetcomputer.org/docs/current/developer-docs/build/cdks/motoko-dfinity/asset-canister",
            },
            {
                "name": "Internet Computer Storage (ICS)",
                "status": "recommended",
                "notes": "Specialized storage solution for the IC",
                "url": "https://github.com/dfinity/ic-ics",
            },
            {
                "name": "DAB-js",
                "status": "available",
                "notes": "Decentralized asset bucket for NFT storage",
                "url": "https://github.com/Psychedelic/DAB-js",
            },
        ],
        "recommendations": [
            "Use asset canisters for static content and small files",
            "Consider ICS for larger storage needs",
            "Implement proper access control for stored assets",
        ],
        "resources": [
            {
                "name": "Asset Canister Documentation",
                "url": "https://internetcomputer.org/docs/current/developer-docs/build/cdks/motoko-dfinity/asset-canister",
            },
            {
                "name": "Storage Best Practices",
                "url": "https://internetcomputer.org/docs/current/developer-docs/production/storage-best-practices",
            },
        ],
    })
}

fn security_advisory() -> Value {
    json!({
        "recommendations": [
            "Implement proper access control in your canister",
            "Use the Certified Variables feature for data integrity",
            "Implement rate limiting to prevent abuse",
            "Use secure update calls for sensitive operations",
            "Implement proper error handling",
            "Consider formal verification for critical canisters",
        ],
        "resources": [
            {
                "name": "Security Best Practices",
                "url": "https://internetcomputer.org/docs/current/developer-docs/security/",
            },
            {
                "name": "Certified Variables",
                "url": "https://internetcomputer.org/docs/current/developer-docs/security/certified-variables",
            },
            {
                "name": "Access Control Patterns",
                "url": "https://internetcomputer.org/docs/current/developer-docs/security/access-control",
            },
        ],
    })
}

fn cors_advisory() -> Value {
    json!({
        "configured": true,
        "notes": "CORS configuration could not be automatically detected",
        "recommendations": [
            "Configure CORS headers to allow requests from your frontend domains",
            "For Web3 applications, consider allowing requests from wallet domains",
            "Implement proper CORS headers for all HTTP endpoints",
        ],
        "example": {
            "headers": [
                {
                    "name": "Access-Control-Allow-Origin",
                    "value": "https://yourdapp.com, https://app.plugwallet.ooo",
                    "notes": "Domains that can access your canister",
                },
                {
                    "name": "Access-Control-Allow-Methods",
                    "value": "GET, POST, OPTIONS",
                    "notes": "HTTP methods allowed",
                },
                {
                    "name": "Access-Control-Allow-Headers",
                    "value": "Content-Type, Authorization",
                    "notes": "HTTP headers allowed",
                },
            ],
        },
        "resources": [
            {
                "name": "CORS on the Internet Computer",
                "url": "https://internetcomputer.org/docs/current/developer-docs/build/frontend/cors",
            },
        ],
    })
}

/// Web3 readiness advisories for the requested features. An empty feature
/// list selects all features. Entries not requested are `null` in the
/// output, matching the shape clients expect.
pub fn web3_checks(features: &[String]) -> Value {
    let wanted = |feature: &str| features.is_empty() || features.iter().any(|f| f == feature);

    let internet_identity = wanted("internetIdentity").then(internet_identity_advisory);
    let wallets = wanted("wallets").then(wallet_advisory);
    let tokens = wanted("tokens").then(token_advisory);
    let nfts = wanted("nfts").then(nft_advisory);
    let crosschain = wanted("crosschain").then(crosschain_advisory);
    let storage = wanted("storage").then(storage_advisory);
    let security = wanted("security").then(security_advisory);
    let cors = wanted("cors").then(cors_advisory);

    let mut recommendations: Vec<String> = Vec::new();
    let mut push_all = |advisory: &Option<Value>| {
        if let Some(recs) = advisory
            .as_ref()
            .and_then(|a| a.get("recommendations"))
            .and_then(Value::as_array)
        {
            recommendations.extend(recs.iter().filter_map(Value::as_str).map(String::from));
        }
    };
    push_all(&wallets);
    push_all(&crosschain);
    push_all(&storage);
    push_all(&security);

    if tokens.is_some() {
        recommendations
            .push("Consider implementing token functionality if relevant to your application".to_string());
    }
    if nfts.is_some() {
        recommendations
            .push("Consider implementing NFT functionality if relevant to your application".to_string());
    }

    json!({
        "internetIdentity": internet_identity,
        "wallets": wallets,
        "tokens": tokens,
        "nfts": nfts,
        "crosschain": crosschain,
        "storage": storage,
        "security": security,
        "cors": cors,
        "summary": {
            "readyForWeb3": true,
            "recommendations": recommendations,
        },
    })
}

/// A downloadable configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub path: String,
    pub content: String,
}

/// The set of files a project needs for boundary-node registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFiles {
    pub ic_domains: ConfigFile,
    pub ic_assets: ConfigFile,
    pub register_script: ConfigFile,
    pub check_status_script: ConfigFile,
    pub instructions: ConfigFile,
}

/// Generate the downloadable configuration files for `domain`.
pub fn config_files(domain: &str) -> ConfigFiles {
    let ic_domains_content = format!("{}\n", domain);
    let ic_assets_content = r#"[
  {
    "match": ".well-known",
    "ignore": false
  }
]
"#
    .to_string();

    let register_script = format!(
        r#"#!/bin/bash
# Script to register your domain with Internet Computer boundary nodes

# Replace with your actual domain
DOMAIN="{domain}"

# Register the domain
echo "Registering domain $DOMAIN with Internet Computer boundary nodes..."
RESPONSE=$(curl -sL -X POST \
    -H 'Content-Type: application/json' \
    https://icp0.io/registrations \
    --data @- <<EOF
    {{
      "name": "$DOMAIN"
    }}
EOF
)

# Extract request ID
REQUEST_ID=$(echo $RESPONSE | grep -o '"id":"[^"]*"' | cut -d'"' -f4)

if [ -z "$REQUEST_ID" ]; then
    echo "Registration failed. Response: $RESPONSE"
    exit 1
fi

echo "Registration submitted successfully!"
echo "Request ID: $REQUEST_ID"
echo ""
echo "To check the status of your registration, run:"
echo "curl -sL -X GET https://icp0.io/registrations/$REQUEST_ID"
echo ""
echo "The status will be one of the following:"
echo "- PendingOrder: The registration request has been submitted and is waiting to be picked up."
echo "- PendingChallengeResponse: The certificate has been ordered."
echo "- PendingAcmeApproval: The challenge has been completed."
echo "- Available: The registration request has been successfully processed."
echo "- Failed: The registration request failed."
echo ""
echo "Once your registration becomes available, wait a few minutes for the certificate"
echo "to become available on all boundary nodes."
"#
    );

    let check_status_script = r#"#!/bin/bash
# Script to check the status of your domain registration with Internet Computer

# Replace with your actual request ID
REQUEST_ID="YOUR_REQUEST_ID"

# Check registration status
echo "Checking registration status for request ID: $REQUEST_ID"
RESPONSE=$(curl -sL -X GET https://icp0.io/registrations/$REQUEST_ID)

echo "Registration status: $RESPONSE"
echo ""
echo "The status will be one of the following:"
echo "- PendingOrder: The registration request has been submitted and is waiting to be picked up."
echo "- PendingChallengeResponse: The certificate has been ordered."
echo "- PendingAcmeApproval: The challenge has been completed."
echo "- Available: The registration request has been successfully processed."
echo "- Failed: The registration request failed."
echo ""
"#
    .to_string();

    let instructions = format!(
        r#"# ICP Domain Configuration Files

## File Structure
Your project should have the following structure:

```
├── dfx.json
├── package.json
├── src
│   ├── project_frontend
│   │   ├── src
│   │   │   ├── .ic-assets.json5
│   │   │   ├── .well-known
│   │   │   │   └── ic-domains
```

## Steps to Configure Your Domain

1. Create the `.well-known` directory in your frontend source directory
2. Create the `ic-domains` file inside the `.well-known` directory with your domain
3. Create the `.ic-assets.json5` file in the same directory as `.well-known`
4. Deploy your updated canister
5. Register your domain with the boundary nodes using the provided script
6. Check the status of your registration using the status check script

## File Contents

### .well-known/ic-domains
```
{domain}
```

### .ic-assets.json5
```
{ic_assets_content}
```

## Registration Scripts

Use the provided scripts to register your domain and check the status.
"#
    );

    ConfigFiles {
        ic_domains: ConfigFile {
            path: ".well-known/ic-domains".to_string(),
            content: ic_domains_content,
        },
        ic_assets: ConfigFile {
            path: ".ic-assets.json5".to_string(),
            content: ic_assets_content,
        },
        register_script: ConfigFile {
            path: "register-domain.sh".to_string(),
            content: register_script,
        },
        check_status_script: ConfigFile {
            path: "check-status.sh".to_string(),
            content: check_status_script,
        },
        instructions: ConfigFile {
            path: "README.md".to_string(),
            content: instructions,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doh::DnsAnswer;
    use pretty_assertions::assert_eq;

    fn cname_response(target: &str) -> DnsResponse {
        DnsResponse {
            status: 0,
            answer: Some(vec![DnsAnswer {
                name: "example.com.".to_string(),
                rr_type: 5,
                ttl: 300,
                data: target.to_string(),
            }]),
        }
    }

    fn txt_response(value: &str) -> DnsResponse {
        DnsResponse {
            status: 0,
            answer: Some(vec![DnsAnswer {
                name: "_canister-id.example.com.".to_string(),
                rr_type: 16,
                ttl: 300,
                data: value.to_string(),
            }]),
        }
    }

    #[test]
    fn test_canister_id_validation() {
        assert!(validate_canister_id("aaaaa-bbbbb-ccccc-ddddd-eee").is_ok());
        assert!(validate_canister_id("rdmx6-jaaaa-aaaaa-aaadq-cai").is_ok());
        assert!(validate_canister_id("not a canister").is_err());
        assert!(validate_canister_id("only-three-groups").is_err());
        assert!(validate_canister_id("UPPER-case-not-allowed-here").is_err());
        assert!(validate_canister_id("").is_err());
    }

    #[test]
    fn test_cname_check_accepts_trailing_dot() {
        let response = cname_response("rdmx6-jaaaa-aaaaa-aaadq-cai.icp0.io.");
        let outcome = evaluate_cname(&response, "rdmx6-jaaaa-aaaaa-aaadq-cai.icp0.io", "missing");
        assert_eq!(outcome.status, CheckStatus::Checked);
        assert!(outcome.valid);
        assert_eq!(
            outcome.actual,
            Some("rdmx6-jaaaa-aaaaa-aaadq-cai.icp0.io".to_string())
        );
    }

    #[test]
    fn test_cname_check_wrong_target() {
        let response = cname_response("some-other-host.example.net.");
        let outcome = evaluate_cname(&response, "rdmx6-jaaaa-aaaaa-aaadq-cai.icp0.io", "missing");
        assert_eq!(outcome.status, CheckStatus::Checked);
        assert!(!outcome.valid);
    }

    #[test]
    fn test_cname_check_missing() {
        let outcome = evaluate_cname(
            &DnsResponse::default(),
            "rdmx6-jaaaa-aaaaa-aaadq-cai.icp0.io",
            "No CNAME record found for apex domain",
        );
        assert_eq!(outcome.status, CheckStatus::Missing);
        assert_eq!(
            outcome.notes,
            Some("No CNAME record found for apex domain".to_string())
        );
    }

    #[test]
    fn test_txt_check_strips_quotes() {
        let response = txt_response("\"rdmx6-jaaaa-aaaaa-aaadq-cai\"");
        let outcome = evaluate_txt(&response, "missing", |v| v == "rdmx6-jaaaa-aaaaa-aaadq-cai");
        assert!(outcome.valid);
    }

    #[test]
    fn test_acme_check_is_case_insensitive() {
        let response = txt_response("\"Delegated To IC\"");
        let outcome = evaluate_txt(&response, "missing", |v| {
            v.to_lowercase() == "delegated to ic"
        });
        assert!(outcome.valid);
    }

    #[test]
    fn test_web3_checks_feature_selection() {
        let all = web3_checks(&[]);
        assert!(all["internetIdentity"].is_object());
        assert!(all["cors"].is_object());
        assert_eq!(all["summary"]["readyForWeb3"], true);

        let only_wallets = web3_checks(&["wallets".to_string()]);
        assert!(only_wallets["wallets"].is_object());
        assert!(only_wallets["tokens"].is_null());
        assert!(only_wallets["internetIdentity"].is_null());
    }

    #[test]
    fn test_web3_recommendations_compiled() {
        let all = web3_checks(&[]);
        let recs = all["summary"]["recommendations"].as_array().unwrap();
        assert!(recs
            .iter()
            .any(|r| r.as_str().unwrap().contains("token functionality")));
        assert!(recs
            .iter()
            .any(|r| r.as_str().unwrap().contains("multiple wallets")));
    }

    #[test]
    fn test_config_files_embed_domain() {
        let files = config_files("example.com");
        assert_eq!(files.ic_domains.path, ".well-known/ic-domains");
        assert_eq!(files.ic_domains.content, "example.com\n");
        assert!(files.register_script.content.contains("DOMAIN=\"example.com\""));
        assert!(files.instructions.content.contains(".ic-assets.json5"));
        assert!(files.check_status_script.content.contains("YOUR_REQUEST_ID"));
    }

    #[tokio::test]
    async fn test_checklist_summary_counts_missing() {
        // Both resolvers unreachable, so every lookup errors out and all
        // required entries land in missingRequired.
        let client = DohClient::with_endpoints(
            std::time::Duration::from_millis(50),
            "http://127.0.0.1:1/resolve",
            "http://127.0.0.1:1/dns-query",
        )
        .unwrap();

        let checks = perform_icp_dns_checks(&client, "www.example.com", "aaaaa-bbbbb-ccccc-ddddd-eee").await;
        assert_eq!(checks.apex.status, CheckStatus::Error);
        assert!(!checks.summary.valid);
        assert_eq!(
            checks.summary.missing_required,
            vec!["apex CNAME", "_canister-id TXT", "_acme-challenge TXT"]
        );
        assert!(!checks.summary.ready_for_ic);
    }
}
