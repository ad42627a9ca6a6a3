//! Unstoppable Domains (blockchain domain) checks.
//!
//! Unstoppable domains live on-chain rather than in public DNS, so there is
//! nothing to resolve here: availability is decided by TLD membership and a
//! name-length heuristic, the "DNS configuration" is advisory text for
//! registrar dashboards, and the Web3 checks are static readiness
//! advisories. Everything in this module is a pure function.

use crate::availability::AvailabilityReport;
use crate::templates::{registrar_section, DnsRecordRow, Registrar};
use serde_json::{json, Value};

/// TLDs managed by Unstoppable Domains.
pub const UNSTOPPABLE_TLDS: [&str; 8] = [
    "crypto",
    "nft",
    "wallet",
    "blockchain",
    "x",
    "dao",
    "888",
    "zil",
];

/// Web3 features known to the Unstoppable advisory generator.
pub const UNSTOPPABLE_WEB3_FEATURES: [&str; 5] = ["wallets", "ipfs", "dapps", "payments", "security"];

/// Whether the domain's last label is an Unstoppable Domains TLD.
pub fn is_unstoppable_domain(domain: &str) -> bool {
    domain
        .rsplit_once('.')
        .map(|(_, tld)| UNSTOPPABLE_TLDS.contains(&tld))
        .unwrap_or(false)
}

/// Decide registration status for an Unstoppable domain.
///
/// There is no public registry API to consult, so a short name (under five
/// characters) is assumed taken and anything else assumed available; the
/// messages say "appears" accordingly and the search link lets the user
/// confirm.
pub fn check_unstoppable_availability(domain: &str) -> AvailabilityReport {
    if !is_unstoppable_domain(domain) {
        return AvailabilityReport {
            available: Some(false),
            registered: Some(false),
            has_configuration: false,
            dns_check_result: None,
            existing_configuration: None,
            whois_data: None,
            purchase_links: None,
            message:
                "This is not a valid Unstoppable Domains TLD. Valid TLDs include: .crypto, .nft, .wallet, etc."
                    .to_string(),
        };
    }

    let name = domain.split('.').next().unwrap_or(domain);
    let purchase_links = Some(json!({
        "unstoppable": format!("https://unstoppabledomains.com/search?searchTerm={}", domain),
    }));

    if name.len() < 5 {
        AvailabilityReport {
            available: Some(false),
            registered: Some(true),
            has_configuration: true,
            dns_check_result: None,
            existing_configuration: None,
            whois_data: None,
            purchase_links,
            message: "This domain appears to be registered with Unstoppable Domains.".to_string(),
        }
    } else {
        AvailabilityReport {
            available: Some(true),
            registered: Some(false),
            has_configuration: false,
            dns_check_result: None,
            existing_configuration: None,
            whois_data: None,
            purchase_links,
            message: "This domain may be available for registration with Unstoppable Domains.".to_string(),
        }
    }
}

/// Registrar-facing configuration guide for an Unstoppable domain. The one
/// record is a marker TXT; the real configuration happens on-chain, which is
/// what the instructions and resources walk through.
pub fn unstoppable_dns_config(domain: &str) -> Value {
    let rows = vec![DnsRecordRow::new(
        "TXT",
        "@",
        "Managed by Unstoppable Domains",
        "Indicates this domain is managed by Unstoppable Domains",
    )];

    let instructions: Vec<String> = [
        "Unstoppable Domains are managed on the blockchain, not through traditional DNS.",
        "To use your Unstoppable Domain, you need to:",
        "1. Install a browser extension like Unstoppable Extension or Brave Browser",
        "2. Connect your domain to your Web3 website or IPFS content",
        "3. Configure your crypto addresses for receiving payments",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let mut config = serde_json::Map::new();
    for registrar in Registrar::ALL {
        config.insert(
            registrar.key().to_string(),
            registrar_section(&rows, registrar, instructions.clone()),
        );
    }

    config.insert(
        "verification".to_string(),
        json!({
            "command": format!(
                "curl -X GET \"https://unstoppabledomains.com/api/v1/resellers/domains/{}\"",
                domain
            ),
            "notes": "Check if your domain is properly registered with Unstoppable Domains",
        }),
    );
    config.insert(
        "troubleshooting".to_string(),
        json!([
            "Ensure your domain is properly registered with Unstoppable Domains",
            "Make sure you're using a compatible browser or extension",
            "Check that your crypto addresses are correctly configured",
            "Verify your IPFS content is properly linked to your domain",
        ]),
    );
    config.insert(
        "resources".to_string(),
        json!([
            { "name": "Unstoppable Domains Documentation", "url": "https://docs.unstoppabledomains.com/" },
            {
                "name": "Unstoppable Domains Browser Extension",
                "url": "https://unstoppabledomains.com/extension",
            },
            {
                "name": "IPFS Configuration Guide",
                "url": "https://docs.unstoppabledomains.com/manage-domains/manage-domain-names/point-domain-to-ipfs/",
            },
        ]),
    );
    config.insert(
        "web3Services".to_string(),
        json!({
            "wallets": {
                "description": "Compatible wallets for your Unstoppable Domain",
                "providers": [
                    { "name": "MetaMask", "setupUrl": "https://metamask.io/", "notes": "Popular Ethereum wallet" },
                    {
                        "name": "Trust Wallet",
                        "setupUrl": "https://trustwallet.com/",
                        "notes": "Multi-chain wallet with Unstoppable Domains support",
                    },
                    {
                        "name": "Coinbase Wallet",
                        "setupUrl": "https://www.coinbase.com/wallet",
                        "notes": "User-friendly wallet with Unstoppable Domains support",
                    },
                ],
            },
            "ipfs": {
                "description": "IPFS hosting providers for your Web3 website",
                "providers": [
                    { "name": "Pinata", "setupUrl": "https://pinata.cloud/", "notes": "Easy-to-use IPFS pinning service" },
                    { "name": "Fleek", "setupUrl": "https://fleek.co/", "notes": "IPFS hosting with CI/CD integration" },
                    {
                        "name": "Infura IPFS",
                        "setupUrl": "https://infura.io/product/ipfs",
                        "notes": "Enterprise-grade IPFS infrastructure",
                    },
                ],
            },
        }),
    );

    Value::Object(config)
}

fn wallet_advisory() -> Value {
    json!({
        "compatible": true,
        "wallets": [
            { "name": "MetaMask", "status": "recommended", "url": "https://metamask.io/", "notes": "Popular Ethereum wallet" },
            {
                "name": "Trust Wallet",
                "status": "supported",
                "url": "https://trustwallet.com/",
                "notes": "Multi-chain wallet with Unstoppable Domains support",
            },
            {
                "name": "Coinbase Wallet",
                "status": "supported",
                "url": "https://www.coinbase.com/wallet",
                "notes": "User-friendly wallet with Unstoppable Domains support",
            },
        ],
        "recommendations": [
            "Install a compatible wallet like MetaMask, Trust Wallet, or Coinbase Wallet",
            "Ensure your wallet is configured to resolve Unstoppable Domains",
        ],
        "resources": [
            {
                "name": "Unstoppable Domains Wallet Integration",
                "url": "https://docs.unstoppabledomains.com/send-and-receive-crypto-payments/crypto-payments",
            },
        ],
    })
}

fn ipfs_advisory() -> Value {
    // On-chain state is not queried, so IPFS linkage cannot be confirmed.
    json!({
        "configured": false,
        "notes": "IPFS configuration could not be automatically detected",
        "recommendations": [
            "Upload your website content to IPFS using Pinata, Fleek, or another IPFS provider",
            "Link your IPFS content hash to your Unstoppable Domain",
            "Test your website using a compatible browser or extension",
        ],
        "resources": [
            {
                "name": "IPFS Configuration Guide",
                "url": "https://docs.unstoppabledomains.com/manage-domains/manage-domain-names/point-domain-to-ipfs/",
            },
        ],
    })
}

fn dapp_advisory() -> Value {
    json!({
        "compatible": true,
        "dapps": [
            {
                "name": "Brave Browser",
                "status": "recommended",
                "url": "https://brave.com/",
                "notes": "Natively supports Unstoppable Domains",
            },
            {
                "name": "Opera Browser",
                "status": "supported",
                "url": "https://www.opera.com/",
                "notes": "Supports Unstoppable Domains",
            },
        ],
        "recommendations": [
            "Use a compatible browser like Brave or Opera",
            "Alternatively, install the Unstoppable Domains browser extension",
        ],
        "resources": [
            {
                "name": "Compatible Browsers",
                "url": "https://docs.unstoppabledomains.com/browser-resolution/browser-resolution-overview",
            },
        ],
    })
}

fn payment_advisory() -> Value {
    json!({
        "configured": false,
        "notes": "Payment configuration could not be automatically detected",
        "recommendations": [
            "Configure cryptocurrency addresses for your domain",
            "Set up addresses for multiple cryptocurrencies to maximize payment options",
            "Test receiving payments to ensure proper configuration",
        ],
        "resources": [
            {
                "name": "Crypto Payments Guide",
                "url": "https://docs.unstoppabledomains.com/send-and-receive-crypto-payments/crypto-payments",
            },
        ],
    })
}

fn security_advisory() -> Value {
    json!({
        "recommendations": [
            "Use a hardware wallet for enhanced security",
            "Enable two-factor authentication for your Unstoppable Domains account",
            "Keep your recovery phrase in a secure location",
            "Regularly check your domain configuration for unauthorized changes",
        ],
        "resources": [
            {
                "name": "Security Best Practices",
                "url": "https://docs.unstoppabledomains.com/manage-domains/domain-management-overview",
            },
        ],
    })
}

/// Web3 readiness advisories for an Unstoppable domain. An empty feature
/// list selects all features; entries not requested are `null`. The summary
/// marks the domain not ready for Web3 while IPFS content or payment
/// addresses remain unconfirmed.
pub fn web3_checks(features: &[String]) -> Value {
    let wanted = |feature: &str| features.is_empty() || features.iter().any(|f| f == feature);

    let wallets = wanted("wallets").then(wallet_advisory);
    let ipfs = wanted("ipfs").then(ipfs_advisory);
    let dapps = wanted("dapps").then(dapp_advisory);
    let payments = wanted("payments").then(payment_advisory);
    let security = wanted("security").then(security_advisory);

    let mut ready_for_web3 = true;
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
    push_all(&dapps);
    push_all(&security);

    if ipfs.is_some() {
        recommendations.push("Configure IPFS content for your Unstoppable Domain".to_string());
        ready_for_web3 = false;
    }
    if payments.is_some() {
        recommendations.push("Configure cryptocurrency payment addresses for your domain".to_string());
        ready_for_web3 = false;
    }

    json!({
        "wallets": wallets,
        "ipfs": ipfs,
        "dapps": dapps,
        "payments": payments,
        "security": security,
        "summary": {
            "readyForWeb3": ready_for_web3,
            "recommendations": recommendations,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tld_detection() {
        assert!(is_unstoppable_domain("mysite.crypto"));
        assert!(is_unstoppable_domain("short.x"));
        assert!(is_unstoppable_domain("dao.888"));
        assert!(!is_unstoppable_domain("example.com"));
        assert!(!is_unstoppable_domain("crypto"));
        // Only the last label counts.
        assert!(!is_unstoppable_domain("crypto.example.com"));
    }

    #[test]
    fn test_non_unstoppable_tld_is_rejected() {
        let report = check_unstoppable_availability("example.com");
        assert_eq!(report.available, Some(false));
        assert_eq!(report.registered, Some(false));
        assert!(report.purchase_links.is_none());
        assert!(report.message.contains("not a valid Unstoppable Domains TLD"));
    }

    #[test]
    fn test_short_name_assumed_registered() {
        let report = check_unstoppable_availability("abcd.crypto");
        assert_eq!(report.available, Some(false));
        assert_eq!(report.registered, Some(true));
        assert!(report.has_configuration);
        assert!(report.purchase_links.unwrap()["unstoppable"]
            .as_str()
            .unwrap()
            .contains("abcd.crypto"));
    }

    #[test]
    fn test_longer_name_assumed_available_with_disclaimer() {
        let report = check_unstoppable_availability("mylongname.nft");
        assert_eq!(report.available, Some(true));
        assert_eq!(report.registered, Some(false));
        assert!(!report.has_configuration);
        assert!(report.message.contains("may be available"));
        assert!(report.purchase_links.is_some());
    }

    #[test]
    fn test_dns_config_registrar_dialects() {
        let config = unstoppable_dns_config("mysite.crypto");

        let namecheap = config["namecheap"]["records"].as_array().unwrap();
        assert_eq!(namecheap.len(), 1);
        assert_eq!(namecheap[0]["host"], "@");
        assert_eq!(namecheap[0]["value"], "Managed by Unstoppable Domains");

        let cloudflare = config["cloudflare"]["records"].as_array().unwrap();
        assert_eq!(cloudflare[0]["content"], "Managed by Unstoppable Domains");
        assert_eq!(cloudflare[0]["ttl"], "Auto");

        assert!(config["verification"]["command"]
            .as_str()
            .unwrap()
            .contains("mysite.crypto"));
        assert!(config["web3Services"]["ipfs"]["providers"].is_array());
    }

    #[test]
    fn test_web3_checks_feature_selection() {
        let all = web3_checks(&[]);
        assert!(all["wallets"].is_object());
        assert!(all["ipfs"].is_object());
        assert!(all["security"].is_object());
        // Unconfirmed IPFS and payments hold the domain back.
        assert_eq!(all["summary"]["readyForWeb3"], false);

        let only_wallets = web3_checks(&["wallets".to_string()]);
        assert!(only_wallets["wallets"].is_object());
        assert!(only_wallets["ipfs"].is_null());
        assert!(only_wallets["payments"].is_null());
        assert_eq!(only_wallets["summary"]["readyForWeb3"], true);
    }

    #[test]
    fn test_web3_recommendations_compiled() {
        let all = web3_checks(&[]);
        let recs = all["summary"]["recommendations"].as_array().unwrap();
        assert!(recs
            .iter()
            .any(|r| r.as_str().unwrap().contains("Configure IPFS content")));
        assert!(recs
            .iter()
            .any(|r| r.as_str().unwrap().contains("hardware wallet")));
    }
}
