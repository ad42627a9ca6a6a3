//! DNS configuration templates rendered in registrar dialects.
//!
//! Every template is authored once as a list of [`DnsRecordRow`]s and then
//! rendered into the field conventions of each supported registrar
//! (Namecheap uses `host`/`value`, Cloudflare `name`/`content` with a
//! `proxied` flag, GoDaddy `name`/`value`), so record content can never
//! drift between registrar variants.

use crate::base_domain;
use serde_json::{json, Value};

/// Long-lived DKIM public key published by Odoo for its managed mail.
const ODOO_DKIM_KEY: &str = "v=DKIM1; k=rsa; p=MIGfMA0GCSqGSIb3DQEBAQUAA4GNADCBiQKBgQCXiTZ5bUJv2GfQSxEFQQvVOq9xJXPTu5UMZDmKVmNJ0LYpDnN+YrG9Z9dUseUkLhRLvLLpuRjEWXQJCJQGtQd9TGJ2jWQlnOgQ9ePfFZ9gKdOgr7OnzUYx9xjfC/jIvQWJ8Uc9EQJQKiQDtFS1+OKfpU4nmG7aUJEF6Jamj5ZfwIDAQAB";

const CLOUDFLARE_DNS_ONLY_NOTE: &str = "Ensure \"Proxy status\" is set to \"DNS only\" (gray cloud)";

/// DNS providers the templates are rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registrar {
    Namecheap,
    Cloudflare,
    Godaddy,
}

impl Registrar {
    pub const ALL: [Registrar; 3] = [Registrar::Namecheap, Registrar::Cloudflare, Registrar::Godaddy];

    /// JSON key this registrar's section is published under.
    pub fn key(&self) -> &'static str {
        match self {
            Registrar::Namecheap => "namecheap",
            Registrar::Cloudflare => "cloudflare",
            Registrar::Godaddy => "godaddy",
        }
    }

    /// The TTL wording each registrar's dashboard shows by default.
    fn default_ttl(&self) -> &'static str {
        match self {
            Registrar::Namecheap => "Automatic",
            Registrar::Cloudflare => "Auto",
            Registrar::Godaddy => "1 Hour",
        }
    }

    fn login_steps(&self) -> Vec<String> {
        let steps: &[&str] = match self {
            Registrar::Namecheap => &[
                "Log in to your Namecheap account",
                "Go to \"Domain List\" and click \"Manage\" next to your domain",
                "Select the \"Advanced DNS\" tab",
            ],
            Registrar::Cloudflare => &[
                "Log in to your Cloudflare account",
                "Select your domain",
                "Go to the \"DNS\" tab",
            ],
            Registrar::Godaddy => &[
                "Log in to your GoDaddy account",
                "Go to \"My Products\" and select your domain",
                "Click on \"DNS\"",
            ],
        };
        steps.iter().map(|s| s.to_string()).collect()
    }

    fn propagation_note(&self) -> &'static str {
        match self {
            Registrar::Cloudflare => "Wait for DNS propagation (usually quick with Cloudflare)",
            _ => "Wait for DNS propagation (can take up to 48 hours)",
        }
    }
}

/// One DNS record in registrar-neutral form.
#[derive(Debug, Clone)]
pub struct DnsRecordRow {
    pub record_type: String,
    pub host: String,
    pub value: String,
    pub notes: String,
    pub required: Option<bool>,
    pub proxied: Option<bool>,
    pub category: Option<String>,
    /// Notes shown instead of `notes` on Cloudflare (proxy caveats).
    pub cloudflare_notes: Option<String>,
}

impl DnsRecordRow {
    pub fn new(
        record_type: impl Into<String>,
        host: impl Into<String>,
        value: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            record_type: record_type.into(),
            host: host.into(),
            value: value.into(),
            notes: notes.into(),
            required: None,
            proxied: None,
            category: None,
            cloudflare_notes: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn proxied(mut self, proxied: bool) -> Self {
        self.proxied = Some(proxied);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Marks a record that Cloudflare must serve unproxied.
    pub fn dns_only(mut self) -> Self {
        self.proxied = Some(false);
        self.cloudflare_notes = Some(CLOUDFLARE_DNS_ONLY_NOTE.to_string());
        self
    }

    /// Render this row in `registrar`'s dialect.
    pub fn to_value(&self, registrar: Registrar) -> Value {
        // ALIAS is a registrar extension; Cloudflare flattens apex CNAMEs
        // natively, so the row renders as CNAME there.
        let record_type = if registrar == Registrar::Cloudflare && self.record_type == "ALIAS" {
            "CNAME"
        } else {
            self.record_type.as_str()
        };

        let mut row = serde_json::Map::new();
        row.insert("type".to_string(), json!(record_type));
        match registrar {
            Registrar::Namecheap => {
                row.insert("host".to_string(), json!(self.host));
                row.insert("value".to_string(), json!(self.value));
            }
            Registrar::Cloudflare => {
                row.insert("name".to_string(), json!(self.host));
                row.insert("content".to_string(), json!(self.value));
                if let Some(proxied) = self.proxied {
                    row.insert("proxied".to_string(), json!(proxied));
                }
            }
            Registrar::Godaddy => {
                row.insert("name".to_string(), json!(self.host));
                row.insert("value".to_string(), json!(self.value));
            }
        }
        row.insert("ttl".to_string(), json!(registrar.default_ttl()));

        let notes = match (registrar, &self.cloudflare_notes) {
            (Registrar::Cloudflare, Some(cf_notes)) => cf_notes,
            _ => &self.notes,
        };
        row.insert("notes".to_string(), json!(notes));

        if let Some(required) = self.required {
            row.insert("required".to_string(), json!(required));
        }
        if let Some(category) = &self.category {
            row.insert("category".to_string(), json!(category));
        }

        Value::Object(row)
    }
}

pub(crate) fn render_rows(rows: &[DnsRecordRow], registrar: Registrar) -> Vec<Value> {
    rows.iter().map(|row| row.to_value(registrar)).collect()
}

pub(crate) fn registrar_section(rows: &[DnsRecordRow], registrar: Registrar, instructions: Vec<String>) -> Value {
    json!({
        "records": render_rows(rows, registrar),
        "instructions": instructions,
    })
}

/// Which email security mechanisms a domain already has.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailSecurityPresence {
    pub has_mx_records: bool,
    pub spf: bool,
    pub dmarc: bool,
    pub dkim: bool,
    pub mta_sts: bool,
    pub tls_rpt: bool,
}

/// Recommended records for every email security mechanism the domain is
/// missing, rendered per registrar. Mechanisms already present produce no
/// rows.
pub fn email_security_config(domain: &str, presence: &EmailSecurityPresence) -> Value {
    let base = base_domain(domain);

    let recommended_spf = "v=spf1 include:_spf.google.com ~all".to_string();
    let recommended_dmarc = format!(
        "v=DMARC1; p=quarantine; rua=mailto:dmarc-reports@{}; pct=100",
        base
    );
    let dkim_placeholder = "v=DKIM1; k=rsa; p=YOUR_PUBLIC_KEY_HERE".to_string();
    let mta_sts_record = format!("v=STSv1; id={}", chrono::Utc::now().timestamp());
    let tls_rpt_record = format!("v=TLSRPTv1; rua=mailto:tls-reports@{}", base);

    let mut rows = Vec::new();
    if !presence.spf {
        rows.push(DnsRecordRow::new(
            "TXT",
            "@",
            recommended_spf,
            "Specifies authorized mail servers for your domain (SPF)",
        ));
    }
    if !presence.dmarc {
        rows.push(DnsRecordRow::new(
            "TXT",
            "_dmarc",
            recommended_dmarc,
            "Specifies policy for handling emails that fail authentication (DMARC)",
        ));
    }
    if !presence.dkim {
        rows.push(DnsRecordRow::new(
            "TXT",
            "google._domainkey",
            dkim_placeholder,
            "Digital signature for emails (DKIM) - get actual value from your email provider",
        ));
    }
    if !presence.mta_sts {
        rows.push(DnsRecordRow::new(
            "TXT",
            "_mta-sts",
            mta_sts_record,
            "Enforces TLS encryption for email delivery (MTA-STS)",
        ));
    }
    if !presence.tls_rpt {
        rows.push(DnsRecordRow::new(
            "TXT",
            "_smtp._tls",
            tls_rpt_record,
            "Requests reports about TLS connectivity problems (TLS-RPT)",
        ));
    }

    let mut config = serde_json::Map::new();
    for registrar in Registrar::ALL {
        let mut instructions = registrar.login_steps();
        instructions.push("Add each of the records listed above".to_string());
        instructions
            .push("For DKIM, get the actual public key value from your email service provider".to_string());
        instructions.push(registrar.propagation_note().to_string());
        config.insert(
            registrar.key().to_string(),
            registrar_section(&rows, registrar, instructions),
        );
    }

    config.insert(
        "verification".to_string(),
        json!({
            "command": format!("dig TXT {} +short", base),
            "notes": "Run this command to verify your SPF record is properly configured",
        }),
    );
    config.insert(
        "troubleshooting".to_string(),
        json!([
            "Ensure all DNS records are correctly set up",
            "Wait for DNS propagation (up to 48 hours)",
            "For DKIM, you must get the actual public key from your email provider",
            "Test your email configuration with a tool like mail-tester.com",
            "If using Google Workspace, follow their specific instructions for DKIM setup",
            "For Office 365, use their specific DKIM and SPF configuration",
        ]),
    );
    config.insert(
        "resources".to_string(),
        json!([
            { "name": "SPF Record Syntax", "url": "https://dmarcian.com/spf-syntax-table/" },
            { "name": "DMARC Record Generator", "url": "https://dmarcian.com/dmarc-record-generator/" },
            { "name": "Email Test Tool", "url": "https://www.mail-tester.com/" },
        ]),
    );

    Value::Object(config)
}

fn icp_category_rows(base: &str, canister_id: &str) -> Vec<(&'static str, &'static str, Vec<DnsRecordRow>)> {
    let target = format!("{}.icp0.io", canister_id);

    let icp = vec![
        DnsRecordRow::new("CNAME", "@", target.clone(), "Points your apex domain to your canister")
            .required(true)
            .dns_only(),
        DnsRecordRow::new("CNAME", "www", target, "Points www subdomain to your canister")
            .required(false)
            .dns_only(),
        DnsRecordRow::new(
            "TXT",
            "_canister-id",
            canister_id,
            "Associates your domain with your canister ID",
        )
        .required(true),
        DnsRecordRow::new(
            "TXT",
            "_acme-challenge",
            "delegated to ic",
            "Allows the IC to manage SSL certificates",
        )
        .required(true),
    ];

    let web3 = vec![
        DnsRecordRow::new(
            "TXT",
            "_dapp-info",
            format!("canister={}", canister_id),
            "Provides dApp information for Web3 discovery (optional)",
        )
        .category("web3"),
        DnsRecordRow::new(
            "TXT",
            "_web3-config",
            "network=ic",
            "Specifies the blockchain network for Web3 wallets (optional)",
        )
        .category("web3"),
    ];

    let email = vec![
        DnsRecordRow::new(
            "MX",
            "@",
            "1 aspmx.l.google.com",
            "Primary mail server for Google Workspace (optional)",
        )
        .category("email"),
        DnsRecordRow::new(
            "MX",
            "@",
            "5 alt1.aspmx.l.google.com",
            "Backup mail server for Google Workspace (optional)",
        )
        .category("email"),
        DnsRecordRow::new(
            "MX",
            "@",
            "10 alt2.aspmx.l.google.com",
            "Backup mail server for Google Workspace (optional)",
        )
        .category("email"),
    ];

    let email_security = vec![
        DnsRecordRow::new(
            "TXT",
            "@",
            "v=spf1 include:_spf.google.com ~all",
            "SPF record for email security with Google Workspace (optional)",
        )
        .category("email-security"),
        DnsRecordRow::new(
            "TXT",
            "_dmarc",
            format!("v=DMARC1; p=quarantine; rua=mailto:dmarc@{}", base),
            "DMARC policy for email security (optional)",
        )
        .category("email-security"),
        DnsRecordRow::new(
            "TXT",
            "google._domainkey",
            "v=DKIM1; k=rsa; p=YOUR_DKIM_PUBLIC_KEY_FROM_GOOGLE",
            "DKIM record for Google Workspace - replace with your actual key (optional)",
        )
        .category("email-security"),
    ];

    let ipv6 = vec![DnsRecordRow::new(
        "AAAA",
        "ipv6",
        "2606:4700:4700::1111",
        "Example IPv6 address for subdomain (for services outside IC)",
    )
    .category("ipv6")];

    let verification = vec![
        DnsRecordRow::new(
            "TXT",
            "@",
            "google-site-verification=YOUR_VERIFICATION_CODE",
            "For Google Search Console verification (replace with your code)",
        )
        .category("verification"),
        DnsRecordRow::new(
            "TXT",
            "@",
            "facebook-domain-verification=YOUR_VERIFICATION_CODE",
            "For Facebook Business verification (replace with your code)",
        )
        .category("verification"),
    ];

    let services = ["calendar", "drive", "mail"]
        .iter()
        .map(|sub| {
            DnsRecordRow::new(
                "CNAME",
                *sub,
                "ghs.googlehosted.com",
                format!(
                    "For Google Workspace {} (optional)",
                    match *sub {
                        "calendar" => "Calendar",
                        "drive" => "Drive",
                        _ => "Mail",
                    }
                ),
            )
            .category("services")
        })
        .collect();

    vec![
        ("icp", "Required records for Internet Computer integration", icp),
        ("web3", "Optional records for Web3 functionality", web3),
        ("email", "Optional records for email server configuration", email),
        (
            "emailSecurity",
            "Optional records for email security (SPF, DKIM, DMARC)",
            email_security,
        ),
        ("ipv6", "Optional IPv6 address records", ipv6),
        (
            "verification",
            "Optional domain verification records for various services",
            verification,
        ),
        ("services", "Optional records for additional services", services),
    ]
}

fn icp_instructions(registrar: Registrar) -> Vec<String> {
    let mut instructions = registrar.login_steps();
    instructions.push("Add each of the records listed above".to_string());
    if registrar == Registrar::Cloudflare {
        instructions.push(
            "Ensure \"Proxy status\" is set to \"DNS only\" (gray cloud) for CNAME records".to_string(),
        );
    }
    instructions.push(
        "Required records: Only the ICP records (CNAME for @ and www, _canister-id, _acme-challenge)"
            .to_string(),
    );
    instructions.push(
        "Optional records: Email, security, and other records are only needed if you're using those services"
            .to_string(),
    );
    instructions.push(registrar.propagation_note().to_string());
    instructions
}

/// The complete DNS configuration guide for hosting a canister behind a
/// custom domain: required IC records plus optional Web3, email, IPv6,
/// verification, and Google Workspace service records.
pub fn icp_dns_config(domain: &str, canister_id: &str) -> Value {
    let base = base_domain(domain);
    let categories = icp_category_rows(base, canister_id);

    let mut config = serde_json::Map::new();
    let mut instructions_by_registrar = serde_json::Map::new();

    for registrar in Registrar::ALL {
        let all_rows: Vec<Value> = categories
            .iter()
            .flat_map(|(_, _, rows)| render_rows(rows, registrar))
            .collect();
        let instructions = icp_instructions(registrar);
        instructions_by_registrar.insert(registrar.key().to_string(), json!(instructions));
        config.insert(
            registrar.key().to_string(),
            json!({ "records": all_rows, "instructions": instructions }),
        );
    }

    let mut by_category = serde_json::Map::new();
    for (name, description, rows) in &categories {
        let mut entry = serde_json::Map::new();
        for registrar in Registrar::ALL {
            entry.insert(registrar.key().to_string(), json!(render_rows(rows, registrar)));
        }
        entry.insert("description".to_string(), json!(description));
        by_category.insert(name.to_string(), Value::Object(entry));
    }
    config.insert("recordsByCategory".to_string(), Value::Object(by_category));
    config.insert("instructions".to_string(), Value::Object(instructions_by_registrar));

    config.insert(
        "verification".to_string(),
        json!({
            "command": format!(
                "dfx canister --network ic call rwlgt-iiaaa-aaaaa-aaaaa-cai validate_domain '(\"{}\")'",
                base
            ),
            "notes": "Run this command to verify your domain is properly configured",
        }),
    );
    config.insert(
        "troubleshooting".to_string(),
        json!([
            "Ensure all DNS records are correctly set up",
            "Wait for DNS propagation (up to 48 hours)",
            "Verify your canister ID is correct",
            "Check that your canister is deployed and running on the IC mainnet",
            "Run the verification command to check domain validation status",
            "If using Cloudflare, ensure Proxy is disabled (gray cloud) for CNAME records",
            "Some DNS providers don't support CNAME at the apex domain - consider using a different provider",
        ]),
    );
    config.insert(
        "additionalServices".to_string(),
        json!({
            "email": {
                "description": "Email server configuration allows you to receive emails at your domain",
                "providers": [
                    {
                        "name": "Google Workspace",
                        "setupUrl": "https://workspace.google.com/",
                        "notes": "Paid service with professional email, calendar, and collaboration tools",
                    },
                    {
                        "name": "Microsoft 365",
                        "setupUrl": "https://www.microsoft.com/microsoft-365",
                        "notes": "Business email with Outlook and Office applications",
                    },
                    {
                        "name": "Zoho Mail",
                        "setupUrl": "https://www.zoho.com/mail/",
                        "notes": "Free tier available for up to 5 users/5GB per user",
                    },
                ],
            },
            "webAnalytics": {
                "description": "Web analytics tools to track visitors to your IC canister",
                "providers": [
                    {
                        "name": "Google Analytics",
                        "setupUrl": "https://analytics.google.com/",
                        "notes": "Add Google's tracking code to your canister's HTML",
                    },
                    {
                        "name": "Plausible Analytics",
                        "setupUrl": "https://plausible.io/",
                        "notes": "Privacy-focused analytics with no cookies required",
                    },
                ],
            },
            "security": {
                "description": "Additional security recommendations",
                "recommendations": [
                    "Implement a Content Security Policy (CSP) in your canister's HTTP responses",
                    "Add DNSSEC to your domain registrar for additional DNS security",
                    "Consider using a firewall service like Cloudflare (but configure correctly for IC)",
                ],
            },
        }),
    );
    config.insert(
        "web3Services".to_string(),
        json!({
            "wallets": {
                "description": "Wallet integration for your Web3 dApp",
                "providers": [
                    {
                        "name": "Plug Wallet",
                        "setupUrl": "https://docs.plugwallet.ooo/",
                        "notes": "Popular wallet for Internet Computer dApps",
                    },
                    {
                        "name": "Stoic Wallet",
                        "setupUrl": "https://www.stoicwallet.com/",
                        "notes": "Web-based wallet with simple interface",
                    },
                    {
                        "name": "AstroX ME",
                        "setupUrl": "https://astrox.me/",
                        "notes": "Mobile wallet with additional features",
                    },
                ],
            },
            "identity": {
                "description": "Authentication solutions for your Web3 dApp",
                "providers": [
                    {
                        "name": "Internet Identity",
                        "setupUrl": "https://identity.ic0.app/",
                        "notes": "DFINITY's official authentication solution",
                    },
                    {
                        "name": "NFID",
                        "setupUrl": "https://nfid.one/",
                        "notes": "NFT-based identity solution",
                    },
                ],
            },
            "tokens": {
                "description": "Token standards and implementations",
                "standards": [
                    {
                        "name": "ICRC-1",
                        "url": "https://github.com/dfinity/ICRC-1",
                        "notes": "Standard fungible token interface for the Internet Computer",
                    },
                    {
                        "name": "ICRC-2",
                        "url": "https://github.com/dfinity/ICRC-2",
                        "notes": "Extends ICRC-1 with approve/transferFrom functionality",
                    },
                ],
            },
            "nfts": {
                "description": "NFT standards and implementations",
                "standards": [
                    {
                        "name": "EXT",
                        "url": "https://github.com/Toniq-Labs/extendable-token",
                        "notes": "Extensible token standard for NFTs",
                    },
                    {
                        "name": "DIP-721",
                        "url": "https://github.com/dfinity/DIP721",
                        "notes": "ERC-721 inspired NFT standard for the Internet Computer",
                    },
                ],
            },
        }),
    );
    config.insert(
        "icSpecific".to_string(),
        json!({
            "boundaryNodes": {
                "description": "The Internet Computer uses boundary nodes to handle incoming requests",
                "notes": "You don't need to configure these - they're managed automatically by the IC network",
            },
            "certificateProvisioning": {
                "description": "SSL certificates are automatically provisioned by the IC",
                "notes": "The _acme-challenge record allows the IC to verify domain ownership and issue certificates",
            },
            "assetCanisterSupport": {
                "description": "Your canister must support the HTTP Gateway protocol",
                "notes": "Most asset canisters and frontend frameworks for IC support this automatically",
            },
            "web3Features": {
                "description": "Web3 features specific to the Internet Computer",
                "features": [
                    {
                        "name": "Internet Identity",
                        "description": "Anonymous blockchain authentication",
                        "url": "https://internetcomputer.org/internet-identity",
                    },
                    {
                        "name": "Chain Key Signatures",
                        "description": "Threshold ECDSA signatures for cross-chain integration",
                        "url": "https://internetcomputer.org/docs/current/developer-docs/integrations/t-ecdsa/",
                    },
                    {
                        "name": "Bitcoin Integration",
                        "description": "Native Bitcoin integration",
                        "url": "https://internetcomputer.org/bitcoin-integration",
                    },
                    {
                        "name": "Ethereum Integration",
                        "description": "Integration with Ethereum and EVM chains",
                        "url": "https://internetcomputer.org/ethereum-integration",
                    },
                ],
            },
        }),
    );

    Value::Object(config)
}

/// What the requested configuration should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    #[default]
    Website,
    Email,
    Both,
}

impl ServiceType {
    pub fn wants_website(&self) -> bool {
        matches!(self, ServiceType::Website | ServiceType::Both)
    }

    pub fn wants_email(&self) -> bool {
        matches!(self, ServiceType::Email | ServiceType::Both)
    }
}

/// User selections driving the customized configuration.
#[derive(Debug, Clone)]
pub struct CustomizeOptions {
    pub domain: String,
    pub service_type: ServiceType,
    pub hosting_provider: String,
    pub email_provider: String,
    pub server_ip: Option<String>,
    pub subdomains: Vec<String>,
}

fn website_rows(options: &CustomizeOptions) -> Vec<DnsRecordRow> {
    let domain = &options.domain;
    match options.hosting_provider.as_str() {
        "odoo" => vec![
            DnsRecordRow::new(
                "CNAME",
                "www",
                format!("{}.odoo.com", domain),
                "Points www subdomain to your Odoo instance",
            ),
            DnsRecordRow::new(
                "ALIAS",
                "@",
                format!("{}.odoo.com", domain),
                "Points your apex domain to Odoo (Note: Not all DNS providers support ALIAS records, you may need to use a URL redirect)",
            ),
        ],
        "netlify" => vec![
            DnsRecordRow::new(
                "CNAME",
                "www",
                "your-site-name.netlify.app",
                "Points www subdomain to your Netlify site",
            ),
            DnsRecordRow::new("A", "@", "75.2.60.5", "Points your apex domain to Netlify"),
        ],
        "vercel" => vec![
            DnsRecordRow::new("A", "@", "76.76.21.21", "Points your apex domain to Vercel"),
            DnsRecordRow::new(
                "CNAME",
                "www",
                "cname.vercel-dns.com",
                "Points www subdomain to Vercel",
            ),
        ],
        "heroku" => vec![
            DnsRecordRow::new(
                "CNAME",
                "www",
                "your-app-name.herokuapp.com",
                "Points www subdomain to your Heroku app",
            ),
            DnsRecordRow::new(
                "ALIAS",
                "@",
                "your-app-name.herokuapp.com",
                "Points your apex domain to Heroku (Note: Not all DNS providers support ALIAS records)",
            ),
        ],
        _ => vec![
            DnsRecordRow::new(
                "A",
                "@",
                options.server_ip.clone().unwrap_or_else(|| "192.0.2.1".to_string()),
                "Points your domain to your web server",
            ),
            DnsRecordRow::new("CNAME", "www", "@", "Points www subdomain to your main domain"),
        ],
    }
}

fn email_rows(options: &CustomizeOptions) -> Vec<DnsRecordRow> {
    let domain = &options.domain;
    if options.hosting_provider == "odoo" {
        return vec![
            DnsRecordRow::new(
                "MX",
                "@",
                "10 mx1.mail.odoo.com",
                "Primary Odoo mail server (if using Odoo for email)",
            )
            .category("email"),
            DnsRecordRow::new(
                "MX",
                "@",
                "20 mx2.mail.odoo.com",
                "Secondary Odoo mail server (if using Odoo for email)",
            )
            .category("email"),
            DnsRecordRow::new(
                "TXT",
                "@",
                "v=spf1 include:_spf.odoo.com ~all",
                "SPF record for Odoo email (allows Odoo to send emails on behalf of your domain)",
            )
            .category("email-security"),
            DnsRecordRow::new(
                "TXT",
                "odoo._domainkey",
                ODOO_DKIM_KEY,
                "DKIM record for Odoo email (improves email deliverability)",
            )
            .category("email-security"),
            DnsRecordRow::new(
                "TXT",
                "_dmarc",
                format!("v=DMARC1; p=none; rua=mailto:dmarc-reports@{}", domain),
                "DMARC record for email authentication policy",
            )
            .category("email-security"),
        ];
    }

    match options.email_provider.as_str() {
        "googleWorkspace" => {
            let mut rows = vec![DnsRecordRow::new(
                "MX",
                "@",
                "1 aspmx.l.google.com",
                "Primary Google Workspace mail server",
            )
            .category("email")];
            for (priority, server) in [
                ("5", "alt1.aspmx.l.google.com"),
                ("5", "alt2.aspmx.l.google.com"),
                ("10", "alt3.aspmx.l.google.com"),
                ("10", "alt4.aspmx.l.google.com"),
            ] {
                rows.push(
                    DnsRecordRow::new(
                        "MX",
                        "@",
                        format!("{} {}", priority, server),
                        format!("Google Workspace mail server (priority {})", priority),
                    )
                    .category("email"),
                );
            }
            rows.push(
                DnsRecordRow::new(
                    "TXT",
                    "@",
                    "v=spf1 include:_spf.google.com ~all",
                    "SPF record for Google Workspace",
                )
                .category("email-security"),
            );
            rows
        }
        "microsoft365" => vec![
            DnsRecordRow::new(
                "MX",
                "@",
                format!("0 {}.mail.protection.outlook.com", domain.replace('.', "-")),
                "Microsoft 365 mail server",
            )
            .category("email"),
            DnsRecordRow::new(
                "TXT",
                "@",
                "v=spf1 include:spf.protection.outlook.com -all",
                "SPF record for Microsoft 365",
            )
            .category("email-security"),
        ],
        "zoho" => {
            let mut rows: Vec<DnsRecordRow> = [("10", "mx.zoho.com"), ("20", "mx2.zoho.com"), ("50", "mx3.zoho.com")]
                .iter()
                .map(|(priority, server)| {
                    DnsRecordRow::new(
                        "MX",
                        "@",
                        format!("{} {}", priority, server),
                        format!("Zoho mail server (priority {})", priority),
                    )
                    .category("email")
                })
                .collect();
            rows.push(
                DnsRecordRow::new("TXT", "@", "v=spf1 include:zoho.com ~all", "SPF record for Zoho Mail")
                    .category("email-security"),
            );
            rows
        }
        _ => vec![
            DnsRecordRow::new("MX", "@", "10 mail.example.com", "Replace with your actual mail server")
                .category("email"),
            DnsRecordRow::new(
                "TXT",
                "@",
                "v=spf1 include:_spf.example.com ~all",
                "Replace with your actual SPF record",
            )
            .category("email-security"),
        ],
    }
}

fn subdomain_rows(subdomains: &[String]) -> Vec<DnsRecordRow> {
    subdomains
        .iter()
        .filter_map(|subdomain| {
            let (value, platform) = match subdomain.as_str() {
                "blog" => ("your-blog-platform.com", "blog platform"),
                "shop" => ("your-ecommerce-platform.com", "e-commerce platform"),
                "app" => ("your-app-platform.com", "application platform"),
                "docs" => ("your-docs-platform.com", "documentation platform"),
                _ => return None,
            };
            Some(
                DnsRecordRow::new(
                    "CNAME",
                    subdomain.clone(),
                    value,
                    format!(
                        "Points {} subdomain to your {} (replace with actual URL)",
                        subdomain, platform
                    ),
                )
                .category("subdomains"),
            )
        })
        .collect()
}

/// Per-registrar setup steps for the selected providers.
pub fn generate_instructions(registrar: Registrar, options: &CustomizeOptions) -> Vec<String> {
    let mut instructions = registrar.login_steps();

    if options.service_type.wants_website() {
        match options.hosting_provider.as_str() {
            "odoo" => {
                instructions.push(
                    "Add the CNAME record pointing to your Odoo instance (e.g., yourdomain.odoo.com)"
                        .to_string(),
                );
                instructions.push(
                    "For the apex domain, use an ALIAS/ANAME record if your provider supports it".to_string(),
                );
                instructions.push(
                    "Otherwise, set up a URL redirect from the apex domain to the www subdomain".to_string(),
                );
                instructions
                    .push("In your Odoo dashboard, go to Settings > General Settings > Website".to_string());
                instructions.push("Click on 'Configure Domain Names' and add your domain".to_string());

                if options.service_type.wants_email() {
                    instructions.push("For email configuration with Odoo:".to_string());
                    instructions.push("1. Add the MX records pointing to Odoo's mail servers".to_string());
                    instructions.push(
                        "2. Add the SPF, DKIM, and DMARC records for email authentication".to_string(),
                    );
                    instructions.push("3. In Odoo, go to Settings > General Settings > Email".to_string());
                    instructions.push("4. Configure both Incoming and Outgoing Email Servers".to_string());
                    instructions.push(
                        "5. Set up mail aliases if needed (Settings > Technical > Email > Aliases)".to_string(),
                    );
                }

                instructions.push("If you're using OVH with Odoo:".to_string());
                instructions.push("1. Set up your domain in OVH first".to_string());
                instructions.push("2. Configure the DNS zone in OVH to point to Odoo".to_string());
                instructions
                    .push("3. Add a CNAME record for 'www' pointing to your Odoo subdomain".to_string());
                instructions.push(
                    "4. For the apex domain, use OVH's redirection service to point to your www subdomain"
                        .to_string(),
                );
                instructions.push(
                    "5. If using email, configure OVH's MX records to work with Odoo's email servers"
                        .to_string(),
                );
            }
            "netlify" => {
                instructions
                    .push("Add the A record pointing to Netlify's IP address (75.2.60.5)".to_string());
                instructions.push("Add the CNAME record for www pointing to your Netlify site".to_string());
                instructions.push(
                    "In your Netlify dashboard, add your custom domain in Site settings > Domain management"
                        .to_string(),
                );
            }
            "vercel" => {
                instructions
                    .push("Add the A record pointing to Vercel's IP address (76.76.21.21)".to_string());
                instructions
                    .push("Add the CNAME record for www pointing to cname.vercel-dns.com".to_string());
                instructions.push(
                    "In your Vercel dashboard, add your custom domain in Project settings > Domains".to_string(),
                );
            }
            "heroku" => {
                instructions.push("Add the CNAME record for www pointing to your Heroku app".to_string());
                instructions.push(
                    "For the apex domain, use an ALIAS/ANAME record if your provider supports it".to_string(),
                );
                instructions.push(
                    "In your Heroku dashboard, add your custom domain in App settings > Domains".to_string(),
                );
            }
            _ => {
                instructions.push("Add the A record pointing to your web server's IP address".to_string());
                instructions.push("Add the CNAME record for www pointing to your main domain".to_string());
            }
        }
    }

    if options.service_type.wants_email() {
        match options.email_provider.as_str() {
            "googleWorkspace" => {
                instructions.push("Add all the MX records for Google Workspace mail servers".to_string());
                instructions.push("Add the SPF record (TXT) for email authentication".to_string());
                instructions
                    .push("In Google Workspace Admin Console, verify your domain ownership".to_string());
            }
            "microsoft365" => {
                instructions.push("Add the MX record for Microsoft 365 mail server".to_string());
                instructions.push("Add the SPF record (TXT) for email authentication".to_string());
                instructions.push(
                    "In Microsoft 365 Admin Center, complete the domain verification process".to_string(),
                );
            }
            "zoho" => {
                instructions.push("Add all the MX records for Zoho mail servers".to_string());
                instructions.push("Add the SPF record (TXT) for email authentication".to_string());
                instructions.push("In Zoho Mail Admin Console, verify your domain ownership".to_string());
            }
            _ => {
                instructions.push("Add the MX record for your mail server".to_string());
                instructions.push("Add the SPF record (TXT) for email authentication".to_string());
            }
        }
    }

    if !options.subdomains.is_empty() {
        instructions.push("Add CNAME records for each of your subdomains".to_string());
        instructions
            .push("Configure your subdomain services to accept traffic from these subdomains".to_string());
    }

    instructions.push("Wait for DNS propagation (can take up to 48 hours)".to_string());
    instructions
}

fn hosting_provider_directory() -> Value {
    json!({
        "aws": {
            "name": "Amazon Web Services (AWS)",
            "instructions": [
                "Log in to your AWS Management Console",
                "Navigate to EC2 or Elastic Beanstalk where your application is hosted",
                "Find your instance's public IP address or load balancer URL",
                "Use this IP address or URL for your A record or CNAME record",
                "For Route 53 users: Create a hosted zone for your domain and AWS will provide nameservers to use at your registrar",
            ],
            "ipLocation": "EC2 Dashboard > Instances > Select your instance > Details tab > Public IPv4 address",
            "docsUrl": "https://docs.aws.amazon.com/Route53/latest/DeveloperGuide/routing-to-ec2-instance.html",
        },
        "ovh": {
            "name": "OVH",
            "instructions": [
                "Log in to your OVH Control Panel",
                "Go to 'Web Cloud' > 'Hosting' and select your hosting plan",
                "Find your server's IP address in the 'General Information' section",
                "For shared hosting: Use the provided 'Target' for your DNS records",
                "For VPS/dedicated servers: Use the server's IP address for your A record",
            ],
            "ipLocation": "OVH Control Panel > Web Cloud > Hosting > Your hosting plan > General Information",
            "docsUrl": "https://docs.ovh.com/gb/en/domains/web_hosting_general_information_about_dns_servers/",
        },
        "digitalocean": {
            "name": "DigitalOcean",
            "instructions": [
                "Log in to your DigitalOcean account",
                "Go to 'Droplets' and select your server",
                "Find your droplet's IP address in the main information panel",
                "Use this IP address for your A record",
                "For managed apps: Use the provided URL for a CNAME record",
            ],
            "ipLocation": "DigitalOcean Dashboard > Droplets > Select your droplet > IP Address field",
            "docsUrl": "https://www.digitalocean.com/community/tutorials/how-to-point-to-digitalocean-nameservers-from-common-domain-registrars",
        },
        "heroku": {
            "name": "Heroku",
            "instructions": [
                "Log in to your Heroku Dashboard",
                "Select your application",
                "Go to 'Settings' tab",
                "Add your domain in the 'Domains' section",
                "Heroku will provide you with a DNS target for your CNAME record",
                "Note: For apex domains (example.com), use Heroku's DNS service or your registrar's ALIAS/ANAME record",
            ],
            "ipLocation": "Heroku doesn't use direct IP addresses. Use the provided DNS target for CNAME records.",
            "docsUrl": "https://devcenter.heroku.com/articles/custom-domains",
        },
        "netlify": {
            "name": "Netlify",
            "instructions": [
                "Log in to your Netlify account",
                "Select your site",
                "Go to 'Domain settings' or 'Domain management'",
                "Click 'Add custom domain'",
                "Netlify will provide DNS instructions specific to your site",
                "For apex domains, Netlify provides special DNS records to use",
            ],
            "ipLocation": "Netlify doesn't use direct IP addresses. Use their provided DNS settings.",
            "docsUrl": "https://docs.netlify.com/domains-https/custom-domains/",
        },
        "vercel": {
            "name": "Vercel",
            "instructions": [
                "Log in to your Vercel dashboard",
                "Select your project",
                "Go to 'Settings' > 'Domains'",
                "Add your domain",
                "Vercel will provide specific DNS records to add at your registrar",
                "For apex domains, use the provided A records",
            ],
            "ipLocation": "Vercel doesn't use direct IP addresses. Use their provided DNS settings.",
            "docsUrl": "https://vercel.com/docs/concepts/projects/domains",
        },
        "odoo": {
            "name": "Odoo",
            "instructions": [
                "Log in to your Odoo account",
                "Go to 'Settings' > 'General Settings' > 'Website'",
                "Click on 'Configure Domain Names'",
                "Add your domain name and save",
                "Odoo will provide you with specific DNS records to add at your domain registrar",
                "You'll need to add a CNAME record pointing to your Odoo instance",
                "For apex domains, you may need to use your registrar's ALIAS/ANAME record or redirect service",
                "If using OVH or another provider with Odoo, you'll need to configure both services",
            ],
            "ipLocation": "Odoo doesn't use direct IP addresses. Use the CNAME target provided in your Odoo dashboard.",
            "docsUrl": "https://www.odoo.com/documentation/18.0/applications/websites/website/configuration/domain_names.html",
            "additionalInstructions": [
                "If you're using OVH with Odoo:",
                "1. Set up your domain in OVH first",
                "2. Configure the DNS zone in OVH to point to Odoo",
                "3. Add a CNAME record for 'www' pointing to your Odoo subdomain",
                "4. For the apex domain, use OVH's redirection service to point to your www subdomain",
                "5. Verify the configuration in your Odoo dashboard",
            ],
            "emailConfiguration": {
                "inbound": [
                    "To receive emails in Odoo, you need to configure incoming mail servers:",
                    "1. Go to Settings > General Settings > Email > Incoming Email Servers",
                    "2. Add a new server with your email provider's IMAP/POP details",
                    "3. Configure proper authentication (username/password)",
                    "4. Set up mail aliases if needed (Settings > Technical > Email > Aliases)",
                ],
                "outbound": [
                    "To send emails from Odoo, you need to configure outgoing mail servers:",
                    "1. Go to Settings > General Settings > Email > Outgoing Email Servers",
                    "2. Add a new server with your email provider's SMTP details",
                    "3. Configure proper authentication (username/password or API key)",
                    "4. Test the configuration by sending a test email",
                ],
                "dnsRecords": [
                    "For proper email delivery, you need these DNS records:",
                    "- MX records pointing to your email provider's mail servers",
                    "- SPF record (TXT) to authorize Odoo to send emails on behalf of your domain",
                    "- DKIM record (TXT) if you want to use DKIM signing for better deliverability",
                    "- DMARC record (TXT) to specify email authentication policy",
                ],
            },
        },
        "cpanel": {
            "name": "cPanel (Shared Hosting)",
            "instructions": [
                "Log in to your cPanel account",
                "Look for 'Shared IP Address' on the main dashboard or under 'General Information'",
                "Alternatively, check your welcome email from your hosting provider",
                "Use this IP address for your A record",
                "For email, use the mail server information provided by your host",
            ],
            "ipLocation": "cPanel Dashboard > Main page > Shared IP Address",
            "docsUrl": "https://docs.cpanel.net/cpanel/domains/domains-home/",
        },
    })
}

fn email_service_directory() -> Value {
    json!({
        "googleWorkspace": {
            "name": "Google Workspace (formerly G Suite)",
            "instructions": [
                "Sign up for Google Workspace",
                "Add your domain during the setup process",
                "Google will provide specific MX records to add to your DNS",
                "Typical Google MX records include multiple servers with different priorities",
                "Also add the required TXT records for SPF and DKIM verification",
            ],
            "mxRecords": [
                { "priority": "1", "value": "aspmx.l.google.com" },
                { "priority": "5", "value": "alt1.aspmx.l.google.com" },
                { "priority": "5", "value": "alt2.aspmx.l.google.com" },
                { "priority": "10", "value": "alt3.aspmx.l.google.com" },
                { "priority": "10", "value": "alt4.aspmx.l.google.com" },
            ],
            "docsUrl": "https://support.google.com/a/answer/140034",
        },
        "microsoft365": {
            "name": "Microsoft 365",
            "instructions": [
                "Sign up for Microsoft 365",
                "Add your domain during the setup process",
                "Microsoft will provide specific MX records to add to your DNS",
                "Add the required TXT records for SPF and DKIM verification",
                "Microsoft also requires specific CNAME records for service verification",
            ],
            "mxRecords": [{ "priority": "0", "value": "your-domain-com.mail.protection.outlook.com" }],
            "docsUrl": "https://docs.microsoft.com/en-us/microsoft-365/admin/setup/add-domain",
        },
        "zoho": {
            "name": "Zoho Mail",
            "instructions": [
                "Sign up for Zoho Mail",
                "Add your domain during the setup process",
                "Zoho will provide specific MX records to add to your DNS",
                "Add the required TXT records for SPF and DKIM verification",
                "Verify domain ownership with a TXT or CNAME record",
            ],
            "mxRecords": [
                { "priority": "10", "value": "mx.zoho.com" },
                { "priority": "20", "value": "mx2.zoho.com" },
                { "priority": "50", "value": "mx3.zoho.com" },
            ],
            "docsUrl": "https://www.zoho.com/mail/help/adminconsole/domain-verification.html",
        },
    })
}

fn subdomain_service_directory() -> Value {
    json!({
        "blog": {
            "name": "Blog Subdomain",
            "description": "Configure a blog.yourdomain.com subdomain",
            "options": [
                {
                    "name": "WordPress",
                    "instructions": "Create a CNAME record pointing blog.yourdomain.com to your WordPress hosting",
                    "record": { "type": "CNAME", "host": "blog", "value": "your-wordpress-url.com" },
                },
                {
                    "name": "Ghost",
                    "instructions": "Create a CNAME record pointing blog.yourdomain.com to your Ghost hosting",
                    "record": { "type": "CNAME", "host": "blog", "value": "your-ghost-url.com" },
                },
            ],
        },
        "shop": {
            "name": "Shop/Store Subdomain",
            "description": "Configure a shop.yourdomain.com or store.yourdomain.com subdomain",
            "options": [
                {
                    "name": "Shopify",
                    "instructions": "Create a CNAME record pointing shop.yourdomain.com to your Shopify store",
                    "record": { "type": "CNAME", "host": "shop", "value": "shops.myshopify.com" },
                },
                {
                    "name": "WooCommerce",
                    "instructions": "Create a CNAME record pointing shop.yourdomain.com to your WooCommerce hosting",
                    "record": { "type": "CNAME", "host": "shop", "value": "your-woocommerce-url.com" },
                },
            ],
        },
        "app": {
            "name": "App Subdomain",
            "description": "Configure an app.yourdomain.com subdomain for web applications",
            "options": [
                {
                    "name": "Custom Application",
                    "instructions": "Create a CNAME record pointing app.yourdomain.com to your application hosting",
                    "record": { "type": "CNAME", "host": "app", "value": "your-app-url.herokuapp.com" },
                },
            ],
        },
        "docs": {
            "name": "Documentation Subdomain",
            "description": "Configure a docs.yourdomain.com subdomain for documentation",
            "options": [
                {
                    "name": "GitBook",
                    "instructions": "Create a CNAME record pointing docs.yourdomain.com to your GitBook site",
                    "record": { "type": "CNAME", "host": "docs", "value": "your-gitbook-url.gitbook.io" },
                },
                {
                    "name": "ReadTheDocs",
                    "instructions": "Create a CNAME record pointing docs.yourdomain.com to ReadTheDocs",
                    "record": { "type": "CNAME", "host": "docs", "value": "your-docs.readthedocs.io" },
                },
            ],
        },
    })
}

fn additional_service_directory() -> Value {
    json!({
        "webHosting": {
            "description": "Web hosting providers for your website",
            "providers": [
                {
                    "name": "Netlify",
                    "setupUrl": "https://www.netlify.com/",
                    "notes": "Great for static sites and JAMstack applications",
                },
                {
                    "name": "Vercel",
                    "setupUrl": "https://vercel.com/",
                    "notes": "Optimized for Next.js and React applications",
                },
                {
                    "name": "DigitalOcean",
                    "setupUrl": "https://www.digitalocean.com/",
                    "notes": "Cloud VPS hosting with more control",
                },
            ],
        },
        "email": {
            "description": "Email providers for your domain",
            "providers": [
                {
                    "name": "Google Workspace",
                    "setupUrl": "https://workspace.google.com/",
                    "notes": "Professional email with Gmail interface",
                },
                {
                    "name": "Microsoft 365",
                    "setupUrl": "https://www.microsoft.com/microsoft-365",
                    "notes": "Email with Outlook and Office applications",
                },
                {
                    "name": "Zoho Mail",
                    "setupUrl": "https://www.zoho.com/mail/",
                    "notes": "Free tier available for up to 5 users",
                },
            ],
        },
        "ssl": {
            "description": "SSL certificate providers",
            "providers": [
                {
                    "name": "Let's Encrypt",
                    "setupUrl": "https://letsencrypt.org/",
                    "notes": "Free SSL certificates with automatic renewal",
                },
                {
                    "name": "Cloudflare",
                    "setupUrl": "https://www.cloudflare.com/ssl/",
                    "notes": "Free SSL with Cloudflare's CDN",
                },
                {
                    "name": "SSL.com",
                    "setupUrl": "https://www.ssl.com/",
                    "notes": "Paid SSL certificates with extended validation",
                },
            ],
        },
    })
}

/// Baseline web-and-email DNS setup with example values, plus the provider
/// directories clients browse before selecting options.
pub fn standard_dns_config(domain: &str) -> Value {
    let rows = vec![
        DnsRecordRow::new("A", "@", "192.0.2.1", "Points your domain to your web server").proxied(true),
        DnsRecordRow::new("CNAME", "www", "@", "Points www subdomain to your main domain").proxied(true),
        DnsRecordRow::new("MX", "@", "10 mail.example.com", "Configures email for your domain"),
        DnsRecordRow::new(
            "TXT",
            "@",
            "v=spf1 include:_spf.example.com ~all",
            "SPF record for email security",
        ),
    ];

    let mut config = serde_json::Map::new();
    for registrar in Registrar::ALL {
        let mut instructions = registrar.login_steps();
        instructions.push("Add each of the records listed above".to_string());
        instructions
            .push("Replace example values with your actual web server IP and mail server".to_string());
        instructions.push(match registrar {
            Registrar::Cloudflare => {
                "Cloudflare provides additional security and performance benefits".to_string()
            }
            _ => "Wait for DNS propagation (can take up to 48 hours)".to_string(),
        });
        config.insert(
            registrar.key().to_string(),
            registrar_section(&rows, registrar, instructions),
        );
    }

    config.insert(
        "verification".to_string(),
        json!({
            "command": format!("dig {} +noall +answer", domain),
            "notes": "Run this command to verify your DNS configuration",
        }),
    );
    config.insert(
        "troubleshooting".to_string(),
        json!([
            "Ensure all DNS records are correctly set up",
            "Wait for DNS propagation (up to 48 hours)",
            "Verify your web server is properly configured",
            "Check that your SSL certificate is valid if using HTTPS",
            "Test your email configuration",
        ]),
    );
    config.insert(
        "resources".to_string(),
        json!([
            { "name": "DNS Basics Guide", "url": "https://www.cloudflare.com/learning/dns/what-is-dns/" },
            { "name": "Web Hosting Guide", "url": "https://www.hostinger.com/tutorials/website-hosting/" },
            { "name": "Email Configuration Guide", "url": "https://support.google.com/a/answer/140034" },
        ]),
    );
    config.insert("hostingProviders".to_string(), hosting_provider_directory());
    config.insert("emailServices".to_string(), email_service_directory());
    config.insert("subdomainServices".to_string(), subdomain_service_directory());
    config.insert("additionalServices".to_string(), additional_service_directory());

    Value::Object(config)
}

/// Replace the baseline records and instructions with ones tailored to the
/// user's service type, hosting provider, email provider, and subdomains,
/// and surface the selected provider directory entries.
pub fn customize_dns_config(options: &CustomizeOptions) -> Value {
    let mut config = match standard_dns_config(&options.domain) {
        Value::Object(map) => map,
        _ => unreachable!("standard config is always an object"),
    };

    let mut rows = Vec::new();
    if options.service_type.wants_website() {
        rows.extend(website_rows(options));
    }
    if options.service_type.wants_email() {
        rows.extend(email_rows(options));
    }
    rows.extend(subdomain_rows(&options.subdomains));

    for registrar in Registrar::ALL {
        config.insert(
            registrar.key().to_string(),
            registrar_section(&rows, registrar, generate_instructions(registrar, options)),
        );
    }

    let selected_hosting = config
        .get("hostingProviders")
        .and_then(|providers| providers.get(&options.hosting_provider))
        .cloned();
    if let Some(selected) = selected_hosting {
        config.insert("selectedHostingProvider".to_string(), selected);
    }

    let selected_email = config
        .get("emailServices")
        .and_then(|services| services.get(&options.email_provider))
        .cloned();
    if let Some(selected) = selected_email {
        config.insert("selectedEmailProvider".to_string(), selected);
    }

    Value::Object(config)
}

/// Step-by-step guide for wiring Odoo's email aliases and mail servers to a
/// domain hosted on Odoo.
pub fn odoo_email_config(domain: &str) -> Value {
    json!({
        "aliasSetup": {
            "title": "Configuring email aliases in Odoo",
            "description": "Email aliases let Odoo receive emails and process them automatically.",
            "steps": [
                {
                    "title": "Configure the incoming mail server",
                    "instructions": [
                        "1. Go to Settings > General > Email > Incoming Email Servers",
                        "2. Click 'Create'",
                        "3. Fill in the following information:",
                        format!("   - Name: Incoming server for {}", domain),
                        "   - Server type: IMAP or POP",
                        "   - Server: mail.yourserver.com (replace with your IMAP/POP server)",
                        "   - Port: 993 (IMAP) or 995 (POP)",
                        "   - SSL/TLS: Enabled",
                        format!("   - Username: your_email@{}", domain),
                        "   - Password: your password",
                        "4. Click 'Test and Confirm'",
                    ],
                },
                {
                    "title": "Create an email alias",
                    "instructions": [
                        "1. Go to Settings > Technical > Email > Aliases",
                        "2. Click 'Create'",
                        "3. Fill in the following information:",
                        "   - Alias: alias_name (e.g. support, info, contact)",
                        format!("   - Full name: alias_name@{}", domain),
                        "   - Destination model: Choose the appropriate model (e.g. CRM Lead, Helpdesk Ticket)",
                        "   - Default values: Configure defaults for the records created",
                        "   - Security: Choose who may send emails to this alias",
                        "4. Click 'Save'",
                    ],
                },
                {
                    "title": "Configure the DNS records",
                    "instructions": [
                        "Make sure the MX records point to the appropriate mail servers:",
                        "- MX: @ 10 mx1.mail.odoo.com",
                        "- MX: @ 20 mx2.mail.odoo.com",
                        "- SPF: @ TXT \"v=spf1 include:_spf.odoo.com ~all\"",
                        format!("- DKIM: odoo._domainkey TXT \"{}\"", ODOO_DKIM_KEY),
                    ],
                },
            ],
            "examples": [
                {
                    "title": "Example alias for customer support",
                    "description": format!(
                        "Create a support@{} alias that automatically creates helpdesk tickets",
                        domain
                    ),
                    "configuration": {
                        "alias": "support",
                        "model": "helpdesk.ticket",
                        "defaultValues": { "team_id": "Customer Support", "priority": "2" },
                    },
                },
                {
                    "title": "Example alias for leads",
                    "description": format!(
                        "Create an info@{} alias that automatically creates CRM leads",
                        domain
                    ),
                    "configuration": {
                        "alias": "info",
                        "model": "crm.lead",
                        "defaultValues": { "type": "opportunity", "team_id": "Sales" },
                    },
                },
            ],
            "catchAllAlias": {
                "title": "Configuring a catch-all alias",
                "description": "A catch-all alias captures every email sent to an unrecognized address on your domain",
                "instructions": [
                    "1. Go to Settings > Technical > Email > Aliases",
                    "2. Create a new alias with an empty 'Alias' field",
                    "3. Set the destination model and default values",
                    "4. Enable the 'Catch-All' option",
                ],
            },
        },
        "serverSetup": {
            "title": "Configuring mail servers in Odoo",
            "inbound": {
                "title": "Incoming mail server",
                "description": "Configuration for receiving emails in Odoo",
                "instructions": [
                    "1. Go to Settings > General > Email > Incoming Email Servers",
                    "2. Click 'Create'",
                    "3. Configure the IMAP/POP connection settings",
                    "4. Enable 'Create a New Record' for the appropriate models",
                    "5. Configure the email fetch frequency",
                ],
                "options": [
                    {
                        "name": "Create a New Record",
                        "description": "Automatically creates records from incoming emails",
                    },
                    {
                        "name": "Update an Existing Record",
                        "description": "Updates existing records with information from emails",
                    },
                    {
                        "name": "Do Not Update the Record",
                        "description": "Simply attaches the email to the existing record without updating it",
                    },
                ],
            },
            "outbound": {
                "title": "Outgoing mail server",
                "description": "Configuration for sending emails from Odoo",
                "instructions": [
                    "1. Go to Settings > General > Email > Outgoing Email Servers",
                    "2. Click 'Create'",
                    "3. Configure the SMTP settings",
                    "4. Test the connection",
                    "5. Set this server as the default if needed",
                ],
            },
        },
        "resources": [
            {
                "title": "Odoo documentation on email communication",
                "url": "https://www.odoo.com/documentation/18.0/applications/general/email_communication.html",
            },
            {
                "title": "Configuring incoming mail servers",
                "url": "https://www.odoo.com/documentation/18.0/applications/general/email_communication/email_servers_inbound.html",
            },
            {
                "title": "Configuring outgoing mail servers",
                "url": "https://www.odoo.com/documentation/18.0/applications/general/email_communication/email_servers_outbound.html",
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options(service_type: ServiceType, hosting: &str, email: &str) -> CustomizeOptions {
        CustomizeOptions {
            domain: "example.com".to_string(),
            service_type,
            hosting_provider: hosting.to_string(),
            email_provider: email.to_string(),
            server_ip: None,
            subdomains: Vec::new(),
        }
    }

    #[test]
    fn test_row_renders_registrar_dialects() {
        let row = DnsRecordRow::new("TXT", "_dmarc", "v=DMARC1; p=none", "policy");

        let namecheap = row.to_value(Registrar::Namecheap);
        assert_eq!(namecheap["host"], "_dmarc");
        assert_eq!(namecheap["value"], "v=DMARC1; p=none");
        assert_eq!(namecheap["ttl"], "Automatic");
        assert!(namecheap.get("name").is_none());
        assert!(namecheap.get("content").is_none());

        let cloudflare = row.to_value(Registrar::Cloudflare);
        assert_eq!(cloudflare["name"], "_dmarc");
        assert_eq!(cloudflare["content"], "v=DMARC1; p=none");
        assert_eq!(cloudflare["ttl"], "Auto");
        assert!(cloudflare.get("value").is_none());

        let godaddy = row.to_value(Registrar::Godaddy);
        assert_eq!(godaddy["name"], "_dmarc");
        assert_eq!(godaddy["value"], "v=DMARC1; p=none");
        assert_eq!(godaddy["ttl"], "1 Hour");
    }

    #[test]
    fn test_alias_renders_as_cname_on_cloudflare() {
        let row = DnsRecordRow::new("ALIAS", "@", "example.odoo.com", "apex");
        assert_eq!(row.to_value(Registrar::Cloudflare)["type"], "CNAME");
        assert_eq!(row.to_value(Registrar::Namecheap)["type"], "ALIAS");
        assert_eq!(row.to_value(Registrar::Godaddy)["type"], "ALIAS");
    }

    #[test]
    fn test_dns_only_note_applies_to_cloudflare_only() {
        let row = DnsRecordRow::new("CNAME", "@", "x.icp0.io", "apex record").dns_only();
        let cloudflare = row.to_value(Registrar::Cloudflare);
        assert_eq!(cloudflare["proxied"], false);
        assert_eq!(cloudflare["notes"], CLOUDFLARE_DNS_ONLY_NOTE);

        let namecheap = row.to_value(Registrar::Namecheap);
        assert_eq!(namecheap["notes"], "apex record");
        assert!(namecheap.get("proxied").is_none());
    }

    #[test]
    fn test_email_security_config_only_missing_mechanisms() {
        let presence = EmailSecurityPresence {
            has_mx_records: true,
            spf: true,
            dmarc: false,
            dkim: true,
            mta_sts: true,
            tls_rpt: true,
        };
        let config = email_security_config("example.com", &presence);
        let records = config["namecheap"]["records"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["host"], "_dmarc");
        assert!(records[0]["value"]
            .as_str()
            .unwrap()
            .contains("dmarc-reports@example.com"));
    }

    #[test]
    fn test_email_security_config_all_missing() {
        let config = email_security_config("www.example.com", &EmailSecurityPresence::default());
        for registrar in ["namecheap", "cloudflare", "godaddy"] {
            assert_eq!(config[registrar]["records"].as_array().unwrap().len(), 5);
        }
        // Template addresses are derived from the apex, not the www host.
        assert!(config["verification"]["command"]
            .as_str()
            .unwrap()
            .contains("example.com"));
    }

    #[test]
    fn test_icp_dns_config_shape() {
        let config = icp_dns_config("example.com", "aaaaa-bbbbb-ccccc-ddddd-eee");

        let records = config["namecheap"]["records"].as_array().unwrap();
        assert_eq!(records[0]["type"], "CNAME");
        assert_eq!(records[0]["value"], "aaaaa-bbbbb-ccccc-ddddd-eee.icp0.io");
        assert_eq!(records[0]["required"], true);

        let icp_cloudflare = config["recordsByCategory"]["icp"]["cloudflare"].as_array().unwrap();
        assert_eq!(icp_cloudflare[0]["proxied"], false);
        assert_eq!(icp_cloudflare[0]["content"], "aaaaa-bbbbb-ccccc-ddddd-eee.icp0.io");

        assert!(config["verification"]["command"]
            .as_str()
            .unwrap()
            .contains("validate_domain"));
        assert!(config["recordsByCategory"]["emailSecurity"].is_object());
        assert!(config["icSpecific"]["certificateProvisioning"].is_object());
    }

    #[test]
    fn test_customize_odoo_both() {
        let config = customize_dns_config(&options(ServiceType::Both, "odoo", "other"));
        let records = config["namecheap"]["records"].as_array().unwrap();

        let values: Vec<&str> = records.iter().map(|r| r["value"].as_str().unwrap()).collect();
        assert!(values.contains(&"example.com.odoo.com"));
        assert!(values.contains(&"10 mx1.mail.odoo.com"));
        assert!(values.contains(&"20 mx2.mail.odoo.com"));
        assert!(values.contains(&"v=spf1 include:_spf.odoo.com ~all"));
        assert!(values
            .iter()
            .any(|v| v.contains("dmarc-reports@example.com")));

        assert_eq!(config["selectedHostingProvider"]["name"], "Odoo");
    }

    #[test]
    fn test_customize_vercel_website_only() {
        let config = customize_dns_config(&options(ServiceType::Website, "vercel", "other"));
        let records = config["godaddy"]["records"].as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["value"], "76.76.21.21");
        assert_eq!(records[1]["value"], "cname.vercel-dns.com");

        // No email rows for a website-only request.
        assert!(!records.iter().any(|r| r["type"] == "MX"));
    }

    #[test]
    fn test_customize_microsoft365_mx_host() {
        let config = customize_dns_config(&options(ServiceType::Email, "other", "microsoft365"));
        let records = config["cloudflare"]["records"].as_array().unwrap();
        let mx = records.iter().find(|r| r["type"] == "MX").unwrap();
        assert_eq!(mx["content"], "0 example-com.mail.protection.outlook.com");
    }

    #[test]
    fn test_customize_google_workspace_mx_count() {
        let config = customize_dns_config(&options(ServiceType::Email, "other", "googleWorkspace"));
        let records = config["namecheap"]["records"].as_array().unwrap();
        let mx_count = records.iter().filter(|r| r["type"] == "MX").count();
        assert_eq!(mx_count, 5);
    }

    #[test]
    fn test_customize_custom_server_ip_and_subdomains() {
        let mut opts = options(ServiceType::Website, "other", "other");
        opts.server_ip = Some("203.0.113.9".to_string());
        opts.subdomains = vec!["blog".to_string(), "unknown".to_string(), "docs".to_string()];

        let config = customize_dns_config(&opts);
        let records = config["namecheap"]["records"].as_array().unwrap();
        assert_eq!(records[0]["value"], "203.0.113.9");

        let subdomain_hosts: Vec<&str> = records
            .iter()
            .filter(|r| r["category"] == "subdomains")
            .map(|r| r["host"].as_str().unwrap())
            .collect();
        assert_eq!(subdomain_hosts, vec!["blog", "docs"]);
    }

    #[test]
    fn test_instructions_follow_selections() {
        let opts = options(ServiceType::Both, "netlify", "zoho");
        let instructions = generate_instructions(Registrar::Cloudflare, &opts);
        assert!(instructions.iter().any(|i| i.contains("75.2.60.5")));
        assert!(instructions.iter().any(|i| i.contains("Zoho")));
        assert_eq!(instructions[0], "Log in to your Cloudflare account");
    }

    #[test]
    fn test_odoo_email_config_rendered() {
        let config = odoo_email_config("example.com");
        assert!(config["aliasSetup"]["steps"].as_array().unwrap().len() == 3);
        let step = &config["aliasSetup"]["steps"][0]["instructions"];
        assert!(step
            .as_array()
            .unwrap()
            .iter()
            .any(|i| i.as_str().unwrap().contains("your_email@example.com")));
        assert!(config["serverSetup"]["outbound"]["instructions"].is_array());
    }

    #[test]
    fn test_standard_config_directories_present() {
        let config = standard_dns_config("example.com");
        assert!(config["hostingProviders"]["aws"].is_object());
        assert!(config["emailServices"]["zoho"].is_object());
        assert!(config["subdomainServices"]["shop"].is_object());
        assert!(config["additionalServices"]["ssl"].is_object());
        assert!(config["verification"]["command"]
            .as_str()
            .unwrap()
            .contains("example.com"));
    }
}
