//! Web2 domain configuration route
//!
//! Profiles the domain's current DNS and web footprint, checks purchase
//! availability, and produces a DNS configuration tailored to the selected
//! service type, hosting provider, email provider, and subdomains.

use crate::{
    api_handler::{require_json, sanitize_domain, ApiResult},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use domain_core::availability::{
    check_domain_availability, check_domain_info, AvailabilityReport, DomainInfo,
};
use domain_core::templates::{self, CustomizeOptions, ServiceType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Request body for POST /api/domain-configuration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainConfigurationRequest {
    pub domain: String,
    #[serde(default)]
    pub service_type: ServiceType,
    #[serde(default)]
    pub hosting_provider: Option<String>,
    #[serde(default)]
    pub email_provider: Option<String>,
    #[serde(default)]
    pub server_ip: Option<String>,
    #[serde(default)]
    pub subdomains: Vec<String>,
}

/// Registration state plus purchase guidance for the requested domain.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainStatus {
    pub available: bool,
    pub registered: bool,
    pub message: String,
    pub purchase_info: AvailabilityReport,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_configuration: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_configuration: Option<ExistingWebConfiguration>,
}

/// Existing web and email setup found on a registered domain.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingWebConfiguration {
    pub has_website: bool,
    pub has_email: bool,
    #[serde(rename = "hasSSL")]
    pub has_ssl: bool,
    pub records: Map<String, Value>,
}

/// Response body for POST /api/domain-configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainConfigurationResponse {
    pub domain: String,
    pub domain_info: DomainInfo,
    pub domain_availability: DomainStatus,
    pub dns_config: Value,
    pub odoo_email_config: Option<Value>,
    pub status: String,
    pub service_type: ServiceType,
    pub hosting_provider: String,
    pub email_provider: String,
    pub subdomains: Vec<String>,
}

/// POST /api/domain-configuration
#[instrument(skip_all, fields(domain, request_id))]
pub async fn domain_configuration_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DomainConfigurationRequest>, JsonRejection>,
) -> ApiResult<DomainConfigurationResponse> {
    let request_id = Uuid::new_v4().to_string();
    tracing::Span::current().record("request_id", request_id.as_str());

    let request = require_json(payload)?;
    let domain = sanitize_domain(&request.domain)?;
    tracing::Span::current().record("domain", domain.as_str());
    let hosting_provider = request.hosting_provider.unwrap_or_else(|| "other".to_string());
    let email_provider = request.email_provider.unwrap_or_else(|| "other".to_string());

    info!(
        "Building domain configuration for {} (service={:?}, hosting={}, email={})",
        domain, request.service_type, hosting_provider, email_provider
    );

    let domain_info = check_domain_info(&state.doh, &state.http, &domain).await;
    let availability = check_domain_availability(&state.doh, &state.whois, &domain).await;

    let existing_configuration = domain_info.registered.then(|| ExistingWebConfiguration {
        has_website: domain_info.has_website,
        has_email: domain_info.has_email,
        has_ssl: domain_info.has_ssl,
        records: domain_info.dns_records.clone(),
    });
    let domain_availability = DomainStatus {
        available: !domain_info.registered,
        registered: domain_info.registered,
        message: if domain_info.registered {
            "Domain is already registered".to_string()
        } else {
            "Domain appears to be available for registration".to_string()
        },
        purchase_info: availability,
        has_configuration: domain_info.registered
            && (domain_info.has_website || domain_info.has_email),
        existing_configuration,
    };

    let options = CustomizeOptions {
        domain: domain.clone(),
        service_type: request.service_type,
        hosting_provider: hosting_provider.clone(),
        email_provider: email_provider.clone(),
        server_ip: request.server_ip.filter(|ip| !ip.is_empty()),
        subdomains: request.subdomains.clone(),
    };
    let dns_config = templates::customize_dns_config(&options);

    let odoo_email_config = (request.service_type.wants_email() && hosting_provider == "odoo")
        .then(|| templates::odoo_email_config(&domain));

    Ok(Json(DomainConfigurationResponse {
        domain,
        domain_info,
        domain_availability,
        dns_config,
        odoo_email_config,
        status: "success".to_string(),
        service_type: request.service_type,
        hosting_provider,
        email_provider,
        subdomains: request.subdomains,
    }))
}
