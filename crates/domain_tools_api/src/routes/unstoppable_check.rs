//! Unstoppable Domains check route
//!
//! Classifies the domain against the Unstoppable TLD list, estimates
//! registration status, and returns the registrar configuration guide plus
//! Web3 readiness advisories. Unstoppable domains are managed on-chain, so
//! no DNS or registry lookups are issued; the whole response is computed
//! locally.

use crate::{
    api_handler::{require_json, sanitize_domain, ApiResult},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use domain_core::availability::AvailabilityReport;
use domain_core::unstoppable::{
    check_unstoppable_availability, is_unstoppable_domain, unstoppable_dns_config, web3_checks,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Request body for POST /api/unstoppable-check
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnstoppableCheckRequest {
    pub domain: String,
    #[serde(default)]
    pub web3_features: Vec<String>,
}

/// Response body for POST /api/unstoppable-check
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnstoppableCheckResponse {
    pub domain: String,
    pub is_unstoppable_domain: bool,
    pub domain_availability: AvailabilityReport,
    pub dns_config: Value,
    pub web3_checks: Value,
    pub status: String,
}

/// POST /api/unstoppable-check
#[instrument(skip_all, fields(domain, request_id))]
pub async fn unstoppable_check_handler(
    State(_state): State<Arc<AppState>>,
    payload: Result<Json<UnstoppableCheckRequest>, JsonRejection>,
) -> ApiResult<UnstoppableCheckResponse> {
    let request_id = Uuid::new_v4().to_string();
    tracing::Span::current().record("request_id", request_id.as_str());

    let request = require_json(payload)?;
    let domain = sanitize_domain(&request.domain)?;
    tracing::Span::current().record("domain", domain.as_str());

    let is_unstoppable = is_unstoppable_domain(&domain);
    info!("Checking Unstoppable domain {} (unstoppable={})", domain, is_unstoppable);

    let domain_availability = check_unstoppable_availability(&domain);
    let dns_config = unstoppable_dns_config(&domain);

    Ok(Json(UnstoppableCheckResponse {
        is_unstoppable_domain: is_unstoppable,
        domain_availability,
        dns_config,
        web3_checks: web3_checks(&request.web3_features),
        domain,
        status: "success".to_string(),
    }))
}
