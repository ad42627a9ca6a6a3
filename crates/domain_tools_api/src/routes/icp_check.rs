//! Internet Computer custom-domain check route
//!
//! Validates the canister ID, runs the DNS checklist from the IC custom
//! domains guide, verifies the canister against the dashboard, and returns
//! the full configuration guide plus downloadable setup files.

use crate::{
    api_handler::{require_json, sanitize_domain, ApiError, ApiResult},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use domain_core::availability::{check_domain_availability, AvailabilityReport};
use domain_core::icp::{
    canister_info, config_files, perform_icp_dns_checks, validate_canister_id, web3_checks,
    CanisterInfo, ConfigFiles, IcpDnsChecks,
};
use domain_core::templates;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Request body for POST /api/icp-check
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcpCheckRequest {
    pub domain: String,
    pub canister_id: String,
    #[serde(default)]
    pub web3_features: Vec<String>,
}

/// Response body for POST /api/icp-check
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IcpCheckResponse {
    pub domain: String,
    pub canister_id: String,
    pub is_icp_domain: bool,
    pub domain_availability: AvailabilityReport,
    pub canister_info: CanisterInfo,
    pub dns_checks: IcpDnsChecks,
    pub dns_config: Value,
    pub web3_checks: Value,
    pub config_files: ConfigFiles,
    pub status: String,
}

/// POST /api/icp-check
#[instrument(skip_all, fields(domain, canister_id, request_id))]
pub async fn icp_check_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IcpCheckRequest>, JsonRejection>,
) -> ApiResult<IcpCheckResponse> {
    let request_id = Uuid::new_v4().to_string();
    tracing::Span::current().record("request_id", request_id.as_str());

    let request = require_json(payload)?;
    let domain = sanitize_domain(&request.domain)?;
    tracing::Span::current().record("domain", domain.as_str());
    tracing::Span::current().record("canister_id", request.canister_id.as_str());

    if request.canister_id.is_empty() {
        return Err(ApiError::InvalidRequest("Canister ID is required".to_string()));
    }
    if validate_canister_id(&request.canister_id).is_err() {
        return Err(ApiError::InvalidRequest(
            "Invalid canister ID format. Should be like: aaaaa-bbbbb-ccccc-ddddd-eee".to_string(),
        ));
    }

    info!("Checking ICP domain {} for canister {}", domain, request.canister_id);

    let domain_availability = check_domain_availability(&state.doh, &state.whois, &domain).await;
    let canister = canister_info(
        &state.http,
        &state.config.lookup.dashboard_endpoint,
        &request.canister_id,
    )
    .await;
    let dns_checks = perform_icp_dns_checks(&state.doh, &domain, &request.canister_id).await;
    let dns_config = templates::icp_dns_config(&domain, &request.canister_id);

    info!(
        "ICP check completed: {} -> ready_for_ic={}",
        domain, dns_checks.summary.ready_for_ic
    );

    Ok(Json(IcpCheckResponse {
        is_icp_domain: domain.ends_with(".ic"),
        domain_availability,
        canister_info: canister,
        dns_checks,
        dns_config,
        web3_checks: web3_checks(&request.web3_features),
        config_files: config_files(&domain),
        domain,
        canister_id: request.canister_id,
        status: "success".to_string(),
    }))
}
