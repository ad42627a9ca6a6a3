//! Email security analysis route
//!
//! Runs the full SPF/DKIM/DMARC/MTA-STS/TLS-RPT analysis for a domain,
//! including parent-domain fallback for subdomains, and returns the scored
//! report with recommended records for the missing mechanisms.

use crate::{
    api_handler::{require_json, sanitize_domain, ApiResult},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use domain_core::email_security::{analyze_email_security, EmailSecurityReport};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Request body for POST /api/email-security
#[derive(Debug, Deserialize)]
pub struct EmailSecurityRequest {
    pub domain: String,
}

/// POST /api/email-security
#[instrument(skip_all, fields(domain, request_id))]
pub async fn email_security_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EmailSecurityRequest>, JsonRejection>,
) -> ApiResult<EmailSecurityReport> {
    let request_id = Uuid::new_v4().to_string();
    tracing::Span::current().record("request_id", request_id.as_str());

    let request = require_json(payload)?;
    let domain = sanitize_domain(&request.domain)?;
    tracing::Span::current().record("domain", domain.as_str());

    info!("Analyzing email security for {}", domain);
    let report = analyze_email_security(&state.doh, &domain).await;
    info!(
        "Email security analysis completed: {} -> {}/{} ({:?})",
        domain, report.security_score.score, report.security_score.total, report.security_score.rating
    );

    Ok(Json(report))
}
