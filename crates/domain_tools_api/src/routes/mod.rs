//! API Routes Module
//!
//! This module organizes all HTTP endpoints into logical groups:
//! - `domain_configuration`: Web2 DNS configuration and availability
//! - `email_security`: SPF/DKIM/DMARC/MTA-STS/TLS-RPT analysis
//! - `icp_check`: Internet Computer custom-domain verification
//! - `unstoppable_check`: Unstoppable Domains (blockchain TLD) checks
//! - `dns_lookup`: Single-record-type DNS lookups
//! - `health`: Health check endpoint

pub mod dns_lookup;
pub mod domain_configuration;
pub mod email_security;
pub mod health;
pub mod icp_check;
pub mod unstoppable_check;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Build all API routes and return a configured Router
pub fn build_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/domain-configuration",
            post(domain_configuration::domain_configuration_handler),
        )
        .route("/api/email-security", post(email_security::email_security_handler))
        .route("/api/icp-check", post(icp_check::icp_check_handler))
        .route(
            "/api/unstoppable-check",
            post(unstoppable_check::unstoppable_check_handler),
        )
        .route("/api/dns-lookup", post(dns_lookup::dns_lookup_handler))
        .route("/health", get(health::health_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Router whose outbound lookups all point at an unreachable resolver,
    /// so every upstream call fails fast and degrades.
    fn offline_router() -> axum::Router {
        let mut config = AppConfig::default();
        config.lookup.http_timeout_secs = 1;
        config.lookup.doh_primary = "http://127.0.0.1:1/resolve".to_string();
        config.lookup.doh_secondary = "http://127.0.0.1:1/dns-query".to_string();
        config.lookup.whois_endpoint = "http://127.0.0.1:1/whois".to_string();
        config.lookup.dashboard_endpoint = "http://127.0.0.1:1".to_string();

        let state = crate::AppState::new(config).unwrap();
        build_routes(Arc::new(state))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = offline_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_email_security_missing_domain_is_400() {
        let response = offline_router()
            .oneshot(post_json("/api/email-security", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn test_email_security_blank_domain_is_400() {
        let response = offline_router()
            .oneshot(post_json("/api/email-security", json!({ "domain": "   " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid domain provided");
    }

    #[tokio::test]
    async fn test_email_security_degrades_to_zero_score() {
        // With no reachable resolver, every lookup degrades to "not found"
        // and the route still answers 200 with an empty report.
        let response = offline_router()
            .oneshot(post_json("/api/email-security", json!({ "domain": "example.com" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["hasMxRecords"], false);
        assert_eq!(body["spf"]["exists"], false);
        assert_eq!(body["dmarc"]["exists"], false);
        assert_eq!(body["securityScore"]["score"], 0);
        assert_eq!(body["securityScore"]["rating"], "Poor");
        assert_eq!(body["status"], "success");
    }

    #[tokio::test]
    async fn test_icp_check_rejects_bad_canister_id() {
        let response = offline_router()
            .oneshot(post_json(
                "/api/icp-check",
                json!({ "domain": "example.com", "canisterId": "not a canister" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("Invalid canister ID format"));
    }

    #[tokio::test]
    async fn test_unstoppable_check_route() {
        let response = offline_router()
            .oneshot(post_json(
                "/api/unstoppable-check",
                json!({ "domain": "Mysite.CRYPTO" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["domain"], "mysite.crypto");
        assert_eq!(body["isUnstoppableDomain"], true);
        assert_eq!(body["domainAvailability"]["available"], true);
        assert!(body["dnsConfig"]["namecheap"]["records"].is_array());
        assert!(body["web3Checks"]["summary"]["recommendations"].is_array());
        assert_eq!(body["status"], "success");
    }
}
