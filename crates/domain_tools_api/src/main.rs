//! RECORDSS.AI Domain Tools API Server
//!
//! HTTP API for domain configuration guidance, email security analysis,
//! and Internet Computer custom-domain checks, built with axum and tokio.

use axum::Router;
use domain_core::availability::WhoisClient;
use domain_core::doh::DohClient;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api_handler;
mod config;
mod routes;

use config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub doh: Arc<DohClient>,
    pub whois: Arc<WhoisClient>,
    pub http: reqwest::Client,
    pub config: Arc<AppConfig>,
}

impl AppState {
    fn new(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.lookup.http_timeout_secs))
            .build()?;

        let doh = DohClient::with_http_client(
            http.clone(),
            &config.lookup.doh_primary,
            &config.lookup.doh_secondary,
        );
        let whois = WhoisClient::with_endpoint(http.clone(), &config.lookup.whois_endpoint);

        Ok(Self {
            doh: Arc::new(doh),
            whois: Arc::new(whois),
            http,
            config: Arc::new(config),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    init_tracing(&config)?;

    info!("Starting Domain Tools API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "DoH resolvers: {} -> {}",
        config.lookup.doh_primary, config.lookup.doh_secondary
    );

    let port = config.server.port;
    let state = AppState::new(config)?;
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!("Health check available at http://{}/health", addr);
    info!("Domain configuration API: http://{}/api/domain-configuration", addr);
    info!("Email security API: http://{}/api/email-security", addr);
    info!("ICP check API: http://{}/api/icp-check", addr);
    info!("Unstoppable check API: http://{}/api/unstoppable-check", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    routes::build_routes(Arc::new(state))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers(tower_http::cors::Any),
        )
        .layer(CompressionLayer::new())
}

/// Load application configuration from environment and files
fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    // Optional config file
    if std::path::Path::new("Config.toml").exists() {
        figment = figment.merge(Toml::file("Config.toml"));
    }

    // Environment variables override (RECORDSS_SERVER_PORT etc.)
    figment = figment.merge(Env::prefixed("RECORDSS_").split("_"));

    let config: AppConfig = figment.extract()?;
    Ok(config)
}

/// Initialize tracing and logging
fn init_tracing(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.observability.log_level.clone().into());

    if config.observability.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
