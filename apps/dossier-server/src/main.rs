//! Property Dossier Server
//!
//! Serves the property catalog and turns brochure requests into downloadable
//! three-page PDF dossiers. Provides REST API endpoints for:
//!
//! - Catalog listing and lookup
//! - Dossier generation (with optional commute steps)
//! - Enquiry and brochure lead capture
//!
//! ## Architecture
//!
//! Route lookups are awaited before composition starts; the composer itself
//! never suspends. Leads live in memory only.
//!
//! - Rate limiting via tower-governor
//! - CORS and request tracing via tower-http

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use dossier_core::DossierConfig;
use dossier_types::Catalog;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod state;
#[cfg(test)]
mod tests;

use api::{
    handle_create_enquiry, handle_generate_dossier, handle_get_property, handle_health,
    handle_list_leads, handle_list_properties,
};
use state::AppState;

/// Command-line arguments for the dossier server
#[derive(Parser, Debug)]
#[command(name = "dossier-server")]
#[command(about = "Property catalog and PDF dossier server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Property catalog (JSON array)
    #[arg(long, default_value = "data/properties.json")]
    catalog: PathBuf,

    /// Dossier configuration (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// All API routes, without the network-facing middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/properties", get(handle_list_properties))
        .route("/api/properties/:id", get(handle_get_property))
        .route("/api/dossier", post(handle_generate_dossier))
        .route("/api/enquiries", post(handle_create_enquiry))
        .route("/api/leads", get(handle_list_leads))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting dossier server on {}:{}", args.host, args.port);

    let catalog = Catalog::from_file(&args.catalog)
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))?;
    let config = match &args.config {
        Some(path) => DossierConfig::from_file(path)?,
        None => DossierConfig::default(),
    };
    info!("Loaded {} properties", catalog.len());

    let state = AppState::new(catalog, config, route_service::route_service_from_env());

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .context("Failed to create rate limiter config")?,
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = build_router(state)
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
