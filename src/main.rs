use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod carrier;
mod client_ip;
mod config;
mod delivery;
mod error;
mod geolocate;
mod pincode;
mod routes;

use carrier::{CarrierApiClient, TransitClient};
use geolocate::{PincodeResolver, ProviderChain};

#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub geo: Arc<dyn PincodeResolver>,
    pub transit: Arc<dyn TransitClient>,
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/edd", get(routes::edd::estimate))
        .route("/edd/debug", get(routes::edd::debug_detection))
        // Storefront widgets call this endpoint cross-origin.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let config = config::AppConfig::from_env().expect("Failed to load config");

    let geo: Arc<dyn PincodeResolver> = Arc::new(
        ProviderChain::from_config(&config.geo_provider_order, config.ipinfo_token.as_deref())
            .expect("Failed to build geolocation providers"),
    );

    let transit: Arc<dyn TransitClient> = Arc::new(
        CarrierApiClient::new(
            config.carrier_api_url.clone(),
            config.carrier_api_token.clone(),
            config.mode_of_transport.clone(),
        )
        .expect("Failed to create carrier client"),
    );

    let state = AppState {
        config: config.clone(),
        geo,
        transit,
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install signal handler");
    tracing::info!("Shutting down...");
}
