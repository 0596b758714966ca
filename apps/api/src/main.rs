mod config;
mod errors;
mod form;
mod hr_client;
mod models;
mod routes;
mod state;
mod storage;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::hr_client::HrApiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{build_s3_client, R2ResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing storage env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Careers API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize R2 resume storage
    let s3 = build_s3_client(&config.storage).await;
    let resume_store = Arc::new(R2ResumeStore::new(s3, &config.storage));
    info!(
        "Resume storage initialized (bucket: {}, endpoint: {})",
        config.storage.bucket,
        config.storage.endpoint()
    );

    // Initialize HR API client
    let hr_api = HrApiClient::new(config.hr_api_base_url.clone());
    info!("HR API client initialized ({})", config.hr_api_base_url);

    let state = AppState {
        hr_api,
        resume_store,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the careers site origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
