mod backend;
mod chat;
mod config;
mod db;
mod errors;
mod extract;
mod interview;
mod models;
mod naming;
mod profile;
mod questionnaires;
mod routes;
mod state;
mod surveys;
mod validation;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend::BackendClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PAI API v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL (lazy: the API serves fallbacks while the database is down)
    let db = create_pool(
        &config.database_url,
        Duration::from_secs(config.db_acquire_timeout_secs),
    )?;

    // S3 / MinIO for validation reports
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // Python interview/chat/validation service
    let backend = BackendClient::new(&config)?;
    info!(
        "Backend client initialized (base: {}, timeout: {}s)",
        config.backend_url, config.backend_timeout_secs
    );

    let state = AppState {
        db,
        s3,
        backend,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
/// Path-style addressing keeps MinIO endpoints working.
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "pai-static",
    );

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
