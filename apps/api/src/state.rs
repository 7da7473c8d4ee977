use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::backend::BackendClient;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Object storage for validation reports.
    pub s3: S3Client,
    pub backend: BackendClient,
    pub config: Config,
}
