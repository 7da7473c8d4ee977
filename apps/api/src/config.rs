use anyhow::{Context, Result};

const DEFAULT_CHAT_API_URL: &str = "http://localhost:8001/python-api/chat";
const DEFAULT_INTERVIEW_API_URL: &str = "http://localhost:8001/python-api/interview";
const DEFAULT_VALIDATION_API_URL: &str = "http://localhost:8001/api/validation";
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Python chat endpoint (full URL).
    pub chat_api_url: String,
    /// Python interview-start endpoint (full URL).
    pub interview_api_url: String,
    /// Python single-question validation endpoint (full URL).
    pub validation_api_url: String,
    /// Base URL of the Python interview server (message relay, completion).
    pub backend_url: String,
    pub backend_timeout_secs: u64,
    pub db_acquire_timeout_secs: u64,
    pub default_profile_id: String,
    pub default_model_version: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            chat_api_url: env_or("PYTHON_CHAT_API_URL", DEFAULT_CHAT_API_URL),
            interview_api_url: env_or("PYTHON_INTERVIEW_API_URL", DEFAULT_INTERVIEW_API_URL),
            validation_api_url: env_or("PYTHON_VALIDATION_API_URL", DEFAULT_VALIDATION_API_URL),
            backend_url: env_or("PYTHON_BACKEND_URL", DEFAULT_BACKEND_URL)
                .trim_end_matches('/')
                .to_string(),
            backend_timeout_secs: parse_env("BACKEND_TIMEOUT_SECS", 30)?,
            db_acquire_timeout_secs: parse_env("DB_ACQUIRE_TIMEOUT_SECS", 5)?,
            default_profile_id: env_or("DEFAULT_PROFILE_ID", "rachita_v1"),
            default_model_version: env_or("DEFAULT_MODEL_VERSION", "claude-3-5-sonnet-20241022"),
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .ok()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
