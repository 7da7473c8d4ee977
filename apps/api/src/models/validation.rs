use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ValidationResultRow {
    pub test_session_id: String,
    pub profile_id: String,
    pub digital_twin_version: String,
    pub model_version: String,
    pub accuracy_percentage: f64,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub report: Value,
    pub storage_key: String,
    pub created_at: DateTime<Utc>,
}

/// Summary projection used by the validation history listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ValidationSummaryRow {
    pub test_session_id: String,
    pub profile_id: String,
    pub digital_twin_version: String,
    pub model_version: String,
    pub accuracy_percentage: f64,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub created_at: DateTime<Utc>,
}
