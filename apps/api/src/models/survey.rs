use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SurveyTemplateRow {
    pub id: Uuid,
    pub survey_name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_accuracy: Option<f64>,
    pub questions: Option<Value>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
