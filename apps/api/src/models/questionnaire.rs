use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionnaireRow {
    pub questionnaire_id: String,
    pub title: String,
    pub description: String,
    pub questionnaire_type: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub questions: Value,
    pub estimated_duration: i32,
    pub is_public: bool,
    pub created_by: String,
    pub is_active: bool,
    pub usage_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionnaireQuestionRow {
    pub questionnaire_id: String,
    pub question_id: String,
    pub question_text: String,
    pub question_type: String,
    pub options: Option<Value>,
    pub is_required: bool,
    pub question_order: i32,
    pub help_text: String,
    pub tags: Option<Value>,
}
