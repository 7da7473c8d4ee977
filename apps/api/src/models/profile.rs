use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub profile_id: String,
    pub person_name: String,
    pub version_number: i32,
    pub profile_data: Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
