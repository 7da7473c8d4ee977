//! Axum route handlers for the Surveys API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::errors::{is_unique_violation, AppError};
use crate::extract::AppJson;
use crate::models::survey::SurveyTemplateRow;
use crate::state::AppState;
use crate::surveys::store;
use crate::surveys::template::{validate_survey, CreateSurveyRequest};
use crate::validation::survey::{survey_header, TARGET_ACCURACY};

#[derive(Debug, Deserialize)]
pub struct DeleteSurveyQuery {
    pub survey_name: Option<String>,
}

/// A template as the survey picker consumes it.
#[derive(Debug, Serialize)]
pub struct SurveySummary {
    pub survey_name: String,
    pub survey_title: String,
    pub description: String,
    pub target_accuracy: f64,
    pub questions: Value,
}

impl From<SurveyTemplateRow> for SurveySummary {
    fn from(row: SurveyTemplateRow) -> Self {
        Self {
            survey_title: row
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| row.survey_name.clone()),
            survey_name: row.survey_name,
            description: row.description.unwrap_or_default(),
            target_accuracy: row
                .target_accuracy
                .filter(|t| *t != 0.0)
                .unwrap_or(TARGET_ACCURACY),
            questions: row.questions.unwrap_or_else(|| Value::Array(Vec::new())),
        }
    }
}

/// GET /api/surveys
///
/// Lists active survey templates. When the database cannot be read the
/// built-in survey header is returned with `status: "fallback"`.
pub async fn handle_list_surveys(State(state): State<AppState>) -> Json<Value> {
    match store::list_active_surveys(&state.db).await {
        Ok(rows) => {
            let surveys: Vec<SurveySummary> = rows.into_iter().map(SurveySummary::from).collect();
            Json(json!({
                "status": "success",
                "total_surveys": surveys.len(),
                "surveys": surveys
            }))
        }
        Err(e) => {
            warn!("Survey templates unavailable, using fallback survey: {e}");
            Json(json!({
                "status": "fallback",
                "surveys": [survey_header()],
                "total_surveys": 1,
                "error": "Using fallback data - database unavailable"
            }))
        }
    }
}

/// POST /api/surveys
pub async fn handle_create_survey(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateSurveyRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let survey = validate_survey(request).map_err(AppError::Validation)?;

    let survey_id = store::insert_survey(&state.db, &survey)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::Validation(format!(
                    "Survey {} already exists",
                    survey.survey_name
                ));
            }
            AppError::Database(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Survey created successfully",
            "survey_id": survey_id,
            "survey_name": survey.survey_name
        })),
    ))
}

/// DELETE /api/surveys?survey_name=
pub async fn handle_delete_survey(
    State(state): State<AppState>,
    Query(params): Query<DeleteSurveyQuery>,
) -> Result<Json<Value>, AppError> {
    let survey_name = params
        .survey_name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::Validation("survey_name parameter required".to_string()))?;

    if !store::delete_survey(&state.db, &survey_name).await? {
        return Err(AppError::NotFound("Survey not found".to_string()));
    }

    info!("Deleted survey template {survey_name}");
    Ok(Json(json!({ "message": "Survey deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn row(title: Option<&str>, target: Option<f64>) -> SurveyTemplateRow {
        SurveyTemplateRow {
            id: Uuid::new_v4(),
            survey_name: "habits".to_string(),
            title: title.map(str::to_string),
            description: None,
            target_accuracy: target,
            questions: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_defaults() {
        let s = SurveySummary::from(row(None, None));
        assert_eq!(s.survey_title, "habits");
        assert_eq!(s.description, "");
        assert_eq!(s.target_accuracy, 0.6);
        assert_eq!(s.questions, json!([]));
    }

    #[test]
    fn test_summary_keeps_values() {
        let s = SurveySummary::from(row(Some("Habit Study"), Some(0.8)));
        assert_eq!(s.survey_title, "Habit Study");
        assert_eq!(s.target_accuracy, 0.8);
    }
}
