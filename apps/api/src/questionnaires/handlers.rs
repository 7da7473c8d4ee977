//! Axum route handlers for the Questionnaires API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::{is_unique_violation, AppError};
use crate::extract::AppJson;
use crate::models::questionnaire::{QuestionnaireQuestionRow, QuestionnaireRow};
use crate::questionnaires::definition::{validate_questionnaire, CreateQuestionnaireRequest};
use crate::questionnaires::store;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuestionnaireQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionnaireDetail {
    pub success: bool,
    pub questionnaire: QuestionnaireRow,
    pub questions: Vec<QuestionnaireQuestionRow>,
}

/// POST /api/questionnaires
pub async fn handle_create_questionnaire(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateQuestionnaireRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let questionnaire = validate_questionnaire(request).map_err(AppError::Validation)?;

    let questions_count = store::insert_questionnaire(&state.db, &questionnaire)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::Validation(format!(
                    "Questionnaire {} already exists",
                    questionnaire.questionnaire_id
                ));
            }
            AppError::Database(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "questionnaire_id": questionnaire.questionnaire_id,
            "questions_count": questions_count,
            "message": "Questionnaire created successfully"
        })),
    ))
}

/// GET /api/questionnaires?category=
pub async fn handle_list_questionnaires(
    State(state): State<AppState>,
    Query(params): Query<QuestionnaireQuery>,
) -> Result<Json<Value>, AppError> {
    let questionnaires = match params.category.filter(|c| !c.trim().is_empty()) {
        Some(category) => store::list_by_category(&state.db, &category).await?,
        None => store::list_public(&state.db).await?,
    };
    info!("Listing {} questionnaire(s)", questionnaires.len());

    Ok(Json(json!({
        "success": true,
        "count": questionnaires.len(),
        "questionnaires": questionnaires
    })))
}

/// GET /api/questionnaires/:questionnaire_id
pub async fn handle_get_questionnaire(
    State(state): State<AppState>,
    Path(questionnaire_id): Path<String>,
) -> Result<Json<QuestionnaireDetail>, AppError> {
    let questionnaire = store::get_questionnaire(&state.db, &questionnaire_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Questionnaire {questionnaire_id} not found")))?;
    let questions = store::get_questions(&state.db, &questionnaire_id).await?;

    Ok(Json(QuestionnaireDetail {
        success: true,
        questionnaire,
        questions,
    }))
}
