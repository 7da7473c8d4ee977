//! Axum route handlers for the Validation API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::backend::QuestionValidationPayload;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::profile::store as profile_store;
use crate::state::AppState;
use crate::validation::placeholder::{placeholder_prediction, profile_unavailable_prediction};
use crate::validation::report::{build_report, summarize, Comparison, ValidationRun};
use crate::validation::store;
use crate::validation::survey::builtin_survey;

const NO_TESTS_MESSAGE: &str = "No validation tests have been completed yet";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ValidationQuery {
    pub history: Option<String>,
    pub test_session_id: Option<String>,
    pub profile_id: Option<String>,
    pub results: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionValidationRequest {
    question_id: String,
    human_answer: String,
    profile_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SaveResultsRequest {
    test_session_id: Option<String>,
    profile_id: Option<String>,
    comparisons: Option<Vec<Comparison>>,
    accuracy_percentage: Option<f64>,
    total_questions: Option<i32>,
    correct_answers: Option<i32>,
    model_version: Option<String>,
}

/// What a POST body asks for, decided by which keys it carries.
enum ValidationPost {
    Question(QuestionValidationRequest),
    SaveResults(SaveResultsRequest),
}

impl ValidationPost {
    fn from_body(body: Value) -> Result<Self, AppError> {
        let Value::Object(map) = &body else {
            return Err(invalid_format());
        };
        let is_question = map.contains_key("question_id") && map.contains_key("human_answer");
        let is_results = map.contains_key("test_session_id") && map.contains_key("comparisons");

        if is_question {
            let req = serde_json::from_value(body)
                .map_err(|_| AppError::Validation("question_id and human_answer must be strings".into()))?;
            Ok(Self::Question(req))
        } else if is_results {
            let req = serde_json::from_value(body)
                .map_err(|e| AppError::Validation(format!("Invalid validation results: {e}")))?;
            Ok(Self::SaveResults(req))
        } else {
            Err(invalid_format())
        }
    }
}

fn invalid_format() -> AppError {
    AppError::Validation("Invalid request format".to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/validation
///
/// - `?test_session_id=` → the stored report row for that run
/// - `?history` → every run, newest first
/// - `?profile_id=&results` → the latest run for a profile
/// - otherwise the built-in validation survey
pub async fn handle_get_validation(
    State(state): State<AppState>,
    Query(params): Query<ValidationQuery>,
) -> Result<Json<Value>, AppError> {
    if let Some(test_session_id) = non_empty(params.test_session_id) {
        let row = store::get_result(&state.db, &test_session_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Validation results for {test_session_id} not found"))
            })?;
        return to_json(&row);
    }

    if params.history.is_some() {
        return Ok(Json(validation_history(&state).await));
    }

    if let (Some(profile_id), Some(_)) = (non_empty(params.profile_id), params.results) {
        return match store::latest_for_profile(&state.db, &profile_id).await {
            Ok(Some(row)) => to_json(&row),
            Ok(None) => Ok(Json(no_tests_for_profile(&profile_id))),
            Err(e) => {
                warn!("Could not read validation results for {profile_id}: {e}");
                Ok(Json(no_tests_for_profile(&profile_id)))
            }
        };
    }

    to_json(&builtin_survey())
}

async fn validation_history(state: &AppState) -> Value {
    match store::list_results(&state.db).await {
        Ok(rows) if !rows.is_empty() => json!({
            "status": "success",
            "total_tests": rows.len(),
            "results": rows
        }),
        Ok(_) => no_tests_completed(),
        Err(e) => {
            warn!("Validation history unavailable: {e}");
            no_tests_completed()
        }
    }
}

fn no_tests_completed() -> Value {
    json!({
        "status": "no_tests_completed",
        "total_tests": 0,
        "results": [],
        "message": NO_TESTS_MESSAGE
    })
}

fn no_tests_for_profile(profile_id: &str) -> Value {
    json!({
        "profile_id": profile_id,
        "status": "no_tests_completed",
        "message": NO_TESTS_MESSAGE
    })
}

/// POST /api/validation
///
/// Either predicts a single question (`question_id` + `human_answer`) or
/// saves a finished run (`test_session_id` + `comparisons`).
pub async fn handle_post_validation(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> Result<Json<Value>, AppError> {
    match ValidationPost::from_body(body)? {
        ValidationPost::Question(req) => validate_question(&state, req).await,
        ValidationPost::SaveResults(req) => save_results(&state, req).await,
    }
}

async fn validate_question(
    state: &AppState,
    req: QuestionValidationRequest,
) -> Result<Json<Value>, AppError> {
    let profile_id =
        non_empty(req.profile_id).unwrap_or_else(|| state.config.default_profile_id.clone());

    match state
        .backend
        .validate_question(&QuestionValidationPayload {
            question_id: &req.question_id,
            human_answer: &req.human_answer,
            profile_id: &profile_id,
        })
        .await
    {
        Ok(prediction) => return Ok(Json(prediction)),
        Err(e) => warn!("Validation backend unavailable, using placeholder prediction: {e}"),
    }

    let prediction = match profile_store::get_profile(&state.db, &profile_id).await {
        Ok(Some(_)) => placeholder_prediction(&req.question_id, &req.human_answer),
        Ok(None) => profile_unavailable_prediction(
            &req.question_id,
            &req.human_answer,
            &format!("Profile not found: {profile_id}"),
        ),
        Err(e) => {
            warn!("Could not load profile {profile_id}: {e}");
            profile_unavailable_prediction(
                &req.question_id,
                &req.human_answer,
                "profile store unavailable",
            )
        }
    };

    to_json(&prediction)
}

async fn save_results(state: &AppState, req: SaveResultsRequest) -> Result<Json<Value>, AppError> {
    let now = chrono::Utc::now();
    let test_session_id =
        non_empty(req.test_session_id).unwrap_or_else(|| format!("test_{}", now.timestamp()));
    if !store::is_valid_session_id(&test_session_id) {
        return Err(AppError::Validation(
            "test_session_id may only contain letters, digits, '_' and '-'".to_string(),
        ));
    }

    let run = ValidationRun {
        test_session_id,
        profile_id: non_empty(req.profile_id)
            .unwrap_or_else(|| state.config.default_profile_id.clone()),
        model_version: non_empty(req.model_version)
            .unwrap_or_else(|| state.config.default_model_version.clone()),
        comparisons: req.comparisons.unwrap_or_default(),
        accuracy_percentage: req.accuracy_percentage.unwrap_or_default(),
        total_questions: req.total_questions.unwrap_or_default(),
        correct_answers: req.correct_answers.unwrap_or_default(),
    };
    let report = build_report(&run, now);

    match store::save_validation_run(&state.db, &state.s3, &state.config.s3_bucket, &run, &report)
        .await
    {
        Ok(storage_key) => {
            info!("Validation run {} saved", run.test_session_id);
            Ok(Json(json!({
                "status": "success",
                "message": "Validation results saved successfully",
                "test_session_id": run.test_session_id,
                "storage_key": storage_key,
                "summary": summarize(&run)
            })))
        }
        Err(e) => {
            warn!("Validation run {} not stored: {e:#}", run.test_session_id);
            Ok(Json(json!({
                "status": "partial_success",
                "message": format!("Results processed but save failed: {e}"),
                "test_session_id": run.test_session_id,
                "validation_data": report
            })))
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Json<Value>, AppError> {
    Ok(Json(serde_json::to_value(value).map_err(anyhow::Error::from)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(body: Value) -> Result<ValidationPost, AppError> {
        ValidationPost::from_body(body)
    }

    #[test]
    fn test_question_body_is_recognized() {
        let post = classify(json!({"question_id": "q", "human_answer": "a"})).unwrap();
        assert!(matches!(post, ValidationPost::Question(r) if r.profile_id.is_none()));
    }

    #[test]
    fn test_results_body_is_recognized() {
        let post = classify(json!({
            "test_session_id": "t1",
            "comparisons": [{"question_id": "routine_complexity", "is_match": true}],
            "accuracy_percentage": 100,
            "total_questions": 1,
            "correct_answers": 1
        }))
        .unwrap();
        match post {
            ValidationPost::SaveResults(r) => {
                assert_eq!(r.comparisons.map(|c| c.len()), Some(1));
                assert_eq!(r.accuracy_percentage, Some(100.0));
            }
            ValidationPost::Question(_) => panic!("expected results body"),
        }
    }

    #[test]
    fn test_results_body_accepts_nulls() {
        let post = classify(json!({
            "test_session_id": "t2",
            "comparisons": null,
            "accuracy_percentage": null,
            "total_questions": null,
            "correct_answers": null
        }))
        .unwrap();
        let ValidationPost::SaveResults(r) = post else {
            panic!("expected results body");
        };
        assert!(r.comparisons.unwrap_or_default().is_empty());
        assert_eq!(r.accuracy_percentage.unwrap_or_default(), 0.0);
        assert_eq!(r.total_questions.unwrap_or_default(), 0);
    }

    #[test]
    fn test_other_bodies_are_invalid() {
        assert!(matches!(classify(json!({"foo": 1})), Err(AppError::Validation(m)) if m == "Invalid request format"));
        assert!(matches!(classify(json!([1, 2])), Err(AppError::Validation(_))));
        assert!(matches!(
            classify(json!({"question_id": "q"})),
            Err(AppError::Validation(m)) if m == "Invalid request format"
        ));
    }

    #[test]
    fn test_non_string_answer_rejected() {
        assert!(matches!(
            classify(json!({"question_id": "q", "human_answer": 3})),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_no_tests_payloads() {
        assert_eq!(no_tests_completed()["total_tests"], 0);
        assert_eq!(no_tests_for_profile("p_v1")["profile_id"], "p_v1");
    }
}
