//! Axum route handlers for the Profiles API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{is_unique_violation, AppError};
use crate::extract::AppJson;
use crate::models::profile::ProfileRow;
use crate::profile::builder::{
    build_profile_data_from_completions, migrate_legacy_profile_data, QuestionnaireCompletion,
};
use crate::profile::data::{NewProfileData, ProfileData};
use crate::profile::render::render_profile_markdown;
use crate::profile::store;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub person_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BuildProfileRequest {
    pub person_name: Option<String>,
    #[serde(default)]
    pub completions: Vec<QuestionnaireCompletion>,
}

#[derive(Debug, Serialize)]
pub struct ProfileDetailResponse {
    pub profile: ProfileRow,
    pub format: &'static str,
    pub summary_markdown: String,
    /// Legacy profiles only: the same data mapped onto the structured layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrated_data: Option<NewProfileData>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/profiles?person_name=
///
/// All profile versions for a person, newest first.
pub async fn handle_list_profiles(
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
) -> Result<Json<Vec<ProfileRow>>, AppError> {
    let person_name = params
        .person_name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::Validation("person_name parameter is required".to_string()))?;

    let profiles = store::find_by_person_name(&state.db, &person_name).await?;
    info!("Found {} profile(s) for {person_name}", profiles.len());

    Ok(Json(profiles))
}

/// POST /api/profiles/build
///
/// Runs the profile builder over questionnaire completions and stores the
/// result as the person's newest active profile version.
pub async fn handle_build_profile(
    State(state): State<AppState>,
    AppJson(request): AppJson<BuildProfileRequest>,
) -> Result<(StatusCode, Json<ProfileRow>), AppError> {
    let person_name = request
        .person_name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::Validation("person_name is required".to_string()))?;

    if request.completions.is_empty() {
        return Err(AppError::Validation(
            "At least one questionnaire completion is required".to_string(),
        ));
    }

    let profile_data = build_profile_data_from_completions(&request.completions)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let profile_data = serde_json::to_value(&profile_data).map_err(anyhow::Error::from)?;

    let row = store::insert_profile_version(&state.db, &person_name, &profile_data)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::Validation(format!(
                    "A profile version for {} already exists, retry the build",
                    person_name.trim()
                ));
            }
            AppError::Database(e)
        })?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/profiles/:profile_id
///
/// One profile version with its detected format and a Markdown rendering.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> Result<Json<ProfileDetailResponse>, AppError> {
    let profile = store::get_profile(&state.db, &profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {profile_id} not found")))?;

    let data = ProfileData::classify(&profile.profile_data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("profile {profile_id}: {e}")))?;

    let migrated_data = match &data {
        ProfileData::Legacy(legacy) => Some(migrate_legacy_profile_data(legacy)),
        ProfileData::New(_) => None,
    };

    Ok(Json(ProfileDetailResponse {
        format: data.format_name(),
        summary_markdown: render_profile_markdown(&profile.profile_id, &data),
        migrated_data,
        profile,
    }))
}
