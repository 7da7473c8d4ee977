pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::interview::handlers as interview;
use crate::profile::handlers as profiles;
use crate::questionnaires::handlers as questionnaires;
use crate::state::AppState;
use crate::surveys::handlers as surveys;
use crate::validation::handlers as validation;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Twin chat
        .route(
            "/api/chat",
            get(chat::handle_chat_status).post(chat::handle_chat),
        )
        // Interviews
        .route(
            "/api/interview",
            get(interview::handle_interview_status).post(interview::handle_start_interview),
        )
        .route(
            "/api/interview/message",
            post(interview::handle_interview_message),
        )
        .route(
            "/api/interview/:session_id/complete",
            post(interview::handle_complete_interview),
        )
        // Profiles
        .route("/api/profiles", get(profiles::handle_list_profiles))
        .route("/api/profiles/build", post(profiles::handle_build_profile))
        .route("/api/profiles/:profile_id", get(profiles::handle_get_profile))
        // Surveys
        .route(
            "/api/surveys",
            get(surveys::handle_list_surveys)
                .post(surveys::handle_create_survey)
                .delete(surveys::handle_delete_survey),
        )
        // Questionnaires
        .route(
            "/api/questionnaires",
            get(questionnaires::handle_list_questionnaires)
                .post(questionnaires::handle_create_questionnaire),
        )
        .route(
            "/api/questionnaires/:questionnaire_id",
            get(questionnaires::handle_get_questionnaire),
        )
        // Validation
        .route(
            "/api/validation",
            get(validation::handle_get_validation).post(validation::handle_post_validation),
        )
        .with_state(state)
}
