use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::survey::SurveyTemplateRow;
use crate::surveys::template::NewSurvey;

/// Active templates, newest first.
pub async fn list_active_surveys(pool: &PgPool) -> Result<Vec<SurveyTemplateRow>, sqlx::Error> {
    sqlx::query_as::<_, SurveyTemplateRow>(
        r#"
        SELECT id, survey_name, title, description, target_accuracy, questions, is_active, created_at
        FROM survey_templates
        WHERE is_active
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn insert_survey(pool: &PgPool, survey: &NewSurvey) -> Result<Uuid, sqlx::Error> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO survey_templates
            (survey_name, title, description, target_accuracy, questions, is_active)
        VALUES ($1, $2, $3, $4, $5, TRUE)
        RETURNING id
        "#,
    )
    .bind(&survey.survey_name)
    .bind(&survey.title)
    .bind(&survey.description)
    .bind(survey.target_accuracy)
    .bind(survey.questions_json())
    .fetch_one(pool)
    .await?;

    info!("Created survey template {} ({id})", survey.survey_name);
    Ok(id)
}

/// Returns `false` when no template has that name.
pub async fn delete_survey(pool: &PgPool, survey_name: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM survey_templates WHERE survey_name = $1")
        .bind(survey_name)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
