use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;

use crate::models::questionnaire::{QuestionnaireQuestionRow, QuestionnaireRow};
use crate::questionnaires::definition::NewQuestionnaire;

const QUESTIONNAIRE_COLUMNS: &str = "questionnaire_id, title, description, questionnaire_type, \
     category, subcategory, questions, estimated_duration, is_public, created_by, is_active, \
     usage_count, created_at";

/// Inserts the questionnaire and one row per question in a single
/// transaction. Returns the number of question rows written.
///
/// An existing `questionnaire_id` surfaces as a unique violation.
pub async fn insert_questionnaire(
    pool: &PgPool,
    questionnaire: &NewQuestionnaire,
) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO custom_questionnaires
            (questionnaire_id, title, description, questionnaire_type, category, subcategory,
             questions, estimated_duration, is_public, created_by, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, TRUE)
        "#,
    )
    .bind(&questionnaire.questionnaire_id)
    .bind(&questionnaire.title)
    .bind(&questionnaire.description)
    .bind(questionnaire.questionnaire_type.as_str())
    .bind(&questionnaire.category)
    .bind(&questionnaire.subcategory)
    .bind(Json(&questionnaire.questions))
    .bind(questionnaire.estimated_duration)
    .bind(questionnaire.is_public)
    .bind(&questionnaire.created_by)
    .execute(&mut *tx)
    .await?;

    for question in &questionnaire.questions {
        let options = question.options.as_ref().map(Json);
        let tags = question.tags.as_ref().map(Json);

        sqlx::query(
            r#"
            INSERT INTO questionnaire_questions
                (questionnaire_id, question_id, question_text, question_type, options,
                 is_required, question_order, help_text, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&questionnaire.questionnaire_id)
        .bind(&question.id)
        .bind(&question.text)
        .bind(question.question_type.as_str())
        .bind(options)
        .bind(question.required)
        .bind(question.question_order)
        .bind(&question.help_text)
        .bind(tags)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        "Created questionnaire {} with {} question(s)",
        questionnaire.questionnaire_id,
        questionnaire.questions.len()
    );
    Ok(questionnaire.questions.len())
}

/// Active questionnaires in a category, most used first.
pub async fn list_by_category(
    pool: &PgPool,
    category: &str,
) -> Result<Vec<QuestionnaireRow>, sqlx::Error> {
    sqlx::query_as::<_, QuestionnaireRow>(&format!(
        "SELECT {QUESTIONNAIRE_COLUMNS} FROM custom_questionnaires \
         WHERE category = $1 AND is_active \
         ORDER BY usage_count DESC"
    ))
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Public active questionnaires, newest first.
pub async fn list_public(pool: &PgPool) -> Result<Vec<QuestionnaireRow>, sqlx::Error> {
    sqlx::query_as::<_, QuestionnaireRow>(&format!(
        "SELECT {QUESTIONNAIRE_COLUMNS} FROM custom_questionnaires \
         WHERE is_public AND is_active \
         ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn get_questionnaire(
    pool: &PgPool,
    questionnaire_id: &str,
) -> Result<Option<QuestionnaireRow>, sqlx::Error> {
    sqlx::query_as::<_, QuestionnaireRow>(&format!(
        "SELECT {QUESTIONNAIRE_COLUMNS} FROM custom_questionnaires WHERE questionnaire_id = $1"
    ))
    .bind(questionnaire_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_questions(
    pool: &PgPool,
    questionnaire_id: &str,
) -> Result<Vec<QuestionnaireQuestionRow>, sqlx::Error> {
    sqlx::query_as::<_, QuestionnaireQuestionRow>(
        r#"
        SELECT questionnaire_id, question_id, question_text, question_type, options,
               is_required, question_order, help_text, tags
        FROM questionnaire_questions
        WHERE questionnaire_id = $1
        ORDER BY question_order ASC
        "#,
    )
    .bind(questionnaire_id)
    .fetch_all(pool)
    .await
}
