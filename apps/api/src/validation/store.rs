use anyhow::Result;
use aws_sdk_s3::primitives::ByteStream;
use sqlx::PgPool;
use tracing::info;

use crate::models::validation::{ValidationResultRow, ValidationSummaryRow};
use crate::naming::digital_twin_version;
use crate::validation::report::{ValidationReport, ValidationRun};

const SUMMARY_COLUMNS: &str = "test_session_id, profile_id, digital_twin_version, model_version, \
     accuracy_percentage, total_questions, correct_answers, created_at";

/// Session ids become part of the object key, so only `[A-Za-z0-9_-]+` is
/// accepted.
pub fn is_valid_session_id(test_session_id: &str) -> bool {
    !test_session_id.is_empty()
        && test_session_id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

pub fn report_key(test_session_id: &str) -> String {
    format!("validation_results/{test_session_id}_validation.json")
}

/// Uploads the report JSON to object storage, then records the run.
/// Returns the storage key.
///
/// A repeated `test_session_id` replaces the earlier row.
pub async fn save_validation_run(
    pool: &PgPool,
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    run: &ValidationRun,
    report: &ValidationReport,
) -> Result<String> {
    let report_json = serde_json::to_value(report)?;
    let key = report_key(&run.test_session_id);

    s3.put_object()
        .bucket(s3_bucket)
        .key(&key)
        .body(ByteStream::from(serde_json::to_vec_pretty(&report_json)?))
        .content_type("application/json")
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

    info!("Uploaded validation report to s3://{s3_bucket}/{key}");

    sqlx::query(
        r#"
        INSERT INTO validation_test_results
            (test_session_id, profile_id, digital_twin_version, model_version,
             accuracy_percentage, total_questions, correct_answers, report, storage_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (test_session_id) DO UPDATE SET
            profile_id = EXCLUDED.profile_id,
            digital_twin_version = EXCLUDED.digital_twin_version,
            model_version = EXCLUDED.model_version,
            accuracy_percentage = EXCLUDED.accuracy_percentage,
            total_questions = EXCLUDED.total_questions,
            correct_answers = EXCLUDED.correct_answers,
            report = EXCLUDED.report,
            storage_key = EXCLUDED.storage_key,
            created_at = NOW()
        "#,
    )
    .bind(&run.test_session_id)
    .bind(&run.profile_id)
    .bind(digital_twin_version(&run.profile_id))
    .bind(&run.model_version)
    .bind(run.accuracy_percentage)
    .bind(run.total_questions)
    .bind(run.correct_answers)
    .bind(&report_json)
    .bind(&key)
    .execute(pool)
    .await?;

    info!(
        "Recorded validation run {} for {} ({}%)",
        run.test_session_id, run.profile_id, run.accuracy_percentage
    );
    Ok(key)
}

/// Every recorded run, newest first.
pub async fn list_results(pool: &PgPool) -> Result<Vec<ValidationSummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, ValidationSummaryRow>(&format!(
        "SELECT {SUMMARY_COLUMNS} FROM validation_test_results ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn get_result(
    pool: &PgPool,
    test_session_id: &str,
) -> Result<Option<ValidationResultRow>, sqlx::Error> {
    sqlx::query_as::<_, ValidationResultRow>(&format!(
        "SELECT {SUMMARY_COLUMNS}, report, storage_key \
         FROM validation_test_results WHERE test_session_id = $1"
    ))
    .bind(test_session_id)
    .fetch_optional(pool)
    .await
}

pub async fn latest_for_profile(
    pool: &PgPool,
    profile_id: &str,
) -> Result<Option<ValidationResultRow>, sqlx::Error> {
    sqlx::query_as::<_, ValidationResultRow>(&format!(
        "SELECT {SUMMARY_COLUMNS}, report, storage_key \
         FROM validation_test_results WHERE profile_id = $1 \
         ORDER BY created_at DESC LIMIT 1"
    ))
    .bind(profile_id)
    .fetch_optional(pool)
    .await
}
