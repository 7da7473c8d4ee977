use serde_json::Value;
use sqlx::PgPool;
use tracing::info;

use crate::models::profile::ProfileRow;
use crate::naming::{max_version_for_slug, profile_slug, profile_version_id};

const PROFILE_COLUMNS: &str =
    "profile_id, person_name, version_number, profile_data, is_active, created_at";

/// All versions for a person, newest first. Name matching ignores case.
pub async fn find_by_person_name(
    pool: &PgPool,
    person_name: &str,
) -> Result<Vec<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profile_versions \
         WHERE lower(person_name) = lower($1) \
         ORDER BY version_number DESC"
    ))
    .bind(person_name.trim())
    .fetch_all(pool)
    .await
}

pub async fn get_profile(
    pool: &PgPool,
    profile_id: &str,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profile_versions WHERE profile_id = $1"
    ))
    .bind(profile_id)
    .fetch_optional(pool)
    .await
}

/// Appends a new active version for `person_name` and deactivates the
/// previous ones in the same transaction.
///
/// The version number is one past the highest used by this name or by any id
/// sharing its slug. A transaction-scoped advisory lock on the slug serializes
/// concurrent builds for the same stem.
pub async fn insert_profile_version(
    pool: &PgPool,
    person_name: &str,
    profile_data: &Value,
) -> Result<ProfileRow, sqlx::Error> {
    let person_name = person_name.trim();
    let slug = profile_slug(person_name);
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(&slug)
        .execute(&mut *tx)
        .await?;

    let name_max: Option<i32> = sqlx::query_scalar(
        "SELECT MAX(version_number) FROM profile_versions WHERE lower(person_name) = lower($1)",
    )
    .bind(person_name)
    .fetch_one(&mut *tx)
    .await?;

    let slug_ids: Vec<String> =
        sqlx::query_scalar("SELECT profile_id FROM profile_versions WHERE starts_with(profile_id, $1)")
            .bind(format!("{slug}_v"))
            .fetch_all(&mut *tx)
            .await?;

    let version_number = name_max
        .unwrap_or(0)
        .max(max_version_for_slug(&slug, slug_ids.iter().map(String::as_str)))
        + 1;
    let profile_id = profile_version_id(person_name, version_number);

    sqlx::query(
        "UPDATE profile_versions SET is_active = FALSE \
         WHERE lower(person_name) = lower($1) AND is_active",
    )
    .bind(person_name)
    .execute(&mut *tx)
    .await?;

    let row = sqlx::query_as::<_, ProfileRow>(&format!(
        "INSERT INTO profile_versions (profile_id, person_name, version_number, profile_data, is_active) \
         VALUES ($1, $2, $3, $4, TRUE) \
         RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(&profile_id)
    .bind(person_name)
    .bind(version_number)
    .bind(profile_data)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!("Inserted profile {profile_id} (version {version_number}) for {person_name}");
    Ok(row)
}
