use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::db::HealthRecordChanges;
use crate::models::health_record::{HealthRecord, NewHealthRecord, RecordType};

const HEALTH_RECORD_COLUMNS: &str =
    "id, user_id, record_type, record_date, description, status, created_at, updated_at";

pub async fn insert_health_record(
    pool: &Pool<Postgres>,
    record: &NewHealthRecord,
) -> Result<HealthRecord, sqlx::Error> {
    sqlx::query_as::<_, HealthRecord>(&format!(
        r#"
        INSERT INTO health_records (user_id, record_type, record_date, description, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {HEALTH_RECORD_COLUMNS}
        "#
    ))
    .bind(record.user_id)
    .bind(record.record_type.as_str())
    .bind(record.record_date)
    .bind(&record.description)
    .bind(&record.status)
    .fetch_one(pool)
    .await
}

pub async fn list_health_records(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    record_type: Option<RecordType>,
) -> Result<Vec<HealthRecord>, sqlx::Error> {
    sqlx::query_as::<_, HealthRecord>(&format!(
        r#"
        SELECT {HEALTH_RECORD_COLUMNS}
        FROM health_records
        WHERE user_id = $1
          AND ($2::text IS NULL OR record_type = $2)
        ORDER BY record_date DESC, created_at DESC
        "#
    ))
    .bind(user_id)
    .bind(record_type.map(|t| t.as_str()))
    .fetch_all(pool)
    .await
}

pub async fn get_health_record(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<HealthRecord>, sqlx::Error> {
    sqlx::query_as::<_, HealthRecord>(&format!(
        "SELECT {HEALTH_RECORD_COLUMNS} FROM health_records WHERE id = $1 AND user_id = $2"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn latest_health_record(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    record_type: RecordType,
) -> Result<Option<HealthRecord>, sqlx::Error> {
    sqlx::query_as::<_, HealthRecord>(&format!(
        r#"
        SELECT {HEALTH_RECORD_COLUMNS}
        FROM health_records
        WHERE user_id = $1 AND record_type = $2
        ORDER BY created_at DESC
        LIMIT 1
        "#
    ))
    .bind(user_id)
    .bind(record_type.as_str())
    .fetch_optional(pool)
    .await
}

pub async fn update_health_record(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    id: Uuid,
    changes: &HealthRecordChanges,
) -> Result<Option<HealthRecord>, sqlx::Error> {
    sqlx::query_as::<_, HealthRecord>(&format!(
        r#"
        UPDATE health_records
        SET record_date = COALESCE($3, record_date),
            description = COALESCE($4, description),
            status = COALESCE($5, status),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING {HEALTH_RECORD_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(changes.record_date)
    .bind(changes.description.as_deref())
    .bind(changes.status.as_deref())
    .fetch_optional(pool)
    .await
}

pub async fn delete_health_record(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM health_records WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
