use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::medication::{Medication, MedicationRequest};

const MEDICATION_COLUMNS: &str =
    "id, user_id, name, dosage, frequency, expiry_date, notes, created_at, updated_at";

pub async fn list_medications(pool: &Pool<Postgres>, user_id: Uuid) -> Result<Vec<Medication>, sqlx::Error> {
    sqlx::query_as::<_, Medication>(&format!(
        "SELECT {MEDICATION_COLUMNS} FROM medications WHERE user_id = $1 ORDER BY expiry_date ASC NULLS LAST, created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_medication(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    request: &MedicationRequest,
) -> Result<Medication, sqlx::Error> {
    sqlx::query_as::<_, Medication>(&format!(
        r#"
        INSERT INTO medications (user_id, name, dosage, frequency, expiry_date, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {MEDICATION_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&request.name)
    .bind(request.dosage.as_deref())
    .bind(request.frequency.as_deref())
    .bind(request.expiry_date)
    .bind(request.notes.as_deref())
    .fetch_one(pool)
    .await
}

pub async fn update_medication(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    id: Uuid,
    request: &MedicationRequest,
) -> Result<Option<Medication>, sqlx::Error> {
    sqlx::query_as::<_, Medication>(&format!(
        r#"
        UPDATE medications
        SET name = $3, dosage = $4, frequency = $5, expiry_date = $6, notes = $7, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING {MEDICATION_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(&request.name)
    .bind(request.dosage.as_deref())
    .bind(request.frequency.as_deref())
    .bind(request.expiry_date)
    .bind(request.notes.as_deref())
    .fetch_optional(pool)
    .await
}

pub async fn delete_medication(pool: &Pool<Postgres>, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM medications WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
