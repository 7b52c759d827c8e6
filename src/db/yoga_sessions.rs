use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::yoga::{YogaSession, YogaSessionRequest};

const YOGA_COLUMNS: &str =
    "id, user_id, session_name, duration, calories_burned, date, notes, created_at, updated_at";

pub async fn list_yoga_sessions(pool: &Pool<Postgres>, user_id: Uuid) -> Result<Vec<YogaSession>, sqlx::Error> {
    sqlx::query_as::<_, YogaSession>(&format!(
        "SELECT {YOGA_COLUMNS} FROM yoga_sessions WHERE user_id = $1 ORDER BY date DESC, created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_yoga_session(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    date: NaiveDate,
    request: &YogaSessionRequest,
) -> Result<YogaSession, sqlx::Error> {
    sqlx::query_as::<_, YogaSession>(&format!(
        r#"
        INSERT INTO yoga_sessions (user_id, session_name, duration, calories_burned, date, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {YOGA_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&request.session_name)
    .bind(request.duration)
    .bind(request.calories_burned)
    .bind(date)
    .bind(request.notes.as_deref())
    .fetch_one(pool)
    .await
}

pub async fn update_yoga_session(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    id: Uuid,
    date: NaiveDate,
    request: &YogaSessionRequest,
) -> Result<Option<YogaSession>, sqlx::Error> {
    sqlx::query_as::<_, YogaSession>(&format!(
        r#"
        UPDATE yoga_sessions
        SET session_name = $3, duration = $4, calories_burned = $5, date = $6, notes = $7, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING {YOGA_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(&request.session_name)
    .bind(request.duration)
    .bind(request.calories_burned)
    .bind(date)
    .bind(request.notes.as_deref())
    .fetch_optional(pool)
    .await
}

pub async fn delete_yoga_session(pool: &Pool<Postgres>, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM yoga_sessions WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
