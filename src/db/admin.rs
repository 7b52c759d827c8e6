use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::admin::AdminUser;

pub async fn is_admin(pool: &Pool<Postgres>, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM admin_users WHERE user_id = $1 LIMIT 1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Granting twice returns the existing membership.
pub async fn insert_admin_user(pool: &Pool<Postgres>, user_id: Uuid) -> Result<AdminUser, sqlx::Error> {
    sqlx::query_as::<_, AdminUser>(
        r#"
        INSERT INTO admin_users (user_id)
        VALUES ($1)
        ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
        RETURNING id, user_id, created_at
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn delete_admin_user(pool: &Pool<Postgres>, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM admin_users WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
