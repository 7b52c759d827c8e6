use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::profile::{Profile, UpdateProfileRequest};

pub async fn get_profile(pool: &Pool<Postgres>, user_id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "SELECT id, full_name, avatar_url, phone_number, updated_at FROM profiles WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Create the profile on first write; later writes only touch supplied fields.
pub async fn upsert_profile(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    request: &UpdateProfileRequest,
) -> Result<Profile, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO profiles (id, full_name, avatar_url, phone_number)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE
        SET full_name = COALESCE(EXCLUDED.full_name, profiles.full_name),
            avatar_url = COALESCE(EXCLUDED.avatar_url, profiles.avatar_url),
            phone_number = COALESCE(EXCLUDED.phone_number, profiles.phone_number),
            updated_at = NOW()
        RETURNING id, full_name, avatar_url, phone_number, updated_at
        "#,
    )
    .bind(user_id)
    .bind(request.full_name.as_deref())
    .bind(request.avatar_url.as_deref())
    .bind(request.phone_number.as_deref())
    .fetch_one(pool)
    .await
}
