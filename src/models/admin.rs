use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct AdminUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAdminUserRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct VerifyDoctorRequest {
    pub verified: bool,
}
