use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct YogaSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub session_name: String,
    /// Minutes.
    pub duration: i32,
    pub calories_burned: Option<i32>,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct YogaSessionRequest {
    pub session_name: String,
    pub duration: i32,
    #[serde(default)]
    pub calories_burned: Option<i32>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct YogaStats {
    pub total_sessions: usize,
    pub total_duration: i64,
    pub total_calories: i64,
    pub average_duration: f64,
}
