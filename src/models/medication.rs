use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Medication {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for both create and update; an update replaces every field.
#[derive(Debug, Deserialize, Clone)]
pub struct MedicationRequest {
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    NoExpiry,
    Active,
    ExpiringSoon,
    Expired,
}

#[derive(Debug, Serialize)]
pub struct ExpirySummary {
    pub today: NaiveDate,
    pub active: Vec<Medication>,
    pub expiring_soon: Vec<Medication>,
    pub expired: Vec<Medication>,
}
