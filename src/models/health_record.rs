use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::common::deserialize_numeric_string;

pub const DEFAULT_RECORD_STATUS: &str = "active";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Vitals,
    BodyMeasurements,
    LabResults,
    DietPlan,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Vitals => "vitals",
            RecordType::BodyMeasurements => "body_measurements",
            RecordType::LabResults => "lab_results",
            RecordType::DietPlan => "diet_plan",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vitals" => Ok(RecordType::Vitals),
            "body_measurements" => Ok(RecordType::BodyMeasurements),
            "lab_results" => Ok(RecordType::LabResults),
            "diet_plan" => Ok(RecordType::DietPlan),
            other => Err(format!("unknown record type: {}", other)),
        }
    }
}

/// One persisted health submission. `description` holds the JSON payload as text.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct HealthRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub record_type: String,
    pub record_date: NaiveDate,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VitalsPayload {
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<String>,
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub blood_pressure_systolic: Option<String>,
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub blood_pressure_diastolic: Option<String>,
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub blood_sugar: Option<String>,
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabResultsPayload {
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub cholesterol_total: Option<String>,
    #[serde(rename = "cholesterolLDL", default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub cholesterol_ldl: Option<String>,
    #[serde(rename = "cholesterolHDL", default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub cholesterol_hdl: Option<String>,
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub triglycerides: Option<String>,
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub hemoglobin: Option<String>,
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub white_blood_cell_count: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurementsPayload {
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub waist: Option<String>,
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub hip: Option<String>,
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub bmi: Option<String>,
    #[serde(default, deserialize_with = "deserialize_numeric_string", skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<String>,
}

/// Fields needed to persist a new record; the store assigns ids and timestamps.
#[derive(Debug, Clone)]
pub struct NewHealthRecord {
    pub user_id: Uuid,
    pub record_type: RecordType,
    pub record_date: NaiveDate,
    pub description: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateHealthRecordRequest {
    pub record_type: RecordType,
    #[serde(default)]
    pub record_date: Option<NaiveDate>,
    pub data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHealthRecordRequest {
    #[serde(default)]
    pub record_date: Option<NaiveDate>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HealthRecordQuery {
    #[serde(default)]
    pub record_type: Option<RecordType>,
}
