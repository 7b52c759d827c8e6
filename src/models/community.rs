use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A volunteer doctor. Registrations start unverified and become visible to
/// patients once an admin approves them.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Doctor {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub specialty: String,
    pub experience: i32,
    pub location: String,
    pub availability: String,
    pub bio: String,
    pub image_url: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegisterDoctorRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub specialty: String,
    #[serde(default)]
    pub experience: i32,
    pub location: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DoctorSummary {
    pub full_name: String,
    pub specialty: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Approved,
    Rejected,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Approved => "approved",
            AppointmentStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AppointmentStatus::Pending)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "approved" => Ok(AppointmentStatus::Approved),
            "rejected" => Ok(AppointmentStatus::Rejected),
            other => Err(format!("unknown appointment status: {}", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub appointment_date: NaiveDate,
    pub medical_issue: String,
    pub financial_status: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor: Option<DoctorSummary>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookAppointmentRequest {
    pub doctor_id: Uuid,
    pub patient_name: String,
    pub patient_email: String,
    #[serde(default)]
    pub patient_phone: String,
    pub appointment_date: NaiveDate,
    pub medical_issue: String,
    #[serde(default)]
    pub financial_status: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Initiative {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: String,
    pub organizer: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CreateInitiativeRequest {
    pub title: String,
    pub description: String,
    pub date: String,
    pub organizer: String,
    #[serde(default)]
    pub image: String,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UpdateInitiativeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct DoctorNotification {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
