use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::health_record::{HealthRecord, RecordType};

pub const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RecentActivity {
    pub id: Uuid,
    pub activity_type: &'static str,
    pub description: &'static str,
    pub date: DateTime<Utc>,
    pub status: &'static str,
}

fn describe(record_type: Option<RecordType>) -> (&'static str, &'static str) {
    match record_type {
        Some(RecordType::Vitals) => ("health_record", "Updated vital signs"),
        Some(RecordType::BodyMeasurements) => ("health_record", "Updated body measurements"),
        Some(RecordType::LabResults) => ("health_record", "Added lab test results"),
        Some(RecordType::DietPlan) => ("nutrition", "Created diet plan"),
        None => ("health_record", "Updated health record"),
    }
}

/// Feed entries for the newest records. Works on raw records, so entries with
/// malformed payloads still show up here.
pub fn recent_activity(records: &[HealthRecord]) -> Vec<RecentActivity> {
    records
        .iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|record| {
            let (activity_type, description) = describe(record.record_type.parse().ok());
            RecentActivity {
                id: record.id,
                activity_type,
                description,
                date: record.created_at,
                status: "completed",
            }
        })
        .collect()
}
