use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::models::diet::DietPlan;
use crate::models::health_record::{
    BodyMeasurementsPayload, HealthRecord, LabResultsPayload, RecordType, VitalsPayload,
};

/// A stored record whose JSON payload has been decoded into its typed shape.
#[derive(Debug, Clone, Serialize)]
pub struct TypedRecord<T> {
    pub id: Uuid,
    pub record_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub data: T,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassifiedRecords {
    pub vitals: Vec<TypedRecord<VitalsPayload>>,
    pub body_measurements: Vec<TypedRecord<BodyMeasurementsPayload>>,
    pub lab_results: Vec<TypedRecord<LabResultsPayload>>,
    pub diet_plans: Vec<TypedRecord<DietPlan>>,
}

impl ClassifiedRecords {
    pub fn len(&self) -> usize {
        self.vitals.len() + self.body_measurements.len() + self.lab_results.len() + self.diet_plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BucketCounts {
    pub vitals: usize,
    pub body_measurements: usize,
    pub lab_results: usize,
    pub diet_plans: usize,
}

impl From<&ClassifiedRecords> for BucketCounts {
    fn from(records: &ClassifiedRecords) -> Self {
        Self {
            vitals: records.vitals.len(),
            body_measurements: records.body_measurements.len(),
            lab_results: records.lab_results.len(),
            diet_plans: records.diet_plans.len(),
        }
    }
}

/// Decode a single record of a known type. Only payloads that are not valid
/// JSON, or not a JSON object, are dropped; the typed shapes tolerate odd
/// field kinds.
pub fn decode_record<T: DeserializeOwned>(record: &HealthRecord) -> Option<TypedRecord<T>> {
    let decoded = serde_json::from_str::<Value>(&record.description)
        .map_err(|e| e.to_string())
        .and_then(|value| match value {
            Value::Object(_) => serde_json::from_value::<T>(value).map_err(|e| e.to_string()),
            other => Err(format!("expected an object, got {other}")),
        });

    match decoded {
        Ok(data) => Some(TypedRecord {
            id: record.id,
            record_date: record.record_date,
            status: record.status.clone(),
            created_at: record.created_at,
            data,
        }),
        Err(e) => {
            tracing::warn!(
                record_id = %record.id,
                record_type = %record.record_type,
                "Skipping health record with undecodable payload: {}",
                e
            );
            None
        }
    }
}

/// Partition raw records into typed buckets. Order within each bucket follows
/// the input order; undecodable or unknown records are dropped.
pub fn classify_records(records: &[HealthRecord]) -> ClassifiedRecords {
    let mut classified = ClassifiedRecords::default();

    for record in records {
        let record_type = match record.record_type.parse::<RecordType>() {
            Ok(record_type) => record_type,
            Err(_) => {
                tracing::debug!(record_id = %record.id, "Skipping record of unknown type {}", record.record_type);
                continue;
            }
        };

        match record_type {
            RecordType::Vitals => classified.vitals.extend(decode_record(record)),
            RecordType::BodyMeasurements => classified.body_measurements.extend(decode_record(record)),
            RecordType::LabResults => classified.lab_results.extend(decode_record(record)),
            RecordType::DietPlan => classified.diet_plans.extend(decode_record(record)),
        }
    }

    classified
}
