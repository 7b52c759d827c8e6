use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::aggregation::classifier::TypedRecord;
use crate::models::common::parse_measurement;
use crate::models::health_record::VitalsPayload;

/// Charting window. Windows count records, not calendar days.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Week,
    Month,
    Quarter,
}

impl TimeRange {
    pub fn record_limit(&self) -> usize {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub name: String,
    pub weight: f64,
    pub heart_rate: f64,
    pub systolic: f64,
    pub diastolic: f64,
    pub blood_sugar: f64,
}

fn value_or_zero(raw: &Option<String>) -> f64 {
    parse_measurement(raw.as_deref()).unwrap_or(0.0)
}

impl From<&TypedRecord<VitalsPayload>> for ChartPoint {
    fn from(record: &TypedRecord<VitalsPayload>) -> Self {
        let date = record.record_date;
        Self {
            name: format!("{}/{}", date.month(), date.day()),
            weight: value_or_zero(&record.data.weight),
            heart_rate: value_or_zero(&record.data.heart_rate),
            systolic: value_or_zero(&record.data.blood_pressure_systolic),
            diastolic: value_or_zero(&record.data.blood_pressure_diastolic),
            blood_sugar: value_or_zero(&record.data.blood_sugar),
        }
    }
}

/// Map the newest `range` vitals records into chart points, oldest first.
///
/// Every record yields its own point; same-day readings are not merged.
pub fn build_vitals_series(vitals: &[TypedRecord<VitalsPayload>], range: TimeRange) -> Vec<ChartPoint> {
    let mut newest_first: Vec<&TypedRecord<VitalsPayload>> = vitals.iter().collect();
    newest_first.sort_by(|a, b| b.record_date.cmp(&a.record_date));

    let mut points: Vec<ChartPoint> = newest_first
        .into_iter()
        .take(range.record_limit())
        .map(ChartPoint::from)
        .collect();
    points.reverse();
    points
}
