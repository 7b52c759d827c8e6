use serde::Serialize;

use crate::aggregation::classifier::{ClassifiedRecords, TypedRecord};
use crate::models::common::parse_measurement;
use crate::models::diet::{Meal, NutritionTotals};
use crate::models::health_record::VitalsPayload;
use crate::models::yoga::{YogaSession, YogaStats};

pub const HEART_RATE_TARGET: f64 = 80.0;
pub const SYSTOLIC_TARGET: f64 = 120.0;
pub const BLOOD_SUGAR_TARGET: f64 = 100.0;
/// Progress reported when either side of the ratio is missing or zero.
pub const NEUTRAL_PROGRESS: u8 = 50;

/// 0-100 score comparing a reading against a fixed target.
pub fn calculate_progress(current: Option<f64>, target: Option<f64>, lower_is_better: bool) -> u8 {
    let (current, target) = match (current, target) {
        (Some(c), Some(t)) if c != 0.0 && t != 0.0 && c.is_finite() && t.is_finite() => (c, t),
        _ => return NEUTRAL_PROGRESS,
    };

    let ratio = current / target * 100.0;
    let progress = if lower_is_better {
        (100.0 - ratio).max(0.0)
    } else {
        ratio.min(100.0)
    };

    if progress.is_nan() {
        return NEUTRAL_PROGRESS;
    }
    progress.round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ProgressStatus {
    pub fn from_progress(progress: u8) -> Self {
        match progress {
            p if p > 90 => ProgressStatus::Excellent,
            p if p > 70 => ProgressStatus::Good,
            p if p > 40 => ProgressStatus::Fair,
            _ => ProgressStatus::Poor,
        }
    }

    /// Colour class the dashboard cards use for this band.
    pub fn css_class(&self) -> &'static str {
        match self {
            ProgressStatus::Excellent => "text-green-500",
            ProgressStatus::Good => "text-blue-500",
            ProgressStatus::Fair => "text-yellow-500",
            ProgressStatus::Poor => "text-red-500",
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MetricCard {
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_value: Option<f64>,
    pub unit: &'static str,
    pub target: String,
    pub progress: u8,
    pub status: ProgressStatus,
    pub status_class: &'static str,
    pub trend: Trend,
}

impl MetricCard {
    fn new(value: Option<f64>, unit: &'static str, target: String, progress: u8, trend: Trend) -> Self {
        let status = ProgressStatus::from_progress(progress);
        Self {
            value,
            secondary_value: None,
            unit,
            target,
            progress,
            status,
            status_class: status.css_class(),
            trend,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct VitalsStats {
    pub record_date: chrono::NaiveDate,
    pub heart_rate: MetricCard,
    pub weight: MetricCard,
    pub blood_pressure: MetricCard,
    pub blood_sugar: MetricCard,
}

fn trend_below(value: Option<f64>, threshold: f64) -> Trend {
    match value {
        Some(v) if v < threshold => Trend::Down,
        _ => Trend::Up,
    }
}

/// Dashboard cards derived from the most recent vitals entry.
pub fn vitals_stats(latest: &TypedRecord<VitalsPayload>) -> VitalsStats {
    let vitals = &latest.data;
    let heart_rate = parse_measurement(vitals.heart_rate.as_deref());
    let weight = parse_measurement(vitals.weight.as_deref());
    let systolic = parse_measurement(vitals.blood_pressure_systolic.as_deref());
    let diastolic = parse_measurement(vitals.blood_pressure_diastolic.as_deref());
    let blood_sugar = parse_measurement(vitals.blood_sugar.as_deref());

    let heart_rate_card = MetricCard::new(
        heart_rate,
        "BPM",
        "60-100 BPM".to_string(),
        calculate_progress(heart_rate, Some(HEART_RATE_TARGET), false),
        trend_below(heart_rate, HEART_RATE_TARGET),
    );

    // Weight is scored against ten percent above the current reading.
    let weight_target = weight
        .map(|w| format!("{} kg", (w * 0.9).round()))
        .unwrap_or_else(|| "--".to_string());
    let weight_card = MetricCard::new(
        weight,
        "kg",
        weight_target,
        calculate_progress(weight, weight.map(|w| w * 1.1), true),
        Trend::Down,
    );

    let systolic_or_target = systolic.filter(|s| *s != 0.0).unwrap_or(SYSTOLIC_TARGET);
    let mut blood_pressure_card = MetricCard::new(
        systolic,
        "mmHg",
        "<120/80 mmHg".to_string(),
        calculate_progress(Some(SYSTOLIC_TARGET), Some(systolic_or_target), true),
        trend_below(systolic, SYSTOLIC_TARGET),
    );
    blood_pressure_card.secondary_value = diastolic;

    let sugar_or_target = blood_sugar.filter(|s| *s != 0.0).unwrap_or(BLOOD_SUGAR_TARGET);
    let blood_sugar_card = MetricCard::new(
        blood_sugar,
        "mg/dL",
        "70-100 mg/dL".to_string(),
        calculate_progress(Some(sugar_or_target), Some(BLOOD_SUGAR_TARGET), true),
        trend_below(blood_sugar, BLOOD_SUGAR_TARGET),
    );

    VitalsStats {
        record_date: latest.record_date,
        heart_rate: heart_rate_card,
        weight: weight_card,
        blood_pressure: blood_pressure_card,
        blood_sugar: blood_sugar_card,
    }
}

/// Stats for the newest vitals entry, `None` when nothing has been recorded.
pub fn latest_vitals_stats(records: &ClassifiedRecords) -> Option<VitalsStats> {
    records.vitals.first().map(vitals_stats)
}

pub fn nutrition_totals(meals: &[Meal]) -> NutritionTotals {
    meals.iter().fold(NutritionTotals::default(), |total, meal| NutritionTotals {
        calories: total.calories + meal.calories,
        protein: total.protein + meal.protein,
        carbs: total.carbs + meal.carbs,
        fat: total.fat + meal.fat,
    })
}

pub fn yoga_stats(sessions: &[YogaSession]) -> YogaStats {
    let total_sessions = sessions.len();
    let total_duration: i64 = sessions.iter().map(|s| s.duration as i64).sum();
    let total_calories: i64 = sessions
        .iter()
        .map(|s| s.calories_burned.unwrap_or(0) as i64)
        .sum();
    let average_duration = if total_sessions == 0 {
        0.0
    } else {
        total_duration as f64 / total_sessions as f64
    };

    YogaStats {
        total_sessions,
        total_duration,
        total_calories,
        average_duration,
    }
}
