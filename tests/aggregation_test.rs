use chrono::{Duration, NaiveDate, Utc};
use proptest::prelude::*;
use proptest::test_runner::Config;
use serde_json::json;
use uuid::Uuid;

use healthdesk_backend::aggregation::activity::{recent_activity, RECENT_ACTIVITY_LIMIT};
use healthdesk_backend::aggregation::build_dashboard;
use healthdesk_backend::aggregation::classifier::{classify_records, BucketCounts};
use healthdesk_backend::aggregation::metrics::{
    calculate_progress, latest_vitals_stats, nutrition_totals, ProgressStatus, NEUTRAL_PROGRESS,
};
use healthdesk_backend::aggregation::series::{build_vitals_series, TimeRange};
use healthdesk_backend::models::common::parse_measurement;
use healthdesk_backend::models::diet::DietGoal;
use healthdesk_backend::models::health_record::HealthRecord;

fn record(record_type: &str, record_date: NaiveDate, description: &str) -> HealthRecord {
    let now = Utc::now();
    HealthRecord {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        record_type: record_type.to_string(),
        record_date,
        description: description.to_string(),
        status: "active".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Duration::days(offset)
}

#[test]
fn classifier_buckets_by_type_and_drops_bad_payloads() {
    let records = vec![
        record("vitals", day(3), r#"{"heartRate":"72"}"#),
        record("vitals", day(2), "not json at all"),
        record("lab_results", day(2), r#"{"cholesterolLDL":"110","hemoglobin":13.5}"#),
        record("body_measurements", day(1), r#"{"height":"172"}"#),
        record("diet_plan", day(1), r#"{"name":"Plan","totalCalories":1200,"meals":[]}"#),
        record("sleep", day(1), r#"{"hours":"8"}"#),
    ];

    let classified = classify_records(&records);

    assert_eq!(
        BucketCounts::from(&classified),
        BucketCounts { vitals: 1, body_measurements: 1, lab_results: 1, diet_plans: 1 }
    );
    assert_eq!(classified.vitals[0].data.heart_rate.as_deref(), Some("72"));
    assert_eq!(classified.lab_results[0].data.cholesterol_ldl.as_deref(), Some("110"));
    assert_eq!(classified.lab_results[0].data.hemoglobin.as_deref(), Some("13.5"));
    assert_eq!(classified.diet_plans[0].data.total_calories, 1200.0);
}

#[test]
fn classifier_keeps_well_formed_payloads_with_odd_field_kinds() {
    let records = vec![
        record("vitals", day(3), r#"{"heartRate":"72","weight":true}"#),
        record("diet_plan", day(2), r#"{"goal":"maintenance","totalCalories":500,"meals":[]}"#),
        record("diet_plan", day(1), r#"{"name":"P","meals":[{"name":"x","calories":"300"}]}"#),
        record("vitals", day(1), r#"[72]"#),
    ];

    let classified = classify_records(&records);

    assert_eq!(classified.vitals.len(), 1);
    assert_eq!(classified.vitals[0].data.heart_rate.as_deref(), Some("72"));
    assert_eq!(classified.vitals[0].data.weight, None);

    assert_eq!(classified.diet_plans.len(), 2);
    assert_eq!(classified.diet_plans[0].data.name, "");
    assert_eq!(classified.diet_plans[0].data.total_calories, 500.0);
    let meals = &classified.diet_plans[1].data.meals;
    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0].id, "");
    assert_eq!(meals[0].calories, 300.0);
    assert_eq!(nutrition_totals(meals).calories, 300.0);
}

#[test]
fn measurements_read_their_leading_number() {
    assert_eq!(parse_measurement(Some("72 bpm")), Some(72.0));
    assert_eq!(parse_measurement(Some("70kg")), Some(70.0));
    assert_eq!(parse_measurement(Some("  -1.5e2mg")), Some(-150.0));
    assert_eq!(parse_measurement(Some("98.6°F")), Some(98.6));
    assert_eq!(parse_measurement(Some("1e")), Some(1.0));
    assert_eq!(parse_measurement(Some("abc")), None);
    assert_eq!(parse_measurement(Some("-")), None);
    assert_eq!(parse_measurement(Some("   ")), None);
    assert_eq!(parse_measurement(None), None);
}

#[test]
fn readings_with_units_still_chart_and_score() {
    let records = vec![record("vitals", day(4), r#"{"heartRate":"72 bpm","weight":"70kg"}"#)];
    let classified = classify_records(&records);

    let series = build_vitals_series(&classified.vitals, TimeRange::Week);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].heart_rate, 72.0);
    assert_eq!(series[0].weight, 70.0);

    let stats = latest_vitals_stats(&classified).expect("vitals were recorded");
    assert_eq!(stats.heart_rate.value, Some(72.0));
    assert_eq!(stats.heart_rate.progress, 90);
    assert_eq!(stats.weight.value, Some(70.0));
}

#[test]
fn stats_follow_the_newest_vitals() {
    let records = vec![
        record("vitals", day(5), r#"{"heartRate":"72","weight":"70","bloodPressureSystolic":"130","bloodPressureDiastolic":"85","bloodSugar":"110"}"#),
        record("vitals", day(1), r#"{"heartRate":"90"}"#),
    ];
    let stats = latest_vitals_stats(&classify_records(&records)).expect("stats");

    assert_eq!(stats.record_date, day(5));
    assert_eq!(stats.heart_rate.value, Some(72.0));
    assert_eq!(stats.heart_rate.progress, 90);
    assert_eq!(stats.heart_rate.status, ProgressStatus::Good);
    assert_eq!(stats.heart_rate.status_class, "text-blue-500");

    assert_eq!(stats.weight.target, "63 kg");
    assert_eq!(stats.blood_pressure.secondary_value, Some(85.0));
    // 100 - 120/130*100
    assert_eq!(stats.blood_pressure.progress, 8);
    assert_eq!(stats.blood_sugar.progress, 0);
}

#[test]
fn missing_readings_score_neutral() {
    let records = vec![record("vitals", day(0), r#"{"temperature":"36.6"}"#)];
    let stats = latest_vitals_stats(&classify_records(&records)).expect("stats");

    assert_eq!(stats.heart_rate.value, None);
    assert_eq!(stats.heart_rate.progress, NEUTRAL_PROGRESS);
    assert_eq!(stats.weight.target, "--");
    assert_eq!(stats.weight.progress, NEUTRAL_PROGRESS);
    assert_eq!(stats.blood_pressure.progress, 0);
}

#[test]
fn progress_edge_cases() {
    assert_eq!(calculate_progress(None, Some(80.0), false), 50);
    assert_eq!(calculate_progress(Some(0.0), Some(80.0), false), 50);
    assert_eq!(calculate_progress(Some(72.0), Some(0.0), false), 50);
    assert_eq!(calculate_progress(Some(160.0), Some(80.0), false), 100);
    assert_eq!(calculate_progress(Some(-40.0), Some(80.0), false), 0);
    assert_eq!(calculate_progress(Some(240.0), Some(120.0), true), 0);
    assert_eq!(calculate_progress(Some(60.0), Some(120.0), true), 50);
    assert_eq!(calculate_progress(Some(f64::NAN), Some(1.0), true), 50);
}

#[test]
fn series_keeps_the_newest_window_in_ascending_order() {
    // Input deliberately out of order
    let records: Vec<HealthRecord> = [4, 9, 0, 7, 2, 8, 1, 6, 3, 5]
        .into_iter()
        .map(|offset| record("vitals", day(offset), &json!({ "heartRate": (60 + offset).to_string() }).to_string()))
        .collect();
    let classified = classify_records(&records);

    let points = build_vitals_series(&classified.vitals, TimeRange::Week);
    let names: Vec<&str> = points.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["1/4", "1/5", "1/6", "1/7", "1/8", "1/9", "1/10"]);
    assert_eq!(points[0].heart_rate, 63.0);
    assert_eq!(points[0].weight, 0.0);
}

#[test]
fn recent_activity_is_capped() {
    let mut records: Vec<HealthRecord> = (0..8).map(|i| record("vitals", day(i), r#"{"heartRate":"70"}"#)).collect();
    records.push(record("diet_plan", day(9), "broken"));
    records.reverse();

    let activity = recent_activity(&records);
    assert_eq!(activity.len(), RECENT_ACTIVITY_LIMIT);
    assert_eq!(activity[0].activity_type, "nutrition");
    assert_eq!(activity[0].description, "Created diet plan");
    assert!(activity.iter().all(|a| a.status == "completed"));
}

#[test]
fn dashboard_combines_every_stage() {
    let records = vec![
        record("diet_plan", day(2), r#"{"name":"Plan","meals":[]}"#),
        record("vitals", day(1), r#"{"heartRate":"72"}"#),
    ];
    let dashboard = build_dashboard(&records, TimeRange::Month);

    assert_eq!(dashboard.range, TimeRange::Month);
    assert_eq!(dashboard.series.len(), 1);
    assert_eq!(dashboard.counts.diet_plans, 1);
    assert_eq!(dashboard.recent_activity.len(), 2);
    assert!(dashboard.stats.is_some());
}

#[test]
fn template_totals_match_their_meals() {
    for goal in DietGoal::ALL {
        let meals = goal.meal_template();
        let totals = nutrition_totals(&meals);
        assert_eq!(meals.len(), 4);
        assert_eq!(totals.calories, meals.iter().map(|m| m.calories).sum::<f64>());
    }
}

fn any_reading() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        Just(None),
        Just(Some(0.0)),
        Just(Some(f64::NAN)),
        Just(Some(f64::INFINITY)),
        (-1.0e6_f64..1.0e6_f64).prop_map(Some),
    ]
}

fn any_description() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{0,40}",
        (0_u32..400).prop_map(|v| json!({ "heartRate": v.to_string(), "weight": v }).to_string()),
        Just("{}".to_string()),
        Just("null".to_string()),
        Just(r#"{"heartRate":{"nested":true}}"#.to_string()),
    ]
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn progress_is_always_a_percentage(
        current in any_reading(),
        target in any_reading(),
        lower_is_better in any::<bool>()
    ) {
        let progress = calculate_progress(current, target, lower_is_better);
        prop_assert!(progress <= 100);
    }

    #[test]
    fn classification_never_panics_and_never_grows(
        entries in prop::collection::vec(
            (prop::sample::select(vec!["vitals", "body_measurements", "lab_results", "diet_plan", "other"]), any_description()),
            0..40
        )
    ) {
        let records: Vec<HealthRecord> = entries
            .iter()
            .enumerate()
            .map(|(i, (record_type, description))| record(record_type, day(i as i64), description))
            .collect();
        let classified = classify_records(&records);
        prop_assert!(classified.len() <= records.len());
        let _ = build_dashboard(&records, TimeRange::Quarter);
    }

    #[test]
    fn series_length_is_min_of_records_and_window(
        offsets in prop::collection::vec(0_i64..365, 0..120),
        range in prop::sample::select(vec![TimeRange::Week, TimeRange::Month, TimeRange::Quarter])
    ) {
        let records: Vec<HealthRecord> = offsets
            .iter()
            .map(|offset| record("vitals", day(*offset), r#"{"heartRate":"70"}"#))
            .collect();
        let classified = classify_records(&records);
        let points = build_vitals_series(&classified.vitals, range);
        prop_assert_eq!(points.len(), offsets.len().min(range.record_limit()));

        let mut newest: Vec<i64> = offsets.clone();
        newest.sort_unstable_by(|a, b| b.cmp(a));
        let mut expected: Vec<String> = newest
            .into_iter()
            .take(range.record_limit())
            .map(|offset| {
                let date = day(offset);
                format!("{}/{}", chrono::Datelike::month(&date), chrono::Datelike::day(&date))
            })
            .collect();
        expected.reverse();
        let names: Vec<String> = points.into_iter().map(|p| p.name).collect();
        prop_assert_eq!(names, expected);
    }
}
