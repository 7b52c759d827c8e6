use reqwest::Method;
use serde_json::json;

mod common;
use common::utils::{json_body, make_authenticated_request, spawn_app};

#[tokio::test]
async fn dashboard_reflects_latest_vitals() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    let response = make_authenticated_request(
        &app.client,
        Method::POST,
        &app.url("/health/records"),
        &token,
        Some(json!({ "record_type": "vitals", "data": { "heartRate": "72", "weight": "70" } })),
    )
    .await;
    assert_eq!(201, response.status().as_u16());

    let response = make_authenticated_request(&app.client, Method::GET, &app.url("/health/dashboard"), &token, None).await;
    assert_eq!(200, response.status().as_u16());
    let body = json_body(response).await;

    let heart_rate = &body["data"]["stats"]["heart_rate"];
    assert_eq!(heart_rate["value"], 72.0);
    assert_eq!(heart_rate["unit"], "BPM");
    assert_eq!(heart_rate["progress"], 90);
    assert_eq!(heart_rate["status_class"], "text-blue-500");

    assert_eq!(body["data"]["counts"]["vitals"], 1);
    assert_eq!(body["data"]["series"].as_array().unwrap().len(), 1);
    let activity = body["data"]["recent_activity"].as_array().unwrap();
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0]["description"], "Updated vital signs");
}

#[tokio::test]
async fn dashboard_without_records_has_no_stats() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    let body = json_body(
        make_authenticated_request(&app.client, Method::GET, &app.url("/health/dashboard"), &token, None).await,
    )
    .await;

    assert!(body["data"]["stats"].is_null());
    assert!(body["data"]["series"].as_array().unwrap().is_empty());
    assert!(body["data"]["recent_activity"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn series_is_windowed_and_ascending() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    for day in 1..=10 {
        let response = make_authenticated_request(
            &app.client,
            Method::POST,
            &app.url("/health/records"),
            &token,
            Some(json!({
                "record_type": "vitals",
                "record_date": format!("2025-01-{:02}", day),
                "data": { "heartRate": (60 + day).to_string() }
            })),
        )
        .await;
        assert_eq!(201, response.status().as_u16());
    }

    let body = json_body(
        make_authenticated_request(
            &app.client,
            Method::GET,
            &app.url("/health/dashboard/series?range=week"),
            &token,
            None,
        )
        .await,
    )
    .await;
    let points = body["data"].as_array().unwrap();
    assert_eq!(points.len(), 7);
    assert_eq!(points[0]["name"], "1/4");
    assert_eq!(points[6]["name"], "1/10");
    assert_eq!(points[6]["heartRate"], 70.0);

    let body = json_body(
        make_authenticated_request(
            &app.client,
            Method::GET,
            &app.url("/health/dashboard/series?range=month"),
            &token,
            None,
        )
        .await,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn unknown_range_is_rejected() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    let response = make_authenticated_request(
        &app.client,
        Method::GET,
        &app.url("/health/dashboard?range=decade"),
        &token,
        None,
    )
    .await;
    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn readings_with_units_are_charted_by_their_number() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    let response = make_authenticated_request(
        &app.client,
        Method::POST,
        &app.url("/health/records"),
        &token,
        Some(json!({ "record_type": "vitals", "data": { "heartRate": "72 bpm", "weight": "70kg" } })),
    )
    .await;
    assert_eq!(201, response.status().as_u16());

    let body = json_body(
        make_authenticated_request(&app.client, Method::GET, &app.url("/health/dashboard"), &token, None).await,
    )
    .await;

    assert_eq!(body["data"]["stats"]["heart_rate"]["value"], 72.0);
    assert_eq!(body["data"]["stats"]["heart_rate"]["progress"], 90);
    assert_eq!(body["data"]["series"][0]["heartRate"], 72.0);
    assert_eq!(body["data"]["series"][0]["weight"], 70.0);
}
