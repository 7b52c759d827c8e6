use reqwest::Method;
use serde_json::json;

mod common;
use common::utils::{json_body, make_authenticated_request, spawn_app};

#[tokio::test]
async fn create_and_list_vitals_record() {
    let app = spawn_app().await;
    let (user_id, token) = app.new_user();

    let response = make_authenticated_request(
        &app.client,
        Method::POST,
        &app.url("/health/records"),
        &token,
        Some(json!({
            "record_type": "vitals",
            "record_date": "2025-03-01",
            "data": { "heartRate": "72", "weight": 70 }
        })),
    )
    .await;
    assert_eq!(201, response.status().as_u16());
    let created = json_body(response).await;
    assert_eq!(created["data"]["record_type"], "vitals");
    assert_eq!(created["data"]["status"], "active");
    assert_eq!(created["data"]["user_id"], user_id.to_string());

    // The payload is stored as JSON text in `description`
    let description: serde_json::Value =
        serde_json::from_str(created["data"]["description"].as_str().unwrap()).unwrap();
    assert_eq!(description["heartRate"], "72");

    let response = make_authenticated_request(&app.client, Method::GET, &app.url("/health/records"), &token, None).await;
    assert_eq!(200, response.status().as_u16());
    let listed = json_body(response).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_filters_by_record_type() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    for (record_type, data) in [
        ("vitals", json!({ "heartRate": "70" })),
        ("lab_results", json!({ "hemoglobin": "14" })),
        ("body_measurements", json!({ "height": "180" })),
    ] {
        let response = make_authenticated_request(
            &app.client,
            Method::POST,
            &app.url("/health/records"),
            &token,
            Some(json!({ "record_type": record_type, "data": data })),
        )
        .await;
        assert_eq!(201, response.status().as_u16());
    }

    let response = make_authenticated_request(
        &app.client,
        Method::GET,
        &app.url("/health/records?record_type=lab_results"),
        &token,
        None,
    )
    .await;
    let body = json_body(response).await;
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["record_type"], "lab_results");
}

#[tokio::test]
async fn create_rejects_empty_or_misshapen_data() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    let cases = [
        json!({ "record_type": "vitals", "data": {} }),
        json!({ "record_type": "vitals", "data": "72" }),
        json!({ "record_type": "vitals", "data": { "heartRate": { "value": 72 } } }),
        json!({ "record_type": "vitals", "data": { "heartRate": "72", "weight": true } }),
        json!({ "record_type": "diet_plan", "data": { "name": "P", "meals": "none" } }),
        json!({ "record_type": "unknown_type", "data": { "a": "b" } }),
    ];

    for body in cases {
        let response = make_authenticated_request(
            &app.client,
            Method::POST,
            &app.url("/health/records"),
            &token,
            Some(body.clone()),
        )
        .await;
        assert_eq!(400, response.status().as_u16(), "accepted {}", body);
    }
}

#[tokio::test]
async fn update_and_delete_own_record() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    let created = json_body(
        make_authenticated_request(
            &app.client,
            Method::POST,
            &app.url("/health/records"),
            &token,
            Some(json!({ "record_type": "vitals", "data": { "heartRate": "80" } })),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = make_authenticated_request(
        &app.client,
        Method::PUT,
        &app.url(&format!("/health/records/{}", id)),
        &token,
        Some(json!({ "data": { "heartRate": "65" }, "status": "reviewed" })),
    )
    .await;
    assert_eq!(200, response.status().as_u16());
    let updated = json_body(response).await;
    assert_eq!(updated["data"]["status"], "reviewed");
    assert!(updated["data"]["description"].as_str().unwrap().contains("65"));

    let response = make_authenticated_request(
        &app.client,
        Method::DELETE,
        &app.url(&format!("/health/records/{}", id)),
        &token,
        None,
    )
    .await;
    assert_eq!(200, response.status().as_u16());

    let response = make_authenticated_request(
        &app.client,
        Method::DELETE,
        &app.url(&format!("/health/records/{}", id)),
        &token,
        None,
    )
    .await;
    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn other_users_records_are_not_found() {
    let app = spawn_app().await;
    let (_, owner_token) = app.new_user();
    let (_, intruder_token) = app.new_user();

    let created = json_body(
        make_authenticated_request(
            &app.client,
            Method::POST,
            &app.url("/health/records"),
            &owner_token,
            Some(json!({ "record_type": "vitals", "data": { "heartRate": "80" } })),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = make_authenticated_request(
        &app.client,
        Method::PUT,
        &app.url(&format!("/health/records/{}", id)),
        &intruder_token,
        Some(json!({ "status": "hijacked" })),
    )
    .await;
    assert_eq!(404, response.status().as_u16());

    let response = make_authenticated_request(
        &app.client,
        Method::DELETE,
        &app.url(&format!("/health/records/{}", id)),
        &intruder_token,
        None,
    )
    .await;
    assert_eq!(404, response.status().as_u16());

    let listed = json_body(
        make_authenticated_request(&app.client, Method::GET, &app.url("/health/records"), &intruder_token, None).await,
    )
    .await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}
