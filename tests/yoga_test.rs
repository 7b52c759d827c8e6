use reqwest::Method;
use serde_json::json;

mod common;
use common::utils::{json_body, make_authenticated_request, spawn_app};

#[tokio::test]
async fn sessions_feed_stats() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    let empty = json_body(make_authenticated_request(&app.client, Method::GET, &app.url("/yoga/stats"), &token, None).await).await;
    assert_eq!(empty["data"]["total_sessions"], 0);
    assert_eq!(empty["data"]["average_duration"], 0.0);

    for (name, duration, calories) in [("Sun Salutation", 30, Some(120)), ("Yin", 45, None), ("Vinyasa", 60, Some(300))] {
        let response = make_authenticated_request(
            &app.client,
            Method::POST,
            &app.url("/yoga/sessions"),
            &token,
            Some(json!({ "session_name": name, "duration": duration, "calories_burned": calories })),
        )
        .await;
        assert_eq!(201, response.status().as_u16());
    }

    let stats = json_body(make_authenticated_request(&app.client, Method::GET, &app.url("/yoga/stats"), &token, None).await).await;
    assert_eq!(stats["data"]["total_sessions"], 3);
    assert_eq!(stats["data"]["total_duration"], 135);
    assert_eq!(stats["data"]["total_calories"], 420);
    assert_eq!(stats["data"]["average_duration"], 45.0);
}

#[tokio::test]
async fn session_validation_and_update() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    let response = make_authenticated_request(
        &app.client,
        Method::POST,
        &app.url("/yoga/sessions"),
        &token,
        Some(json!({ "session_name": "Hatha", "duration": 0 })),
    )
    .await;
    assert_eq!(400, response.status().as_u16());

    let created = json_body(
        make_authenticated_request(
            &app.client,
            Method::POST,
            &app.url("/yoga/sessions"),
            &token,
            Some(json!({ "session_name": "Hatha", "duration": 40, "date": "2025-02-10" })),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // Omitting the date keeps the stored one
    let response = make_authenticated_request(
        &app.client,
        Method::PUT,
        &app.url(&format!("/yoga/sessions/{}", id)),
        &token,
        Some(json!({ "session_name": "Hatha Flow", "duration": 50 })),
    )
    .await;
    assert_eq!(200, response.status().as_u16());
    let updated = json_body(response).await;
    assert_eq!(updated["data"]["session_name"], "Hatha Flow");
    assert_eq!(updated["data"]["date"], "2025-02-10");

    let response = make_authenticated_request(&app.client, Method::DELETE, &app.url(&format!("/yoga/sessions/{}", id)), &token, None).await;
    assert_eq!(200, response.status().as_u16());
    let listed = json_body(make_authenticated_request(&app.client, Method::GET, &app.url("/yoga/sessions"), &token, None).await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}
