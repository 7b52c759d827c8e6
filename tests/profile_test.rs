use reqwest::Method;
use serde_json::json;

mod common;
use common::utils::{json_body, make_authenticated_request, spawn_app};

#[tokio::test]
async fn profile_is_created_on_first_update() {
    let app = spawn_app().await;
    let (user_id, token) = app.new_user();

    let response = make_authenticated_request(&app.client, Method::GET, &app.url("/profile"), &token, None).await;
    assert_eq!(404, response.status().as_u16());

    let response = make_authenticated_request(
        &app.client,
        Method::PUT,
        &app.url("/profile"),
        &token,
        Some(json!({ "full_name": "Priya Sharma", "phone_number": "+91 98765 43210" })),
    )
    .await;
    assert_eq!(200, response.status().as_u16());

    // Later partial updates keep untouched fields
    make_authenticated_request(
        &app.client,
        Method::PUT,
        &app.url("/profile"),
        &token,
        Some(json!({ "avatar_url": "https://example.com/p.png" })),
    )
    .await;

    let body = json_body(make_authenticated_request(&app.client, Method::GET, &app.url("/profile"), &token, None).await).await;
    assert_eq!(body["data"]["id"], user_id.to_string());
    assert_eq!(body["data"]["full_name"], "Priya Sharma");
    assert_eq!(body["data"]["avatar_url"], "https://example.com/p.png");
}

#[tokio::test]
async fn blank_full_name_is_rejected() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    let response = make_authenticated_request(&app.client, Method::PUT, &app.url("/profile"), &token, Some(json!({ "full_name": "" }))).await;
    assert_eq!(400, response.status().as_u16());
}
