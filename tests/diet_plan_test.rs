use reqwest::Method;
use serde_json::json;
use uuid::Uuid;

mod common;
use common::utils::{json_body, make_authenticated_request, spawn_app};

fn meals() -> serde_json::Value {
    json!([
        { "id": "b", "name": "Breakfast", "calories": 350.0, "protein": 20.0, "carbs": 40.0, "fat": 10.0 },
        { "id": "l", "name": "Lunch", "calories": 600.5, "protein": 35.0, "carbs": 60.0, "fat": 20.0 },
        { "id": "d", "name": "Dinner", "calories": 549.5, "protein": 40.0, "carbs": 50.0, "fat": 15.0 }
    ])
}

#[tokio::test]
async fn saved_plan_total_is_sum_of_meals() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    let response = make_authenticated_request(
        &app.client,
        Method::POST,
        &app.url("/diet/plans"),
        &token,
        Some(json!({ "name": "Cutting week", "goal": "weight_loss", "meals": meals() })),
    )
    .await;
    assert_eq!(201, response.status().as_u16());
    let saved = json_body(response).await;
    assert_eq!(saved["data"]["totalCalories"], 1500.0);
    assert_eq!(saved["data"]["goal"], "weight_loss");
    assert_eq!(saved["data"]["totals"]["protein"], 95.0);

    let listed = json_body(
        make_authenticated_request(&app.client, Method::GET, &app.url("/diet/plans"), &token, None).await,
    )
    .await;
    let plans = listed["data"].as_array().unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0]["name"], "Cutting week");
    assert_eq!(plans[0]["totalCalories"], 1500.0);
}

#[tokio::test]
async fn stored_total_survives_later_meal_edits() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    let saved = json_body(
        make_authenticated_request(
            &app.client,
            Method::POST,
            &app.url("/diet/plans"),
            &token,
            Some(json!({ "name": "Plan", "meals": meals() })),
        )
        .await,
    )
    .await;
    let id = saved["data"]["id"].as_str().unwrap().to_string();

    // Rewrite the stored payload with one meal dropped but the old total kept
    let response = make_authenticated_request(
        &app.client,
        Method::PUT,
        &app.url(&format!("/health/records/{}", id)),
        &token,
        Some(json!({
            "data": {
                "name": "Plan",
                "goal": "",
                "totalCalories": 1500.0,
                "meals": [{ "id": "b", "name": "Breakfast", "calories": 350.0 }]
            }
        })),
    )
    .await;
    assert_eq!(200, response.status().as_u16());

    let listed = json_body(
        make_authenticated_request(&app.client, Method::GET, &app.url("/diet/plans"), &token, None).await,
    )
    .await;
    let plan = &listed["data"][0];
    assert_eq!(plan["totalCalories"], 1500.0);
    assert_eq!(plan["totals"]["calories"], 350.0);
}

#[tokio::test]
async fn save_requires_name_and_meals() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    for body in [
        json!({ "name": "  ", "meals": meals() }),
        json!({ "name": "Empty", "meals": [] }),
        json!({ "name": "Bad goal", "goal": "bulk_forever", "meals": meals() }),
    ] {
        let response = make_authenticated_request(&app.client, Method::POST, &app.url("/diet/plans"), &token, Some(body.clone())).await;
        assert_eq!(400, response.status().as_u16(), "accepted {}", body);
    }
}

#[tokio::test]
async fn delete_only_removes_diet_plans() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    let vitals = json_body(
        make_authenticated_request(
            &app.client,
            Method::POST,
            &app.url("/health/records"),
            &token,
            Some(json!({ "record_type": "vitals", "data": { "heartRate": "70" } })),
        )
        .await,
    )
    .await;
    let vitals_id = vitals["data"]["id"].as_str().unwrap().to_string();

    let response = make_authenticated_request(
        &app.client,
        Method::DELETE,
        &app.url(&format!("/diet/plans/{}", vitals_id)),
        &token,
        None,
    )
    .await;
    assert_eq!(404, response.status().as_u16());

    let saved = json_body(
        make_authenticated_request(
            &app.client,
            Method::POST,
            &app.url("/diet/plans"),
            &token,
            Some(json!({ "name": "Plan", "meals": meals() })),
        )
        .await,
    )
    .await;
    let plan_id = saved["data"]["id"].as_str().unwrap().to_string();

    let response = make_authenticated_request(
        &app.client,
        Method::DELETE,
        &app.url(&format!("/diet/plans/{}", plan_id)),
        &token,
        None,
    )
    .await;
    assert_eq!(200, response.status().as_u16());

    let response = make_authenticated_request(
        &app.client,
        Method::DELETE,
        &app.url(&format!("/diet/plans/{}", Uuid::new_v4())),
        &token,
        None,
    )
    .await;
    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn goals_and_templates_are_listed() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    let goals = json_body(
        make_authenticated_request(&app.client, Method::GET, &app.url("/diet/goals"), &token, None).await,
    )
    .await;
    let goals = goals["data"].as_array().unwrap();
    assert_eq!(goals.len(), 3);
    assert_eq!(goals[0]["value"], "weight_loss");
    assert_eq!(goals[0]["calorie_modifier"], -500);

    let template = json_body(
        make_authenticated_request(&app.client, Method::GET, &app.url("/diet/templates/muscle_gain"), &token, None).await,
    )
    .await;
    assert_eq!(template["data"]["meals"].as_array().unwrap().len(), 4);
    assert_eq!(template["data"]["totalCalories"], 2400.0);

    let response = make_authenticated_request(&app.client, Method::GET, &app.url("/diet/templates/keto"), &token, None).await;
    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn calorie_target_uses_latest_measurements() {
    let app = spawn_app().await;
    let (_, token) = app.new_user();

    let body = json_body(
        make_authenticated_request(&app.client, Method::GET, &app.url("/diet/calorie-target"), &token, None).await,
    )
    .await;
    assert_eq!(body["data"]["bmr"], 2000);
    assert_eq!(body["data"]["calorie_target"], 2000);

    for (record_type, data) in [
        ("vitals", json!({ "weight": "80" })),
        ("body_measurements", json!({ "height": "180" })),
    ] {
        make_authenticated_request(
            &app.client,
            Method::POST,
            &app.url("/health/records"),
            &token,
            Some(json!({ "record_type": record_type, "data": data })),
        )
        .await;
    }

    // 10*80 + 6.25*180 - 5*30 + 5 = 1780
    let body = json_body(
        make_authenticated_request(
            &app.client,
            Method::GET,
            &app.url("/diet/calorie-target?goal=muscle_gain"),
            &token,
            None,
        )
        .await,
    )
    .await;
    assert_eq!(body["data"]["bmr"], 1780);
    assert_eq!(body["data"]["calorie_target"], 2280);
}
