use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::aggregation::classifier::decode_record;
use crate::aggregation::metrics::nutrition_totals;
use crate::db::SharedStore;
use crate::error::{require_field, AppError};
use crate::handlers::caller_id;
use crate::middleware::auth::Claims;
use crate::models::common::{parse_measurement, ApiResponse};
use crate::models::diet::{
    CalorieTarget, CalorieTargetQuery, CreateDietPlanRequest, DietGoal, DietGoalInfo, DietPlan,
    SavedDietPlan,
};
use crate::models::health_record::{
    BodyMeasurementsPayload, NewHealthRecord, RecordType, VitalsPayload, DEFAULT_RECORD_STATUS,
};
use crate::utils::health_calculations::{calorie_target, estimate_planner_bmr};

fn parse_goal(raw: &str) -> Result<DietGoal, AppError> {
    raw.parse::<DietGoal>().map_err(AppError::Validation)
}

pub async fn list_goals() -> HttpResponse {
    let goals: Vec<DietGoalInfo> = DietGoal::ALL.into_iter().map(DietGoalInfo::from).collect();
    HttpResponse::Ok().json(ApiResponse::success("Diet goals retrieved", goals))
}

pub async fn get_template(goal: web::Path<String>) -> Result<HttpResponse, AppError> {
    let goal = parse_goal(&goal)?;
    let meals = goal.meal_template();
    let template = DietPlan {
        name: format!("{} Plan", goal.label()),
        goal: goal.as_str().to_string(),
        total_calories: nutrition_totals(&meals).calories,
        meals,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success("Diet template retrieved", template)))
}

/// BMR from the most recent body-measurement height and vitals weight, adjusted for the goal.
#[tracing::instrument(name = "Get calorie target", skip(store, claims), fields(user_id = %claims.sub))]
pub async fn get_calorie_target(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    query: web::Query<CalorieTargetQuery>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let goal = query.goal.as_deref().map(parse_goal).transpose()?;

    let height = store
        .latest_health_record(user_id, RecordType::BodyMeasurements)
        .await?
        .and_then(|record| decode_record::<BodyMeasurementsPayload>(&record))
        .and_then(|record| parse_measurement(record.data.height.as_deref()));
    let weight = store
        .latest_health_record(user_id, RecordType::Vitals)
        .await?
        .and_then(|record| decode_record::<VitalsPayload>(&record))
        .and_then(|record| parse_measurement(record.data.weight.as_deref()));

    let bmr = estimate_planner_bmr(weight, height);
    let target = CalorieTarget {
        bmr,
        goal,
        calorie_target: calorie_target(bmr, goal),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success("Calorie target calculated", target)))
}

#[tracing::instrument(name = "Save diet plan", skip(store, claims, body), fields(user_id = %claims.sub))]
pub async fn save_diet_plan(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    body: web::Json<CreateDietPlanRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let body = body.into_inner();

    require_field(&body.name, "name")?;
    if body.meals.is_empty() {
        return Err(AppError::validation("At least one meal is required"));
    }

    // Fixed at save time; later reads report it as stored.
    let total_calories = nutrition_totals(&body.meals).calories;
    let plan = DietPlan {
        name: body.name,
        goal: body.goal.map(|goal| goal.as_str().to_string()).unwrap_or_default(),
        total_calories,
        meals: body.meals,
    };

    let record = store
        .insert_health_record(NewHealthRecord {
            user_id,
            record_type: RecordType::DietPlan,
            record_date: Utc::now().date_naive(),
            description: serde_json::to_string(&plan)?,
            status: DEFAULT_RECORD_STATUS.to_string(),
        })
        .await?;

    let saved = SavedDietPlan {
        id: record.id,
        record_date: record.record_date,
        created_at: record.created_at,
        totals: nutrition_totals(&plan.meals),
        plan,
    };
    tracing::info!("Saved diet plan {} ({} kcal)", saved.id, saved.plan.total_calories);
    Ok(HttpResponse::Created().json(ApiResponse::success("Diet plan saved", saved)))
}

#[tracing::instrument(name = "List diet plans", skip(store, claims), fields(user_id = %claims.sub))]
pub async fn list_diet_plans(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let records = store.list_health_records(user_id, Some(RecordType::DietPlan)).await?;

    let plans: Vec<SavedDietPlan> = records
        .iter()
        .filter_map(decode_record::<DietPlan>)
        .map(|record| SavedDietPlan {
            id: record.id,
            record_date: record.record_date,
            created_at: record.created_at,
            totals: nutrition_totals(&record.data.meals),
            plan: record.data,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} diet plans", plans.len()),
        plans,
    )))
}

#[tracing::instrument(
    name = "Delete diet plan",
    skip(store, claims),
    fields(user_id = %claims.sub, plan_id = %plan_id)
)]
pub async fn delete_diet_plan(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    plan_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let plan_id = plan_id.into_inner();

    let is_plan = store
        .get_health_record(user_id, plan_id)
        .await?
        .is_some_and(|record| record.record_type == RecordType::DietPlan.as_str());
    if !is_plan || !store.delete_health_record(user_id, plan_id).await? {
        return Err(AppError::NotFound("Diet plan"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Diet plan deleted")))
}
