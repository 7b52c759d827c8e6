use actix_web::{delete, get, post, web, HttpResponse};
use uuid::Uuid;

use crate::db::SharedStore;
use crate::error::AppError;
use crate::handlers::diet;
use crate::middleware::auth::Claims;
use crate::models::diet::{CalorieTargetQuery, CreateDietPlanRequest};

#[get("/goals")]
async fn goals() -> HttpResponse {
    diet::list_goals().await
}

#[get("/templates/{goal}")]
async fn template(goal: web::Path<String>) -> Result<HttpResponse, AppError> {
    diet::get_template(goal).await
}

#[get("/calorie-target")]
async fn calorie_target(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    query: web::Query<CalorieTargetQuery>,
) -> Result<HttpResponse, AppError> {
    diet::get_calorie_target(store, claims, query).await
}

#[post("/plans")]
async fn save_plan(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    body: web::Json<CreateDietPlanRequest>,
) -> Result<HttpResponse, AppError> {
    diet::save_diet_plan(store, claims, body).await
}

#[get("/plans")]
async fn list_plans(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    diet::list_diet_plans(store, claims).await
}

#[delete("/plans/{id}")]
async fn delete_plan(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    plan_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    diet::delete_diet_plan(store, claims, plan_id).await
}
