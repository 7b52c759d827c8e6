use actix_web::{post, web, HttpResponse};

use crate::error::AppError;
use crate::handlers::tools;
use crate::models::tools::{BmiRequest, CalorieRequest, WaterIntakeRequest};

#[post("/bmi")]
async fn bmi(body: web::Json<BmiRequest>) -> Result<HttpResponse, AppError> {
    tools::bmi(body).await
}

#[post("/calories")]
async fn calories(body: web::Json<CalorieRequest>) -> Result<HttpResponse, AppError> {
    tools::daily_calories(body).await
}

#[post("/water-intake")]
async fn water_intake(body: web::Json<WaterIntakeRequest>) -> Result<HttpResponse, AppError> {
    tools::water_intake(body).await
}
