use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::models::common::ApiResponse;
use crate::models::tools::{BmiRequest, CalorieRequest, WaterIntakeRequest};
use crate::utils::health_calculations::{calc_bmi, calc_daily_calories, calc_water_intake};

pub async fn bmi(body: web::Json<BmiRequest>) -> Result<HttpResponse, AppError> {
    let result = calc_bmi(body.weight, body.weight_unit, body.height, body.height_unit)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("BMI calculated", result)))
}

pub async fn daily_calories(body: web::Json<CalorieRequest>) -> Result<HttpResponse, AppError> {
    let result = calc_daily_calories(&body)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Daily calories calculated", result)))
}

pub async fn water_intake(body: web::Json<WaterIntakeRequest>) -> Result<HttpResponse, AppError> {
    let result = calc_water_intake(body.weight, body.activity_level)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Water intake calculated", result)))
}
