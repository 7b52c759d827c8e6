use actix_web::{web, HttpResponse};

use crate::db::SharedStore;
use crate::error::AppError;
use crate::handlers::caller_id;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::profile::{AdminStatus, UpdateProfileRequest};

#[tracing::instrument(name = "Get profile", skip(store, claims), fields(user_id = %claims.sub))]
pub async fn get_profile(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let profile = store
        .get_profile(user_id)
        .await?
        .ok_or(AppError::NotFound("Profile"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Profile retrieved", profile)))
}

#[tracing::instrument(name = "Update profile", skip(store, claims, body), fields(user_id = %claims.sub))]
pub async fn update_profile(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    body: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    if body.full_name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(AppError::validation("full_name cannot be blank"));
    }
    let profile = store.upsert_profile(user_id, &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Profile updated", profile)))
}

pub async fn admin_status(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let is_admin = store.is_admin(user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Admin status retrieved",
        AdminStatus { user_id, is_admin },
    )))
}
