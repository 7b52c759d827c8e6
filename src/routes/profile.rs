use actix_web::{get, put, web, HttpResponse};

use crate::db::SharedStore;
use crate::error::AppError;
use crate::handlers::profile;
use crate::middleware::auth::Claims;
use crate::models::profile::UpdateProfileRequest;

#[get("")]
async fn get_profile(store: web::Data<SharedStore>, claims: web::ReqData<Claims>) -> Result<HttpResponse, AppError> {
    profile::get_profile(store, claims).await
}

#[put("")]
async fn update_profile(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    body: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    profile::update_profile(store, claims, body).await
}

#[get("/admin-status")]
async fn admin_status(store: web::Data<SharedStore>, claims: web::ReqData<Claims>) -> Result<HttpResponse, AppError> {
    profile::admin_status(store, claims).await
}
