use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::db::SharedStore;
use crate::error::AppError;
use crate::handlers::yoga;
use crate::middleware::auth::Claims;
use crate::models::yoga::YogaSessionRequest;

#[get("/sessions")]
async fn list_sessions(store: web::Data<SharedStore>, claims: web::ReqData<Claims>) -> Result<HttpResponse, AppError> {
    yoga::list_sessions(store, claims).await
}

#[post("/sessions")]
async fn log_session(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    body: web::Json<YogaSessionRequest>,
) -> Result<HttpResponse, AppError> {
    yoga::log_session(store, claims, body).await
}

#[put("/sessions/{id}")]
async fn update_session(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    session_id: web::Path<Uuid>,
    body: web::Json<YogaSessionRequest>,
) -> Result<HttpResponse, AppError> {
    yoga::update_session(store, claims, session_id, body).await
}

#[delete("/sessions/{id}")]
async fn delete_session(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    session_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    yoga::delete_session(store, claims, session_id).await
}

#[get("/stats")]
async fn stats(store: web::Data<SharedStore>, claims: web::ReqData<Claims>) -> Result<HttpResponse, AppError> {
    yoga::session_stats(store, claims).await
}
