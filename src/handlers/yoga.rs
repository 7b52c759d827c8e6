use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::aggregation::metrics::yoga_stats;
use crate::db::SharedStore;
use crate::error::{require_field, AppError};
use crate::handlers::caller_id;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::yoga::YogaSessionRequest;

fn validate_session(request: &YogaSessionRequest) -> Result<(), AppError> {
    require_field(&request.session_name, "session_name")?;
    if request.duration <= 0 {
        return Err(AppError::validation("duration must be a positive number of minutes"));
    }
    if request.calories_burned.is_some_and(|calories| calories < 0) {
        return Err(AppError::validation("calories_burned cannot be negative"));
    }
    Ok(())
}

#[tracing::instrument(name = "List yoga sessions", skip(store, claims), fields(user_id = %claims.sub))]
pub async fn list_sessions(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let sessions = store.list_yoga_sessions(user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} yoga sessions", sessions.len()),
        sessions,
    )))
}

#[tracing::instrument(name = "Log yoga session", skip(store, claims, body), fields(user_id = %claims.sub))]
pub async fn log_session(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    body: web::Json<YogaSessionRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    validate_session(&body)?;
    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());
    let session = store.insert_yoga_session(user_id, date, &body).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Yoga session logged", session)))
}

#[tracing::instrument(
    name = "Update yoga session",
    skip(store, claims, body),
    fields(user_id = %claims.sub, session_id = %session_id)
)]
pub async fn update_session(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    session_id: web::Path<Uuid>,
    body: web::Json<YogaSessionRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    validate_session(&body)?;
    let session_id = session_id.into_inner();

    let date = match body.date {
        Some(date) => date,
        None => {
            store
                .list_yoga_sessions(user_id)
                .await?
                .into_iter()
                .find(|session| session.id == session_id)
                .ok_or(AppError::NotFound("Yoga session"))?
                .date
        }
    };

    let session = store
        .update_yoga_session(user_id, session_id, date, &body)
        .await?
        .ok_or(AppError::NotFound("Yoga session"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Yoga session updated", session)))
}

#[tracing::instrument(
    name = "Delete yoga session",
    skip(store, claims),
    fields(user_id = %claims.sub, session_id = %session_id)
)]
pub async fn delete_session(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    session_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    if !store.delete_yoga_session(user_id, session_id.into_inner()).await? {
        return Err(AppError::NotFound("Yoga session"));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Yoga session deleted")))
}

#[tracing::instrument(name = "Yoga stats", skip(store, claims), fields(user_id = %claims.sub))]
pub async fn session_stats(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let sessions = store.list_yoga_sessions(user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Yoga stats retrieved", yoga_stats(&sessions))))
}
