use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::db::SharedStore;
use crate::error::{require_field, AppError};
use crate::handlers::caller_id;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::medication::MedicationRequest;
use crate::utils::medication_expiry::summarize_expiry;

#[tracing::instrument(name = "List medications", skip(store, claims), fields(user_id = %claims.sub))]
pub async fn list_medications(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let medications = store.list_medications(user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} medications", medications.len()),
        medications,
    )))
}

#[tracing::instrument(name = "Add medication", skip(store, claims, body), fields(user_id = %claims.sub))]
pub async fn add_medication(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    body: web::Json<MedicationRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    require_field(&body.name, "name")?;
    let medication = store.insert_medication(user_id, &body).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Medication added", medication)))
}

#[tracing::instrument(
    name = "Update medication",
    skip(store, claims, body),
    fields(user_id = %claims.sub, medication_id = %medication_id)
)]
pub async fn update_medication(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    medication_id: web::Path<Uuid>,
    body: web::Json<MedicationRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    require_field(&body.name, "name")?;
    let medication = store
        .update_medication(user_id, medication_id.into_inner(), &body)
        .await?
        .ok_or(AppError::NotFound("Medication"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Medication updated", medication)))
}

#[tracing::instrument(
    name = "Delete medication",
    skip(store, claims),
    fields(user_id = %claims.sub, medication_id = %medication_id)
)]
pub async fn delete_medication(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    medication_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    if !store.delete_medication(user_id, medication_id.into_inner()).await? {
        return Err(AppError::NotFound("Medication"));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Medication deleted")))
}

#[tracing::instrument(name = "Medication expiry summary", skip(store, claims), fields(user_id = %claims.sub))]
pub async fn expiry_summary(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let medications = store.list_medications(user_id).await?;
    let summary = summarize_expiry(medications, Utc::now().date_naive());
    Ok(HttpResponse::Ok().json(ApiResponse::success("Medication expiry summary", summary)))
}
