use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::db::SharedStore;
use crate::error::AppError;
use crate::handlers::medications;
use crate::middleware::auth::Claims;
use crate::models::medication::MedicationRequest;

#[get("")]
async fn list(store: web::Data<SharedStore>, claims: web::ReqData<Claims>) -> Result<HttpResponse, AppError> {
    medications::list_medications(store, claims).await
}

#[post("")]
async fn add(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    body: web::Json<MedicationRequest>,
) -> Result<HttpResponse, AppError> {
    medications::add_medication(store, claims, body).await
}

#[get("/expiry")]
async fn expiry(store: web::Data<SharedStore>, claims: web::ReqData<Claims>) -> Result<HttpResponse, AppError> {
    medications::expiry_summary(store, claims).await
}

#[put("/{id}")]
async fn update(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    medication_id: web::Path<Uuid>,
    body: web::Json<MedicationRequest>,
) -> Result<HttpResponse, AppError> {
    medications::update_medication(store, claims, medication_id, body).await
}

#[delete("/{id}")]
async fn remove(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    medication_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    medications::delete_medication(store, claims, medication_id).await
}
