use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::db::SharedStore;
use crate::error::AppError;
use crate::handlers::dashboard::{get_dashboard, get_vitals_series, RangeQuery};
use crate::handlers::health_records::{
    create_health_record, delete_health_record, list_health_records, update_health_record,
};
use crate::middleware::auth::Claims;
use crate::models::health_record::{CreateHealthRecordRequest, HealthRecordQuery, UpdateHealthRecordRequest};

#[post("/records")]
async fn create_record(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    body: web::Json<CreateHealthRecordRequest>,
) -> Result<HttpResponse, AppError> {
    create_health_record(store, claims, body).await
}

#[get("/records")]
async fn list_records(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    query: web::Query<HealthRecordQuery>,
) -> Result<HttpResponse, AppError> {
    list_health_records(store, claims, query).await
}

#[put("/records/{id}")]
async fn update_record(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    record_id: web::Path<Uuid>,
    body: web::Json<UpdateHealthRecordRequest>,
) -> Result<HttpResponse, AppError> {
    update_health_record(store, claims, record_id, body).await
}

#[delete("/records/{id}")]
async fn delete_record(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    record_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    delete_health_record(store, claims, record_id).await
}

#[get("/dashboard")]
async fn dashboard(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, AppError> {
    get_dashboard(store, claims, query).await
}

#[get("/dashboard/series")]
async fn dashboard_series(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, AppError> {
    get_vitals_series(store, claims, query).await
}
