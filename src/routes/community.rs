use actix_web::{get, post, web, HttpResponse};

use crate::db::SharedStore;
use crate::error::AppError;
use crate::handlers::community;
use crate::middleware::auth::Claims;
use crate::models::community::{BookAppointmentRequest, RegisterDoctorRequest};

#[get("/doctors")]
async fn list_doctors(store: web::Data<SharedStore>) -> Result<HttpResponse, AppError> {
    community::list_verified_doctors(store).await
}

#[post("/doctors")]
async fn register_doctor(
    store: web::Data<SharedStore>,
    body: web::Json<RegisterDoctorRequest>,
) -> Result<HttpResponse, AppError> {
    community::register_doctor(store, body).await
}

#[post("/appointments")]
async fn book_appointment(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    body: web::Json<BookAppointmentRequest>,
) -> Result<HttpResponse, AppError> {
    community::book_appointment(store, claims, body).await
}

#[get("/appointments")]
async fn my_appointments(store: web::Data<SharedStore>, claims: web::ReqData<Claims>) -> Result<HttpResponse, AppError> {
    community::list_my_appointments(store, claims).await
}

#[get("/initiatives")]
async fn initiatives(store: web::Data<SharedStore>) -> Result<HttpResponse, AppError> {
    community::list_initiatives(store).await
}
