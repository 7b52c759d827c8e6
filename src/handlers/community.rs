use actix_web::{web, HttpResponse};

use crate::db::{DoctorFilter, SharedStore};
use crate::error::{require_field, AppError};
use crate::handlers::caller_id;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::community::{BookAppointmentRequest, RegisterDoctorRequest};

pub async fn list_verified_doctors(store: web::Data<SharedStore>) -> Result<HttpResponse, AppError> {
    let doctors = store.list_doctors(DoctorFilter::Verified).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} doctors", doctors.len()),
        doctors,
    )))
}

/// New registrations wait for an admin before patients can see them.
#[tracing::instrument(name = "Register doctor", skip(store, body), fields(specialty = %body.specialty))]
pub async fn register_doctor(
    store: web::Data<SharedStore>,
    body: web::Json<RegisterDoctorRequest>,
) -> Result<HttpResponse, AppError> {
    require_field(&body.full_name, "full_name")?;
    require_field(&body.email, "email")?;
    require_field(&body.phone, "phone")?;
    require_field(&body.specialty, "specialty")?;
    require_field(&body.location, "location")?;
    if body.experience < 0 {
        return Err(AppError::validation("experience cannot be negative"));
    }

    let doctor = store.insert_doctor(&body).await?;
    tracing::info!("Doctor {} registered, awaiting verification", doctor.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Registration submitted for verification",
        doctor,
    )))
}

#[tracing::instrument(
    name = "Book appointment",
    skip(store, claims, body),
    fields(user_id = %claims.sub, doctor_id = %body.doctor_id)
)]
pub async fn book_appointment(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    body: web::Json<BookAppointmentRequest>,
) -> Result<HttpResponse, AppError> {
    let patient_id = caller_id(&claims)?;
    require_field(&body.patient_name, "patient_name")?;
    require_field(&body.patient_email, "patient_email")?;
    require_field(&body.medical_issue, "medical_issue")?;

    // Only doctors patients can actually see are bookable.
    let bookable = store
        .get_doctor(body.doctor_id)
        .await?
        .is_some_and(|doctor| doctor.verified);
    if !bookable {
        return Err(AppError::NotFound("Doctor"));
    }

    let appointment = store.insert_appointment(patient_id, &body).await?;
    tracing::info!("Appointment {} requested", appointment.id);
    Ok(HttpResponse::Created().json(ApiResponse::success("Appointment requested", appointment)))
}

#[tracing::instrument(name = "List my appointments", skip(store, claims), fields(user_id = %claims.sub))]
pub async fn list_my_appointments(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let patient_id = caller_id(&claims)?;
    let appointments = store.list_patient_appointments(patient_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} appointments", appointments.len()),
        appointments,
    )))
}

pub async fn list_initiatives(store: web::Data<SharedStore>) -> Result<HttpResponse, AppError> {
    let initiatives = store.list_initiatives().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} initiatives", initiatives.len()),
        initiatives,
    )))
}
