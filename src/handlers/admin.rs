use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::db::{DoctorFilter, SharedStore};
use crate::error::{require_field, AppError};
use crate::middleware::auth::Claims;
use crate::models::admin::{CreateAdminUserRequest, VerifyDoctorRequest};
use crate::models::common::ApiResponse;
use crate::models::community::{
    CreateInitiativeRequest, UpdateAppointmentStatusRequest,
    UpdateInitiativeRequest,
};

pub const APPROVAL_MESSAGE: &str =
    "Your doctor registration has been approved. You can now receive appointment requests.";
pub const REJECTION_MESSAGE: &str =
    "Your doctor registration has been rejected. Please contact support for more details.";

pub async fn list_doctors(store: web::Data<SharedStore>) -> Result<HttpResponse, AppError> {
    let doctors = store.list_doctors(DoctorFilter::All).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} doctors", doctors.len()),
        doctors,
    )))
}

pub async fn list_pending_doctors(store: web::Data<SharedStore>) -> Result<HttpResponse, AppError> {
    let doctors = store.list_doctors(DoctorFilter::Pending).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} pending doctors", doctors.len()),
        doctors,
    )))
}

/// Approve or reject a pending registration. The notification is written after the
/// decision and its failure does not undo it.
#[tracing::instrument(
    name = "Review doctor",
    skip(store, claims, body),
    fields(admin = %claims.sub, doctor_id = %doctor_id, verified = body.verified)
)]
pub async fn verify_doctor(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    doctor_id: web::Path<Uuid>,
    body: web::Json<VerifyDoctorRequest>,
) -> Result<HttpResponse, AppError> {
    let doctor_id = doctor_id.into_inner();
    let doctor = store
        .get_doctor(doctor_id)
        .await?
        .ok_or(AppError::NotFound("Doctor"))?;
    if doctor.verified {
        return Err(AppError::conflict("Doctor is already verified"));
    }

    let (doctor, message, outcome) = if body.verified {
        // A concurrent approval wins the conditional update; this one then conflicts.
        let doctor = store
            .mark_doctor_verified(doctor_id)
            .await?
            .ok_or_else(|| AppError::conflict("Doctor is already verified"))?;
        (doctor, APPROVAL_MESSAGE, "Doctor approved")
    } else {
        (doctor, REJECTION_MESSAGE, "Doctor rejected")
    };

    if let Err(e) = store.insert_doctor_notification(doctor_id, message).await {
        tracing::error!("Failed to notify doctor {}: {}", doctor_id, e);
    }

    tracing::info!("{}: {}", outcome, doctor_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(outcome, doctor)))
}

pub async fn list_doctor_appointments(
    store: web::Data<SharedStore>,
    doctor_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let doctor_id = doctor_id.into_inner();
    if store.get_doctor(doctor_id).await?.is_none() {
        return Err(AppError::NotFound("Doctor"));
    }
    let appointments = store.list_doctor_appointments(doctor_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} appointments", appointments.len()),
        appointments,
    )))
}

pub async fn list_doctor_notifications(
    store: web::Data<SharedStore>,
    doctor_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let doctor_id = doctor_id.into_inner();
    if store.get_doctor(doctor_id).await?.is_none() {
        return Err(AppError::NotFound("Doctor"));
    }
    let notifications = store.list_doctor_notifications(doctor_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} notifications", notifications.len()),
        notifications,
    )))
}

pub async fn list_appointments(store: web::Data<SharedStore>) -> Result<HttpResponse, AppError> {
    let appointments = store.list_appointments().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} appointments", appointments.len()),
        appointments,
    )))
}

/// Decide a pending appointment. Only `status` changes.
#[tracing::instrument(
    name = "Update appointment status",
    skip(store, claims, body),
    fields(admin = %claims.sub, appointment_id = %appointment_id, status = %body.status)
)]
pub async fn update_appointment_status(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    appointment_id: web::Path<Uuid>,
    body: web::Json<UpdateAppointmentStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let appointment_id = appointment_id.into_inner();
    if !body.status.is_terminal() {
        return Err(AppError::validation("Appointments can only move to approved or rejected"));
    }

    match store.transition_appointment(appointment_id, body.status).await? {
        Some(appointment) => {
            tracing::info!("Appointment {} is now {}", appointment_id, appointment.status);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                format!("Appointment {}", appointment.status),
                appointment,
            )))
        }
        None => match store.get_appointment(appointment_id).await? {
            Some(existing) => Err(AppError::conflict(format!(
                "Appointment is already {}",
                existing.status
            ))),
            None => Err(AppError::NotFound("Appointment")),
        },
    }
}

pub async fn list_initiatives(store: web::Data<SharedStore>) -> Result<HttpResponse, AppError> {
    let initiatives = store.list_initiatives().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} initiatives", initiatives.len()),
        initiatives,
    )))
}

#[tracing::instrument(name = "Create initiative", skip(store, body), fields(title = %body.title))]
pub async fn create_initiative(
    store: web::Data<SharedStore>,
    body: web::Json<CreateInitiativeRequest>,
) -> Result<HttpResponse, AppError> {
    require_field(&body.title, "title")?;
    require_field(&body.description, "description")?;
    require_field(&body.date, "date")?;
    require_field(&body.organizer, "organizer")?;
    let initiative = store.insert_initiative(&body).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Initiative created", initiative)))
}

pub async fn update_initiative(
    store: web::Data<SharedStore>,
    initiative_id: web::Path<Uuid>,
    body: web::Json<UpdateInitiativeRequest>,
) -> Result<HttpResponse, AppError> {
    let blank = [&body.title, &body.description, &body.date, &body.organizer]
        .into_iter()
        .flatten()
        .any(|value| value.trim().is_empty());
    if blank {
        return Err(AppError::validation("Initiative fields cannot be blank"));
    }
    let initiative = store
        .update_initiative(initiative_id.into_inner(), &body)
        .await?
        .ok_or(AppError::NotFound("Initiative"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Initiative updated", initiative)))
}

pub async fn delete_initiative(
    store: web::Data<SharedStore>,
    initiative_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if !store.delete_initiative(initiative_id.into_inner()).await? {
        return Err(AppError::NotFound("Initiative"));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Initiative deleted")))
}

#[tracing::instrument(name = "Grant admin", skip(store, claims, body), fields(admin = %claims.sub, user_id = %body.user_id))]
pub async fn grant_admin(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    body: web::Json<CreateAdminUserRequest>,
) -> Result<HttpResponse, AppError> {
    let admin = store.insert_admin_user(body.user_id).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Admin access granted", admin)))
}

#[tracing::instrument(name = "Revoke admin", skip(store, claims), fields(admin = %claims.sub, user_id = %user_id))]
pub async fn revoke_admin(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if !store.delete_admin_user(user_id.into_inner()).await? {
        return Err(AppError::NotFound("Admin user"));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Admin access revoked")))
}
