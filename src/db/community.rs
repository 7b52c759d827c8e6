use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

use crate::db::DoctorFilter;
use crate::models::community::{
    Appointment, AppointmentStatus, BookAppointmentRequest, CreateInitiativeRequest, Doctor,
    DoctorNotification, DoctorSummary, Initiative, RegisterDoctorRequest, UpdateInitiativeRequest,
};

const DOCTOR_COLUMNS: &str = "id, full_name, email, phone, specialty, experience, location, availability, bio, image_url, verified, created_at";
const INITIATIVE_COLUMNS: &str = "id, title, description, date, organizer, image, created_at, updated_at";

/// Appointment row joined with the doctor it references, if that doctor still exists.
#[derive(Debug, FromRow)]
struct AppointmentRow {
    id: Uuid,
    patient_id: Uuid,
    doctor_id: Uuid,
    patient_name: String,
    patient_email: String,
    patient_phone: String,
    appointment_date: NaiveDate,
    medical_issue: String,
    financial_status: String,
    status: String,
    created_at: DateTime<Utc>,
    doctor_full_name: Option<String>,
    doctor_specialty: Option<String>,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = sqlx::Error;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<AppointmentStatus>()
            .map_err(|e| sqlx::Error::Decode(e.into()))?;
        let doctor = match (row.doctor_full_name, row.doctor_specialty) {
            (Some(full_name), Some(specialty)) => Some(DoctorSummary { full_name, specialty }),
            _ => None,
        };
        Ok(Appointment {
            id: row.id,
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            patient_name: row.patient_name,
            patient_email: row.patient_email,
            patient_phone: row.patient_phone,
            appointment_date: row.appointment_date,
            medical_issue: row.medical_issue,
            financial_status: row.financial_status,
            status,
            created_at: row.created_at,
            doctor,
        })
    }
}

fn into_appointments(rows: Vec<AppointmentRow>) -> Result<Vec<Appointment>, sqlx::Error> {
    rows.into_iter().map(Appointment::try_from).collect()
}

const APPOINTMENT_SELECT: &str = r#"
    SELECT a.id, a.patient_id, a.doctor_id, a.patient_name, a.patient_email, a.patient_phone,
           a.appointment_date, a.medical_issue, a.financial_status, a.status, a.created_at,
           d.full_name AS doctor_full_name, d.specialty AS doctor_specialty
    FROM community_appointments a
    LEFT JOIN community_doctors d ON d.id = a.doctor_id
"#;

pub async fn list_doctors(pool: &Pool<Postgres>, filter: DoctorFilter) -> Result<Vec<Doctor>, sqlx::Error> {
    let verified = match filter {
        DoctorFilter::All => None,
        DoctorFilter::Verified => Some(true),
        DoctorFilter::Pending => Some(false),
    };
    sqlx::query_as::<_, Doctor>(&format!(
        "SELECT {DOCTOR_COLUMNS} FROM community_doctors WHERE ($1::boolean IS NULL OR verified = $1) ORDER BY created_at DESC"
    ))
    .bind(verified)
    .fetch_all(pool)
    .await
}

pub async fn get_doctor(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Doctor>, sqlx::Error> {
    sqlx::query_as::<_, Doctor>(&format!("SELECT {DOCTOR_COLUMNS} FROM community_doctors WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_doctor(pool: &Pool<Postgres>, request: &RegisterDoctorRequest) -> Result<Doctor, sqlx::Error> {
    sqlx::query_as::<_, Doctor>(&format!(
        r#"
        INSERT INTO community_doctors
            (full_name, email, phone, specialty, experience, location, availability, bio, verified)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE)
        RETURNING {DOCTOR_COLUMNS}
        "#
    ))
    .bind(&request.full_name)
    .bind(&request.email)
    .bind(&request.phone)
    .bind(&request.specialty)
    .bind(request.experience)
    .bind(&request.location)
    .bind(&request.availability)
    .bind(&request.bio)
    .fetch_one(pool)
    .await
}

pub async fn mark_doctor_verified(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Doctor>, sqlx::Error> {
    sqlx::query_as::<_, Doctor>(&format!(
        "UPDATE community_doctors SET verified = TRUE WHERE id = $1 AND verified = FALSE RETURNING {DOCTOR_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_doctor_notification(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    message: &str,
) -> Result<DoctorNotification, sqlx::Error> {
    sqlx::query_as::<_, DoctorNotification>(
        r#"
        INSERT INTO doctor_notifications (doctor_id, message, read)
        VALUES ($1, $2, FALSE)
        RETURNING id, doctor_id, message, read, created_at
        "#,
    )
    .bind(doctor_id)
    .bind(message)
    .fetch_one(pool)
    .await
}

pub async fn list_doctor_notifications(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
) -> Result<Vec<DoctorNotification>, sqlx::Error> {
    sqlx::query_as::<_, DoctorNotification>(
        "SELECT id, doctor_id, message, read, created_at FROM doctor_notifications WHERE doctor_id = $1 ORDER BY created_at DESC",
    )
    .bind(doctor_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_appointment(
    pool: &Pool<Postgres>,
    patient_id: Uuid,
    request: &BookAppointmentRequest,
) -> Result<Appointment, sqlx::Error> {
    let row = sqlx::query_as::<_, AppointmentRow>(
        r#"
        WITH inserted AS (
            INSERT INTO community_appointments
                (patient_id, doctor_id, patient_name, patient_email, patient_phone,
                 appointment_date, medical_issue, financial_status, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending')
            RETURNING *
        )
        SELECT i.id, i.patient_id, i.doctor_id, i.patient_name, i.patient_email, i.patient_phone,
               i.appointment_date, i.medical_issue, i.financial_status, i.status, i.created_at,
               d.full_name AS doctor_full_name, d.specialty AS doctor_specialty
        FROM inserted i
        LEFT JOIN community_doctors d ON d.id = i.doctor_id
        "#,
    )
    .bind(patient_id)
    .bind(request.doctor_id)
    .bind(&request.patient_name)
    .bind(&request.patient_email)
    .bind(&request.patient_phone)
    .bind(request.appointment_date)
    .bind(&request.medical_issue)
    .bind(&request.financial_status)
    .fetch_one(pool)
    .await?;
    Appointment::try_from(row)
}

pub async fn get_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Appointment>, sqlx::Error> {
    let row = sqlx::query_as::<_, AppointmentRow>(&format!("{APPOINTMENT_SELECT} WHERE a.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(Appointment::try_from).transpose()
}

pub async fn list_patient_appointments(
    pool: &Pool<Postgres>,
    patient_id: Uuid,
) -> Result<Vec<Appointment>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AppointmentRow>(&format!(
        "{APPOINTMENT_SELECT} WHERE a.patient_id = $1 ORDER BY a.created_at DESC"
    ))
    .bind(patient_id)
    .fetch_all(pool)
    .await?;
    into_appointments(rows)
}

pub async fn list_doctor_appointments(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
) -> Result<Vec<Appointment>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AppointmentRow>(&format!(
        "{APPOINTMENT_SELECT} WHERE a.doctor_id = $1 ORDER BY a.created_at DESC"
    ))
    .bind(doctor_id)
    .fetch_all(pool)
    .await?;
    into_appointments(rows)
}

pub async fn list_appointments(pool: &Pool<Postgres>) -> Result<Vec<Appointment>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AppointmentRow>(&format!("{APPOINTMENT_SELECT} ORDER BY a.created_at DESC"))
        .fetch_all(pool)
        .await?;
    into_appointments(rows)
}

/// Conditional on the row still being pending, so a decided appointment is never overwritten.
pub async fn transition_appointment(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: AppointmentStatus,
) -> Result<Option<Appointment>, sqlx::Error> {
    let row = sqlx::query_as::<_, AppointmentRow>(
        r#"
        WITH updated AS (
            UPDATE community_appointments
            SET status = $2
            WHERE id = $1 AND status = 'pending'
            RETURNING *
        )
        SELECT u.id, u.patient_id, u.doctor_id, u.patient_name, u.patient_email, u.patient_phone,
               u.appointment_date, u.medical_issue, u.financial_status, u.status, u.created_at,
               d.full_name AS doctor_full_name, d.specialty AS doctor_specialty
        FROM updated u
        LEFT JOIN community_doctors d ON d.id = u.doctor_id
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;
    row.map(Appointment::try_from).transpose()
}

pub async fn list_initiatives(pool: &Pool<Postgres>) -> Result<Vec<Initiative>, sqlx::Error> {
    sqlx::query_as::<_, Initiative>(&format!(
        "SELECT {INITIATIVE_COLUMNS} FROM community_initiatives ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn insert_initiative(
    pool: &Pool<Postgres>,
    request: &CreateInitiativeRequest,
) -> Result<Initiative, sqlx::Error> {
    sqlx::query_as::<_, Initiative>(&format!(
        r#"
        INSERT INTO community_initiatives (title, description, date, organizer, image)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {INITIATIVE_COLUMNS}
        "#
    ))
    .bind(&request.title)
    .bind(&request.description)
    .bind(&request.date)
    .bind(&request.organizer)
    .bind(&request.image)
    .fetch_one(pool)
    .await
}

pub async fn update_initiative(
    pool: &Pool<Postgres>,
    id: Uuid,
    request: &UpdateInitiativeRequest,
) -> Result<Option<Initiative>, sqlx::Error> {
    sqlx::query_as::<_, Initiative>(&format!(
        r#"
        UPDATE community_initiatives
        SET title = COALESCE($2, title),
            description = COALESCE($3, description),
            date = COALESCE($4, date),
            organizer = COALESCE($5, organizer),
            image = COALESCE($6, image),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {INITIATIVE_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(request.title.as_deref())
    .bind(request.description.as_deref())
    .bind(request.date.as_deref())
    .bind(request.organizer.as_deref())
    .bind(request.image.as_deref())
    .fetch_optional(pool)
    .await
}

pub async fn delete_initiative(pool: &Pool<Postgres>, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM community_initiatives WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
