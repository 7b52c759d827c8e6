use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{admin, community, health_records, medications, profiles, yoga_sessions};
use crate::db::{DoctorFilter, HealthRecordChanges, Store};
use crate::error::StoreError;
use crate::models::admin::AdminUser;
use crate::models::community::{
    Appointment, AppointmentStatus, BookAppointmentRequest, CreateInitiativeRequest, Doctor,
    DoctorNotification, Initiative, RegisterDoctorRequest, UpdateInitiativeRequest,
};
use crate::models::health_record::{HealthRecord, NewHealthRecord, RecordType};
use crate::models::medication::{Medication, MedicationRequest};
use crate::models::profile::{Profile, UpdateProfileRequest};
use crate::models::yoga::{YogaSession, YogaSessionRequest};

/// Store backed by the managed Postgres database.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_health_record(&self, record: NewHealthRecord) -> Result<HealthRecord, StoreError> {
        Ok(health_records::insert_health_record(&self.pool, &record).await?)
    }

    async fn list_health_records(
        &self,
        user_id: Uuid,
        record_type: Option<RecordType>,
    ) -> Result<Vec<HealthRecord>, StoreError> {
        Ok(health_records::list_health_records(&self.pool, user_id, record_type).await?)
    }

    async fn get_health_record(&self, user_id: Uuid, id: Uuid) -> Result<Option<HealthRecord>, StoreError> {
        Ok(health_records::get_health_record(&self.pool, user_id, id).await?)
    }

    async fn latest_health_record(
        &self,
        user_id: Uuid,
        record_type: RecordType,
    ) -> Result<Option<HealthRecord>, StoreError> {
        Ok(health_records::latest_health_record(&self.pool, user_id, record_type).await?)
    }

    async fn update_health_record(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: HealthRecordChanges,
    ) -> Result<Option<HealthRecord>, StoreError> {
        Ok(health_records::update_health_record(&self.pool, user_id, id, &changes).await?)
    }

    async fn delete_health_record(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        Ok(health_records::delete_health_record(&self.pool, user_id, id).await?)
    }

    async fn list_medications(&self, user_id: Uuid) -> Result<Vec<Medication>, StoreError> {
        Ok(medications::list_medications(&self.pool, user_id).await?)
    }

    async fn insert_medication(&self, user_id: Uuid, request: &MedicationRequest) -> Result<Medication, StoreError> {
        Ok(medications::insert_medication(&self.pool, user_id, request).await?)
    }

    async fn update_medication(
        &self,
        user_id: Uuid,
        id: Uuid,
        request: &MedicationRequest,
    ) -> Result<Option<Medication>, StoreError> {
        Ok(medications::update_medication(&self.pool, user_id, id, request).await?)
    }

    async fn delete_medication(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        Ok(medications::delete_medication(&self.pool, user_id, id).await?)
    }

    async fn list_yoga_sessions(&self, user_id: Uuid) -> Result<Vec<YogaSession>, StoreError> {
        Ok(yoga_sessions::list_yoga_sessions(&self.pool, user_id).await?)
    }

    async fn insert_yoga_session(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        request: &YogaSessionRequest,
    ) -> Result<YogaSession, StoreError> {
        Ok(yoga_sessions::insert_yoga_session(&self.pool, user_id, date, request).await?)
    }

    async fn update_yoga_session(
        &self,
        user_id: Uuid,
        id: Uuid,
        date: NaiveDate,
        request: &YogaSessionRequest,
    ) -> Result<Option<YogaSession>, StoreError> {
        Ok(yoga_sessions::update_yoga_session(&self.pool, user_id, id, date, request).await?)
    }

    async fn delete_yoga_session(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        Ok(yoga_sessions::delete_yoga_session(&self.pool, user_id, id).await?)
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(profiles::get_profile(&self.pool, user_id).await?)
    }

    async fn upsert_profile(&self, user_id: Uuid, request: &UpdateProfileRequest) -> Result<Profile, StoreError> {
        Ok(profiles::upsert_profile(&self.pool, user_id, request).await?)
    }

    async fn list_doctors(&self, filter: DoctorFilter) -> Result<Vec<Doctor>, StoreError> {
        Ok(community::list_doctors(&self.pool, filter).await?)
    }

    async fn get_doctor(&self, id: Uuid) -> Result<Option<Doctor>, StoreError> {
        Ok(community::get_doctor(&self.pool, id).await?)
    }

    async fn insert_doctor(&self, request: &RegisterDoctorRequest) -> Result<Doctor, StoreError> {
        Ok(community::insert_doctor(&self.pool, request).await?)
    }

    async fn mark_doctor_verified(&self, id: Uuid) -> Result<Option<Doctor>, StoreError> {
        Ok(community::mark_doctor_verified(&self.pool, id).await?)
    }

    async fn insert_doctor_notification(
        &self,
        doctor_id: Uuid,
        message: &str,
    ) -> Result<DoctorNotification, StoreError> {
        Ok(community::insert_doctor_notification(&self.pool, doctor_id, message).await?)
    }

    async fn list_doctor_notifications(&self, doctor_id: Uuid) -> Result<Vec<DoctorNotification>, StoreError> {
        Ok(community::list_doctor_notifications(&self.pool, doctor_id).await?)
    }

    async fn insert_appointment(
        &self,
        patient_id: Uuid,
        request: &BookAppointmentRequest,
    ) -> Result<Appointment, StoreError> {
        Ok(community::insert_appointment(&self.pool, patient_id, request).await?)
    }

    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        Ok(community::get_appointment(&self.pool, id).await?)
    }

    async fn list_patient_appointments(&self, patient_id: Uuid) -> Result<Vec<Appointment>, StoreError> {
        Ok(community::list_patient_appointments(&self.pool, patient_id).await?)
    }

    async fn list_doctor_appointments(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, StoreError> {
        Ok(community::list_doctor_appointments(&self.pool, doctor_id).await?)
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        Ok(community::list_appointments(&self.pool).await?)
    }

    async fn transition_appointment(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError> {
        Ok(community::transition_appointment(&self.pool, id, status).await?)
    }

    async fn list_initiatives(&self) -> Result<Vec<Initiative>, StoreError> {
        Ok(community::list_initiatives(&self.pool).await?)
    }

    async fn insert_initiative(&self, request: &CreateInitiativeRequest) -> Result<Initiative, StoreError> {
        Ok(community::insert_initiative(&self.pool, request).await?)
    }

    async fn update_initiative(
        &self,
        id: Uuid,
        request: &UpdateInitiativeRequest,
    ) -> Result<Option<Initiative>, StoreError> {
        Ok(community::update_initiative(&self.pool, id, request).await?)
    }

    async fn delete_initiative(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(community::delete_initiative(&self.pool, id).await?)
    }

    async fn is_admin(&self, user_id: Uuid) -> Result<bool, StoreError> {
        Ok(admin::is_admin(&self.pool, user_id).await?)
    }

    async fn insert_admin_user(&self, user_id: Uuid) -> Result<AdminUser, StoreError> {
        Ok(admin::insert_admin_user(&self.pool, user_id).await?)
    }

    async fn delete_admin_user(&self, user_id: Uuid) -> Result<bool, StoreError> {
        Ok(admin::delete_admin_user(&self.pool, user_id).await?)
    }
}
