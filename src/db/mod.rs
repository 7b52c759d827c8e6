//! Persistence. Handlers talk to a [`Store`]; the server picks the Postgres or
//! in-memory implementation from `application.data_source`.

pub mod admin;
pub mod community;
pub mod health_records;
pub mod medications;
pub mod memory;
pub mod postgres;
pub mod profiles;
pub mod yoga_sessions;

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

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

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type SharedStore = Arc<dyn Store>;

/// Changes applied to an existing health record; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct HealthRecordChanges {
    pub record_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Filter for doctor listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorFilter {
    All,
    Verified,
    Pending,
}

#[async_trait]
pub trait Store: Send + Sync + 'static {
    // health_records
    async fn insert_health_record(&self, record: NewHealthRecord) -> Result<HealthRecord, StoreError>;
    /// Newest first: `record_date` descending, then `created_at` descending.
    async fn list_health_records(
        &self,
        user_id: Uuid,
        record_type: Option<RecordType>,
    ) -> Result<Vec<HealthRecord>, StoreError>;
    async fn get_health_record(&self, user_id: Uuid, id: Uuid) -> Result<Option<HealthRecord>, StoreError>;
    /// Most recently created record of one type.
    async fn latest_health_record(
        &self,
        user_id: Uuid,
        record_type: RecordType,
    ) -> Result<Option<HealthRecord>, StoreError>;
    async fn update_health_record(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: HealthRecordChanges,
    ) -> Result<Option<HealthRecord>, StoreError>;
    async fn delete_health_record(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError>;

    // medications
    async fn list_medications(&self, user_id: Uuid) -> Result<Vec<Medication>, StoreError>;
    async fn insert_medication(&self, user_id: Uuid, request: &MedicationRequest) -> Result<Medication, StoreError>;
    async fn update_medication(
        &self,
        user_id: Uuid,
        id: Uuid,
        request: &MedicationRequest,
    ) -> Result<Option<Medication>, StoreError>;
    async fn delete_medication(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError>;

    // yoga_sessions
    async fn list_yoga_sessions(&self, user_id: Uuid) -> Result<Vec<YogaSession>, StoreError>;
    async fn insert_yoga_session(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        request: &YogaSessionRequest,
    ) -> Result<YogaSession, StoreError>;
    async fn update_yoga_session(
        &self,
        user_id: Uuid,
        id: Uuid,
        date: NaiveDate,
        request: &YogaSessionRequest,
    ) -> Result<Option<YogaSession>, StoreError>;
    async fn delete_yoga_session(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError>;

    // profiles
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError>;
    async fn upsert_profile(&self, user_id: Uuid, request: &UpdateProfileRequest) -> Result<Profile, StoreError>;

    // community_doctors / doctor_notifications
    async fn list_doctors(&self, filter: DoctorFilter) -> Result<Vec<Doctor>, StoreError>;
    async fn get_doctor(&self, id: Uuid) -> Result<Option<Doctor>, StoreError>;
    async fn insert_doctor(&self, request: &RegisterDoctorRequest) -> Result<Doctor, StoreError>;
    /// Flip an unverified doctor to verified. `None` when the doctor is missing
    /// or was already verified.
    async fn mark_doctor_verified(&self, id: Uuid) -> Result<Option<Doctor>, StoreError>;
    async fn insert_doctor_notification(
        &self,
        doctor_id: Uuid,
        message: &str,
    ) -> Result<DoctorNotification, StoreError>;
    async fn list_doctor_notifications(&self, doctor_id: Uuid) -> Result<Vec<DoctorNotification>, StoreError>;

    // community_appointments
    async fn insert_appointment(
        &self,
        patient_id: Uuid,
        request: &BookAppointmentRequest,
    ) -> Result<Appointment, StoreError>;
    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>, StoreError>;
    async fn list_patient_appointments(&self, patient_id: Uuid) -> Result<Vec<Appointment>, StoreError>;
    async fn list_doctor_appointments(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, StoreError>;
    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError>;
    /// Move a pending appointment to `status`. `None` when the appointment is
    /// missing or no longer pending.
    async fn transition_appointment(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError>;

    // community_initiatives
    async fn list_initiatives(&self) -> Result<Vec<Initiative>, StoreError>;
    async fn insert_initiative(&self, request: &CreateInitiativeRequest) -> Result<Initiative, StoreError>;
    async fn update_initiative(
        &self,
        id: Uuid,
        request: &UpdateInitiativeRequest,
    ) -> Result<Option<Initiative>, StoreError>;
    async fn delete_initiative(&self, id: Uuid) -> Result<bool, StoreError>;

    // admin_users
    async fn is_admin(&self, user_id: Uuid) -> Result<bool, StoreError>;
    async fn insert_admin_user(&self, user_id: Uuid) -> Result<AdminUser, StoreError>;
    async fn delete_admin_user(&self, user_id: Uuid) -> Result<bool, StoreError>;
}
