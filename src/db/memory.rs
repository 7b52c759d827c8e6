use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::{DoctorFilter, HealthRecordChanges, Store};
use crate::error::StoreError;
use crate::models::admin::AdminUser;
use crate::models::community::{
    Appointment, AppointmentStatus, BookAppointmentRequest, CreateInitiativeRequest, Doctor,
    DoctorNotification, DoctorSummary, Initiative, RegisterDoctorRequest, UpdateInitiativeRequest,
};
use crate::models::health_record::{HealthRecord, NewHealthRecord, RecordType};
use crate::models::medication::{Medication, MedicationRequest};
use crate::models::profile::{Profile, UpdateProfileRequest};
use crate::models::yoga::{YogaSession, YogaSessionRequest};

#[derive(Default)]
struct Tables {
    health_records: Vec<HealthRecord>,
    medications: Vec<Medication>,
    yoga_sessions: Vec<YogaSession>,
    profiles: Vec<Profile>,
    doctors: Vec<Doctor>,
    doctor_notifications: Vec<DoctorNotification>,
    appointments: Vec<Appointment>,
    initiatives: Vec<Initiative>,
    admin_users: Vec<AdminUser>,
}

impl Tables {
    fn doctor_summary(&self, doctor_id: Uuid) -> Option<DoctorSummary> {
        self.doctors.iter().find(|d| d.id == doctor_id).map(|d| DoctorSummary {
            full_name: d.full_name.clone(),
            specialty: d.specialty.clone(),
        })
    }

    /// Appointments carry the doctor as it is now, like the joined query does.
    fn with_doctor(&self, appointment: &Appointment) -> Appointment {
        let mut appointment = appointment.clone();
        appointment.doctor = self.doctor_summary(appointment.doctor_id);
        appointment
    }

    fn appointments_where(&self, keep: impl Fn(&Appointment) -> bool) -> Vec<Appointment> {
        let mut found: Vec<Appointment> = self
            .appointments
            .iter()
            .rev()
            .filter(|a| keep(a))
            .map(|a| self.with_doctor(a))
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }
}

/// Process-local store for `mock` mode and tests. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with demo doctors, initiatives and appointments.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let today = now.date_naive();

        let doctor = |full_name: &str, email: &str, phone: &str, specialty: &str, experience: i32,
                      location: &str, availability: &str, bio: &str, image_url: Option<&str>, verified: bool| Doctor {
            id: Uuid::new_v4(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            specialty: specialty.to_string(),
            experience,
            location: location.to_string(),
            availability: availability.to_string(),
            bio: bio.to_string(),
            image_url: image_url.map(str::to_string),
            verified,
            created_at: now,
        };

        let doctors = vec![
            doctor(
                "Dr. Sandeep Budhiraja", "digitalquery@maxhealthcare.com", "+91 926 888 0303",
                "General Medicine", 29, "Delhi, India", "Mon, Wed, Fri (9am-5pm)",
                "Specializes in preventive care and chronic disease management, with a decade of work in underserved communities.",
                Some("https://d35oenyzp35321.cloudfront.net/Dr_Sandeep_Budhiraja_0_1_299a06ed04.jpeg"), true,
            ),
            doctor(
                "Dr. Dhananjay Malankar", "enquiry@medicoexperts.com", "+919769516280",
                "Pediatrics", 15, "Mumbai, India", "Tue, Thu (10am-6pm), Sat (9am-12pm)",
                "Passionate about child health and development; volunteers at community clinics and schools.",
                None, true,
            ),
            doctor(
                "Dr. Vinay Pandey", "pandeyvinay@gmail.com", "+917383355861",
                "Cardiologist", 12, "Prayagraj, India", "Mon, Wed, Fri (1pm-8pm)",
                "Focuses on preventative cardiology and runs free screening programs in low-income neighborhoods.",
                None, true,
            ),
            doctor(
                "Dr. Robert Wilson", "robert.wilson@example.com", "(555) 222-3333",
                "Dermatology", 7, "Boston, MA", "Mon, Thu (9am-6pm)",
                "Provides affordable skin care services to underserved populations.",
                None, false,
            ),
            doctor(
                "Dr. Elena Rodriguez", "elena.rodriguez@example.com", "(555) 444-5555",
                "Gynecology", 9, "Miami, FL", "Tue, Fri (10am-4pm)",
                "Specializes in women's health, with long experience in community clinics.",
                None, false,
            ),
        ];

        let appointment = |doctor_id: Uuid, patient_name: &str, patient_email: &str, patient_phone: &str,
                           days_ahead: u64, medical_issue: &str, financial_status: &str, status: AppointmentStatus| Appointment {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            doctor_id,
            patient_name: patient_name.to_string(),
            patient_email: patient_email.to_string(),
            patient_phone: patient_phone.to_string(),
            appointment_date: today.checked_add_days(Days::new(days_ahead)).unwrap_or(today),
            medical_issue: medical_issue.to_string(),
            financial_status: financial_status.to_string(),
            status,
            created_at: now,
            doctor: None,
        };

        let appointments = vec![
            appointment(
                doctors[0].id, "John Smith", "john.smith@example.com", "(555) 666-7777", 1,
                "Regular checkup and blood pressure monitoring", "Unemployed, no health insurance",
                AppointmentStatus::Pending,
            ),
            appointment(
                doctors[1].id, "Maria Garcia", "maria.garcia@example.com", "(555) 888-9999", 2,
                "Child vaccination and wellness check", "Single parent, part-time employment",
                AppointmentStatus::Approved,
            ),
        ];

        let initiative = |title: &str, description: &str, date: &str, organizer: &str, image: &str| Initiative {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            date: date.to_string(),
            organizer: organizer.to_string(),
            image: image.to_string(),
            created_at: now,
            updated_at: None,
        };

        let initiatives = vec![
            initiative(
                "Medical Camp in Rural Areas",
                "Quarterly medical camps that provide free healthcare services to rural communities.",
                "Next camp: June 15", "HealthDesk Foundation",
                "https://images.unsplash.com/photo-1576091160550-2173dba999ef?q=80&w=600&auto=format&fit=crop",
            ),
            initiative(
                "Free Vaccination Drive",
                "Immunizing children and adults from low-income communities against preventable diseases.",
                "Next drive: May 8", "Vaccines For All",
                "https://images.unsplash.com/photo-1584036561566-baf8f5f1b144?q=80&w=600&auto=format&fit=crop",
            ),
            initiative(
                "Mental Health Awareness Program",
                "Free counseling and support services for those who cannot afford mental health treatment.",
                "Ongoing every weekend", "Mind Matters Initiative",
                "https://images.unsplash.com/photo-1544027993-37dbfe43562a?q=80&w=600&auto=format&fit=crop",
            ),
        ];

        Self {
            tables: RwLock::new(Tables {
                doctors,
                appointments,
                initiatives,
                ..Tables::default()
            }),
        }
    }
}

fn sort_newest_first(records: &mut [HealthRecord]) {
    records.sort_by(|a, b| {
        b.record_date
            .cmp(&a.record_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_health_record(&self, record: NewHealthRecord) -> Result<HealthRecord, StoreError> {
        let now = Utc::now();
        let stored = HealthRecord {
            id: Uuid::new_v4(),
            user_id: record.user_id,
            record_type: record.record_type.as_str().to_string(),
            record_date: record.record_date,
            description: record.description,
            status: record.status,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.health_records.push(stored.clone());
        Ok(stored)
    }

    async fn list_health_records(
        &self,
        user_id: Uuid,
        record_type: Option<RecordType>,
    ) -> Result<Vec<HealthRecord>, StoreError> {
        let tables = self.tables.read().await;
        // Reverse insertion order first so equal timestamps still list the newest write first.
        let mut records: Vec<HealthRecord> = tables
            .health_records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .filter(|r| record_type.map_or(true, |t| r.record_type == t.as_str()))
            .cloned()
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn get_health_record(&self, user_id: Uuid, id: Uuid) -> Result<Option<HealthRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .health_records
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }

    async fn latest_health_record(
        &self,
        user_id: Uuid,
        record_type: RecordType,
    ) -> Result<Option<HealthRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .health_records
            .iter()
            .filter(|r| r.user_id == user_id && r.record_type == record_type.as_str())
            // max_by_key keeps the last maximum, so equal timestamps resolve to the newest write
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn update_health_record(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: HealthRecordChanges,
    ) -> Result<Option<HealthRecord>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(record) = tables
            .health_records
            .iter_mut()
            .find(|r| r.id == id && r.user_id == user_id)
        else {
            return Ok(None);
        };
        if let Some(record_date) = changes.record_date {
            record.record_date = record_date;
        }
        if let Some(description) = changes.description {
            record.description = description;
        }
        if let Some(status) = changes.status {
            record.status = status;
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete_health_record(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.health_records.len();
        tables.health_records.retain(|r| !(r.id == id && r.user_id == user_id));
        Ok(tables.health_records.len() < before)
    }

    async fn list_medications(&self, user_id: Uuid) -> Result<Vec<Medication>, StoreError> {
        let tables = self.tables.read().await;
        let mut medications: Vec<Medication> = tables
            .medications
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        // Earliest expiry first, undated last.
        medications.sort_by_key(|m| (m.expiry_date.is_none(), m.expiry_date));
        Ok(medications)
    }

    async fn insert_medication(&self, user_id: Uuid, request: &MedicationRequest) -> Result<Medication, StoreError> {
        let now = Utc::now();
        let medication = Medication {
            id: Uuid::new_v4(),
            user_id,
            name: request.name.clone(),
            dosage: request.dosage.clone(),
            frequency: request.frequency.clone(),
            expiry_date: request.expiry_date,
            notes: request.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.medications.push(medication.clone());
        Ok(medication)
    }

    async fn update_medication(
        &self,
        user_id: Uuid,
        id: Uuid,
        request: &MedicationRequest,
    ) -> Result<Option<Medication>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(medication) = tables
            .medications
            .iter_mut()
            .find(|m| m.id == id && m.user_id == user_id)
        else {
            return Ok(None);
        };
        medication.name = request.name.clone();
        medication.dosage = request.dosage.clone();
        medication.frequency = request.frequency.clone();
        medication.expiry_date = request.expiry_date;
        medication.notes = request.notes.clone();
        medication.updated_at = Utc::now();
        Ok(Some(medication.clone()))
    }

    async fn delete_medication(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.medications.len();
        tables.medications.retain(|m| !(m.id == id && m.user_id == user_id));
        Ok(tables.medications.len() < before)
    }

    async fn list_yoga_sessions(&self, user_id: Uuid) -> Result<Vec<YogaSession>, StoreError> {
        let tables = self.tables.read().await;
        let mut sessions: Vec<YogaSession> = tables
            .yoga_sessions
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(sessions)
    }

    async fn insert_yoga_session(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        request: &YogaSessionRequest,
    ) -> Result<YogaSession, StoreError> {
        let now = Utc::now();
        let session = YogaSession {
            id: Uuid::new_v4(),
            user_id,
            session_name: request.session_name.clone(),
            duration: request.duration,
            calories_burned: request.calories_burned,
            date,
            notes: request.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.yoga_sessions.push(session.clone());
        Ok(session)
    }

    async fn update_yoga_session(
        &self,
        user_id: Uuid,
        id: Uuid,
        date: NaiveDate,
        request: &YogaSessionRequest,
    ) -> Result<Option<YogaSession>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(session) = tables
            .yoga_sessions
            .iter_mut()
            .find(|s| s.id == id && s.user_id == user_id)
        else {
            return Ok(None);
        };
        session.session_name = request.session_name.clone();
        session.duration = request.duration;
        session.calories_burned = request.calories_burned;
        session.date = date;
        session.notes = request.notes.clone();
        session.updated_at = Utc::now();
        Ok(Some(session.clone()))
    }

    async fn delete_yoga_session(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.yoga_sessions.len();
        tables.yoga_sessions.retain(|s| !(s.id == id && s.user_id == user_id));
        Ok(tables.yoga_sessions.len() < before)
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.profiles.iter().find(|p| p.id == user_id).cloned())
    }

    async fn upsert_profile(&self, user_id: Uuid, request: &UpdateProfileRequest) -> Result<Profile, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        if let Some(profile) = tables.profiles.iter_mut().find(|p| p.id == user_id) {
            if let Some(full_name) = &request.full_name {
                profile.full_name = Some(full_name.clone());
            }
            if let Some(avatar_url) = &request.avatar_url {
                profile.avatar_url = Some(avatar_url.clone());
            }
            if let Some(phone_number) = &request.phone_number {
                profile.phone_number = Some(phone_number.clone());
            }
            profile.updated_at = now;
            return Ok(profile.clone());
        }

        let profile = Profile {
            id: user_id,
            full_name: request.full_name.clone(),
            avatar_url: request.avatar_url.clone(),
            phone_number: request.phone_number.clone(),
            updated_at: now,
        };
        tables.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn list_doctors(&self, filter: DoctorFilter) -> Result<Vec<Doctor>, StoreError> {
        let tables = self.tables.read().await;
        let mut doctors: Vec<Doctor> = tables
            .doctors
            .iter()
            .rev()
            .filter(|d| match filter {
                DoctorFilter::All => true,
                DoctorFilter::Verified => d.verified,
                DoctorFilter::Pending => !d.verified,
            })
            .cloned()
            .collect();
        doctors.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(doctors)
    }

    async fn get_doctor(&self, id: Uuid) -> Result<Option<Doctor>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.doctors.iter().find(|d| d.id == id).cloned())
    }

    async fn insert_doctor(&self, request: &RegisterDoctorRequest) -> Result<Doctor, StoreError> {
        let doctor = Doctor {
            id: Uuid::new_v4(),
            full_name: request.full_name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            specialty: request.specialty.clone(),
            experience: request.experience,
            location: request.location.clone(),
            availability: request.availability.clone(),
            bio: request.bio.clone(),
            image_url: None,
            verified: false,
            created_at: Utc::now(),
        };
        self.tables.write().await.doctors.push(doctor.clone());
        Ok(doctor)
    }

    async fn mark_doctor_verified(&self, id: Uuid) -> Result<Option<Doctor>, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.doctors.iter_mut().find(|d| d.id == id && !d.verified) {
            Some(doctor) => {
                doctor.verified = true;
                Ok(Some(doctor.clone()))
            }
            None => Ok(None),
        }
    }

    async fn insert_doctor_notification(
        &self,
        doctor_id: Uuid,
        message: &str,
    ) -> Result<DoctorNotification, StoreError> {
        let notification = DoctorNotification {
            id: Uuid::new_v4(),
            doctor_id,
            message: message.to_string(),
            read: false,
            created_at: Utc::now(),
        };
        self.tables.write().await.doctor_notifications.push(notification.clone());
        Ok(notification)
    }

    async fn list_doctor_notifications(&self, doctor_id: Uuid) -> Result<Vec<DoctorNotification>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .doctor_notifications
            .iter()
            .rev()
            .filter(|n| n.doctor_id == doctor_id)
            .cloned()
            .collect())
    }

    async fn insert_appointment(
        &self,
        patient_id: Uuid,
        request: &BookAppointmentRequest,
    ) -> Result<Appointment, StoreError> {
        let mut tables = self.tables.write().await;
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id: request.doctor_id,
            patient_name: request.patient_name.clone(),
            patient_email: request.patient_email.clone(),
            patient_phone: request.patient_phone.clone(),
            appointment_date: request.appointment_date,
            medical_issue: request.medical_issue.clone(),
            financial_status: request.financial_status.clone(),
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
            doctor: None,
        };
        tables.appointments.push(appointment.clone());
        Ok(tables.with_doctor(&appointment))
    }

    async fn get_appointment(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .appointments
            .iter()
            .find(|a| a.id == id)
            .map(|a| tables.with_doctor(a)))
    }

    async fn list_patient_appointments(&self, patient_id: Uuid) -> Result<Vec<Appointment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.appointments_where(|a| a.patient_id == patient_id))
    }

    async fn list_doctor_appointments(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.appointments_where(|a| a.doctor_id == doctor_id))
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.appointments_where(|_| true))
    }

    async fn transition_appointment(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError> {
        let mut tables = self.tables.write().await;
        let updated = match tables
            .appointments
            .iter_mut()
            .find(|a| a.id == id && a.status == AppointmentStatus::Pending)
        {
            Some(appointment) => {
                appointment.status = status;
                appointment.clone()
            }
            None => return Ok(None),
        };
        Ok(Some(tables.with_doctor(&updated)))
    }

    async fn list_initiatives(&self) -> Result<Vec<Initiative>, StoreError> {
        let tables = self.tables.read().await;
        let mut initiatives: Vec<Initiative> = tables.initiatives.iter().rev().cloned().collect();
        initiatives.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(initiatives)
    }

    async fn insert_initiative(&self, request: &CreateInitiativeRequest) -> Result<Initiative, StoreError> {
        let initiative = Initiative {
            id: Uuid::new_v4(),
            title: request.title.clone(),
            description: request.description.clone(),
            date: request.date.clone(),
            organizer: request.organizer.clone(),
            image: request.image.clone(),
            created_at: Utc::now(),
            updated_at: None,
        };
        self.tables.write().await.initiatives.push(initiative.clone());
        Ok(initiative)
    }

    async fn update_initiative(
        &self,
        id: Uuid,
        request: &UpdateInitiativeRequest,
    ) -> Result<Option<Initiative>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(initiative) = tables.initiatives.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &request.title {
            initiative.title = title.clone();
        }
        if let Some(description) = &request.description {
            initiative.description = description.clone();
        }
        if let Some(date) = &request.date {
            initiative.date = date.clone();
        }
        if let Some(organizer) = &request.organizer {
            initiative.organizer = organizer.clone();
        }
        if let Some(image) = &request.image {
            initiative.image = image.clone();
        }
        initiative.updated_at = Some(Utc::now());
        Ok(Some(initiative.clone()))
    }

    async fn delete_initiative(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.initiatives.len();
        tables.initiatives.retain(|i| i.id != id);
        Ok(tables.initiatives.len() < before)
    }

    async fn is_admin(&self, user_id: Uuid) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.admin_users.iter().any(|a| a.user_id == user_id))
    }

    async fn insert_admin_user(&self, user_id: Uuid) -> Result<AdminUser, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.admin_users.iter().find(|a| a.user_id == user_id) {
            return Ok(existing.clone());
        }
        let admin = AdminUser {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
        };
        tables.admin_users.push(admin.clone());
        Ok(admin)
    }

    async fn delete_admin_user(&self, user_id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.admin_users.len();
        tables.admin_users.retain(|a| a.user_id != user_id);
        Ok(tables.admin_users.len() < before)
    }
}
