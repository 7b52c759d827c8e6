use chrono::NaiveDate;
use uuid::Uuid;

use healthdesk_backend::db::{DoctorFilter, HealthRecordChanges, MemoryStore, Store};
use healthdesk_backend::models::community::{AppointmentStatus, BookAppointmentRequest};
use healthdesk_backend::models::health_record::{NewHealthRecord, RecordType};

fn new_record(user_id: Uuid, record_type: RecordType, record_date: NaiveDate) -> NewHealthRecord {
    NewHealthRecord {
        user_id,
        record_type,
        record_date,
        description: r#"{"heartRate":"70"}"#.to_string(),
        status: "active".to_string(),
    }
}

#[tokio::test]
async fn records_list_newest_first_and_stay_private() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    let other = Uuid::new_v4();

    let older = store
        .insert_health_record(new_record(user, RecordType::Vitals, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()))
        .await
        .unwrap();
    let newer = store
        .insert_health_record(new_record(user, RecordType::Vitals, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()))
        .await
        .unwrap();
    store
        .insert_health_record(new_record(other, RecordType::Vitals, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()))
        .await
        .unwrap();

    let listed = store.list_health_records(user, None).await.unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    assert!(store.get_health_record(other, older.id).await.unwrap().is_none());
    let changed = store
        .update_health_record(other, older.id, HealthRecordChanges { status: Some("x".into()), ..Default::default() })
        .await
        .unwrap();
    assert!(changed.is_none());
    assert!(!store.delete_health_record(other, older.id).await.unwrap());
}

#[tokio::test]
async fn seeded_store_has_demo_community_data() {
    let store = MemoryStore::seeded();

    assert_eq!(store.list_doctors(DoctorFilter::All).await.unwrap().len(), 5);
    assert_eq!(store.list_doctors(DoctorFilter::Verified).await.unwrap().len(), 3);
    assert_eq!(store.list_doctors(DoctorFilter::Pending).await.unwrap().len(), 2);
    assert_eq!(store.list_initiatives().await.unwrap().len(), 3);

    let appointments = store.list_appointments().await.unwrap();
    assert_eq!(appointments.len(), 2);
    assert!(appointments.iter().all(|a| a.doctor.is_some()));
}

#[tokio::test]
async fn verification_and_transitions_are_one_way() {
    let store = MemoryStore::seeded();
    let pending = store.list_doctors(DoctorFilter::Pending).await.unwrap();
    let doctor_id = pending[0].id;

    assert!(store.mark_doctor_verified(doctor_id).await.unwrap().is_some());
    assert!(store.mark_doctor_verified(doctor_id).await.unwrap().is_none());

    let booked = store
        .insert_appointment(
            Uuid::new_v4(),
            &BookAppointmentRequest {
                doctor_id,
                patient_name: "Sam".to_string(),
                patient_email: "sam@example.com".to_string(),
                patient_phone: String::new(),
                appointment_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                medical_issue: "Rash".to_string(),
                financial_status: String::new(),
            },
        )
        .await
        .unwrap();
    assert_eq!(booked.status, AppointmentStatus::Pending);

    let approved = store
        .transition_appointment(booked.id, AppointmentStatus::Approved)
        .await
        .unwrap()
        .expect("pending appointment transitions");
    assert_eq!(approved.status, AppointmentStatus::Approved);
    assert!(store
        .transition_appointment(booked.id, AppointmentStatus::Rejected)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn admin_membership_is_idempotent() {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();

    let first = store.insert_admin_user(user).await.unwrap();
    let second = store.insert_admin_user(user).await.unwrap();
    assert_eq!(first.id, second.id);
    assert!(store.is_admin(user).await.unwrap());

    assert!(store.delete_admin_user(user).await.unwrap());
    assert!(!store.is_admin(user).await.unwrap());
    assert!(!store.delete_admin_user(user).await.unwrap());
}
