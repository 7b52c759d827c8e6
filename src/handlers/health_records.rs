use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::db::{HealthRecordChanges, SharedStore};
use crate::error::{require_field, AppError};
use crate::handlers::caller_id;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::health_record::{
    CreateHealthRecordRequest, HealthRecordQuery, NewHealthRecord, RecordType,
    UpdateHealthRecordRequest, DEFAULT_RECORD_STATUS,
};

/// Check the payload is an object the record type can be read back from, then
/// serialize it into the text stored in `description`.
pub(crate) fn encode_payload(record_type: RecordType, data: &Value) -> Result<String, AppError> {
    let fields = match data.as_object() {
        Some(fields) if !fields.is_empty() => fields,
        _ => return Err(AppError::validation("data must be a non-empty object")),
    };

    let invalid = match record_type {
        // Measurements are form values.
        RecordType::Vitals | RecordType::BodyMeasurements | RecordType::LabResults => fields
            .iter()
            .find(|(_, value)| !matches!(value, Value::String(_) | Value::Number(_) | Value::Null))
            .map(|(name, _)| format!("{} must be a string or a number", name)),
        RecordType::DietPlan => match fields.get("meals") {
            None | Some(Value::Array(_)) => None,
            Some(_) => Some("meals must be a list".to_string()),
        },
    };
    if let Some(reason) = invalid {
        return Err(AppError::validation(format!("Invalid {} data: {}", record_type, reason)));
    }

    Ok(serde_json::to_string(data)?)
}

#[tracing::instrument(
    name = "Create health record",
    skip(store, claims, body),
    fields(user_id = %claims.sub, record_type = %body.record_type)
)]
pub async fn create_health_record(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    body: web::Json<CreateHealthRecordRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let body = body.into_inner();
    let description = encode_payload(body.record_type, &body.data)?;

    let record = store
        .insert_health_record(NewHealthRecord {
            user_id,
            record_type: body.record_type,
            record_date: body.record_date.unwrap_or_else(|| Utc::now().date_naive()),
            description,
            status: DEFAULT_RECORD_STATUS.to_string(),
        })
        .await?;

    tracing::info!("Stored health record {}", record.id);
    Ok(HttpResponse::Created().json(ApiResponse::success("Health record saved", record)))
}

#[tracing::instrument(name = "List health records", skip(store, claims), fields(user_id = %claims.sub))]
pub async fn list_health_records(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    query: web::Query<HealthRecordQuery>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let records = store.list_health_records(user_id, query.record_type).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Found {} health records", records.len()),
        records,
    )))
}

#[tracing::instrument(
    name = "Update health record",
    skip(store, claims, body),
    fields(user_id = %claims.sub, record_id = %record_id)
)]
pub async fn update_health_record(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    record_id: web::Path<Uuid>,
    body: web::Json<UpdateHealthRecordRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let record_id = record_id.into_inner();
    let body = body.into_inner();

    let existing = store
        .get_health_record(user_id, record_id)
        .await?
        .ok_or(AppError::NotFound("Health record"))?;

    let description = match &body.data {
        Some(data) => {
            let record_type = existing
                .record_type
                .parse::<RecordType>()
                .map_err(AppError::Validation)?;
            Some(encode_payload(record_type, data)?)
        }
        None => None,
    };
    if let Some(status) = &body.status {
        require_field(status, "status")?;
    }

    let changes = HealthRecordChanges {
        record_date: body.record_date,
        description,
        status: body.status,
    };
    let record = store
        .update_health_record(user_id, record_id, changes)
        .await?
        .ok_or(AppError::NotFound("Health record"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Health record updated", record)))
}

#[tracing::instrument(
    name = "Delete health record",
    skip(store, claims),
    fields(user_id = %claims.sub, record_id = %record_id)
)]
pub async fn delete_health_record(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    record_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    if !store.delete_health_record(user_id, record_id.into_inner()).await? {
        return Err(AppError::NotFound("Health record"));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Health record deleted")))
}
