use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::aggregation::build_dashboard;
use crate::aggregation::classifier::classify_records;
use crate::aggregation::series::{build_vitals_series, TimeRange};
use crate::db::SharedStore;
use crate::error::AppError;
use crate::handlers::caller_id;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub range: TimeRange,
}

#[tracing::instrument(name = "Get dashboard", skip(store, claims), fields(user_id = %claims.sub))]
pub async fn get_dashboard(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let records = store.list_health_records(user_id, None).await?;
    let dashboard = build_dashboard(&records, query.range);

    tracing::debug!(
        "Dashboard built from {} records, {} chart points",
        records.len(),
        dashboard.series.len()
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success("Dashboard data retrieved", dashboard)))
}

#[tracing::instrument(name = "Get vitals series", skip(store, claims), fields(user_id = %claims.sub))]
pub async fn get_vitals_series(
    store: web::Data<SharedStore>,
    claims: web::ReqData<Claims>,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, AppError> {
    let user_id = caller_id(&claims)?;
    let records = store.list_health_records(user_id, None).await?;
    let classified = classify_records(&records);
    let series = build_vitals_series(&classified.vitals, query.range);
    Ok(HttpResponse::Ok().json(ApiResponse::success("Vitals series retrieved", series)))
}
