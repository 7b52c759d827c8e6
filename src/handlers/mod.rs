pub mod admin;
pub mod backend_health_handler;
pub mod community;
pub mod dashboard;
pub mod diet;
pub mod health_records;
pub mod medications;
pub mod profile;
pub mod tools;
pub mod yoga;

use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::auth::Claims;

/// The authenticated caller. The middleware only admits tokens whose subject is a uuid.
pub(crate) fn caller_id(claims: &Claims) -> Result<Uuid, AppError> {
    claims
        .user_id()
        .ok_or_else(|| AppError::Unauthorized("Invalid token subject".to_string()))
}
