pub mod health_calculations;
pub mod medication_expiry;
