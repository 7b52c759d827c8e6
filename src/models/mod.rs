pub mod admin;
pub mod common;
pub mod community;
pub mod diet;
pub mod health_record;
pub mod medication;
pub mod profile;
pub mod tools;
pub mod yoga;
