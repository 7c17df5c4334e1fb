//! HTTP handlers
//!
//! Axum request handlers for the API endpoints, plus the request/response
//! shapes, the mapper between them and the domain, and request validation.

pub mod mapper;
pub mod patients;
pub mod validation;

pub use mapper::PatientMapper;
pub use patients::{
    create_patient, delete_patient, get_patient_by_id, list_patients, update_patient,
};
