//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{NaiveDate, Utc};

use crate::domain::entities::{NewPatient, Patient, PatientChanges, PatientId};
use crate::handlers::patients::PatientRequest;

pub fn test_dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
}

/// Create a stored, active test patient with id 1
pub fn test_patient() -> Patient {
    test_patient_with_id(1)
}

/// Create a stored, active test patient with a specific id
pub fn test_patient_with_id(id: i64) -> Patient {
    let now = Utc::now();
    Patient {
        id: PatientId(id),
        name: "Jane Doe".to_string(),
        dob: test_dob(),
        email: Some("jane.doe@example.com".to_string()),
        phone: Some("+55 11 91234-5678".to_string()),
        document: Some("12345678901".to_string()),
        active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Create registration data that does not collide with `test_patient`
pub fn test_new_patient() -> NewPatient {
    NewPatient {
        name: "Jane Doe".to_string(),
        dob: test_dob(),
        email: Some("jane.new@example.com".to_string()),
        phone: None,
        document: Some("98765432100".to_string()),
    }
}

pub fn test_changes() -> PatientChanges {
    PatientChanges {
        name: "Jane Smith".to_string(),
        dob: test_dob(),
        email: Some("jane.smith@example.com".to_string()),
        phone: None,
    }
}

/// Minimal valid request body
pub fn test_request() -> PatientRequest {
    PatientRequest {
        name: "Jane Doe".to_string(),
        dob: test_dob(),
        email: None,
        phone: None,
        document: None,
    }
}
