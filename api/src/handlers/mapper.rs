//! Patient mapper
//!
//! Pure conversions between the wire shapes and the domain entities.

use super::patients::{PatientRequest, PatientResponse};
use crate::domain::entities::{NewPatient, Patient, PatientChanges};

#[derive(Debug, Clone, Copy, Default)]
pub struct PatientMapper;

impl PatientMapper {
    pub fn new() -> Self {
        Self
    }

    /// Registration data for a new patient
    pub fn to_entity(&self, request: &PatientRequest) -> NewPatient {
        NewPatient {
            name: request.name.trim().to_string(),
            dob: request.dob,
            email: normalize_email(&request.email),
            phone: normalize(&request.phone),
            document: normalize(&request.document),
        }
    }

    /// Replacement field set for an update; the document is never carried over
    pub fn to_changes(&self, request: &PatientRequest) -> PatientChanges {
        PatientChanges {
            name: request.name.trim().to_string(),
            dob: request.dob,
            email: normalize_email(&request.email),
            phone: normalize(&request.phone),
        }
    }

    pub fn to_response(&self, patient: Patient) -> PatientResponse {
        PatientResponse {
            id: patient.id.0,
            name: patient.name,
            dob: patient.dob,
            email: patient.email,
            phone: patient.phone,
            document: patient.document,
            active: patient.active,
            created_at: patient.created_at.to_rfc3339(),
            updated_at: patient.updated_at.to_rfc3339(),
        }
    }
}

fn normalize(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn normalize_email(value: &Option<String>) -> Option<String> {
    normalize(value).map(|email| email.to_lowercase())
}
