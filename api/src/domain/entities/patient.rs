//! Patient domain entity
//!
//! A patient that can be booked into the schedule. Patients are never
//! physically removed; deletion flips the `active` flag.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Unique identifier for a patient, assigned by storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatientId(pub i64);

impl PatientId {
    /// Accept only positive identifiers
    pub fn parse(raw: i64) -> Result<Self, DomainError> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(DomainError::Validation(format!(
                "Patient id must be a positive integer, got {}",
                raw
            )))
        }
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A patient record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub dob: NaiveDate,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// National identity document number, immutable once set
    pub document: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to create a new patient
#[derive(Debug, Clone, PartialEq)]
pub struct NewPatient {
    pub name: String,
    pub dob: NaiveDate,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document: Option<String>,
}

/// Replacement values written by an update
#[derive(Debug, Clone, PartialEq)]
pub struct PatientChanges {
    pub name: String,
    pub dob: NaiveDate,
    pub email: Option<String>,
    pub phone: Option<String>,
}
