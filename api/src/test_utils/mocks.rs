//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{NewPatient, Patient, PatientChanges, PatientId};
use crate::domain::ports::PatientRepository;
use crate::error::DomainError;

// ============================================================================
// In-Memory Patient Repository
// ============================================================================

#[derive(Default, Clone)]
pub struct InMemoryPatientRepository {
    patients: Arc<RwLock<BTreeMap<PatientId, Patient>>>,
}

impl InMemoryPatientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a patient for testing
    pub fn with_patient(self, patient: Patient) -> Self {
        {
            let mut patients = self.patients.write().unwrap();
            patients.insert(patient.id, patient);
        }
        self
    }

    /// Snapshot of a stored patient, bypassing the port
    pub fn stored(&self, id: &PatientId) -> Option<Patient> {
        self.patients.read().unwrap().get(id).cloned()
    }

    /// Number of stored patients, active or not
    pub fn len(&self) -> usize {
        self.patients.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.read().unwrap().is_empty()
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn find_by_id(&self, id: &PatientId) -> Result<Option<Patient>, DomainError> {
        let patients = self.patients.read().unwrap();
        Ok(patients.get(id).cloned())
    }

    async fn find_active(&self, limit: i64, offset: i64) -> Result<Vec<Patient>, DomainError> {
        let patients = self.patients.read().unwrap();
        Ok(patients
            .values()
            .filter(|p| p.active)
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<Patient>, DomainError> {
        let patients = self.patients.read().unwrap();
        Ok(patients
            .values()
            .find(|p| p.active && p.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_document(&self, document: &str) -> Result<Option<Patient>, DomainError> {
        let patients = self.patients.read().unwrap();
        Ok(patients
            .values()
            .find(|p| p.document.as_deref() == Some(document))
            .cloned())
    }

    async fn create(&self, new_patient: &NewPatient) -> Result<Patient, DomainError> {
        let mut patients = self.patients.write().unwrap();
        let next_id = patients.keys().next_back().map(|id| id.0 + 1).unwrap_or(1);
        let now = Utc::now();

        let patient = Patient {
            id: PatientId(next_id),
            name: new_patient.name.clone(),
            dob: new_patient.dob,
            email: new_patient.email.clone(),
            phone: new_patient.phone.clone(),
            document: new_patient.document.clone(),
            active: true,
            created_at: now,
            updated_at: now,
        };

        patients.insert(patient.id, patient.clone());
        Ok(patient)
    }

    async fn update(
        &self,
        id: &PatientId,
        changes: &PatientChanges,
    ) -> Result<Patient, DomainError> {
        let mut patients = self.patients.write().unwrap();
        if let Some(patient) = patients.get_mut(id) {
            patient.name = changes.name.clone();
            patient.dob = changes.dob;
            patient.email = changes.email.clone();
            patient.phone = changes.phone.clone();
            patient.updated_at = Utc::now();
            Ok(patient.clone())
        } else {
            Err(DomainError::NotFound(format!("Patient {} not found", id)))
        }
    }

    async fn deactivate(&self, id: &PatientId) -> Result<(), DomainError> {
        let mut patients = self.patients.write().unwrap();
        if let Some(patient) = patients.get_mut(id) {
            patient.active = false;
            patient.updated_at = Utc::now();
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("Patient {} not found", id)))
        }
    }
}
