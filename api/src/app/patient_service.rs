//! Patient service
//!
//! Business rules for the patient lifecycle: registration, lookup,
//! updates and soft deletion.

use std::sync::Arc;

use crate::domain::entities::{NewPatient, Patient, PatientChanges, PatientId};
use crate::domain::ports::PatientRepository;
use crate::error::{AppError, DomainError};

/// Upper bound for a single page of patients
pub const MAX_PAGE_SIZE: i64 = 100;

/// Service for managing patients
pub struct PatientService<PR>
where
    PR: PatientRepository,
{
    patients: Arc<PR>,
}

impl<PR> PatientService<PR>
where
    PR: PatientRepository,
{
    pub fn new(patients: Arc<PR>) -> Self {
        Self { patients }
    }

    /// Register a new patient
    ///
    /// Email addresses are unique among active patients; identity documents
    /// are unique across all patients, including inactive ones.
    pub async fn create_patient(&self, new_patient: NewPatient) -> Result<Patient, AppError> {
        if let Some(email) = new_patient.email.as_deref() {
            if self.patients.find_active_by_email(email).await?.is_some() {
                return Err(DomainError::Conflict(format!(
                    "A patient with email '{}' already exists",
                    email
                ))
                .into());
            }
        }

        if let Some(document) = new_patient.document.as_deref() {
            if self.patients.find_by_document(document).await?.is_some() {
                return Err(DomainError::Conflict(
                    "A patient with this document is already registered".to_string(),
                )
                .into());
            }
        }

        let patient = self.patients.create(&new_patient).await?;
        tracing::info!(patient_id = %patient.id, "Patient created");

        Ok(patient)
    }

    /// Get a patient by ID
    ///
    /// Soft-deleted patients are still returned, flagged inactive.
    pub async fn get_patient_by_id(&self, id: &PatientId) -> Result<Patient, AppError> {
        tracing::debug!(patient_id = %id, "Looking up patient");

        self.patients
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Replace a patient's editable fields
    pub async fn update_patient(
        &self,
        id: &PatientId,
        changes: PatientChanges,
    ) -> Result<Patient, AppError> {
        let existing = self.get_patient_by_id(id).await?;

        if !existing.active {
            return Err(DomainError::Conflict(format!(
                "Patient {} is inactive and cannot be updated",
                id
            ))
            .into());
        }

        if let Some(email) = changes.email.as_deref() {
            if let Some(other) = self.patients.find_active_by_email(email).await? {
                if other.id != existing.id {
                    return Err(DomainError::Conflict(format!(
                        "A patient with email '{}' already exists",
                        email
                    ))
                    .into());
                }
            }
        }

        let patient = self.patients.update(id, &changes).await?;
        tracing::info!(patient_id = %patient.id, "Patient updated");

        Ok(patient)
    }

    /// Soft delete a patient by marking it inactive
    ///
    /// Deleting an already inactive patient is a no-op.
    pub async fn delete_patient(&self, id: &PatientId) -> Result<(), AppError> {
        let existing = self.get_patient_by_id(id).await?;

        if !existing.active {
            tracing::debug!(patient_id = %id, "Patient already inactive");
            return Ok(());
        }

        self.patients.deactivate(id).await?;
        tracing::info!(patient_id = %id, "Patient deactivated");

        Ok(())
    }

    /// List active patients
    pub async fn list_patients(&self, limit: i64, offset: i64) -> Result<Vec<Patient>, AppError> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let offset = offset.max(0);

        Ok(self.patients.find_active(limit, offset).await?)
    }
}

fn not_found(id: &PatientId) -> AppError {
    DomainError::NotFound(format!("Patient {} not found", id)).into()
}
