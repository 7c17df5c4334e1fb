//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{NewPatient, Patient, PatientChanges, PatientId};
use crate::error::DomainError;

/// Repository for Patient entities
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Find a patient by ID, active or not
    async fn find_by_id(&self, id: &PatientId) -> Result<Option<Patient>, DomainError>;

    /// List active patients ordered by ID
    async fn find_active(&self, limit: i64, offset: i64) -> Result<Vec<Patient>, DomainError>;

    /// Find the active patient registered with an email address
    async fn find_active_by_email(&self, email: &str) -> Result<Option<Patient>, DomainError>;

    /// Find a patient (active or not) by identity document
    async fn find_by_document(&self, document: &str) -> Result<Option<Patient>, DomainError>;

    /// Create a new, active patient
    async fn create(&self, patient: &NewPatient) -> Result<Patient, DomainError>;

    /// Overwrite a patient's editable fields
    async fn update(
        &self,
        id: &PatientId,
        changes: &PatientChanges,
    ) -> Result<Patient, DomainError>;

    /// Mark a patient inactive (soft delete), keeping the row
    async fn deactivate(&self, id: &PatientId) -> Result<(), DomainError>;
}
