//! PostgreSQL adapter for PatientRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr,
};

use crate::domain::entities::{NewPatient, Patient, PatientChanges, PatientId};
use crate::domain::ports::PatientRepository;
use crate::entity::patients;
use crate::error::DomainError;

/// PostgreSQL implementation of PatientRepository
pub struct PostgresPatientRepository {
    db: DatabaseConnection,
}

impl PostgresPatientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map write failures, surfacing missing rows and unique violations as domain errors
fn write_error(id: Option<&PatientId>, e: DbErr) -> DomainError {
    if matches!(e, DbErr::RecordNotUpdated) {
        let id = id.map(|id| id.to_string()).unwrap_or_default();
        return DomainError::NotFound(format!("Patient {} not found", id));
    }

    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => DomainError::Conflict(detail),
        _ => DomainError::Database(e.to_string()),
    }
}

#[async_trait]
impl PatientRepository for PostgresPatientRepository {
    async fn find_by_id(&self, id: &PatientId) -> Result<Option<Patient>, DomainError> {
        let result = patients::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_active(&self, limit: i64, offset: i64) -> Result<Vec<Patient>, DomainError> {
        let results = patients::Entity::find()
            .filter(patients::Column::Active.eq(true))
            .order_by_asc(patients::Column::Id)
            .offset(offset as u64)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<Patient>, DomainError> {
        let result = patients::Entity::find()
            .filter(patients::Column::Active.eq(true))
            .filter(patients::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_document(&self, document: &str) -> Result<Option<Patient>, DomainError> {
        let result = patients::Entity::find()
            .filter(patients::Column::Document.eq(document))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, patient: &NewPatient) -> Result<Patient, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = patients::ActiveModel {
            id: NotSet,
            name: Set(patient.name.clone()),
            dob: Set(patient.dob),
            email: Set(patient.email.clone()),
            phone: Set(patient.phone.clone()),
            document: Set(patient.document.clone()),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(None, e))?;

        Ok(result.into())
    }

    async fn update(
        &self,
        id: &PatientId,
        changes: &PatientChanges,
    ) -> Result<Patient, DomainError> {
        let now = Utc::now().fixed_offset();

        let result = patients::ActiveModel {
            id: Set(id.0),
            name: Set(changes.name.clone()),
            dob: Set(changes.dob),
            email: Set(changes.email.clone()),
            phone: Set(changes.phone.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| write_error(Some(id), e))?;

        Ok(result.into())
    }

    async fn deactivate(&self, id: &PatientId) -> Result<(), DomainError> {
        let now = Utc::now().fixed_offset();

        patients::ActiveModel {
            id: Set(id.0),
            active: Set(false),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| write_error(Some(id), e))?;

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<patients::Model> for Patient {
    fn from(model: patients::Model) -> Self {
        Patient {
            id: PatientId(model.id),
            name: model.name,
            dob: model.dob,
            email: model.email,
            phone: model.phone,
            document: model.document,
            active: model.active,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
