//! Schema bootstrap
//!
//! Creates the tables backing the SeaORM entities when they are missing.

use sea_orm::{ConnectionTrait, DatabaseConnection, Schema};

use crate::entity::patients;
use crate::error::DomainError;

/// Active patients may not share an email; deactivated rows release it
const ACTIVE_EMAIL_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS patients_active_email_key \
     ON patients (email) WHERE active";

/// Create the `patients` table and its indexes if they do not exist yet
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DomainError> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut create_patients = schema.create_table_from_entity(patients::Entity);
    create_patients.if_not_exists();

    db.execute(backend.build(&create_patients))
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

    db.execute_unprepared(ACTIVE_EMAIL_INDEX)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

    tracing::debug!("Database schema ready");
    Ok(())
}
