//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod patient_repo;
pub mod schema;


pub use patient_repo::PostgresPatientRepository;
pub use schema::ensure_schema;
