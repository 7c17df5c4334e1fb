//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod patient;

pub use patient::{NewPatient, Patient, PatientChanges, PatientId};
