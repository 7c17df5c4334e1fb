//! Test utilities
//!
//! In-memory port implementations and test fixtures for unit testing.
//! Repository expectations that need call counting use the mockall mock
//! generated for `PatientRepository` instead.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
