//! SeaORM entities
//!
//! Table mappings used by the PostgreSQL adapters. Domain code never sees
//! these types; adapters convert them into `domain::entities`.

pub mod patients;
