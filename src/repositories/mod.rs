//! Repositorios del registro de flota
//!
//! Cada repositorio es un trait implementado por la transacción del almacén;
//! la implementación de producción usa PostgreSQL vía sqlx.

pub mod constraint_checker;
pub mod driver_repository;
pub mod owner_repository;
pub mod person_repository;
pub mod report_repository;
pub mod store;
pub mod user_repository;
pub mod vehicle_repository;

#[cfg(test)]
pub mod memory;

pub use constraint_checker::{ConstraintChecker, UniqueField};
pub use driver_repository::DriverRepository;
pub use owner_repository::OwnerRepository;
pub use person_repository::PersonRepository;
pub use report_repository::ReportRepository;
pub use store::{FleetStore, FleetTx, PgFleetStore};
pub use user_repository::UserRepository;
pub use vehicle_repository::VehicleRepository;
