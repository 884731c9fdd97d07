//! Services module
//!
//! Lógica de negocio del registro de flota: el flujo de escritura común y
//! los comandos de cada entidad que corren dentro de él.

pub mod driver_service;
pub mod owner_service;
pub mod person_service;
pub mod vehicle_service;
pub mod write_workflow;

#[cfg(test)]
pub mod fixtures;

pub use driver_service::{CreateDriver, UpdateDriver};
pub use owner_service::{CreateOwner, UpdateOwner};
pub use person_service::DeletePerson;
pub use vehicle_service::{CreateVehicle, DeactivateVehicle, UpdateVehicle};
pub use write_workflow::{run_write, WorkflowStage, WriteCommand};
