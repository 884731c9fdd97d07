//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL
//! del registro de flota.

pub mod auth;
pub mod driver;
pub mod listing;
pub mod owner;
pub mod person;
pub mod report;
pub mod status;
pub mod user;
pub mod vehicle;

pub use auth::RequestContext;
pub use driver::{Driver, NewDriver};
pub use listing::{ListFilter, Page};
pub use owner::{NewOwner, Owner};
pub use person::PersonKind;
pub use status::{RecordStatus, VehicleClass, Visibility};
pub use user::{NewUser, User};
pub use vehicle::{NewVehicle, Vehicle, VehicleDetail};
