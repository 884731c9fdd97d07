//! Controladores: arman los comandos, ejecutan el flujo y preparan las respuestas

pub mod auth_controller;
pub mod driver_controller;
pub mod owner_controller;
pub mod report_controller;
pub mod vehicle_controller;

pub use auth_controller::AuthController;
pub use driver_controller::DriverController;
pub use owner_controller::OwnerController;
pub use report_controller::ReportController;
pub use vehicle_controller::VehicleController;
