//! DTOs de entrada y salida de la API

pub mod api_response;
pub mod auth_dto;
pub mod driver_dto;
pub mod list_params;
pub mod owner_dto;
pub mod report_dto;
pub mod vehicle_dto;

pub use api_response::{ApiResponse, PaginatedResponse, Pagination};
pub use auth_dto::{LoginRequest, LoginResponse, RegisterRequest};
pub use driver_dto::DriverRequest;
pub use list_params::{ListParams, ShowParams};
pub use owner_dto::OwnerRequest;
pub use vehicle_dto::{VehicleRequest, VehicleUpdateRequest};
