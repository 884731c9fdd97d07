//! Enumeraciones compartidas por los registros de la flota
//!
//! Mapean a los tipos ENUM `record_status` y `vehicle_class` de PostgreSQL.
//! En la API viajan en minúsculas; también se aceptan los valores en español
//! que envía el frontend.

use serde::{Deserialize, Serialize};
use sqlx::Type;

/// Estado de un conductor, propietario o vehículo
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "record_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    #[serde(alias = "activo")]
    Active,
    #[serde(alias = "inactivo")]
    Inactive,
}

/// Clase de servicio del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "vehicle_class", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    #[serde(alias = "particular")]
    Private,
    #[serde(alias = "publico", alias = "público")]
    Public,
}

/// Alcance explícito de lectura respecto al borrado lógico
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    ExcludeDeleted,
    IncludeDeleted,
}

impl Visibility {
    pub fn from_flag(include_deleted: bool) -> Self {
        if include_deleted {
            Visibility::IncludeDeleted
        } else {
            Visibility::ExcludeDeleted
        }
    }

    pub fn includes_deleted(self) -> bool {
        self == Visibility::IncludeDeleted
    }
}
