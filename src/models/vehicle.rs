//! Modelo de Vehicle
//!
//! Mapea a la tabla `vehicles`. Cada vehículo referencia exactamente un
//! conductor y un propietario; eliminarlo solo lo pasa a `inactive`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::driver::Driver;
use super::owner::Owner;
use super::status::{RecordStatus, VehicleClass};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub color: String,
    pub make: String,
    pub vehicle_class: VehicleClass,
    pub driver_id: Uuid,
    pub owner_id: Uuid,
    pub status: RecordStatus,
    pub registered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Campos escribibles de un vehículo; la placa ya viene en mayúsculas
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub plate: String,
    pub color: String,
    pub make: String,
    pub vehicle_class: VehicleClass,
    pub driver_id: Uuid,
    pub owner_id: Uuid,
    pub status: RecordStatus,
}

impl From<&Vehicle> for NewVehicle {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            plate: vehicle.plate.clone(),
            color: vehicle.color.clone(),
            make: vehicle.make.clone(),
            vehicle_class: vehicle.vehicle_class,
            driver_id: vehicle.driver_id,
            owner_id: vehicle.owner_id,
            status: vehicle.status,
        }
    }
}

/// Vehículo con su conductor y propietario cargados
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VehicleDetail {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub driver: Option<Driver>,
    pub owner: Option<Owner>,
}

impl VehicleDetail {
    pub fn driver_name(&self) -> String {
        self.driver
            .as_ref()
            .map(Driver::full_name)
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn owner_name(&self) -> String {
        self.owner
            .as_ref()
            .map(Owner::full_name)
            .unwrap_or_else(|| "N/A".to_string())
    }
}
