use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::{NewVehicle, RecordStatus, Vehicle, VehicleClass};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{normalize_plate, validate_not_blank, validate_plate, validate_reference};

/// Request para crear un vehículo
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct VehicleRequest {
    #[serde(alias = "placa")]
    #[validate(custom = "validate_plate")]
    pub plate: String,

    #[validate(
        custom = "validate_not_blank",
        length(max = 50, message = "El color no puede superar 50 caracteres")
    )]
    pub color: String,

    #[serde(alias = "marca")]
    #[validate(
        custom = "validate_not_blank",
        length(max = 100, message = "La marca no puede superar 100 caracteres")
    )]
    pub make: String,

    #[serde(alias = "tipo_vehiculo")]
    #[validate(required(message = "El tipo de vehículo es obligatorio"))]
    pub vehicle_class: Option<VehicleClass>,

    #[serde(alias = "conductor_id")]
    #[validate(custom = "validate_reference")]
    pub driver_id: String,

    #[serde(alias = "propietario_id")]
    #[validate(custom = "validate_reference")]
    pub owner_id: String,

    #[serde(alias = "estado")]
    pub status: Option<RecordStatus>,
}

impl VehicleRequest {
    pub fn normalized(self) -> Self {
        Self {
            plate: normalize_plate(&self.plate),
            color: self.color.trim().to_string(),
            make: self.make.trim().to_string(),
            vehicle_class: self.vehicle_class,
            driver_id: self.driver_id.trim().to_string(),
            owner_id: self.owner_id.trim().to_string(),
            status: self.status,
        }
    }

    /// Convierte un request ya validado
    pub fn to_new_vehicle(&self) -> AppResult<NewVehicle> {
        let vehicle_class = self
            .vehicle_class
            .ok_or_else(|| validation_error("vehicle_class", "El tipo de vehículo es obligatorio"))?;
        let driver_id = Uuid::parse_str(&self.driver_id)
            .map_err(|_| validation_error("driver_id", "El identificador seleccionado no es válido"))?;
        let owner_id = Uuid::parse_str(&self.owner_id)
            .map_err(|_| validation_error("owner_id", "El identificador seleccionado no es válido"))?;

        Ok(NewVehicle {
            plate: self.plate.clone(),
            color: self.color.clone(),
            make: self.make.clone(),
            vehicle_class,
            driver_id,
            owner_id,
            status: self.status.unwrap_or_default(),
        })
    }
}

/// Request de actualización parcial: solo se reemplazan los campos presentes
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct VehicleUpdateRequest {
    #[serde(alias = "placa")]
    #[validate(custom = "validate_plate")]
    pub plate: Option<String>,

    #[validate(
        custom = "validate_not_blank",
        length(max = 50, message = "El color no puede superar 50 caracteres")
    )]
    pub color: Option<String>,

    #[serde(alias = "marca")]
    #[validate(
        custom = "validate_not_blank",
        length(max = 100, message = "La marca no puede superar 100 caracteres")
    )]
    pub make: Option<String>,

    #[serde(alias = "tipo_vehiculo")]
    pub vehicle_class: Option<VehicleClass>,

    #[serde(alias = "conductor_id")]
    #[validate(custom = "validate_reference")]
    pub driver_id: Option<String>,

    #[serde(alias = "propietario_id")]
    #[validate(custom = "validate_reference")]
    pub owner_id: Option<String>,

    #[serde(alias = "estado")]
    pub status: Option<RecordStatus>,
}

impl VehicleUpdateRequest {
    pub fn normalized(self) -> Self {
        let trimmed = |v: Option<String>| v.map(|s| s.trim().to_string());

        Self {
            plate: self.plate.as_deref().map(normalize_plate),
            color: trimmed(self.color),
            make: trimmed(self.make),
            vehicle_class: self.vehicle_class,
            driver_id: trimmed(self.driver_id),
            owner_id: trimmed(self.owner_id),
            status: self.status,
        }
    }

    /// Aplica los campos presentes sobre el vehículo actual
    pub fn merge_onto(&self, current: &Vehicle) -> VehicleRequest {
        VehicleRequest {
            plate: self.plate.clone().unwrap_or_else(|| current.plate.clone()),
            color: self.color.clone().unwrap_or_else(|| current.color.clone()),
            make: self.make.clone().unwrap_or_else(|| current.make.clone()),
            vehicle_class: Some(self.vehicle_class.unwrap_or(current.vehicle_class)),
            driver_id: self
                .driver_id
                .clone()
                .unwrap_or_else(|| current.driver_id.to_string()),
            owner_id: self
                .owner_id
                .clone()
                .unwrap_or_else(|| current.owner_id.to_string()),
            status: Some(self.status.unwrap_or(current.status)),
        }
    }
}
