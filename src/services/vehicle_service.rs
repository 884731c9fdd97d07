//! Escrituras de vehículos
//!
//! Crear y actualizar verifican la placa y que el conductor y el propietario
//! existan; eliminar solo pasa el vehículo a `inactive`.

use async_trait::async_trait;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::driver_service::ensure_unique;
use super::write_workflow::WriteCommand;
use crate::dto::{VehicleRequest, VehicleUpdateRequest};
use crate::models::{NewVehicle, PersonKind, VehicleDetail, Visibility};
use crate::repositories::{ConstraintChecker, FleetTx, UniqueField, VehicleRepository};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Placa única y referencias vivas; se verifican ambas referencias y se
/// reporta primero el conductor
async fn check_vehicle(
    tx: &mut dyn FleetTx,
    input: &NewVehicle,
    exclude_id: Option<Uuid>,
) -> AppResult<()> {
    ensure_unique(tx, UniqueField::VehiclePlate, "plate", &input.plate, exclude_id).await?;

    let driver_exists = tx.exists(PersonKind::Driver, input.driver_id).await?;
    let owner_exists = tx.exists(PersonKind::Owner, input.owner_id).await?;

    if !driver_exists {
        return Err(AppError::ReferenceNotFound { field: "driver_id" });
    }
    if !owner_exists {
        return Err(AppError::ReferenceNotFound { field: "owner_id" });
    }

    Ok(())
}

async fn load_detail(tx: &mut dyn FleetTx, id: Uuid) -> AppResult<VehicleDetail> {
    tx.find_vehicle_detail(id, Visibility::ExcludeDeleted)
        .await?
        .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))
}

pub struct CreateVehicle {
    request: VehicleRequest,
}

impl CreateVehicle {
    pub fn new(request: VehicleRequest) -> Self {
        Self {
            request: request.normalized(),
        }
    }
}

#[async_trait]
impl WriteCommand for CreateVehicle {
    type Output = VehicleDetail;

    fn operation(&self) -> &'static str {
        "create_vehicle"
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        self.request.validate()
    }

    async fn check_constraints(&mut self, tx: &mut dyn FleetTx) -> AppResult<()> {
        let input = self.request.to_new_vehicle()?;
        check_vehicle(tx, &input, None).await
    }

    async fn persist(&self, tx: &mut dyn FleetTx) -> AppResult<VehicleDetail> {
        let vehicle = tx.insert_vehicle(&self.request.to_new_vehicle()?).await?;
        load_detail(tx, vehicle.id).await
    }
}

/// Actualización parcial: los campos presentes se aplican sobre el vehículo
/// actual y el resultado se valida completo antes de escribir
pub struct UpdateVehicle {
    id: Uuid,
    request: VehicleUpdateRequest,
    merged: Option<NewVehicle>,
}

impl UpdateVehicle {
    pub fn new(id: Uuid, request: VehicleUpdateRequest) -> Self {
        Self {
            id,
            request: request.normalized(),
            merged: None,
        }
    }
}

#[async_trait]
impl WriteCommand for UpdateVehicle {
    type Output = VehicleDetail;

    fn operation(&self) -> &'static str {
        "update_vehicle"
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        self.request.validate()
    }

    async fn check_constraints(&mut self, tx: &mut dyn FleetTx) -> AppResult<()> {
        let current = tx
            .find_vehicle(self.id, Visibility::ExcludeDeleted)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &self.id.to_string()))?;

        let merged = self.request.merge_onto(&current);
        merged.validate()?;
        let input = merged.to_new_vehicle()?;

        check_vehicle(tx, &input, Some(self.id)).await?;
        self.merged = Some(input);
        Ok(())
    }

    async fn persist(&self, tx: &mut dyn FleetTx) -> AppResult<VehicleDetail> {
        let input = self.merged.as_ref().ok_or_else(|| {
            AppError::PersistenceFailed("update_vehicle persisted before checking".to_string())
        })?;

        tx.update_vehicle(self.id, input)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &self.id.to_string()))?;
        load_detail(tx, self.id).await
    }
}

/// Eliminar un vehículo: siempre lo deja inactivo, nunca borra la fila
pub struct DeactivateVehicle {
    id: Uuid,
}

impl DeactivateVehicle {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[async_trait]
impl WriteCommand for DeactivateVehicle {
    type Output = ();

    fn operation(&self) -> &'static str {
        "deactivate_vehicle"
    }

    async fn check_constraints(&mut self, _tx: &mut dyn FleetTx) -> AppResult<()> {
        Ok(())
    }

    async fn persist(&self, tx: &mut dyn FleetTx) -> AppResult<()> {
        if !tx.deactivate_vehicle(self.id).await? {
            return Err(not_found_error("Vehículo", &self.id.to_string()));
        }
        Ok(())
    }
}
