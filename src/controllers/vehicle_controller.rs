use std::sync::Arc;

use uuid::Uuid;

use crate::dto::report_dto::{PersonOption, VehicleStatistics};
use crate::dto::{
    ApiResponse, ListParams, PaginatedResponse, Pagination, VehicleRequest, VehicleUpdateRequest,
};
use crate::models::{PersonKind, RequestContext, VehicleDetail, Visibility};
use crate::repositories::{FleetStore, ReportRepository, VehicleRepository};
use crate::services::{run_write, CreateVehicle, DeactivateVehicle, UpdateVehicle};
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleController {
    store: Arc<dyn FleetStore>,
}

impl VehicleController {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        request: VehicleRequest,
    ) -> Result<ApiResponse<VehicleDetail>, AppError> {
        let vehicle = run_write(self.store.as_ref(), ctx, CreateVehicle::new(request)).await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo creado exitosamente",
        ))
    }

    pub async fn list(
        &self,
        params: &ListParams,
    ) -> Result<PaginatedResponse<VehicleDetail>, AppError> {
        let filter = params.to_filter()?;
        let mut tx = self.store.begin().await?;
        let page = tx.list_vehicle_details(&filter).await?;

        Ok(PaginatedResponse::new(
            page.items,
            Pagination::new(params.page(), params.per_page(), page.total),
        ))
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        visibility: Visibility,
    ) -> Result<ApiResponse<VehicleDetail>, AppError> {
        let mut tx = self.store.begin().await?;
        let vehicle = tx
            .find_vehicle_detail(id, visibility)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", &id.to_string()))?;

        Ok(ApiResponse::success(vehicle))
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        request: VehicleUpdateRequest,
    ) -> Result<ApiResponse<VehicleDetail>, AppError> {
        let vehicle = run_write(self.store.as_ref(), ctx, UpdateVehicle::new(id, request)).await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo actualizado exitosamente",
        ))
    }

    /// Eliminar = desactivar
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        run_write(self.store.as_ref(), ctx, DeactivateVehicle::new(id)).await?;
        Ok(ApiResponse::message("Vehículo eliminado exitosamente"))
    }

    pub async fn statistics(&self) -> Result<ApiResponse<VehicleStatistics>, AppError> {
        let mut tx = self.store.begin().await?;
        let stats = tx.fleet_statistics().await?;
        Ok(ApiResponse::success(VehicleStatistics::from(&stats)))
    }

    /// Personas activas para las listas de selección del formulario
    pub async fn person_options(
        &self,
        kind: PersonKind,
    ) -> Result<ApiResponse<Vec<PersonOption>>, AppError> {
        let mut tx = self.store.begin().await?;
        let rows = tx.person_report(kind).await?;
        Ok(ApiResponse::success(
            rows.into_iter().map(PersonOption::from).collect(),
        ))
    }
}
