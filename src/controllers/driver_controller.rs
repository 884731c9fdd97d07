use std::sync::Arc;

use uuid::Uuid;

use crate::dto::report_dto::DriverWithVehicles;
use crate::dto::{ApiResponse, DriverRequest, ListParams, PaginatedResponse, Pagination};
use crate::models::report::PersonStatistics;
use crate::models::{Driver, PersonKind, RequestContext, Visibility};
use crate::repositories::{
    DriverRepository, FleetStore, ReportRepository, VehicleRepository,
};
use crate::services::{run_write, CreateDriver, DeletePerson, UpdateDriver};
use crate::utils::errors::{not_found_error, AppError};

pub struct DriverController {
    store: Arc<dyn FleetStore>,
}

impl DriverController {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        request: DriverRequest,
    ) -> Result<ApiResponse<Driver>, AppError> {
        let driver = run_write(self.store.as_ref(), ctx, CreateDriver::new(request)).await?;

        Ok(ApiResponse::success_with_message(
            driver,
            "Conductor creado exitosamente",
        ))
    }

    pub async fn list(&self, params: &ListParams) -> Result<PaginatedResponse<Driver>, AppError> {
        let filter = params.to_filter()?;
        let mut tx = self.store.begin().await?;
        let page = tx.list_drivers(&filter).await?;

        Ok(PaginatedResponse::new(
            page.items,
            Pagination::new(params.page(), params.per_page(), page.total),
        ))
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        visibility: Visibility,
    ) -> Result<ApiResponse<DriverWithVehicles>, AppError> {
        let mut tx = self.store.begin().await?;
        let driver = tx
            .find_driver(id, visibility)
            .await?
            .ok_or_else(|| not_found_error("Conductor", &id.to_string()))?;
        let vehicles = tx.vehicles_for_person(PersonKind::Driver, id).await?;

        Ok(ApiResponse::success(DriverWithVehicles { driver, vehicles }))
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        request: DriverRequest,
    ) -> Result<ApiResponse<Driver>, AppError> {
        let driver = run_write(self.store.as_ref(), ctx, UpdateDriver::new(id, request)).await?;

        Ok(ApiResponse::success_with_message(
            driver,
            "Conductor actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        run_write(self.store.as_ref(), ctx, DeletePerson::driver(id)).await?;
        Ok(ApiResponse::message("Conductor eliminado exitosamente"))
    }

    pub async fn statistics(&self) -> Result<ApiResponse<PersonStatistics>, AppError> {
        let mut tx = self.store.begin().await?;
        let stats = tx.person_statistics(PersonKind::Driver).await?;
        Ok(ApiResponse::success(stats))
    }
}
