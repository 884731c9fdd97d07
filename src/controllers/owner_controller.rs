use std::sync::Arc;

use uuid::Uuid;

use crate::dto::report_dto::OwnerWithVehicles;
use crate::dto::{ApiResponse, OwnerRequest, ListParams, PaginatedResponse, Pagination};
use crate::models::report::PersonStatistics;
use crate::models::{Owner, PersonKind, RequestContext, Visibility};
use crate::repositories::{
    OwnerRepository, FleetStore, ReportRepository, VehicleRepository,
};
use crate::services::{run_write, CreateOwner, DeletePerson, UpdateOwner};
use crate::utils::errors::{not_found_error, AppError};

pub struct OwnerController {
    store: Arc<dyn FleetStore>,
}

impl OwnerController {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        request: OwnerRequest,
    ) -> Result<ApiResponse<Owner>, AppError> {
        let owner = run_write(self.store.as_ref(), ctx, CreateOwner::new(request)).await?;

        Ok(ApiResponse::success_with_message(
            owner,
            "Propietario creado exitosamente",
        ))
    }

    pub async fn list(&self, params: &ListParams) -> Result<PaginatedResponse<Owner>, AppError> {
        let filter = params.to_filter()?;
        let mut tx = self.store.begin().await?;
        let page = tx.list_owners(&filter).await?;

        Ok(PaginatedResponse::new(
            page.items,
            Pagination::new(params.page(), params.per_page(), page.total),
        ))
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        visibility: Visibility,
    ) -> Result<ApiResponse<OwnerWithVehicles>, AppError> {
        let mut tx = self.store.begin().await?;
        let owner = tx
            .find_owner(id, visibility)
            .await?
            .ok_or_else(|| not_found_error("Propietario", &id.to_string()))?;
        let vehicles = tx.vehicles_for_person(PersonKind::Owner, id).await?;

        Ok(ApiResponse::success(OwnerWithVehicles { owner, vehicles }))
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        request: OwnerRequest,
    ) -> Result<ApiResponse<Owner>, AppError> {
        let owner = run_write(self.store.as_ref(), ctx, UpdateOwner::new(id, request)).await?;

        Ok(ApiResponse::success_with_message(
            owner,
            "Propietario actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        run_write(self.store.as_ref(), ctx, DeletePerson::owner(id)).await?;
        Ok(ApiResponse::message("Propietario eliminado exitosamente"))
    }

    pub async fn statistics(&self) -> Result<ApiResponse<PersonStatistics>, AppError> {
        let mut tx = self.store.begin().await?;
        let stats = tx.person_statistics(PersonKind::Owner).await?;
        Ok(ApiResponse::success(stats))
    }
}
