use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use super::{json_body, path_id};
use crate::controllers::VehicleController;
use crate::dto::report_dto::{PersonOption, VehicleStatistics};
use crate::dto::{
    ApiResponse, ListParams, PaginatedResponse, ShowParams, VehicleRequest, VehicleUpdateRequest,
};
use crate::models::{PersonKind, RequestContext, VehicleDetail};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/statistics", get(vehicle_statistics))
        .route("/drivers/options", get(driver_options))
        .route("/owners/options", get(owner_options))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleDetail>>), AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.create(&ctx, json_body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<VehicleDetail>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    Ok(Json(controller.list(&params).await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    Query(params): Query<ShowParams>,
) -> Result<Json<ApiResponse<VehicleDetail>>, AppError> {
    let id = path_id(id)?;
    let controller = VehicleController::new(state.store.clone());
    Ok(Json(controller.get_by_id(id, params.visibility()).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<VehicleUpdateRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<VehicleDetail>>, AppError> {
    let id = path_id(id)?;
    let controller = VehicleController::new(state.store.clone());
    Ok(Json(controller.update(&ctx, id, json_body(payload)?).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = path_id(id)?;
    let controller = VehicleController::new(state.store.clone());
    Ok(Json(controller.delete(&ctx, id).await?))
}

async fn vehicle_statistics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<VehicleStatistics>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    Ok(Json(controller.statistics().await?))
}

async fn driver_options(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PersonOption>>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    Ok(Json(controller.person_options(PersonKind::Driver).await?))
}

async fn owner_options(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PersonOption>>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    Ok(Json(controller.person_options(PersonKind::Owner).await?))
}
