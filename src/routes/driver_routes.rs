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
use crate::controllers::DriverController;
use crate::dto::report_dto::DriverWithVehicles;
use crate::dto::{ApiResponse, DriverRequest, ListParams, PaginatedResponse, ShowParams};
use crate::models::report::PersonStatistics;
use crate::models::{Driver, RequestContext};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route("/statistics", get(driver_statistics))
        .route("/:id", get(get_driver).put(update_driver).delete(delete_driver))
}

async fn create_driver(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<DriverRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Driver>>), AppError> {
    let controller = DriverController::new(state.store.clone());
    let response = controller.create(&ctx, json_body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_drivers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<Driver>>, AppError> {
    let controller = DriverController::new(state.store.clone());
    Ok(Json(controller.list(&params).await?))
}

async fn get_driver(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    Query(params): Query<ShowParams>,
) -> Result<Json<ApiResponse<DriverWithVehicles>>, AppError> {
    let id = path_id(id)?;
    let controller = DriverController::new(state.store.clone());
    Ok(Json(controller.get_by_id(id, params.visibility()).await?))
}

async fn update_driver(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<DriverRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    let id = path_id(id)?;
    let controller = DriverController::new(state.store.clone());
    Ok(Json(controller.update(&ctx, id, json_body(payload)?).await?))
}

async fn delete_driver(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = path_id(id)?;
    let controller = DriverController::new(state.store.clone());
    Ok(Json(controller.delete(&ctx, id).await?))
}

async fn driver_statistics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PersonStatistics>>, AppError> {
    let controller = DriverController::new(state.store.clone());
    Ok(Json(controller.statistics().await?))
}
