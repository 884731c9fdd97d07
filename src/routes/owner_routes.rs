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
use crate::controllers::OwnerController;
use crate::dto::report_dto::OwnerWithVehicles;
use crate::dto::{ApiResponse, ListParams, OwnerRequest, PaginatedResponse, ShowParams};
use crate::models::report::PersonStatistics;
use crate::models::{Owner, RequestContext};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_owner_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_owners).post(create_owner))
        .route("/statistics", get(owner_statistics))
        .route("/:id", get(get_owner).put(update_owner).delete(delete_owner))
}

async fn create_owner(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<OwnerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Owner>>), AppError> {
    let controller = OwnerController::new(state.store.clone());
    let response = controller.create(&ctx, json_body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_owners(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<Owner>>, AppError> {
    let controller = OwnerController::new(state.store.clone());
    Ok(Json(controller.list(&params).await?))
}

async fn get_owner(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    Query(params): Query<ShowParams>,
) -> Result<Json<ApiResponse<OwnerWithVehicles>>, AppError> {
    let id = path_id(id)?;
    let controller = OwnerController::new(state.store.clone());
    Ok(Json(controller.get_by_id(id, params.visibility()).await?))
}

async fn update_owner(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<OwnerRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Owner>>, AppError> {
    let id = path_id(id)?;
    let controller = OwnerController::new(state.store.clone());
    Ok(Json(controller.update(&ctx, id, json_body(payload)?).await?))
}

async fn delete_owner(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = path_id(id)?;
    let controller = OwnerController::new(state.store.clone());
    Ok(Json(controller.delete(&ctx, id).await?))
}

async fn owner_statistics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PersonStatistics>>, AppError> {
    let controller = OwnerController::new(state.store.clone());
    Ok(Json(controller.statistics().await?))
}
