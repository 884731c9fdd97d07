use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::ReportController;
use crate::dto::report_dto::{
    DashboardStats, PersonReportItem, ReportStatistics, VehicleReportItem,
};
use crate::dto::ApiResponse;
use crate::models::report::Alert;
use crate::models::{PersonKind, VehicleDetail};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/main", get(main_report))
        .route("/drivers", get(drivers_report))
        .route("/owners", get(owners_report))
        .route("/statistics", get(report_statistics))
}

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard_stats))
        .route("/recent-vehicles", get(recent_vehicles))
        .route("/alerts", get(alerts))
}

async fn main_report(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VehicleReportItem>>>, AppError> {
    let controller = ReportController::new(state.store.clone());
    Ok(Json(controller.main_report().await?))
}

async fn drivers_report(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PersonReportItem>>>, AppError> {
    let controller = ReportController::new(state.store.clone());
    Ok(Json(controller.person_report(PersonKind::Driver).await?))
}

async fn owners_report(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PersonReportItem>>>, AppError> {
    let controller = ReportController::new(state.store.clone());
    Ok(Json(controller.person_report(PersonKind::Owner).await?))
}

async fn report_statistics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ReportStatistics>>, AppError> {
    let controller = ReportController::new(state.store.clone());
    Ok(Json(controller.statistics().await?))
}

async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardStats>>, AppError> {
    let controller = ReportController::new(state.store.clone());
    Ok(Json(controller.dashboard_stats().await?))
}

async fn recent_vehicles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VehicleDetail>>>, AppError> {
    let controller = ReportController::new(state.store.clone());
    Ok(Json(controller.recent_vehicles().await?))
}

async fn alerts(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Alert>>>, AppError> {
    let controller = ReportController::new(state.store.clone());
    Ok(Json(controller.alerts().await?))
}
