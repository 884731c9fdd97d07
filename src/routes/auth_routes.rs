use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use super::json_body;
use crate::controllers::AuthController;
use crate::dto::{ApiResponse, LoginRequest, LoginResponse, RegisterRequest};
use crate::models::{RequestContext, User};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas sin token
pub fn create_public_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Rutas que requieren token
pub fn create_protected_auth_router() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/user", get(current_user))
}

fn controller(state: &AppState) -> AuthController {
    AuthController::new(state.store.clone(), state.config.clone())
}

async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<LoginResponse>>), AppError> {
    let response = controller(&state).register(json_body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    Ok(Json(controller(&state).login(json_body(payload)?).await?))
}

async fn logout(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Json<ApiResponse<()>> {
    Json(controller(&state).logout(&ctx))
}

async fn current_user(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    Ok(Json(controller(&state).current_user(&ctx).await?))
}
