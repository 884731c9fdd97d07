//! Middleware de autenticación JWT
//!
//! Verifica el token Bearer, confirma que el usuario existe y deja un
//! `RequestContext` en las extensions de la request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{
    models::RequestContext,
    repositories::UserRepository,
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{extract_token_from_header, verify_token, JwtConfig},
};

/// Middleware de autenticación JWT
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &JwtConfig::from(&state.config))?;
    let user_id = claims.user_id()?;

    // Verificar que el usuario existe en la base de datos
    let mut tx = state.store.begin().await?;
    let user = tx.find_user(user_id).await?;
    drop(tx);

    let user = user.ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    let ctx = RequestContext::new(user.id, user.email);
    debug!(user_id = %ctx.user_id, request_id = %ctx.request_id, "Request autenticada");

    request.extensions_mut().insert(ctx);

    Ok(next.run(request).await)
}
