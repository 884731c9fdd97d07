//! Registro, login y usuario actual

use std::sync::Arc;

use bcrypt::{hash, verify};
use tracing::info;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::{ApiResponse, LoginRequest, LoginResponse, RegisterRequest};
use crate::models::{NewUser, RequestContext, User};
use crate::repositories::{FleetStore, UserRepository};
use crate::utils::errors::{uniqueness_message, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    store: Arc<dyn FleetStore>,
    config: EnvironmentConfig,
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Credenciales inválidas".to_string())
}

impl AuthController {
    pub fn new(store: Arc<dyn FleetStore>, config: EnvironmentConfig) -> Self {
        Self { store, config }
    }

    fn login_response(&self, user: User) -> Result<LoginResponse, AppError> {
        let jwt_config = JwtConfig::from(&self.config);
        let token = generate_token(user.id, &user.email, &jwt_config)?;
        Ok(LoginResponse::bearer(token, jwt_config.expiration, user))
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<LoginResponse>, AppError> {
        request.validate()?;
        let email = request.email.trim().to_lowercase();

        let password_hash = hash(&request.password, self.config.bcrypt_cost)
            .map_err(|e| AppError::PersistenceFailed(format!("Error hashing password: {}", e)))?;

        let mut tx = self.store.begin().await?;
        if tx.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::UniquenessViolation {
                field: "email",
                message: uniqueness_message("email").to_string(),
            });
        }

        let user = tx
            .insert_user(&NewUser {
                name: request.name.trim().to_string(),
                email,
                password_hash,
            })
            .await?;
        tx.commit().await?;

        info!(user_id = %user.id, "👤 Usuario registrado");

        Ok(ApiResponse::success_with_message(
            self.login_response(user)?,
            "Usuario registrado exitosamente",
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<ApiResponse<LoginResponse>, AppError> {
        request.validate()?;

        let mut tx = self.store.begin().await?;
        let user = tx
            .find_user_by_email(&request.email.trim().to_lowercase())
            .await?;
        drop(tx);

        let user = user.ok_or_else(invalid_credentials)?;

        let matches = verify(&request.password, &user.password_hash).map_err(|_| invalid_credentials())?;
        if !matches {
            return Err(invalid_credentials());
        }

        info!(user_id = %user.id, "🔐 Login exitoso");

        Ok(ApiResponse::success_with_message(
            self.login_response(user)?,
            "Login exitoso",
        ))
    }

    /// Los tokens no tienen estado en el servidor; el cliente descarta el suyo
    pub fn logout(&self, ctx: &RequestContext) -> ApiResponse<()> {
        info!(user_id = %ctx.user_id, "👋 Logout");
        ApiResponse::message("Sesión cerrada exitosamente")
    }

    pub async fn current_user(&self, ctx: &RequestContext) -> Result<ApiResponse<User>, AppError> {
        let mut tx = self.store.begin().await?;
        let user = tx
            .find_user(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

        Ok(ApiResponse::success(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::MemoryFleetStore;

    fn controller() -> AuthController {
        AuthController::new(Arc::new(MemoryFleetStore::new()), EnvironmentConfig::for_tests())
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Administrador".to_string(),
            email: email.to_string(),
            password: "secreto123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let controller = controller();
        let registered = controller
            .register(register_request("Admin@Flota.co"))
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(registered.user.email, "admin@flota.co");
        assert_eq!(registered.token_type, "Bearer");

        let logged_in = controller
            .login(LoginRequest {
                email: "admin@flota.co".to_string(),
                password: "secreto123".to_string(),
            })
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let controller = controller();
        controller.register(register_request("admin@flota.co")).await.unwrap();

        let result = controller
            .login(LoginRequest {
                email: "admin@flota.co".to_string(),
                password: "otra-clave".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let controller = controller();
        controller.register(register_request("admin@flota.co")).await.unwrap();

        let result = controller.register(register_request("admin@flota.co")).await;
        assert!(matches!(result, Err(AppError::UniquenessViolation { field: "email", .. })));
    }
}
