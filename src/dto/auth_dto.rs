use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;
use crate::utils::validation::validate_not_blank;

/// Request de registro
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        custom = "validate_not_blank",
        length(max = 255, message = "El nombre no puede superar 255 caracteres")
    )]
    pub name: String,

    #[validate(email(message = "El email debe ser una dirección válida"))]
    pub email: String,

    #[validate(length(min = 8, message = "La contraseña debe tener al menos 8 caracteres"))]
    pub password: String,
}

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "El email debe ser una dirección válida"))]
    pub email: String,

    #[validate(custom = "validate_not_blank")]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: User,
}

impl LoginResponse {
    pub fn bearer(access_token: String, expires_in: u64, user: User) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}
