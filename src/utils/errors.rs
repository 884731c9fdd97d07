//! Sistema de manejo de errores
//!
//! Este módulo define la taxonomía de errores del registro de flota
//! y su conversión a respuestas HTTP apropiadas.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use validator::{ValidationError, ValidationErrors};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationErrors),

    #[error("Uniqueness violation on {field}: {message}")]
    UniquenessViolation { field: &'static str, message: String },

    #[error("Reference not found: {field}")]
    ReferenceNotFound { field: &'static str },

    #[error("{entity} has {count} dependent vehicle(s)")]
    HasDependents { entity: &'static str, count: i64 },

    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl AppError {
    /// Código estable que viaja en el cuerpo de la respuesta
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationFailed(_) => "VALIDATION_FAILED",
            AppError::UniquenessViolation { .. } => "UNIQUENESS_VIOLATION",
            AppError::ReferenceNotFound { .. } => "REFERENCE_NOT_FOUND",
            AppError::HasDependents { .. } => "HAS_DEPENDENTS",
            AppError::PersistenceFailed(_) => "PERSISTENCE_FAILED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::BadRequest(_) => "BAD_REQUEST",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationFailed(_) | AppError::ReferenceNotFound { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::UniquenessViolation { .. } | AppError::HasDependents { .. } => {
                StatusCode::CONFLICT
            }
            AppError::PersistenceFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();

        let error_response = match self {
            AppError::ValidationFailed(errors) => {
                warn!("Validation failed: {}", errors);
                ErrorResponse {
                    error: "Validation Failed".to_string(),
                    message: "Error de validación".to_string(),
                    details: Some(json!(field_messages(&errors))),
                    code,
                }
            }

            AppError::UniquenessViolation { field, message } => {
                warn!("Uniqueness violation on {}: {}", field, message);
                ErrorResponse {
                    error: "Uniqueness Violation".to_string(),
                    message,
                    details: Some(json!({ "field": field })),
                    code,
                }
            }

            AppError::ReferenceNotFound { field } => {
                warn!("Reference not found: {}", field);
                ErrorResponse {
                    error: "Reference Not Found".to_string(),
                    message: reference_message(field).to_string(),
                    details: Some(json!({ "field": field })),
                    code,
                }
            }

            AppError::HasDependents { entity, count } => {
                warn!("Delete refused: {} has {} dependent vehicle(s)", entity, count);
                ErrorResponse {
                    error: "Has Dependents".to_string(),
                    message: format!(
                        "No se puede eliminar el {} porque tiene vehículos asignados",
                        entity
                    ),
                    details: Some(json!({ "dependents": count })),
                    code,
                }
            }

            AppError::PersistenceFailed(detail) => {
                // El detalle solo va al log; el cliente recibe un mensaje genérico
                error!("Persistence failed: {}", detail);
                ErrorResponse {
                    error: "Persistence Failed".to_string(),
                    message: "No fue posible guardar los cambios. Intente nuevamente".to_string(),
                    details: None,
                    code,
                }
            }

            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::Unauthorized(msg) => {
                warn!("Unauthorized access: {}", msg);
                ErrorResponse {
                    error: "Unauthorized".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Clasifica los errores de sqlx: las restricciones del almacenamiento son la
/// garantía final de unicidad e integridad referencial.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &e {
            let constraint = db_error.constraint().unwrap_or_default();
            match db_error.code().as_deref() {
                Some("23505") => {
                    let field = unique_field_for_constraint(constraint);
                    return AppError::UniquenessViolation {
                        field,
                        message: uniqueness_message(field).to_string(),
                    };
                }
                Some("23503") => {
                    return AppError::ReferenceNotFound {
                        field: reference_field_for_constraint(constraint),
                    };
                }
                _ => {}
            }
        }

        AppError::PersistenceFailed(e.to_string())
    }
}

fn unique_field_for_constraint(constraint: &str) -> &'static str {
    if constraint.contains("email") {
        "email"
    } else if constraint.contains("plate") {
        "plate"
    } else {
        "national_id"
    }
}

fn reference_field_for_constraint(constraint: &str) -> &'static str {
    if constraint.contains("owner") {
        "owner_id"
    } else {
        "driver_id"
    }
}

/// Mensaje para una colisión de unicidad sobre `field`
pub fn uniqueness_message(field: &str) -> &'static str {
    match field {
        "plate" => "La placa ya está registrada en el sistema",
        "email" => "El email ya está registrado",
        _ => "La cédula ya está registrada en el sistema",
    }
}

fn reference_message(field: &str) -> &'static str {
    match field {
        "owner_id" => "El propietario seleccionado no existe",
        _ => "El conductor seleccionado no existe",
    }
}

/// Aplana los errores de validación a un mapa campo -> mensajes
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("El campo {} no es válido", field))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación sobre un solo campo
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());

    let mut errors = ValidationErrors::new();
    errors.add(field, error);

    AppError::ValidationFailed(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} con id '{}' no encontrado", resource, id))
}
