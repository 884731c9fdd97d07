//! Rutas de la API
//!
//! Todo cuelga de `/api`. Registro, login y health son públicos; el resto
//! pasa por `require_auth`.

pub mod auth_routes;
pub mod driver_routes;
pub mod owner_routes;
pub mod report_routes;
pub mod vehicle_routes;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::middleware::require_auth;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// Convierte un rechazo del extractor JSON en nuestro formato de error
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Igual para el identificador de la ruta
pub(crate) fn path_id(id: Result<Path<Uuid>, PathRejection>) -> AppResult<Uuid> {
    id.map(|Path(id)| id)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(auth_routes::create_protected_auth_router())
        .nest("/drivers", driver_routes::create_driver_router())
        .nest("/owners", owner_routes::create_owner_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/reports", report_routes::create_report_router())
        .nest("/dashboard", report_routes::create_dashboard_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let public = Router::new()
        .route("/health", get(health))
        .merge(auth_routes::create_public_auth_router());

    Router::new()
        .nest("/api", public.merge(protected))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::config::EnvironmentConfig;
    use crate::repositories::memory::MemoryFleetStore;
    use crate::services::fixtures::seed_owner;

    fn app(store: &MemoryFleetStore) -> Router {
        let state = AppState::new(Arc::new(store.clone()), EnvironmentConfig::for_tests());
        create_router(state)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn register(app: &Router) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/register",
            None,
            Some(json!({
                "name": "Administrador",
                "email": "admin@flota.co",
                "password": "secreto123"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["access_token"].as_str().unwrap().to_string()
    }

    fn driver_body(national_id: &str) -> Value {
        json!({
            "cedula": national_id,
            "primer_nombre": "Carlos",
            "apellidos": "Pérez",
            "direccion": "Calle 10 # 20-30",
            "telefono": "3001234567",
            "ciudad": "Bogotá"
        })
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let store = MemoryFleetStore::new();
        let (status, body) = send(&app(&store), Method::GET, "/api/health", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let store = MemoryFleetStore::new();
        let app = app(&store);

        let (status, body) = send(&app, Method::GET, "/api/drivers", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");

        let (status, _) = send(&app, Method::GET, "/api/vehicles", Some("no-es-un-token"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_after_register() {
        let store = MemoryFleetStore::new();
        let app = app(&store);
        register(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "ADMIN@flota.co", "password": "secreto123" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["data"]["access_token"].as_str().unwrap().to_string();

        let (status, body) = send(&app, Method::GET, "/api/user", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "admin@flota.co");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "admin@flota.co", "password": "otra-clave" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_driver_and_duplicate() {
        let store = MemoryFleetStore::new();
        let app = app(&store);
        let token = register(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/drivers",
            Some(&token),
            Some(driver_body("1020304050")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/drivers",
            Some(&token),
            Some(driver_body("1020304050")),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "UNIQUENESS_VIOLATION");
        assert_eq!(body["details"]["field"], "national_id");

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/drivers/{}", id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["national_id"], "1020304050");
    }

    #[tokio::test]
    async fn test_empty_body_reports_every_missing_field() {
        let store = MemoryFleetStore::new();
        let app = app(&store);
        let token = register(&app).await;

        let (status, body) =
            send(&app, Method::POST, "/api/drivers", Some(&token), Some(json!({}))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_FAILED");
        for field in ["national_id", "first_name", "last_name", "address", "phone", "city"] {
            assert!(body["details"][field].is_array(), "falta {}", field);
        }
        assert!(store.snapshot().await.drivers.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let store = MemoryFleetStore::new();
        let app = app(&store);
        let token = register(&app).await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/drivers")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ no es json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_id_uses_error_format() {
        let store = MemoryFleetStore::new();
        let app = app(&store);
        let token = register(&app).await;

        for uri in ["/api/drivers/no-es-uuid", "/api/owners/42", "/api/vehicles/abc"] {
            let (status, body) = send(&app, Method::GET, uri, Some(&token), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["code"], "BAD_REQUEST");
            assert!(body["message"].is_string());
        }

        let (status, body) =
            send(&app, Method::DELETE, "/api/drivers/no-es-uuid", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_vehicle_with_unknown_driver_and_delete_with_dependents() {
        let store = MemoryFleetStore::new();
        let app = app(&store);
        let token = register(&app).await;
        let owner = seed_owner(&store, "900100200").await;

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/drivers",
            Some(&token),
            Some(driver_body("1020304050")),
        )
        .await;
        let driver_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/vehicles",
            Some(&token),
            Some(json!({
                "placa": "abc123",
                "color": "Rojo",
                "marca": "Chevrolet",
                "tipo_vehiculo": "public",
                "conductor_id": uuid::Uuid::new_v4().to_string(),
                "propietario_id": owner.id.to_string()
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "REFERENCE_NOT_FOUND");
        assert_eq!(body["details"]["field"], "driver_id");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/vehicles",
            Some(&token),
            Some(json!({
                "placa": "abc123",
                "color": "Rojo",
                "marca": "Chevrolet",
                "tipo_vehiculo": "public",
                "conductor_id": driver_id,
                "propietario_id": owner.id.to_string()
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["plate"], "ABC123");

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/api/drivers/{}", driver_id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "HAS_DEPENDENTS");

        let (status, body) =
            send(&app, Method::GET, "/api/dashboard/alerts", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].is_array());
    }
}
