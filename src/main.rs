mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::{DatabaseConfig, EnvironmentConfig};
use database::DatabaseConnection;
use middleware::cors_layer;
use repositories::PgFleetStore;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Registro de Flota - API");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    info!("⚙️  Entorno: {}", config.environment);
    if config.cors_origins.is_empty() {
        if config.is_production() {
            warn!("⚠️ CORS_ORIGINS vacío en producción: se aceptan todos los orígenes");
        } else if config.is_development() {
            info!("🔓 CORS permisivo en desarrollo");
        }
    }

    // Inicializar base de datos
    let db_config = DatabaseConfig::from_env()?;
    let db_connection = match DatabaseConnection::new(&db_config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    db_connection.run_migrations().await?;

    let store = Arc::new(PgFleetStore::new(db_connection.pool()));
    let app_state = AppState::new(store, config.clone());

    let app = routes::create_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins));

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /api/health - Health check");
    info!("🔐 Autenticación:");
    info!("   POST /api/register - Registrar usuario");
    info!("   POST /api/login - Login");
    info!("   POST /api/logout - Logout");
    info!("   GET  /api/user - Usuario actual");
    info!("👤 Conductores y propietarios:");
    info!("   GET|POST /api/drivers, /api/owners");
    info!("   GET|PUT|DELETE /api/drivers/:id, /api/owners/:id");
    info!("   GET  /api/drivers/statistics, /api/owners/statistics");
    info!("🚗 Vehículos:");
    info!("   GET|POST /api/vehicles");
    info!("   GET|PUT|DELETE /api/vehicles/:id");
    info!("   GET  /api/vehicles/statistics");
    info!("   GET  /api/vehicles/drivers/options, /api/vehicles/owners/options");
    info!("📊 Reportes y dashboard:");
    info!("   GET  /api/reports/main, /api/reports/drivers, /api/reports/owners");
    info!("   GET  /api/reports/statistics");
    info!("   GET  /api/dashboard/stats, /api/dashboard/recent-vehicles, /api/dashboard/alerts");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
