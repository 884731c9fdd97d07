//! Agregados de solo lectura para reportes y dashboard

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Totales generales de la flota (solo filas no eliminadas)
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq, sqlx::FromRow)]
pub struct FleetStatistics {
    pub total_vehicles: i64,
    pub active_vehicles: i64,
    pub private_vehicles: i64,
    pub public_vehicles: i64,
    pub active_private_vehicles: i64,
    pub active_public_vehicles: i64,
    pub total_drivers: i64,
    pub active_drivers: i64,
    pub drivers_with_vehicles: i64,
    pub total_owners: i64,
    pub active_owners: i64,
    pub owners_with_vehicles: i64,
}

/// Totales de conductores o propietarios
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq, sqlx::FromRow)]
pub struct PersonStatistics {
    pub total: i64,
    pub active: i64,
    pub with_vehicles: i64,
    pub without_vehicles: i64,
}

/// Fila cruda del reporte de personas activas
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PersonReportRow {
    pub id: Uuid,
    pub national_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub city: String,
    pub registered_at: DateTime<Utc>,
    pub vehicle_count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub level: AlertLevel,
    pub message: String,
}
