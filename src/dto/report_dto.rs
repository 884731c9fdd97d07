//! Respuestas de reportes y dashboard

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::person::{format_national_id, format_phone, full_name};
use crate::models::report::{FleetStatistics, PersonReportRow};
use crate::models::{Driver, Owner, Vehicle, VehicleClass, VehicleDetail};

const REPORT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

pub fn format_report_date(date: DateTime<Utc>) -> String {
    date.format(REPORT_DATE_FORMAT).to_string()
}

/// Fila del reporte principal de vehículos activos
#[derive(Debug, Serialize)]
pub struct VehicleReportItem {
    pub id: Uuid,
    pub plate: String,
    pub make: String,
    pub color: String,
    pub vehicle_class: VehicleClass,
    pub driver_name: String,
    pub owner_name: String,
    pub registered_at: String,
}

impl From<&VehicleDetail> for VehicleReportItem {
    fn from(detail: &VehicleDetail) -> Self {
        Self {
            id: detail.vehicle.id,
            plate: detail.vehicle.plate.clone(),
            make: detail.vehicle.make.clone(),
            color: detail.vehicle.color.clone(),
            vehicle_class: detail.vehicle.vehicle_class,
            driver_name: detail.driver_name(),
            owner_name: detail.owner_name(),
            registered_at: format_report_date(detail.vehicle.registered_at),
        }
    }
}

/// Fila del reporte de conductores o propietarios
#[derive(Debug, Serialize)]
pub struct PersonReportItem {
    pub id: Uuid,
    pub national_id: String,
    pub full_name: String,
    pub address: String,
    pub phone: String,
    pub city: String,
    pub vehicle_count: i64,
    pub registered_at: String,
}

impl From<PersonReportRow> for PersonReportItem {
    fn from(row: PersonReportRow) -> Self {
        Self {
            id: row.id,
            national_id: format_national_id(&row.national_id),
            full_name: full_name(&row.first_name, row.middle_name.as_deref(), &row.last_name),
            address: row.address,
            phone: format_phone(&row.phone),
            city: row.city,
            vehicle_count: row.vehicle_count,
            registered_at: format_report_date(row.registered_at),
        }
    }
}

/// Opción para las listas de selección del formulario de vehículos
#[derive(Debug, Serialize, PartialEq)]
pub struct PersonOption {
    pub id: Uuid,
    pub full_name: String,
    pub national_id: String,
}

impl From<PersonReportRow> for PersonOption {
    fn from(row: PersonReportRow) -> Self {
        Self {
            id: row.id,
            full_name: full_name(&row.first_name, row.middle_name.as_deref(), &row.last_name),
            national_id: format_national_id(&row.national_id),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VehicleTotals {
    pub total: i64,
    pub active: i64,
    pub private: i64,
    pub public: i64,
}

#[derive(Debug, Serialize)]
pub struct PersonTotals {
    pub total: i64,
    pub active: i64,
    pub with_vehicles: i64,
}

/// Estadísticas generales del reporte
#[derive(Debug, Serialize)]
pub struct ReportStatistics {
    pub vehicles: VehicleTotals,
    pub drivers: PersonTotals,
    pub owners: PersonTotals,
}

impl From<&FleetStatistics> for ReportStatistics {
    fn from(stats: &FleetStatistics) -> Self {
        Self {
            vehicles: VehicleTotals {
                total: stats.total_vehicles,
                active: stats.active_vehicles,
                private: stats.private_vehicles,
                public: stats.public_vehicles,
            },
            drivers: PersonTotals {
                total: stats.total_drivers,
                active: stats.active_drivers,
                with_vehicles: stats.drivers_with_vehicles,
            },
            owners: PersonTotals {
                total: stats.total_owners,
                active: stats.active_owners,
                with_vehicles: stats.owners_with_vehicles,
            },
        }
    }
}

/// Resumen de la pantalla de vehículos
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct VehicleStatistics {
    pub active_vehicles: i64,
    pub public_vehicles: i64,
    pub private_vehicles: i64,
    pub active_drivers: i64,
    pub active_owners: i64,
}

impl From<&FleetStatistics> for VehicleStatistics {
    fn from(stats: &FleetStatistics) -> Self {
        Self {
            active_vehicles: stats.active_vehicles,
            public_vehicles: stats.active_public_vehicles,
            private_vehicles: stats.active_private_vehicles,
            active_drivers: stats.active_drivers,
            active_owners: stats.active_owners,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub statistics: ReportStatistics,
    pub recent_vehicles: Vec<VehicleDetail>,
}

/// Datos que devuelve un conductor o propietario junto con sus vehículos
#[derive(Debug, Serialize)]
pub struct DriverWithVehicles {
    #[serde(flatten)]
    pub driver: Driver,
    pub vehicles: Vec<Vehicle>,
}

#[derive(Debug, Serialize)]
pub struct OwnerWithVehicles {
    #[serde(flatten)]
    pub owner: Owner,
    pub vehicles: Vec<Vehicle>,
}
