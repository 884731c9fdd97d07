//! Reportes y dashboard: solo lectura

use std::sync::Arc;

use crate::dto::report_dto::{
    DashboardStats, PersonReportItem, ReportStatistics, VehicleReportItem,
};
use crate::dto::ApiResponse;
use crate::models::report::{Alert, AlertLevel, PersonReportRow};
use crate::models::{ListFilter, PersonKind, RecordStatus, VehicleDetail};
use crate::repositories::{FleetStore, FleetTx, ReportRepository, VehicleRepository};
use crate::utils::errors::AppError;

const RECENT_VEHICLES: i64 = 5;

/// Vehículos activos, los más recientes primero
fn active_vehicles(limit: i64) -> ListFilter {
    ListFilter {
        status: Some(RecordStatus::Active),
        limit,
        ..Default::default()
    }
}

pub fn build_alerts(drivers_without_vehicles: usize, owners_without_vehicles: usize) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if drivers_without_vehicles > 0 {
        alerts.push(Alert {
            level: AlertLevel::Warning,
            message: format!(
                "{} conductor(es) sin vehículos asignados",
                drivers_without_vehicles
            ),
        });
    }

    if owners_without_vehicles > 0 {
        alerts.push(Alert {
            level: AlertLevel::Info,
            message: format!(
                "{} propietario(s) sin vehículos registrados",
                owners_without_vehicles
            ),
        });
    }

    alerts
}

pub struct ReportController {
    store: Arc<dyn FleetStore>,
}

impl ReportController {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    async fn recent_vehicles_in(tx: &mut dyn FleetTx) -> Result<Vec<VehicleDetail>, AppError> {
        Ok(tx
            .list_vehicle_details(&active_vehicles(RECENT_VEHICLES))
            .await?
            .items)
    }

    pub async fn main_report(&self) -> Result<ApiResponse<Vec<VehicleReportItem>>, AppError> {
        let mut tx = self.store.begin().await?;
        let page = tx.list_vehicle_details(&active_vehicles(i64::MAX)).await?;

        Ok(ApiResponse::success(
            page.items.iter().map(VehicleReportItem::from).collect(),
        ))
    }

    pub async fn person_report(
        &self,
        kind: PersonKind,
    ) -> Result<ApiResponse<Vec<PersonReportItem>>, AppError> {
        let mut tx = self.store.begin().await?;
        let rows = tx.person_report(kind).await?;

        Ok(ApiResponse::success(
            rows.into_iter().map(PersonReportItem::from).collect(),
        ))
    }

    pub async fn statistics(&self) -> Result<ApiResponse<ReportStatistics>, AppError> {
        let mut tx = self.store.begin().await?;
        let stats = tx.fleet_statistics().await?;
        Ok(ApiResponse::success(ReportStatistics::from(&stats)))
    }

    pub async fn dashboard_stats(&self) -> Result<ApiResponse<DashboardStats>, AppError> {
        let mut tx = self.store.begin().await?;
        let stats = tx.fleet_statistics().await?;
        let recent_vehicles = Self::recent_vehicles_in(&mut *tx).await?;

        Ok(ApiResponse::success(DashboardStats {
            statistics: ReportStatistics::from(&stats),
            recent_vehicles,
        }))
    }

    pub async fn recent_vehicles(&self) -> Result<ApiResponse<Vec<VehicleDetail>>, AppError> {
        let mut tx = self.store.begin().await?;
        let vehicles = Self::recent_vehicles_in(&mut *tx).await?;
        Ok(ApiResponse::success(vehicles))
    }

    pub async fn alerts(&self) -> Result<ApiResponse<Vec<Alert>>, AppError> {
        let mut tx = self.store.begin().await?;
        let drivers = tx.person_report(PersonKind::Driver).await?;
        let owners = tx.person_report(PersonKind::Owner).await?;

        let idle = |rows: &[PersonReportRow]| {
            rows.iter().filter(|r| r.vehicle_count == 0).count()
        };

        Ok(ApiResponse::success_with_message(
            build_alerts(idle(&drivers), idle(&owners)),
            "Alertas obtenidas exitosamente",
        ))
    }
}
