//! Consultas agregadas de solo lectura para reportes y dashboard

use async_trait::async_trait;

use super::store::PgFleetTx;
use crate::models::report::{FleetStatistics, PersonReportRow, PersonStatistics};
use crate::models::PersonKind;
use crate::utils::errors::AppResult;

#[async_trait]
pub trait ReportRepository: Send {
    async fn fleet_statistics(&mut self) -> AppResult<FleetStatistics>;
    async fn person_statistics(&mut self, kind: PersonKind) -> AppResult<PersonStatistics>;
    /// Personas activas con su número de vehículos, ordenadas por apellidos y nombre
    async fn person_report(&mut self, kind: PersonKind) -> AppResult<Vec<PersonReportRow>>;
}

#[async_trait]
impl ReportRepository for PgFleetTx {
    async fn fleet_statistics(&mut self) -> AppResult<FleetStatistics> {
        let stats = sqlx::query_as::<_, FleetStatistics>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM vehicles WHERE deleted_at IS NULL) AS total_vehicles,
                (SELECT COUNT(*) FROM vehicles WHERE deleted_at IS NULL AND status = 'active') AS active_vehicles,
                (SELECT COUNT(*) FROM vehicles WHERE deleted_at IS NULL AND vehicle_class = 'private') AS private_vehicles,
                (SELECT COUNT(*) FROM vehicles WHERE deleted_at IS NULL AND vehicle_class = 'public') AS public_vehicles,
                (SELECT COUNT(*) FROM vehicles WHERE deleted_at IS NULL AND status = 'active' AND vehicle_class = 'private') AS active_private_vehicles,
                (SELECT COUNT(*) FROM vehicles WHERE deleted_at IS NULL AND status = 'active' AND vehicle_class = 'public') AS active_public_vehicles,
                (SELECT COUNT(*) FROM drivers WHERE deleted_at IS NULL) AS total_drivers,
                (SELECT COUNT(*) FROM drivers WHERE deleted_at IS NULL AND status = 'active') AS active_drivers,
                (SELECT COUNT(*) FROM drivers d WHERE d.deleted_at IS NULL
                    AND EXISTS (SELECT 1 FROM vehicles v WHERE v.driver_id = d.id AND v.deleted_at IS NULL)) AS drivers_with_vehicles,
                (SELECT COUNT(*) FROM owners WHERE deleted_at IS NULL) AS total_owners,
                (SELECT COUNT(*) FROM owners WHERE deleted_at IS NULL AND status = 'active') AS active_owners,
                (SELECT COUNT(*) FROM owners o WHERE o.deleted_at IS NULL
                    AND EXISTS (SELECT 1 FROM vehicles v WHERE v.owner_id = o.id AND v.deleted_at IS NULL)) AS owners_with_vehicles
            "#
        )
        .fetch_one(self.conn()?)
        .await?;

        Ok(stats)
    }

    async fn person_statistics(&mut self, kind: PersonKind) -> AppResult<PersonStatistics> {
        let sql = format!(
            r#"
            SELECT total, active, with_vehicles, total - with_vehicles AS without_vehicles
            FROM (
                SELECT
                    COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE p.status = 'active') AS active,
                    COUNT(*) FILTER (WHERE EXISTS (
                        SELECT 1 FROM vehicles v WHERE v.{fk} = p.id AND v.deleted_at IS NULL
                    )) AS with_vehicles
                FROM {table} p
                WHERE p.deleted_at IS NULL
            ) counts
            "#,
            fk = kind.foreign_key(),
            table = kind.table()
        );

        let stats = sqlx::query_as::<_, PersonStatistics>(&sql)
            .fetch_one(self.conn()?)
            .await?;

        Ok(stats)
    }

    async fn person_report(&mut self, kind: PersonKind) -> AppResult<Vec<PersonReportRow>> {
        let sql = format!(
            r#"
            SELECT p.id, p.national_id, p.first_name, p.middle_name, p.last_name,
                   p.address, p.phone, p.city, p.registered_at,
                   (SELECT COUNT(*) FROM vehicles v WHERE v.{fk} = p.id AND v.deleted_at IS NULL) AS vehicle_count
            FROM {table} p
            WHERE p.deleted_at IS NULL AND p.status = 'active'
            ORDER BY p.last_name ASC, p.first_name ASC
            "#,
            fk = kind.foreign_key(),
            table = kind.table()
        );

        let rows = sqlx::query_as::<_, PersonReportRow>(&sql)
            .fetch_all(self.conn()?)
            .await?;

        Ok(rows)
    }
}
