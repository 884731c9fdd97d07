use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::driver_repository::DriverRepository;
use super::owner_repository::OwnerRepository;
use super::store::PgFleetTx;
use crate::models::{
    Driver, ListFilter, NewVehicle, Owner, Page, PersonKind, Vehicle, VehicleDetail, Visibility,
};
use crate::utils::errors::AppResult;

const VEHICLE_FILTER: &str = r#"
    ($1::text IS NULL OR plate ILIKE $1 OR make ILIKE $1 OR color ILIKE $1)
    AND ($2::record_status IS NULL OR status = $2)
    AND ($3::vehicle_class IS NULL OR vehicle_class = $3)
    AND ($4 OR deleted_at IS NULL)
"#;

#[async_trait]
pub trait VehicleRepository: Send {
    async fn insert_vehicle(&mut self, input: &NewVehicle) -> AppResult<Vehicle>;
    /// `None` si el vehículo no existe o está eliminado
    async fn update_vehicle(&mut self, id: Uuid, input: &NewVehicle) -> AppResult<Option<Vehicle>>;
    /// Pasa el vehículo a `inactive`; idempotente. `false` si no existe
    async fn deactivate_vehicle(&mut self, id: Uuid) -> AppResult<bool>;
    async fn find_vehicle(&mut self, id: Uuid, visibility: Visibility) -> AppResult<Option<Vehicle>>;
    async fn find_vehicle_detail(
        &mut self,
        id: Uuid,
        visibility: Visibility,
    ) -> AppResult<Option<VehicleDetail>>;
    async fn list_vehicle_details(&mut self, filter: &ListFilter) -> AppResult<Page<VehicleDetail>>;
    /// Vehículos no eliminados de un conductor o propietario
    async fn vehicles_for_person(&mut self, kind: PersonKind, id: Uuid) -> AppResult<Vec<Vehicle>>;
}

/// Une cada vehículo con su conductor y propietario ya cargados
pub fn assemble_details(
    vehicles: Vec<Vehicle>,
    drivers: Vec<Driver>,
    owners: Vec<Owner>,
) -> Vec<VehicleDetail> {
    let drivers: HashMap<Uuid, Driver> = drivers.into_iter().map(|d| (d.id, d)).collect();
    let owners: HashMap<Uuid, Owner> = owners.into_iter().map(|o| (o.id, o)).collect();

    vehicles
        .into_iter()
        .map(|vehicle| VehicleDetail {
            driver: drivers.get(&vehicle.driver_id).cloned(),
            owner: owners.get(&vehicle.owner_id).cloned(),
            vehicle,
        })
        .collect()
}

impl PgFleetTx {
    async fn attach_relations(&mut self, vehicles: Vec<Vehicle>) -> AppResult<Vec<VehicleDetail>> {
        if vehicles.is_empty() {
            return Ok(Vec::new());
        }

        let driver_ids: Vec<Uuid> = vehicles.iter().map(|v| v.driver_id).collect();
        let owner_ids: Vec<Uuid> = vehicles.iter().map(|v| v.owner_id).collect();

        let drivers = self.find_drivers_by_ids(&driver_ids).await?;
        let owners = self.find_owners_by_ids(&owner_ids).await?;

        Ok(assemble_details(vehicles, drivers, owners))
    }
}

#[async_trait]
impl VehicleRepository for PgFleetTx {
    async fn insert_vehicle(&mut self, input: &NewVehicle) -> AppResult<Vehicle> {
        let now = Utc::now();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, plate, color, make, vehicle_class, driver_id, owner_id, status, registered_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9, $9)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(&input.plate)
        .bind(&input.color)
        .bind(&input.make)
        .bind(input.vehicle_class)
        .bind(input.driver_id)
        .bind(input.owner_id)
        .bind(input.status)
        .bind(now)
        .fetch_one(self.conn()?)
        .await?;

        Ok(vehicle)
    }

    async fn update_vehicle(&mut self, id: Uuid, input: &NewVehicle) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET plate = $2, color = $3, make = $4, vehicle_class = $5,
                driver_id = $6, owner_id = $7, status = $8, updated_at = $9
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#
        )
        .bind(id)
        .bind(&input.plate)
        .bind(&input.color)
        .bind(&input.make)
        .bind(input.vehicle_class)
        .bind(input.driver_id)
        .bind(input.owner_id)
        .bind(input.status)
        .bind(Utc::now())
        .fetch_optional(self.conn()?)
        .await?;

        Ok(vehicle)
    }

    async fn deactivate_vehicle(&mut self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE vehicles SET status = 'inactive', updated_at = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(self.conn()?)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_vehicle(&mut self, id: Uuid, visibility: Visibility) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 AND ($2 OR deleted_at IS NULL)"
        )
        .bind(id)
        .bind(visibility.includes_deleted())
        .fetch_optional(self.conn()?)
        .await?;

        Ok(vehicle)
    }

    async fn find_vehicle_detail(
        &mut self,
        id: Uuid,
        visibility: Visibility,
    ) -> AppResult<Option<VehicleDetail>> {
        match self.find_vehicle(id, visibility).await? {
            Some(vehicle) => Ok(self.attach_relations(vec![vehicle]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_vehicle_details(&mut self, filter: &ListFilter) -> AppResult<Page<VehicleDetail>> {
        let pattern = filter.search_pattern();
        let include_deleted = filter.visibility.includes_deleted();

        let total: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM vehicles WHERE {}", VEHICLE_FILTER))
            .bind(&pattern)
            .bind(filter.status)
            .bind(filter.vehicle_class)
            .bind(include_deleted)
            .fetch_one(self.conn()?)
            .await?;

        let vehicles = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT * FROM vehicles WHERE {} ORDER BY registered_at DESC LIMIT $5 OFFSET $6",
            VEHICLE_FILTER
        ))
        .bind(&pattern)
        .bind(filter.status)
        .bind(filter.vehicle_class)
        .bind(include_deleted)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(self.conn()?)
        .await?;

        let items = self.attach_relations(vehicles).await?;
        Ok(Page { items, total: total.0 })
    }

    async fn vehicles_for_person(&mut self, kind: PersonKind, id: Uuid) -> AppResult<Vec<Vehicle>> {
        let sql = format!(
            "SELECT * FROM vehicles WHERE {} = $1 AND deleted_at IS NULL ORDER BY registered_at DESC",
            kind.foreign_key()
        );

        let vehicles = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(id)
            .fetch_all(self.conn()?)
            .await?;

        Ok(vehicles)
    }
}
