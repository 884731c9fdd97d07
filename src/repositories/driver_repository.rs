use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::store::PgFleetTx;
use crate::models::{Driver, ListFilter, NewDriver, Page, Visibility};
use crate::utils::errors::AppResult;

const DRIVER_FILTER: &str = r#"
    ($1::text IS NULL OR national_id ILIKE $1 OR first_name ILIKE $1 OR last_name ILIKE $1)
    AND ($2::record_status IS NULL OR status = $2)
    AND ($3 OR deleted_at IS NULL)
"#;

#[async_trait]
pub trait DriverRepository: Send {
    async fn insert_driver(&mut self, input: &NewDriver) -> AppResult<Driver>;
    /// `None` si el conductor no existe o está eliminado
    async fn update_driver(&mut self, id: Uuid, input: &NewDriver) -> AppResult<Option<Driver>>;
    async fn find_driver(&mut self, id: Uuid, visibility: Visibility) -> AppResult<Option<Driver>>;
    async fn find_drivers_by_ids(&mut self, ids: &[Uuid]) -> AppResult<Vec<Driver>>;
    async fn list_drivers(&mut self, filter: &ListFilter) -> AppResult<Page<Driver>>;
}

#[async_trait]
impl DriverRepository for PgFleetTx {
    async fn insert_driver(&mut self, input: &NewDriver) -> AppResult<Driver> {
        let now = Utc::now();

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, national_id, first_name, middle_name, last_name, address, phone, city, status, registered_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10, $10)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(&input.national_id)
        .bind(&input.first_name)
        .bind(&input.middle_name)
        .bind(&input.last_name)
        .bind(&input.address)
        .bind(&input.phone)
        .bind(&input.city)
        .bind(input.status)
        .bind(now)
        .fetch_one(self.conn()?)
        .await?;

        Ok(driver)
    }

    async fn update_driver(&mut self, id: Uuid, input: &NewDriver) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET national_id = $2, first_name = $3, middle_name = $4, last_name = $5,
                address = $6, phone = $7, city = $8, status = $9, updated_at = $10
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#
        )
        .bind(id)
        .bind(&input.national_id)
        .bind(&input.first_name)
        .bind(&input.middle_name)
        .bind(&input.last_name)
        .bind(&input.address)
        .bind(&input.phone)
        .bind(&input.city)
        .bind(input.status)
        .bind(Utc::now())
        .fetch_optional(self.conn()?)
        .await?;

        Ok(driver)
    }

    async fn find_driver(&mut self, id: Uuid, visibility: Visibility) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>(
            "SELECT * FROM drivers WHERE id = $1 AND ($2 OR deleted_at IS NULL)"
        )
        .bind(id)
        .bind(visibility.includes_deleted())
        .fetch_optional(self.conn()?)
        .await?;

        Ok(driver)
    }

    async fn find_drivers_by_ids(&mut self, ids: &[Uuid]) -> AppResult<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(self.conn()?)
            .await?;

        Ok(drivers)
    }

    async fn list_drivers(&mut self, filter: &ListFilter) -> AppResult<Page<Driver>> {
        let pattern = filter.search_pattern();
        let include_deleted = filter.visibility.includes_deleted();

        let total: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM drivers WHERE {}", DRIVER_FILTER))
            .bind(&pattern)
            .bind(filter.status)
            .bind(include_deleted)
            .fetch_one(self.conn()?)
            .await?;

        let items = sqlx::query_as::<_, Driver>(&format!(
            "SELECT * FROM drivers WHERE {} ORDER BY registered_at DESC LIMIT $4 OFFSET $5",
            DRIVER_FILTER
        ))
        .bind(&pattern)
        .bind(filter.status)
        .bind(include_deleted)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(self.conn()?)
        .await?;

        Ok(Page { items, total: total.0 })
    }
}
