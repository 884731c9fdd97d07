use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::store::PgFleetTx;
use crate::models::{ListFilter, NewOwner, Owner, Page, Visibility};
use crate::utils::errors::AppResult;

const OWNER_FILTER: &str = r#"
    ($1::text IS NULL OR national_id ILIKE $1 OR first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1)
    AND ($2::record_status IS NULL OR status = $2)
    AND ($3 OR deleted_at IS NULL)
"#;

#[async_trait]
pub trait OwnerRepository: Send {
    async fn insert_owner(&mut self, input: &NewOwner) -> AppResult<Owner>;
    /// `None` si el propietario no existe o está eliminado
    async fn update_owner(&mut self, id: Uuid, input: &NewOwner) -> AppResult<Option<Owner>>;
    async fn find_owner(&mut self, id: Uuid, visibility: Visibility) -> AppResult<Option<Owner>>;
    async fn find_owners_by_ids(&mut self, ids: &[Uuid]) -> AppResult<Vec<Owner>>;
    async fn list_owners(&mut self, filter: &ListFilter) -> AppResult<Page<Owner>>;
}

#[async_trait]
impl OwnerRepository for PgFleetTx {
    async fn insert_owner(&mut self, input: &NewOwner) -> AppResult<Owner> {
        let now = Utc::now();

        let owner = sqlx::query_as::<_, Owner>(
            r#"
            INSERT INTO owners (id, national_id, first_name, middle_name, last_name, address, phone, city, email, birth_date, status, registered_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12, $12)
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
        .bind(&input.email)
        .bind(input.birth_date)
        .bind(input.status)
        .bind(now)
        .fetch_one(self.conn()?)
        .await?;

        Ok(owner)
    }

    async fn update_owner(&mut self, id: Uuid, input: &NewOwner) -> AppResult<Option<Owner>> {
        let owner = sqlx::query_as::<_, Owner>(
            r#"
            UPDATE owners
            SET national_id = $2, first_name = $3, middle_name = $4, last_name = $5,
                address = $6, phone = $7, city = $8, email = $9, birth_date = $10,
                status = $11, updated_at = $12
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
        .bind(&input.email)
        .bind(input.birth_date)
        .bind(input.status)
        .bind(Utc::now())
        .fetch_optional(self.conn()?)
        .await?;

        Ok(owner)
    }

    async fn find_owner(&mut self, id: Uuid, visibility: Visibility) -> AppResult<Option<Owner>> {
        let owner = sqlx::query_as::<_, Owner>(
            "SELECT * FROM owners WHERE id = $1 AND ($2 OR deleted_at IS NULL)"
        )
        .bind(id)
        .bind(visibility.includes_deleted())
        .fetch_optional(self.conn()?)
        .await?;

        Ok(owner)
    }

    async fn find_owners_by_ids(&mut self, ids: &[Uuid]) -> AppResult<Vec<Owner>> {
        let owners = sqlx::query_as::<_, Owner>("SELECT * FROM owners WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(self.conn()?)
            .await?;

        Ok(owners)
    }

    async fn list_owners(&mut self, filter: &ListFilter) -> AppResult<Page<Owner>> {
        let pattern = filter.search_pattern();
        let include_deleted = filter.visibility.includes_deleted();

        let total: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM owners WHERE {}", OWNER_FILTER))
            .bind(&pattern)
            .bind(filter.status)
            .bind(include_deleted)
            .fetch_one(self.conn()?)
            .await?;

        let items = sqlx::query_as::<_, Owner>(&format!(
            "SELECT * FROM owners WHERE {} ORDER BY registered_at DESC LIMIT $4 OFFSET $5",
            OWNER_FILTER
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
