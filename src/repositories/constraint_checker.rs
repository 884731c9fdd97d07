//! Verificación de unicidad e integridad referencial
//!
//! Ambas consultas corren dentro de la misma transacción que la escritura.
//! Los índices únicos parciales de la base siguen siendo la garantía final.

use async_trait::async_trait;
use uuid::Uuid;

use super::store::PgFleetTx;
use crate::models::PersonKind;
use crate::utils::errors::AppResult;

/// Campo con restricción de unicidad entre filas no eliminadas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    DriverNationalId,
    OwnerNationalId,
    OwnerEmail,
    VehiclePlate,
}

impl UniqueField {
    pub fn table(self) -> &'static str {
        match self {
            UniqueField::DriverNationalId => "drivers",
            UniqueField::OwnerNationalId | UniqueField::OwnerEmail => "owners",
            UniqueField::VehiclePlate => "vehicles",
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            UniqueField::DriverNationalId | UniqueField::OwnerNationalId => "national_id",
            UniqueField::OwnerEmail => "email",
            UniqueField::VehiclePlate => "plate",
        }
    }
}

#[async_trait]
pub trait ConstraintChecker: Send {
    /// `true` si ninguna fila no eliminada (distinta de `exclude_id`) tiene ese valor
    async fn is_unique(
        &mut self,
        field: UniqueField,
        value: &str,
        exclude_id: Option<Uuid>,
    ) -> AppResult<bool>;

    /// `true` si la persona existe y no está eliminada; la fila queda bloqueada
    /// en modo compartido hasta el fin de la transacción
    async fn exists(&mut self, kind: PersonKind, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
impl ConstraintChecker for PgFleetTx {
    async fn is_unique(
        &mut self,
        field: UniqueField,
        value: &str,
        exclude_id: Option<Uuid>,
    ) -> AppResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1 AND deleted_at IS NULL AND ($2::uuid IS NULL OR id <> $2))",
            field.table(),
            field.column()
        );

        let taken: (bool,) = sqlx::query_as(&sql)
            .bind(value)
            .bind(exclude_id)
            .fetch_one(self.conn()?)
            .await?;

        Ok(!taken.0)
    }

    async fn exists(&mut self, kind: PersonKind, id: Uuid) -> AppResult<bool> {
        let sql = format!(
            "SELECT id FROM {} WHERE id = $1 AND deleted_at IS NULL FOR SHARE",
            kind.table()
        );

        let row: Option<(Uuid,)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.conn()?)
            .await?;

        Ok(row.is_some())
    }
}
