//! Operaciones comunes a conductores y propietarios: dependientes y borrado lógico

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::store::PgFleetTx;
use crate::models::PersonKind;
use crate::utils::errors::AppResult;

#[async_trait]
pub trait PersonRepository: Send {
    /// Bloquea la fila para el borrado; `false` si no existe o ya fue eliminada
    async fn lock_for_delete(&mut self, kind: PersonKind, id: Uuid) -> AppResult<bool>;

    /// Vehículos no eliminados (de cualquier estado) que referencian a la persona
    async fn count_dependents(&mut self, kind: PersonKind, id: Uuid) -> AppResult<i64>;

    /// Marca la fila como eliminada; `false` si no había fila viva
    async fn soft_delete(&mut self, kind: PersonKind, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
impl PersonRepository for PgFleetTx {
    async fn lock_for_delete(&mut self, kind: PersonKind, id: Uuid) -> AppResult<bool> {
        let sql = format!(
            "SELECT id FROM {} WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
            kind.table()
        );

        let row: Option<(Uuid,)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.conn()?)
            .await?;

        Ok(row.is_some())
    }

    async fn count_dependents(&mut self, kind: PersonKind, id: Uuid) -> AppResult<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM vehicles WHERE {} = $1 AND deleted_at IS NULL",
            kind.foreign_key()
        );

        let count: (i64,) = sqlx::query_as(&sql)
            .bind(id)
            .fetch_one(self.conn()?)
            .await?;

        Ok(count.0)
    }

    async fn soft_delete(&mut self, kind: PersonKind, id: Uuid) -> AppResult<bool> {
        let sql = format!(
            "UPDATE {} SET deleted_at = $2, updated_at = $2 WHERE id = $1 AND deleted_at IS NULL",
            kind.table()
        );

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Utc::now())
            .execute(self.conn()?)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
