//! Almacén de la flota y su transacción
//!
//! `FleetStore` abre transacciones; toda lectura o escritura pasa por un
//! `FleetTx`, que reúne los repositorios de cada entidad y los verificadores
//! de restricciones. Si la transacción se descarta sin `commit`, se revierte.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use super::constraint_checker::ConstraintChecker;
use super::driver_repository::DriverRepository;
use super::owner_repository::OwnerRepository;
use super::person_repository::PersonRepository;
use super::report_repository::ReportRepository;
use super::user_repository::UserRepository;
use super::vehicle_repository::VehicleRepository;
use crate::utils::errors::{AppError, AppResult};

#[async_trait]
pub trait FleetStore: Send + Sync {
    async fn begin(&self) -> AppResult<Box<dyn FleetTx>>;
}

#[async_trait]
pub trait FleetTx:
    ConstraintChecker
    + DriverRepository
    + OwnerRepository
    + PersonRepository
    + VehicleRepository
    + UserRepository
    + ReportRepository
    + Send
{
    async fn commit(&mut self) -> AppResult<()>;
}

/// Implementación sobre PostgreSQL
#[derive(Clone)]
pub struct PgFleetStore {
    pool: PgPool,
}

impl PgFleetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FleetStore for PgFleetStore {
    async fn begin(&self) -> AppResult<Box<dyn FleetTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgFleetTx { tx: Some(tx) }))
    }
}

pub struct PgFleetTx {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgFleetTx {
    /// Conexión de la transacción en curso
    pub(crate) fn conn(&mut self) -> AppResult<&mut PgConnection> {
        self.tx
            .as_deref_mut()
            .ok_or_else(|| AppError::PersistenceFailed("transaction already finished".to_string()))
    }
}

#[async_trait]
impl FleetTx for PgFleetTx {
    async fn commit(&mut self) -> AppResult<()> {
        match self.tx.take() {
            Some(tx) => {
                tx.commit().await?;
                Ok(())
            }
            None => Err(AppError::PersistenceFailed(
                "transaction already finished".to_string(),
            )),
        }
    }
}
