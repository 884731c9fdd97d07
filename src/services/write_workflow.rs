//! Flujo de escritura común a conductores, propietarios y vehículos
//!
//! Toda escritura pasa por las mismas etapas:
//! `Validating → CheckingConstraints → Persisting → Done | Rejected`.
//! Las verificaciones y la escritura comparten una sola transacción; si algo
//! falla la transacción se descarta y no queda ninguna escritura parcial.

use std::fmt;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use validator::ValidationErrors;

use crate::models::RequestContext;
use crate::repositories::{FleetStore, FleetTx};
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    Validating,
    CheckingConstraints,
    CheckingDependents,
    Persisting,
    Done,
    Rejected,
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStage::Validating => "validating",
            WorkflowStage::CheckingConstraints => "checking_constraints",
            WorkflowStage::CheckingDependents => "checking_dependents",
            WorkflowStage::Persisting => "persisting",
            WorkflowStage::Done => "done",
            WorkflowStage::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// Una escritura concreta (crear, actualizar, eliminar) sobre una entidad
#[async_trait]
pub trait WriteCommand: Send + Sync {
    type Output: Send;

    /// Nombre de la operación para los logs, p. ej. `create_driver`
    fn operation(&self) -> &'static str;

    /// Validación de campos; debe reportar todos los errores juntos
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }

    /// Etapa que corresponde a `check_constraints`
    fn checking_stage(&self) -> WorkflowStage {
        WorkflowStage::CheckingConstraints
    }

    async fn check_constraints(&mut self, tx: &mut dyn FleetTx) -> AppResult<()>;

    async fn persist(&self, tx: &mut dyn FleetTx) -> AppResult<Self::Output>;
}

/// Ejecuta un comando de escritura completo dentro de una transacción
pub async fn run_write<C: WriteCommand>(
    store: &dyn FleetStore,
    ctx: &RequestContext,
    mut command: C,
) -> AppResult<C::Output> {
    let operation = command.operation();
    let mut stage = WorkflowStage::Validating;

    let result = execute(store, ctx, &mut command, &mut stage).await;

    match &result {
        Ok(_) => info!(
            operation,
            user_id = %ctx.user_id,
            request_id = %ctx.request_id,
            stage = %WorkflowStage::Done,
            "✅ Escritura completada"
        ),
        Err(e) => warn!(
            operation,
            user_id = %ctx.user_id,
            request_id = %ctx.request_id,
            stage = %WorkflowStage::Rejected,
            failed_at = %stage,
            code = e.code(),
            "❌ Escritura rechazada: {}",
            e
        ),
    }

    result
}

async fn execute<C: WriteCommand>(
    store: &dyn FleetStore,
    ctx: &RequestContext,
    command: &mut C,
    stage: &mut WorkflowStage,
) -> AppResult<C::Output> {
    let operation = command.operation();

    enter(stage, WorkflowStage::Validating, operation, ctx);
    command.validate().map_err(AppError::ValidationFailed)?;

    let mut tx = store.begin().await?;

    enter(stage, command.checking_stage(), operation, ctx);
    command.check_constraints(&mut *tx).await?;

    enter(stage, WorkflowStage::Persisting, operation, ctx);
    let output = command.persist(&mut *tx).await?;
    tx.commit().await?;

    Ok(output)
}

fn enter(stage: &mut WorkflowStage, next: WorkflowStage, operation: &str, ctx: &RequestContext) {
    *stage = next;
    debug!(
        operation,
        request_id = %ctx.request_id,
        stage = %next,
        "Etapa de escritura"
    );
}
