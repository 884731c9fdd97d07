//! Borrado lógico de conductores y propietarios

use async_trait::async_trait;
use uuid::Uuid;

use super::write_workflow::{WorkflowStage, WriteCommand};
use crate::models::PersonKind;
use crate::repositories::{FleetTx, PersonRepository};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Elimina (lógicamente) un conductor o propietario sin vehículos asignados
#[derive(Debug)]
pub struct DeletePerson {
    kind: PersonKind,
    id: Uuid,
}

impl DeletePerson {
    pub fn driver(id: Uuid) -> Self {
        Self {
            kind: PersonKind::Driver,
            id,
        }
    }

    pub fn owner(id: Uuid) -> Self {
        Self {
            kind: PersonKind::Owner,
            id,
        }
    }

    fn not_found(&self) -> AppError {
        let resource = match self.kind {
            PersonKind::Driver => "Conductor",
            PersonKind::Owner => "Propietario",
        };
        not_found_error(resource, &self.id.to_string())
    }
}

#[async_trait]
impl WriteCommand for DeletePerson {
    type Output = ();

    fn operation(&self) -> &'static str {
        match self.kind {
            PersonKind::Driver => "delete_driver",
            PersonKind::Owner => "delete_owner",
        }
    }

    fn checking_stage(&self) -> WorkflowStage {
        WorkflowStage::CheckingDependents
    }

    async fn check_constraints(&mut self, tx: &mut dyn FleetTx) -> AppResult<()> {
        if !tx.lock_for_delete(self.kind, self.id).await? {
            return Err(self.not_found());
        }

        let count = tx.count_dependents(self.kind, self.id).await?;
        if count > 0 {
            return Err(AppError::HasDependents {
                entity: self.kind.label(),
                count,
            });
        }

        Ok(())
    }

    async fn persist(&self, tx: &mut dyn FleetTx) -> AppResult<()> {
        if !tx.soft_delete(self.kind, self.id).await? {
            return Err(self.not_found());
        }
        Ok(())
    }
}
