//! Escrituras de conductores

use async_trait::async_trait;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::write_workflow::WriteCommand;
use crate::dto::DriverRequest;
use crate::models::{Driver, Visibility};
use crate::repositories::{ConstraintChecker, DriverRepository, FleetTx, UniqueField};
use crate::utils::errors::{not_found_error, uniqueness_message, AppError, AppResult};

pub(crate) async fn ensure_unique(
    tx: &mut dyn FleetTx,
    field: UniqueField,
    name: &'static str,
    value: &str,
    exclude_id: Option<Uuid>,
) -> AppResult<()> {
    if !tx.is_unique(field, value, exclude_id).await? {
        return Err(AppError::UniquenessViolation {
            field: name,
            message: uniqueness_message(name).to_string(),
        });
    }
    Ok(())
}

pub struct CreateDriver {
    request: DriverRequest,
}

impl CreateDriver {
    pub fn new(request: DriverRequest) -> Self {
        Self {
            request: request.normalized(),
        }
    }
}

#[async_trait]
impl WriteCommand for CreateDriver {
    type Output = Driver;

    fn operation(&self) -> &'static str {
        "create_driver"
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        self.request.validate()
    }

    async fn check_constraints(&mut self, tx: &mut dyn FleetTx) -> AppResult<()> {
        ensure_unique(
            tx,
            UniqueField::DriverNationalId,
            "national_id",
            &self.request.national_id,
            None,
        )
        .await
    }

    async fn persist(&self, tx: &mut dyn FleetTx) -> AppResult<Driver> {
        tx.insert_driver(&self.request.to_new_driver()).await
    }
}

/// Reemplaza todos los campos de un conductor existente
pub struct UpdateDriver {
    id: Uuid,
    request: DriverRequest,
}

impl UpdateDriver {
    pub fn new(id: Uuid, request: DriverRequest) -> Self {
        Self {
            id,
            request: request.normalized(),
        }
    }
}

#[async_trait]
impl WriteCommand for UpdateDriver {
    type Output = Driver;

    fn operation(&self) -> &'static str {
        "update_driver"
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        self.request.validate()
    }

    async fn check_constraints(&mut self, tx: &mut dyn FleetTx) -> AppResult<()> {
        if tx.find_driver(self.id, Visibility::ExcludeDeleted).await?.is_none() {
            return Err(not_found_error("Conductor", &self.id.to_string()));
        }

        ensure_unique(
            tx,
            UniqueField::DriverNationalId,
            "national_id",
            &self.request.national_id,
            Some(self.id),
        )
        .await
    }

    async fn persist(&self, tx: &mut dyn FleetTx) -> AppResult<Driver> {
        tx.update_driver(self.id, &self.request.to_new_driver())
            .await?
            .ok_or_else(|| not_found_error("Conductor", &self.id.to_string()))
    }
}
