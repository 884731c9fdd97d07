//! Escrituras de propietarios

use async_trait::async_trait;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::driver_service::ensure_unique;
use super::write_workflow::WriteCommand;
use crate::dto::OwnerRequest;
use crate::models::{Owner, Visibility};
use crate::repositories::{FleetTx, OwnerRepository, UniqueField};
use crate::utils::errors::{not_found_error, AppResult};

/// Cédula y, si viene, email deben ser únicos entre propietarios vivos
async fn ensure_owner_unique(
    tx: &mut dyn FleetTx,
    request: &OwnerRequest,
    exclude_id: Option<Uuid>,
) -> AppResult<()> {
    ensure_unique(
        tx,
        UniqueField::OwnerNationalId,
        "national_id",
        &request.national_id,
        exclude_id,
    )
    .await?;

    if let Some(email) = &request.email {
        ensure_unique(tx, UniqueField::OwnerEmail, "email", email, exclude_id).await?;
    }

    Ok(())
}

pub struct CreateOwner {
    request: OwnerRequest,
}

impl CreateOwner {
    pub fn new(request: OwnerRequest) -> Self {
        Self {
            request: request.normalized(),
        }
    }
}

#[async_trait]
impl WriteCommand for CreateOwner {
    type Output = Owner;

    fn operation(&self) -> &'static str {
        "create_owner"
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        self.request.validate()
    }

    async fn check_constraints(&mut self, tx: &mut dyn FleetTx) -> AppResult<()> {
        ensure_owner_unique(tx, &self.request, None).await
    }

    async fn persist(&self, tx: &mut dyn FleetTx) -> AppResult<Owner> {
        tx.insert_owner(&self.request.to_new_owner()).await
    }
}

pub struct UpdateOwner {
    id: Uuid,
    request: OwnerRequest,
}

impl UpdateOwner {
    pub fn new(id: Uuid, request: OwnerRequest) -> Self {
        Self {
            id,
            request: request.normalized(),
        }
    }
}

#[async_trait]
impl WriteCommand for UpdateOwner {
    type Output = Owner;

    fn operation(&self) -> &'static str {
        "update_owner"
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        self.request.validate()
    }

    async fn check_constraints(&mut self, tx: &mut dyn FleetTx) -> AppResult<()> {
        if tx.find_owner(self.id, Visibility::ExcludeDeleted).await?.is_none() {
            return Err(not_found_error("Propietario", &self.id.to_string()));
        }

        ensure_owner_unique(tx, &self.request, Some(self.id)).await
    }

    async fn persist(&self, tx: &mut dyn FleetTx) -> AppResult<Owner> {
        tx.update_owner(self.id, &self.request.to_new_owner())
            .await?
            .ok_or_else(|| not_found_error("Propietario", &self.id.to_string()))
    }
}
