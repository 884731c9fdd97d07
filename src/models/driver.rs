//! Modelo de Driver (conductor)
//!
//! Mapea a la tabla `drivers`. El borrado es lógico vía `deleted_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::person;
use super::status::RecordStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Driver {
    pub id: Uuid,
    pub national_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub city: String,
    pub status: RecordStatus,
    pub registered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Driver {
    pub fn full_name(&self) -> String {
        person::full_name(&self.first_name, self.middle_name.as_deref(), &self.last_name)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Campos escribibles de un conductor, ya validados y normalizados
#[derive(Debug, Clone, PartialEq)]
pub struct NewDriver {
    pub national_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub city: String,
    pub status: RecordStatus,
}
