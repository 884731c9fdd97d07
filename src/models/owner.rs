//! Modelo de Owner (propietario)
//!
//! Misma forma que el conductor más email y fecha de nacimiento opcionales.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::person;
use super::status::RecordStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Owner {
    pub id: Uuid,
    pub national_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub city: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub status: RecordStatus,
    pub registered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Owner {
    pub fn full_name(&self) -> String {
        person::full_name(&self.first_name, self.middle_name.as_deref(), &self.last_name)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOwner {
    pub national_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub city: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub status: RecordStatus,
}
