use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use super::driver_dto::optional_text;
use crate::models::{NewOwner, RecordStatus};
use crate::utils::validation::{
    normalize_national_id, normalize_phone, validate_date, validate_national_id,
    validate_not_blank, validate_phone, DATE_FORMAT,
};

/// Request para crear o reemplazar un propietario
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct OwnerRequest {
    #[serde(alias = "cedula")]
    #[validate(
        custom = "validate_national_id",
        length(max = 20, message = "La cédula no puede superar 20 caracteres")
    )]
    pub national_id: String,

    #[serde(alias = "primer_nombre")]
    #[validate(
        custom = "validate_not_blank",
        length(max = 50, message = "El primer nombre no puede superar 50 caracteres")
    )]
    pub first_name: String,

    #[serde(alias = "segundo_nombre")]
    #[validate(length(max = 50, message = "El segundo nombre no puede superar 50 caracteres"))]
    pub middle_name: Option<String>,

    #[serde(alias = "apellidos")]
    #[validate(
        custom = "validate_not_blank",
        length(max = 100, message = "Los apellidos no pueden superar 100 caracteres")
    )]
    pub last_name: String,

    #[serde(alias = "direccion")]
    #[validate(
        custom = "validate_not_blank",
        length(max = 200, message = "La dirección no puede superar 200 caracteres")
    )]
    pub address: String,

    #[serde(alias = "telefono")]
    #[validate(
        custom = "validate_phone",
        length(max = 20, message = "El teléfono no puede superar 20 caracteres")
    )]
    pub phone: String,

    #[serde(alias = "ciudad")]
    #[validate(
        custom = "validate_not_blank",
        length(max = 100, message = "La ciudad no puede superar 100 caracteres")
    )]
    pub city: String,

    #[validate(
        email(message = "El email debe ser una dirección válida"),
        length(max = 100, message = "El email no puede superar 100 caracteres")
    )]
    pub email: Option<String>,

    #[serde(alias = "fecha_nacimiento")]
    #[validate(custom = "validate_date")]
    pub birth_date: Option<String>,

    #[serde(alias = "estado")]
    pub status: Option<RecordStatus>,
}

impl OwnerRequest {
    pub fn normalized(self) -> Self {
        Self {
            national_id: normalize_national_id(&self.national_id),
            first_name: self.first_name.trim().to_string(),
            middle_name: optional_text(&self.middle_name),
            last_name: self.last_name.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: normalize_phone(&self.phone),
            city: self.city.trim().to_string(),
            email: optional_text(&self.email).map(|e| e.to_lowercase()),
            birth_date: optional_text(&self.birth_date),
            status: self.status,
        }
    }

    pub fn to_new_owner(&self) -> NewOwner {
        NewOwner {
            national_id: self.national_id.clone(),
            first_name: self.first_name.clone(),
            middle_name: self.middle_name.clone(),
            last_name: self.last_name.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            city: self.city.clone(),
            email: self.email.clone(),
            birth_date: self
                .birth_date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok()),
            status: self.status.unwrap_or_default(),
        }
    }
}
