use serde::Deserialize;
use validator::Validate;

use crate::models::{NewDriver, RecordStatus};
use crate::utils::validation::{
    normalize_national_id, normalize_phone, validate_national_id, validate_not_blank,
    validate_phone,
};

/// Request para crear o reemplazar un conductor
///
/// Todos los campos llegan opcionales en el JSON para poder reportar juntos
/// todos los faltantes como errores de validación.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct DriverRequest {
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

    #[serde(alias = "estado")]
    pub status: Option<RecordStatus>,
}

/// Recorta espacios; un texto opcional vacío cuenta como ausente
pub(crate) fn optional_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl DriverRequest {
    pub fn normalized(self) -> Self {
        Self {
            national_id: normalize_national_id(&self.national_id),
            first_name: self.first_name.trim().to_string(),
            middle_name: optional_text(&self.middle_name),
            last_name: self.last_name.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: normalize_phone(&self.phone),
            city: self.city.trim().to_string(),
            status: self.status,
        }
    }

    pub fn to_new_driver(&self) -> NewDriver {
        NewDriver {
            national_id: self.national_id.clone(),
            first_name: self.first_name.clone(),
            middle_name: self.middle_name.clone(),
            last_name: self.last_name.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            city: self.city.clone(),
            status: self.status.unwrap_or_default(),
        }
    }
}
