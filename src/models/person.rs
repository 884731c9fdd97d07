//! Utilidades comunes a conductores y propietarios

use serde::Serialize;

/// Tipo de persona registrada; determina la tabla y la llave foránea en `vehicles`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonKind {
    Driver,
    Owner,
}

impl PersonKind {
    pub fn table(self) -> &'static str {
        match self {
            PersonKind::Driver => "drivers",
            PersonKind::Owner => "owners",
        }
    }

    /// Columna de `vehicles` que referencia a esta persona
    pub fn foreign_key(self) -> &'static str {
        match self {
            PersonKind::Driver => "driver_id",
            PersonKind::Owner => "owner_id",
        }
    }

    /// Nombre usado en los mensajes al usuario
    pub fn label(self) -> &'static str {
        match self {
            PersonKind::Driver => "conductor",
            PersonKind::Owner => "propietario",
        }
    }
}

/// Nombre completo: primer nombre, segundo nombre opcional y apellidos
pub fn full_name(first_name: &str, middle_name: Option<&str>, last_name: &str) -> String {
    [Some(first_name), middle_name, Some(last_name)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cédula de 10 dígitos como NN.NNN.NNN-NN; cualquier otra se deja igual
pub fn format_national_id(national_id: &str) -> String {
    let digits: String = national_id.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        format!("{}.{}.{}-{}", &digits[0..2], &digits[2..5], &digits[5..8], &digits[8..])
    } else {
        national_id.to_string()
    }
}

/// Teléfono de 10 dígitos como NNN-NNN-NNNN
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        format!("{}-{}-{}", &digits[0..3], &digits[3..6], &digits[6..])
    } else {
        phone.to_string()
    }
}
