//! Utilidades de validación
//!
//! Predicados puros de formato (cédula, teléfono, placa) y sus adaptadores
//! para las derivaciones de `validator`.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;
use validator::ValidationError;

lazy_static! {
    static ref PLATE_PATTERN: Regex =
        Regex::new(r"^(?:[A-Z]{3}[0-9]{3}|[A-Z]{3}[0-9]{2}[A-Z])$").unwrap();
}

pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Cédula válida: entre 8 y 10 dígitos una vez eliminados los separadores
pub fn is_valid_national_id(value: &str) -> bool {
    let digits = digits_only(value);
    (8..=10).contains(&digits.len())
}

/// Teléfono válido: exactamente 10 dígitos una vez eliminados los separadores
pub fn is_valid_phone(value: &str) -> bool {
    digits_only(value).len() == 10
}

/// Placa válida: ABC123 o ABC12D, sin distinguir mayúsculas
pub fn is_valid_plate(value: &str) -> bool {
    PLATE_PATTERN.is_match(&value.to_uppercase())
}

/// Cédula tal como se guarda: solo dígitos si es válida; si no, el valor
/// recortado para que la validación lo rechace
pub fn normalize_national_id(value: &str) -> String {
    if is_valid_national_id(value) {
        digits_only(value)
    } else {
        value.trim().to_string()
    }
}

/// Teléfono tal como se guarda, con la misma regla que la cédula
pub fn normalize_phone(value: &str) -> String {
    if is_valid_phone(value) {
        digits_only(value)
    } else {
        value.trim().to_string()
    }
}

/// Normaliza una placa antes de validarla y guardarla
pub fn normalize_plate(value: &str) -> String {
    value.trim().to_uppercase()
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

pub fn validate_national_id(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "La cédula es obligatoria"));
    }
    if !is_valid_national_id(value) {
        return Err(invalid("national_id", "La cédula debe tener entre 8 y 10 dígitos"));
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "El teléfono es obligatorio"));
    }
    if !is_valid_phone(value) {
        return Err(invalid("phone", "El teléfono debe tener 10 dígitos"));
    }
    Ok(())
}

pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "La placa es obligatoria"));
    }
    if !is_valid_plate(value) {
        return Err(invalid(
            "plate",
            "Formato de placa inválido. Use formato ABC123 o ABC12A",
        ));
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "El campo es obligatorio"));
    }
    Ok(())
}

/// Identificador de conductor o propietario: obligatorio y con forma de UUID
pub fn validate_reference(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "Debe seleccionar un registro"));
    }
    if Uuid::parse_str(value.trim()).is_err() {
        return Err(invalid("reference", "El identificador seleccionado no es válido"));
    }
    Ok(())
}

/// Fecha en formato AAAA-MM-DD
pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    if NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).is_err() {
        return Err(invalid("date", "La fecha debe tener el formato AAAA-MM-DD"));
    }
    Ok(())
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";
