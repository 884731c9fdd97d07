//! Parámetros de consulta de los listados

use serde::Deserialize;

use crate::models::{ListFilter, RecordStatus, VehicleClass, Visibility};
use crate::utils::errors::{AppError, AppResult};

pub const DEFAULT_PER_PAGE: i64 = 10;
pub const MAX_PER_PAGE: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(alias = "buscar")]
    pub search: Option<String>,
    #[serde(alias = "estado")]
    pub status: Option<String>,
    #[serde(alias = "tipo_vehiculo")]
    pub vehicle_class: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub include_deleted: Option<bool>,
}

fn parse_enum<T: serde::de::DeserializeOwned>(value: &str, field: &str) -> AppResult<T> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_lowercase()))
        .map_err(|_| AppError::BadRequest(format!("Valor inválido para {}: {}", field, value)))
}

impl ListParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    /// Sin `status` se listan solo los activos; `all` quita el filtro
    pub fn status_filter(&self) -> AppResult<Option<RecordStatus>> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(Some(RecordStatus::Active)),
            Some("all") | Some("todos") => Ok(None),
            Some(value) => parse_enum(value, "status").map(Some),
        }
    }

    pub fn vehicle_class_filter(&self) -> AppResult<Option<VehicleClass>> {
        match self.vehicle_class.as_deref().map(str::trim) {
            None | Some("") | Some("all") | Some("todos") => Ok(None),
            Some(value) => parse_enum(value, "vehicle_class").map(Some),
        }
    }

    pub fn to_filter(&self) -> AppResult<ListFilter> {
        let per_page = self.per_page();
        let offset = (self.page() - 1)
            .checked_mul(per_page)
            .ok_or_else(|| AppError::BadRequest(format!("Página fuera de rango: {}", self.page())))?;

        Ok(ListFilter {
            search: self.search.clone(),
            status: self.status_filter()?,
            vehicle_class: self.vehicle_class_filter()?,
            visibility: Visibility::from_flag(self.include_deleted.unwrap_or(false)),
            limit: per_page,
            offset,
        })
    }
}

/// Parámetros de la consulta de un solo registro
#[derive(Debug, Default, Deserialize)]
pub struct ShowParams {
    pub include_deleted: Option<bool>,
}

impl ShowParams {
    pub fn visibility(&self) -> Visibility {
        Visibility::from_flag(self.include_deleted.unwrap_or(false))
    }
}
