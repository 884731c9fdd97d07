//! Filtros y páginas para los listados

use super::status::{RecordStatus, VehicleClass, Visibility};

/// Filtro ya resuelto que reciben los repositorios
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub search: Option<String>,
    pub status: Option<RecordStatus>,
    pub vehicle_class: Option<VehicleClass>,
    pub visibility: Visibility,
    pub limit: i64,
    pub offset: i64,
}

impl ListFilter {
    /// Patrón ILIKE para la búsqueda, si hay texto
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s))
    }

    /// Coincidencia de búsqueda en memoria, sin distinguir mayúsculas
    #[cfg(test)]
    pub fn matches_search(&self, fields: &[&str]) -> bool {
        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                fields.iter().any(|f| f.to_lowercase().contains(&needle))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}
