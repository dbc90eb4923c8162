//! DTOs del historial genérico

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::models::history::HistoryEntityType;

/// Filtros de consulta de historial
///
/// `page` y `limit` solo paginan cuando vienen AMBOS; ese contrato asimétrico
/// lo dependen los flujos de exportación, que los remueven antes de consultar.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct HistoryFilters {
    #[serde(rename = "entityType")]
    pub entity_type: Option<HistoryEntityType>,
    pub search: Option<String>,
    #[serde(rename = "fechaDesde")]
    pub fecha_desde: Option<NaiveDate>,
    #[serde(rename = "fechaHasta")]
    pub fecha_hasta: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub page: Option<i64>,
    #[validate(range(min = 1))]
    pub limit: Option<i64>,
    #[serde(rename = "usuarioId")]
    pub usuario_id: Option<i32>,
    #[serde(rename = "tallerId")]
    pub taller_id: Option<i32>,
}

impl HistoryFilters {
    /// Copia del filtro sin paginación (fetch completo, para exportar)
    pub fn sin_paginacion(&self) -> Self {
        Self {
            page: None,
            limit: None,
            ..self.clone()
        }
    }
}
