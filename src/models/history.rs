//! Tipos del historial genérico
//!
//! El historial cubre siete tipos de entidad; cada consulta comparte el
//! mismo contrato de filtros y paginación.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tipos de entidad soportados por el historial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryEntityType {
    SolicitudesRepuestos,
    MovimientosRepuestos,
    OrdenesTrabajo,
    SolicitudesMantenimiento,
    LogEstadosOt,
    EntregasVehiculos,
    BreaksMecanico,
}

impl HistoryEntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryEntityType::SolicitudesRepuestos => "solicitudes_repuestos",
            HistoryEntityType::MovimientosRepuestos => "movimientos_repuestos",
            HistoryEntityType::OrdenesTrabajo => "ordenes_trabajo",
            HistoryEntityType::SolicitudesMantenimiento => "solicitudes_mantenimiento",
            HistoryEntityType::LogEstadosOt => "log_estados_ot",
            HistoryEntityType::EntregasVehiculos => "entregas_vehiculos",
            HistoryEntityType::BreaksMecanico => "breaks_mecanico",
        }
    }
}

/// Metadatos de paginación del historial
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

/// Resultado de una consulta de historial
///
/// `pagination` solo está presente cuando la consulta fue paginada; los
/// flujos de exportación dependen de que falte en el caso no paginado.
#[derive(Debug, Serialize)]
pub struct HistoryResult {
    pub data: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_roundtrip_snake_case() {
        let parsed: HistoryEntityType =
            serde_json::from_str("\"breaks_mecanico\"").unwrap();
        assert_eq!(parsed, HistoryEntityType::BreaksMecanico);
        assert_eq!(parsed.as_str(), "breaks_mecanico");
    }

    #[test]
    fn test_entity_type_unknown_value_rejected() {
        let parsed: Result<HistoryEntityType, _> =
            serde_json::from_str("\"tabla_inexistente\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_result_without_pagination_omits_key() {
        let result = HistoryResult {
            data: vec![],
            pagination: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("pagination").is_none());
    }
}
