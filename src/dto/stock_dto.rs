//! DTOs de inventario de repuestos

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

/// Request para crear un repuesto en el catálogo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRepuestoRequest {
    #[validate(length(min = 1))]
    pub nombre: String,
    #[validate(length(min = 1))]
    pub sku: String,
    pub descripcion: Option<String>,
    #[validate(range(min = 0))]
    pub stock_minimo: Option<i32>,
}

/// Query params de búsqueda de repuestos
#[derive(Debug, Deserialize)]
pub struct RepuestoSearchQuery {
    pub search: Option<String>,
}

/// Request para registrar un movimiento de stock
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMovimientoRequest {
    pub repuesto_id: i32,
    #[validate(length(min = 1))]
    pub tipo_movimiento: String,
    #[validate(range(min = 1))]
    pub cantidad: i32,
    pub costo_unitario: Option<Decimal>,
    pub motivo: Option<String>,
    pub taller_id: Option<i32>,
    pub orden_trabajo_id: Option<i32>,
}

/// Request para solicitar un repuesto contra una OT
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSolicitudRepuestoRequest {
    pub orden_trabajo_id: i32,
    pub repuesto_id: i32,
    #[validate(range(min = 1))]
    pub cantidad_solicitada: i32,
    pub urgencia: Option<String>,
    pub comentarios: Option<String>,
}

/// Request para responder una solicitud de repuesto
#[derive(Debug, Deserialize, Validate)]
pub struct RespondSolicitudRepuestoRequest {
    #[validate(length(min = 1))]
    pub estado: String,
    pub comentarios: Option<String>,
    pub fecha_estimada_entrega: Option<chrono::DateTime<chrono::Utc>>,
}
