//! Modelos de inventario de repuestos

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Repuesto del catálogo
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Repuesto {
    pub id: i32,
    pub nombre: String,
    pub sku: String,
    pub descripcion: Option<String>,
    pub stock_minimo: i32,
    pub fecha_creacion: DateTime<Utc>,
}

/// Existencias de un repuesto en un taller
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Inventario {
    pub id: i32,
    pub repuesto_id: i32,
    pub taller_id: i32,
    pub cantidad: i32,
    pub fecha_actualizacion: DateTime<Utc>,
}

/// Movimiento de stock (entrada o salida)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MovimientoRepuesto {
    pub id: i32,
    pub repuesto_id: i32,
    pub tipo_movimiento: String,
    pub cantidad: i32,
    pub costo_unitario: Option<Decimal>,
    pub motivo: Option<String>,
    pub movido_por: i32,
    pub taller_id: Option<i32>,
    pub orden_trabajo_id: Option<i32>,
    pub fecha_movimiento: DateTime<Utc>,
}

/// Solicitud de repuesto contra una OT
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SolicitudRepuesto {
    pub id: i32,
    pub orden_trabajo_id: i32,
    pub repuesto_id: i32,
    pub cantidad_solicitada: i32,
    pub urgencia: String,
    pub estado: String,
    pub comentarios: Option<String>,
    pub solicitado_por: i32,
    pub fecha_solicitud: DateTime<Utc>,
    pub fecha_aprobacion: Option<DateTime<Utc>>,
    pub fecha_estimada_entrega: Option<DateTime<Utc>>,
}
