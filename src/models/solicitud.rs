//! Modelo de solicitudes de mantenimiento

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Solicitud de mantenimiento levantada por un conductor
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SolicitudMantenimiento {
    pub id: i32,
    pub numero_solicitud: String,
    pub vehiculo_id: i32,
    pub conductor_id: Option<i32>,
    pub tipo_solicitud: String,
    pub descripcion_problema: Option<String>,
    pub estado: String,
    pub fecha_solicitud: DateTime<Utc>,
    pub fecha_aprobacion: Option<DateTime<Utc>>,
    pub aprobado_por: Option<i32>,
}
