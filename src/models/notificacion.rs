//! Modelo de notificaciones de usuario

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Notificación dirigida a un usuario
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Notificacion {
    pub id: i32,
    pub usuario_id: i32,
    pub titulo: String,
    pub mensaje: String,
    pub tipo_notificacion: String,
    pub tipo_entidad_relacionada: Option<String>,
    pub entidad_relacionada_id: Option<i32>,
    pub leida: bool,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_lectura: Option<DateTime<Utc>>,
}
