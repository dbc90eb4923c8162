//! Modelo de vehículos de la flota

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Vehículo de la flota
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Vehiculo {
    pub id: i32,
    pub patente: String,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub anno: Option<i32>,
    pub estado: String,
    pub conductor_actual_id: Option<i32>,
    pub taller_id: Option<i32>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}
