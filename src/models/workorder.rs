//! Modelos de órdenes de trabajo y entregas de vehículos

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Orden de trabajo (OT) de reparación de un vehículo
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrdenTrabajo {
    pub id: i32,
    pub numero_ot: i32,
    pub vehiculo_id: i32,
    pub mecanico_asignado_id: Option<i32>,
    pub jefe_taller_id: i32,
    pub taller_id: Option<i32>,
    pub estado: String,
    pub prioridad: String,
    pub descripcion_problema: Option<String>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_asignacion: Option<DateTime<Utc>>,
    pub fecha_inicio_trabajo: Option<DateTime<Utc>>,
    pub fecha_finalizacion: Option<DateTime<Utc>>,
    pub fecha_cierre: Option<DateTime<Utc>>,
}

/// Entrega o retiro de un vehículo asociado a una OT
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EntregaVehiculo {
    pub id: i32,
    pub orden_trabajo_id: i32,
    pub tipo_entrega: String,
    pub conductor_id: Option<i32>,
    pub responsable_taller_id: Option<i32>,
    pub condicion_vehiculo: Option<String>,
    pub observaciones: Option<String>,
    pub fecha_firma: DateTime<Utc>,
}
