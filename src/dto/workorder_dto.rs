//! DTOs de órdenes de trabajo

use serde::Deserialize;
use validator::Validate;

/// Request para crear una OT
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkOrderRequest {
    pub vehiculo_id: i32,
    pub taller_id: Option<i32>,
    #[validate(length(min = 1))]
    pub descripcion_problema: String,
    pub prioridad: Option<String>,
}

/// Query params del listado de OTs
#[derive(Debug, Deserialize)]
pub struct WorkOrderFilters {
    pub estado: Option<String>,
    pub mecanico_id: Option<i32>,
    pub vehiculo_id: Option<i32>,
}

/// Request para asignar mecánico
#[derive(Debug, Deserialize)]
pub struct AssignMechanicRequest {
    pub mecanico_id: i32,
}

/// Request de cambio de estado de una OT
#[derive(Debug, Deserialize, Validate)]
pub struct ChangeStateRequest {
    #[validate(length(min = 1))]
    pub estado: String,
    pub motivo: Option<String>,
}

/// Request de cierre de una OT
#[derive(Debug, Deserialize)]
pub struct CloseWorkOrderRequest {
    pub observaciones: Option<String>,
}

/// Request de entrega/retiro del vehículo de una OT
#[derive(Debug, Deserialize, Validate)]
pub struct EntregaVehiculoRequest {
    #[validate(length(min = 1))]
    pub tipo_entrega: String,
    pub conductor_id: Option<i32>,
    pub condicion_vehiculo: Option<String>,
    pub observaciones: Option<String>,
}
