//! DTOs de solicitudes de mantenimiento

use serde::Deserialize;
use validator::Validate;

/// Request para crear una solicitud de mantenimiento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSolicitudRequest {
    pub vehiculo_id: i32,
    #[validate(length(min = 1))]
    pub tipo_solicitud: String,
    #[validate(length(min = 1))]
    pub descripcion_problema: String,
}

/// Query params del listado de solicitudes
#[derive(Debug, Deserialize)]
pub struct SolicitudFilters {
    pub estado: Option<String>,
    pub conductor_id: Option<i32>,
}

/// Request para responder (aprobar/rechazar) una solicitud
#[derive(Debug, Deserialize, Validate)]
pub struct RespondSolicitudRequest {
    #[validate(length(min = 1))]
    pub estado: String,
    pub motivo: Option<String>,
}
