//! DTOs de notificaciones

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    pub usuario_id: i32,
    #[validate(length(min = 1, max = 255, message = "El título es requerido"))]
    pub titulo: String,
    #[validate(length(min = 1, message = "El mensaje es requerido"))]
    pub mensaje: String,
    #[validate(length(min = 1, max = 100, message = "El tipo de notificación es requerido"))]
    pub tipo_notificacion: String,
    pub tipo_entidad_relacionada: Option<String>,
    pub entidad_relacionada_id: Option<i32>,
}
