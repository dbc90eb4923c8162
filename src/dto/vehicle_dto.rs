//! DTOs de vehículos

use serde::Deserialize;
use validator::Validate;

/// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1))]
    pub patente: String,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    #[validate(range(min = 1950, max = 2100))]
    pub anno: Option<i32>,
    pub conductor_actual_id: Option<i32>,
    pub taller_id: Option<i32>,
}

/// Request de actualización parcial de vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    pub patente: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    #[validate(range(min = 1950, max = 2100))]
    pub anno: Option<i32>,
    pub conductor_actual_id: Option<i32>,
    pub taller_id: Option<i32>,
}

/// Request para cambiar el estado del vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleStatusRequest {
    #[validate(length(min = 1))]
    pub estado: String,
}
