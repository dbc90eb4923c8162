//! DTOs de requests y responses de la API

pub mod auth_dto;
pub mod history_dto;
pub mod notification_dto;
pub mod report_dto;
pub mod solicitud_dto;
pub mod stock_dto;
pub mod user_dto;
pub mod vehicle_dto;
pub mod workorder_dto;

use serde::Serialize;

/// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
