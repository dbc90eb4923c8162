//! Controladores de la API
//!
//! Cada controlador orquesta validación, reglas de negocio y repositorios;
//! los handlers de rutas solo arman el controlador y traducen la respuesta.

pub mod auth_controller;
pub mod history_controller;
pub mod notification_controller;
pub mod report_controller;
pub mod solicitud_controller;
pub mod stock_controller;
pub mod user_controller;
pub mod vehicle_controller;
pub mod workorder_controller;
