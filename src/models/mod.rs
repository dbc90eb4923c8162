//! Modelos de dominio del CRM de taller

pub mod break_record;
pub mod history;
pub mod notificacion;
pub mod report;
pub mod solicitud;
pub mod stock;
pub mod user;
pub mod vehicle;
pub mod workorder;
