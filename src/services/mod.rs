//! Lógica de negocio de reportes e historial

pub mod history_service;
pub mod report_service;

pub use history_service::HistoryService;
pub use report_service::ReportService;
