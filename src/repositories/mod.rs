//! Capa de acceso a datos
//!
//! Cada repositorio encapsula las consultas SQL de una entidad sobre el pool
//! de Postgres. La lógica de negocio vive en los servicios y controladores.

pub mod break_repository;
pub mod history_repository;
pub mod notification_repository;
pub mod report_repository;
pub mod solicitud_repository;
pub mod stock_repository;
pub mod user_repository;
pub mod vehicle_repository;
pub mod workorder_repository;

pub use break_repository::BreakRepository;
pub use history_repository::{HistoryEntity, HistoryRepository};
pub use notification_repository::NotificationRepository;
pub use report_repository::ReportRepository;
pub use solicitud_repository::SolicitudRepository;
pub use stock_repository::StockRepository;
pub use user_repository::UserRepository;
pub use vehicle_repository::VehicleRepository;
pub use workorder_repository::WorkOrderRepository;
