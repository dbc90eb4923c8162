//! DTOs del reporte de breaks

use serde::Deserialize;
use validator::Validate;

/// Filtros del reporte mensual de breaks
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct BreaksReportFilters {
    #[validate(range(min = 1, max = 12))]
    pub mes: Option<u32>,
    #[validate(range(min = 2000, max = 2100))]
    pub anno: Option<i32>,
}
