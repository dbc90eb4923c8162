//! Reporte mensual de breaks

use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

use crate::controllers::history_controller::CsvExport;
use crate::dto::report_dto::BreaksReportFilters;
use crate::middleware::auth::{require_role, AuthenticatedUser};
use crate::models::report::BreaksReport;
use crate::services::report_service::breaks_report_csv;
use crate::services::ReportService;
use crate::utils::errors::AppResult;

pub struct ReportController {
    service: ReportService,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: ReportService::new(pool),
        }
    }

    pub async fn breaks_report(
        &self,
        user: &AuthenticatedUser,
        filters: BreaksReportFilters,
    ) -> AppResult<BreaksReport> {
        require_role(user, &["ADMIN", "JEFE_TALLER"])?;
        filters.validate()?;
        self.service.breaks_report(&filters).await
    }

    pub async fn export_breaks(
        &self,
        user: &AuthenticatedUser,
        filters: BreaksReportFilters,
    ) -> AppResult<CsvExport> {
        require_role(user, &["ADMIN", "JEFE_TALLER"])?;
        filters.validate()?;

        let report = self.service.breaks_report(&filters).await?;
        let filename = format!(
            "reporte_breaks_{}_{}_{}.csv",
            report.mes,
            report.anno,
            Utc::now().date_naive()
        );
        Ok(CsvExport {
            filename,
            csv: breaks_report_csv(&report),
        })
    }
}
