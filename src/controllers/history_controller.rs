//! Consultas y exportación del historial

use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::history_dto::HistoryFilters;
use crate::middleware::auth::{require_role, AuthenticatedUser};
use crate::models::history::HistoryResult;
use crate::services::HistoryService;
use crate::utils::errors::{bad_request_error, AppResult};

/// CSV exportado junto a su nombre de archivo sugerido
pub struct CsvExport {
    pub filename: String,
    pub csv: String,
}

pub struct HistoryController {
    service: HistoryService,
}

impl HistoryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: HistoryService::new(pool),
        }
    }

    pub async fn query(
        &self,
        user: &AuthenticatedUser,
        filters: HistoryFilters,
    ) -> AppResult<HistoryResult> {
        require_role(user, &["ADMIN", "JEFE_TALLER"])?;
        filters.validate()?;
        self.service.query(&filters).await
    }

    pub async fn export(
        &self,
        user: &AuthenticatedUser,
        filters: HistoryFilters,
    ) -> AppResult<CsvExport> {
        require_role(user, &["ADMIN", "JEFE_TALLER"])?;
        filters.validate()?;

        let entity_type = filters
            .entity_type
            .ok_or_else(|| bad_request_error("entityType es requerido"))?;
        let csv = self.service.export_csv(&filters).await?;

        let filename = format!(
            "historial_{}_{}.csv",
            entity_type.as_str(),
            Utc::now().date_naive()
        );
        Ok(CsvExport { filename, csv })
    }
}
