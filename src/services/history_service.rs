//! Consultas y exportación del historial genérico

use sqlx::PgPool;

use crate::dto::history_dto::HistoryFilters;
use crate::models::history::{HistoryEntityType, HistoryResult, Pagination};
use crate::repositories::{HistoryEntity, HistoryRepository};
use crate::utils::csv::build_csv;
use crate::utils::errors::{bad_request_error, AppResult};

pub struct HistoryService {
    repository: HistoryRepository,
}

impl HistoryService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: HistoryRepository::new(pool),
        }
    }

    /// Consultar el historial de una entidad
    ///
    /// Pagina solo cuando vienen `page` y `limit` a la vez; con uno solo de
    /// los dos se devuelve el resultado completo sin metadatos de paginación.
    pub async fn query(&self, filters: &HistoryFilters) -> AppResult<HistoryResult> {
        let entity_type = filters
            .entity_type
            .ok_or_else(|| bad_request_error("entityType es requerido"))?;
        let entity = HistoryEntity::for_type(entity_type);

        match (filters.page, filters.limit) {
            (Some(page), Some(limit)) => {
                let (data, total) = self
                    .repository
                    .fetch_page(entity, filters, page, limit)
                    .await?;
                Ok(HistoryResult {
                    data,
                    pagination: Some(Pagination {
                        page,
                        limit,
                        total,
                        total_pages: total_pages(total, limit),
                    }),
                })
            }
            _ => {
                let data = self.repository.fetch_all(entity, filters).await?;
                Ok(HistoryResult {
                    data,
                    pagination: None,
                })
            }
        }
    }

    /// Exportar el historial completo como CSV, ignorando la paginación
    pub async fn export_csv(&self, filters: &HistoryFilters) -> AppResult<String> {
        let result = self.query(&filters.sin_paginacion()).await?;
        Ok(build_csv(&result.data))
    }
}

/// ceil(total / limit); 0 filas dan 0 páginas
fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_redondea_hacia_arriba() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(95, 20), 5);
        assert_eq!(total_pages(101, 20), 6);
    }

    #[test]
    fn test_sin_paginacion_quita_solo_page_y_limit() {
        let filters = HistoryFilters {
            entity_type: Some(HistoryEntityType::OrdenesTrabajo),
            search: Some("ABCD12".to_string()),
            page: Some(2),
            limit: Some(50),
            ..Default::default()
        };
        let sin = filters.sin_paginacion();
        assert!(sin.page.is_none());
        assert!(sin.limit.is_none());
        assert_eq!(sin.entity_type, Some(HistoryEntityType::OrdenesTrabajo));
        assert_eq!(sin.search.as_deref(), Some("ABCD12"));
    }
}
