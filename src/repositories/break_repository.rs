//! Acceso a datos de breaks de mecánicos
//!
//! Un mecánico tiene a lo más un break abierto (hora_termino NULL). El mes y
//! el año se fijan al momento de iniciar para que el reporte mensual no
//! dependa de la zona horaria del consumidor.

use sqlx::PgPool;

use crate::models::break_record::BreakMecanico;
use crate::utils::errors::AppResult;

pub struct BreakRepository {
    pool: PgPool,
}

impl BreakRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Break abierto del mecánico, si existe
    pub async fn find_open(&self, mecanico_id: i32) -> AppResult<Option<BreakMecanico>> {
        let registro = sqlx::query_as::<_, BreakMecanico>(
            "SELECT * FROM breaks_mecanico \
             WHERE mecanico_id = $1 AND hora_termino IS NULL \
             ORDER BY hora_inicio DESC \
             LIMIT 1",
        )
        .bind(mecanico_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(registro)
    }

    /// Abrir un break ahora; mes y año quedan registrados con la fecha de inicio
    pub async fn start(&self, mecanico_id: i32) -> AppResult<BreakMecanico> {
        let registro = sqlx::query_as::<_, BreakMecanico>(
            "INSERT INTO breaks_mecanico (mecanico_id, hora_inicio, mes, anno) \
             VALUES ($1, NOW(), EXTRACT(MONTH FROM NOW())::int, EXTRACT(YEAR FROM NOW())::int) \
             RETURNING *",
        )
        .bind(mecanico_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(registro)
    }

    /// Cerrar el break abierto del mecánico; None si no había ninguno
    pub async fn close_open(&self, mecanico_id: i32) -> AppResult<Option<BreakMecanico>> {
        let registro = sqlx::query_as::<_, BreakMecanico>(
            "UPDATE breaks_mecanico \
             SET hora_termino = NOW(), fecha_actualizacion = NOW() \
             WHERE id = ( \
                SELECT id FROM breaks_mecanico \
                WHERE mecanico_id = $1 AND hora_termino IS NULL \
                ORDER BY hora_inicio DESC \
                LIMIT 1 \
             ) \
             RETURNING *",
        )
        .bind(mecanico_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(registro)
    }
}
