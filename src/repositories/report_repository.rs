//! Consulta cruda del reporte mensual de colaciones
//!
//! Trae cada break finalizado del mes junto con la ventana de colación del
//! día de la semana en que ocurrió. El filtro de ventana y la agregación por
//! mecánico son lógica pura y viven en el servicio de reportes.

use sqlx::PgPool;

use crate::models::report::BreakReportRow;
use crate::utils::errors::AppResult;

pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Breaks finalizados de mecánicos en un mes, con la colación configurada
    /// para el día de la semana del break (EXTRACT(DOW): 0=domingo..6=sábado).
    pub async fn find_breaks_for_month(
        &self,
        mes: u32,
        anno: i32,
    ) -> AppResult<Vec<BreakReportRow>> {
        let rows = sqlx::query_as::<_, BreakReportRow>(
            r#"
            SELECT
                u.id AS mecanico_id,
                u.rut AS mecanico_rut,
                u.nombre_completo AS mecanico_nombre,
                u.email AS mecanico_email,
                b.id AS break_id,
                b.hora_inicio,
                b.hora_termino,
                EXTRACT(DOW FROM b.hora_inicio)::int AS dia_semana,
                CASE EXTRACT(DOW FROM b.hora_inicio)::int
                    WHEN 1 THEN h.lunes_colacion_inicio
                    WHEN 2 THEN h.martes_colacion_inicio
                    WHEN 3 THEN h.miercoles_colacion_inicio
                    WHEN 4 THEN h.jueves_colacion_inicio
                    WHEN 5 THEN h.viernes_colacion_inicio
                END AS colacion_inicio,
                CASE EXTRACT(DOW FROM b.hora_inicio)::int
                    WHEN 1 THEN h.lunes_colacion_salida
                    WHEN 2 THEN h.martes_colacion_salida
                    WHEN 3 THEN h.miercoles_colacion_salida
                    WHEN 4 THEN h.jueves_colacion_salida
                    WHEN 5 THEN h.viernes_colacion_salida
                END AS colacion_salida
            FROM breaks_mecanico b
            INNER JOIN usuarios u ON u.id = b.mecanico_id
            LEFT JOIN horarios_trabajo h ON h.usuario_id = u.id
            WHERE b.mes = $1
              AND b.anno = $2
              AND b.hora_termino IS NOT NULL
              AND u.rol = 'MECANICO'
            ORDER BY u.nombre_completo ASC, b.hora_inicio ASC
            "#,
        )
        .bind(mes as i32)
        .bind(anno)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
