//! Acceso a datos de solicitudes de mantenimiento

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dto::solicitud_dto::SolicitudFilters;
use crate::models::solicitud::SolicitudMantenimiento;
use crate::utils::errors::AppResult;

/// Lock consultivo para el correlativo `SM-<n>`; clave distinta a la del
/// correlativo de OT para no serializar ambos flujos entre sí.
pub(crate) const NUMERO_SOLICITUD_LOCK: i64 = 0x534d;

pub struct SolicitudRepository {
    pool: PgPool,
}

impl SolicitudRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(
        &self,
        filters: &SolicitudFilters,
    ) -> AppResult<Vec<SolicitudMantenimiento>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM solicitudes_mantenimiento");
        let mut first = true;
        let mut push_connector = |qb: &mut QueryBuilder<'_, Postgres>| {
            qb.push(if first { " WHERE " } else { " AND " });
            first = false;
        };

        if let Some(estado) = filters.estado.as_deref() {
            push_connector(&mut qb);
            qb.push("UPPER(estado) = UPPER(");
            qb.push_bind(estado);
            qb.push(")");
        }
        if let Some(conductor_id) = filters.conductor_id {
            push_connector(&mut qb);
            qb.push("conductor_id = ");
            qb.push_bind(conductor_id);
        }
        qb.push(" ORDER BY fecha_solicitud DESC");

        let solicitudes = qb
            .build_query_as::<SolicitudMantenimiento>()
            .fetch_all(&self.pool)
            .await?;
        Ok(solicitudes)
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<SolicitudMantenimiento>> {
        let solicitud = sqlx::query_as::<_, SolicitudMantenimiento>(
            "SELECT * FROM solicitudes_mantenimiento WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(solicitud)
    }

    /// Crear una solicitud con número correlativo SM-<n>
    pub async fn create(
        &self,
        vehiculo_id: i32,
        conductor_id: i32,
        tipo_solicitud: &str,
        descripcion_problema: &str,
    ) -> AppResult<SolicitudMantenimiento> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(NUMERO_SOLICITUD_LOCK)
            .execute(&mut *tx)
            .await?;

        let solicitud = sqlx::query_as::<_, SolicitudMantenimiento>(
            "INSERT INTO solicitudes_mantenimiento \
                (numero_solicitud, vehiculo_id, conductor_id, tipo_solicitud, descripcion_problema, estado) \
             VALUES ( \
                'SM-' || (SELECT COALESCE(MAX(id), 0) + 1 FROM solicitudes_mantenimiento), \
                $1, $2, UPPER($3), $4, 'PENDIENTE' \
             ) \
             RETURNING *",
        )
        .bind(vehiculo_id)
        .bind(conductor_id)
        .bind(tipo_solicitud)
        .bind(descripcion_problema)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(solicitud)
    }

    /// Aprobar o rechazar una solicitud pendiente
    pub async fn respond(
        &self,
        id: i32,
        estado: &str,
        aprobado_por: i32,
    ) -> AppResult<Option<SolicitudMantenimiento>> {
        let solicitud = sqlx::query_as::<_, SolicitudMantenimiento>(
            "UPDATE solicitudes_mantenimiento SET \
                estado = UPPER($2), \
                aprobado_por = $3, \
                fecha_aprobacion = CASE WHEN UPPER($2) = 'APROBADA' THEN NOW() ELSE fecha_aprobacion END \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .bind(aprobado_por)
        .fetch_optional(&self.pool)
        .await?;
        Ok(solicitud)
    }
}

#[cfg(test)]
mod tests {
    use super::NUMERO_SOLICITUD_LOCK;
    use crate::repositories::workorder_repository::NUMERO_OT_LOCK;

    #[test]
    fn test_locks_de_correlativos_son_independientes() {
        // Claves iguales serializarían la creación de OTs contra la de
        // solicitudes de mantenimiento
        assert_ne!(NUMERO_SOLICITUD_LOCK, NUMERO_OT_LOCK);
    }
}
