//! Acceso a datos de notificaciones

use sqlx::PgPool;

use crate::models::notificacion::Notificacion;
use crate::utils::errors::AppResult;

pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        usuario_id: i32,
        titulo: &str,
        mensaje: &str,
        tipo_notificacion: &str,
        tipo_entidad_relacionada: Option<&str>,
        entidad_relacionada_id: Option<i32>,
    ) -> AppResult<Notificacion> {
        let notificacion = sqlx::query_as::<_, Notificacion>(
            "INSERT INTO notificaciones \
                (usuario_id, titulo, mensaje, tipo_notificacion, tipo_entidad_relacionada, entidad_relacionada_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(usuario_id)
        .bind(titulo)
        .bind(mensaje)
        .bind(tipo_notificacion)
        .bind(tipo_entidad_relacionada)
        .bind(entidad_relacionada_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(notificacion)
    }

    pub async fn find_by_usuario(
        &self,
        usuario_id: i32,
        solo_no_leidas: bool,
    ) -> AppResult<Vec<Notificacion>> {
        let notificaciones = if solo_no_leidas {
            sqlx::query_as::<_, Notificacion>(
                "SELECT * FROM notificaciones \
                 WHERE usuario_id = $1 AND leida = false \
                 ORDER BY fecha_creacion DESC",
            )
            .bind(usuario_id)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Notificacion>(
                "SELECT * FROM notificaciones \
                 WHERE usuario_id = $1 \
                 ORDER BY fecha_creacion DESC",
            )
            .bind(usuario_id)
            .fetch_all(&self.pool)
            .await?
        };
        Ok(notificaciones)
    }

    pub async fn count_unread(&self, usuario_id: i32) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notificaciones WHERE usuario_id = $1 AND leida = false",
        )
        .bind(usuario_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Marcar una notificación como leída; solo afecta las del propio usuario
    pub async fn mark_read(&self, id: i32, usuario_id: i32) -> AppResult<Option<Notificacion>> {
        let notificacion = sqlx::query_as::<_, Notificacion>(
            "UPDATE notificaciones \
             SET leida = true, fecha_lectura = NOW() \
             WHERE id = $1 AND usuario_id = $2 \
             RETURNING *",
        )
        .bind(id)
        .bind(usuario_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(notificacion)
    }

    pub async fn mark_all_read(&self, usuario_id: i32) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notificaciones \
             SET leida = true, fecha_lectura = NOW() \
             WHERE usuario_id = $1 AND leida = false",
        )
        .bind(usuario_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
