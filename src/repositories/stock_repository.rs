//! Acceso a datos de repuestos, inventario y movimientos
//!
//! Un movimiento de stock ajusta el inventario del taller en la misma
//! transacción: ENTRADA suma, SALIDA resta y nunca deja la cantidad negativa.

use sqlx::PgPool;

use crate::dto::stock_dto::{CreateMovimientoRequest, CreateRepuestoRequest};
use crate::models::stock::{Inventario, MovimientoRepuesto, Repuesto, SolicitudRepuesto};
use crate::utils::errors::{bad_request_error, AppResult};

pub struct StockRepository {
    pool: PgPool,
}

impl StockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_repuestos(&self, search: Option<&str>) -> AppResult<Vec<Repuesto>> {
        let repuestos = match search.filter(|s| !s.is_empty()) {
            Some(search) => {
                let pattern = format!("%{}%", search);
                sqlx::query_as::<_, Repuesto>(
                    "SELECT * FROM repuestos \
                     WHERE nombre ILIKE $1 OR sku ILIKE $1 \
                     ORDER BY nombre ASC",
                )
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Repuesto>("SELECT * FROM repuestos ORDER BY nombre ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(repuestos)
    }

    pub async fn find_repuesto_by_id(&self, id: i32) -> AppResult<Option<Repuesto>> {
        let repuesto = sqlx::query_as::<_, Repuesto>("SELECT * FROM repuestos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(repuesto)
    }

    pub async fn find_repuesto_by_sku(&self, sku: &str) -> AppResult<Option<Repuesto>> {
        let repuesto =
            sqlx::query_as::<_, Repuesto>("SELECT * FROM repuestos WHERE UPPER(sku) = UPPER($1)")
                .bind(sku)
                .fetch_optional(&self.pool)
                .await?;
        Ok(repuesto)
    }

    pub async fn create_repuesto(&self, req: &CreateRepuestoRequest) -> AppResult<Repuesto> {
        let repuesto = sqlx::query_as::<_, Repuesto>(
            "INSERT INTO repuestos (nombre, sku, descripcion, stock_minimo) \
             VALUES ($1, UPPER($2), $3, COALESCE($4, 0)) \
             RETURNING *",
        )
        .bind(&req.nombre)
        .bind(&req.sku)
        .bind(req.descripcion.as_deref())
        .bind(req.stock_minimo)
        .fetch_one(&self.pool)
        .await?;
        Ok(repuesto)
    }

    /// Inventario de un taller con el detalle del repuesto embebido
    pub async fn find_inventario(&self, taller_id: i32) -> AppResult<Vec<Inventario>> {
        let inventario = sqlx::query_as::<_, Inventario>(
            "SELECT * FROM inventario WHERE taller_id = $1 ORDER BY repuesto_id ASC",
        )
        .bind(taller_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(inventario)
    }

    /// Registrar un movimiento y ajustar el inventario del taller
    pub async fn create_movimiento(
        &self,
        req: &CreateMovimientoRequest,
        movido_por: i32,
    ) -> AppResult<MovimientoRepuesto> {
        let tipo = req.tipo_movimiento.to_uppercase();
        let delta = match tipo.as_str() {
            "ENTRADA" => req.cantidad,
            "SALIDA" => -req.cantidad,
            _ => {
                return Err(bad_request_error(
                    "tipo_movimiento debe ser ENTRADA o SALIDA",
                ))
            }
        };

        let mut tx = self.pool.begin().await?;

        if let Some(taller_id) = req.taller_id {
            let cantidad = sqlx::query_scalar::<_, i32>(
                "INSERT INTO inventario (repuesto_id, taller_id, cantidad) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (repuesto_id, taller_id) DO UPDATE \
                 SET cantidad = inventario.cantidad + $3, fecha_actualizacion = NOW() \
                 RETURNING cantidad",
            )
            .bind(req.repuesto_id)
            .bind(taller_id)
            .bind(delta)
            .fetch_one(&mut *tx)
            .await?;

            if cantidad < 0 {
                tx.rollback().await?;
                return Err(bad_request_error("Stock insuficiente para la salida"));
            }
        }

        let movimiento = sqlx::query_as::<_, MovimientoRepuesto>(
            "INSERT INTO movimientos_repuestos \
                (repuesto_id, tipo_movimiento, cantidad, costo_unitario, motivo, movido_por, taller_id, orden_trabajo_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(req.repuesto_id)
        .bind(&tipo)
        .bind(req.cantidad)
        .bind(req.costo_unitario)
        .bind(req.motivo.as_deref())
        .bind(movido_por)
        .bind(req.taller_id)
        .bind(req.orden_trabajo_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(movimiento)
    }

    pub async fn create_solicitud_repuesto(
        &self,
        orden_trabajo_id: i32,
        repuesto_id: i32,
        cantidad_solicitada: i32,
        urgencia: Option<&str>,
        comentarios: Option<&str>,
        solicitado_por: i32,
    ) -> AppResult<SolicitudRepuesto> {
        let solicitud = sqlx::query_as::<_, SolicitudRepuesto>(
            "INSERT INTO solicitudes_repuestos \
                (orden_trabajo_id, repuesto_id, cantidad_solicitada, urgencia, estado, comentarios, solicitado_por) \
             VALUES ($1, $2, $3, COALESCE(UPPER($4), 'NORMAL'), 'PENDIENTE', $5, $6) \
             RETURNING *",
        )
        .bind(orden_trabajo_id)
        .bind(repuesto_id)
        .bind(cantidad_solicitada)
        .bind(urgencia)
        .bind(comentarios)
        .bind(solicitado_por)
        .fetch_one(&self.pool)
        .await?;
        Ok(solicitud)
    }

    pub async fn find_solicitudes_repuestos(
        &self,
        estado: Option<&str>,
    ) -> AppResult<Vec<SolicitudRepuesto>> {
        let solicitudes = match estado {
            Some(estado) => {
                sqlx::query_as::<_, SolicitudRepuesto>(
                    "SELECT * FROM solicitudes_repuestos \
                     WHERE UPPER(estado) = UPPER($1) \
                     ORDER BY fecha_solicitud DESC",
                )
                .bind(estado)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, SolicitudRepuesto>(
                    "SELECT * FROM solicitudes_repuestos ORDER BY fecha_solicitud DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(solicitudes)
    }

    /// Aprobar o rechazar una solicitud de repuesto
    pub async fn respond_solicitud_repuesto(
        &self,
        id: i32,
        estado: &str,
        comentarios: Option<&str>,
        fecha_estimada_entrega: Option<chrono::DateTime<chrono::Utc>>,
    ) -> AppResult<Option<SolicitudRepuesto>> {
        let solicitud = sqlx::query_as::<_, SolicitudRepuesto>(
            "UPDATE solicitudes_repuestos SET \
                estado = UPPER($2), \
                comentarios = COALESCE($3, comentarios), \
                fecha_estimada_entrega = COALESCE($4, fecha_estimada_entrega), \
                fecha_aprobacion = CASE WHEN UPPER($2) = 'APROBADA' THEN NOW() ELSE fecha_aprobacion END \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .bind(comentarios)
        .bind(fecha_estimada_entrega)
        .fetch_optional(&self.pool)
        .await?;
        Ok(solicitud)
    }
}
