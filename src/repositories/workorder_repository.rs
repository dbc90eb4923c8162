//! Acceso a datos de órdenes de trabajo
//!
//! Cada cambio de estado deja un registro en `log_estados_ot` dentro de la
//! misma transacción que modifica la OT.

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dto::workorder_dto::{CreateWorkOrderRequest, WorkOrderFilters};
use crate::models::workorder::{EntregaVehiculo, OrdenTrabajo};
use crate::utils::errors::AppResult;

/// Lock consultivo que serializa la asignación del correlativo `numero_ot`;
/// sin él, dos creaciones concurrentes pueden leer el mismo MAX.
pub(crate) const NUMERO_OT_LOCK: i64 = 0x4f54;

pub struct WorkOrderRepository {
    pool: PgPool,
}

impl WorkOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, filters: &WorkOrderFilters) -> AppResult<Vec<OrdenTrabajo>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM ordenes_trabajo");
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
        if let Some(mecanico_id) = filters.mecanico_id {
            push_connector(&mut qb);
            qb.push("mecanico_asignado_id = ");
            qb.push_bind(mecanico_id);
        }
        if let Some(vehiculo_id) = filters.vehiculo_id {
            push_connector(&mut qb);
            qb.push("vehiculo_id = ");
            qb.push_bind(vehiculo_id);
        }
        qb.push(" ORDER BY fecha_creacion DESC");

        let ordenes = qb
            .build_query_as::<OrdenTrabajo>()
            .fetch_all(&self.pool)
            .await?;
        Ok(ordenes)
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<OrdenTrabajo>> {
        let orden = sqlx::query_as::<_, OrdenTrabajo>("SELECT * FROM ordenes_trabajo WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(orden)
    }

    /// Crear una OT con número correlativo y registrar el estado inicial
    pub async fn create(
        &self,
        req: &CreateWorkOrderRequest,
        jefe_taller_id: i32,
    ) -> AppResult<OrdenTrabajo> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(NUMERO_OT_LOCK)
            .execute(&mut *tx)
            .await?;

        let orden = sqlx::query_as::<_, OrdenTrabajo>(
            "INSERT INTO ordenes_trabajo \
                (numero_ot, vehiculo_id, jefe_taller_id, taller_id, estado, prioridad, descripcion_problema) \
             VALUES ( \
                (SELECT COALESCE(MAX(numero_ot), 0) + 1 FROM ordenes_trabajo), \
                $1, $2, $3, 'CREADA', COALESCE(UPPER($4), 'NORMAL'), $5 \
             ) \
             RETURNING *",
        )
        .bind(req.vehiculo_id)
        .bind(jefe_taller_id)
        .bind(req.taller_id)
        .bind(req.prioridad.as_deref())
        .bind(req.descripcion_problema.as_str())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO log_estados_ot (orden_trabajo_id, estado_anterior, estado_nuevo, motivo_cambio, cambiado_por) \
             VALUES ($1, NULL, 'CREADA', 'Creación de la orden', $2)",
        )
        .bind(orden.id)
        .bind(jefe_taller_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(orden)
    }

    pub async fn assign_mechanic(
        &self,
        id: i32,
        mecanico_id: i32,
        cambiado_por: i32,
    ) -> AppResult<Option<OrdenTrabajo>> {
        let mut tx = self.pool.begin().await?;

        let orden = sqlx::query_as::<_, OrdenTrabajo>(
            "UPDATE ordenes_trabajo \
             SET mecanico_asignado_id = $2, estado = 'ASIGNADA', fecha_asignacion = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(mecanico_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(orden) = &orden {
            sqlx::query(
                "INSERT INTO log_estados_ot (orden_trabajo_id, estado_anterior, estado_nuevo, motivo_cambio, cambiado_por) \
                 VALUES ($1, NULL, 'ASIGNADA', 'Asignación de mecánico', $2)",
            )
            .bind(orden.id)
            .bind(cambiado_por)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(orden)
    }

    /// Cambiar el estado de la OT y anotar el log con el estado anterior
    pub async fn change_estado(
        &self,
        id: i32,
        estado: &str,
        motivo: Option<&str>,
        cambiado_por: i32,
    ) -> AppResult<Option<OrdenTrabajo>> {
        let mut tx = self.pool.begin().await?;

        let anterior = sqlx::query_scalar::<_, String>(
            "SELECT estado FROM ordenes_trabajo WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(anterior) = anterior else {
            tx.commit().await?;
            return Ok(None);
        };

        let orden = sqlx::query_as::<_, OrdenTrabajo>(
            "UPDATE ordenes_trabajo SET \
                estado = UPPER($2), \
                fecha_inicio_trabajo = CASE WHEN UPPER($2) = 'EN_PROCESO' AND fecha_inicio_trabajo IS NULL THEN NOW() ELSE fecha_inicio_trabajo END, \
                fecha_finalizacion = CASE WHEN UPPER($2) = 'FINALIZADA' THEN NOW() ELSE fecha_finalizacion END \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO log_estados_ot (orden_trabajo_id, estado_anterior, estado_nuevo, motivo_cambio, cambiado_por) \
             VALUES ($1, $2, UPPER($3), $4, $5)",
        )
        .bind(id)
        .bind(&anterior)
        .bind(estado)
        .bind(motivo)
        .bind(cambiado_por)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(orden))
    }

    /// Cerrar una OT finalizada
    pub async fn close(
        &self,
        id: i32,
        observaciones: Option<&str>,
        cambiado_por: i32,
    ) -> AppResult<Option<OrdenTrabajo>> {
        let mut tx = self.pool.begin().await?;

        let orden = sqlx::query_as::<_, OrdenTrabajo>(
            "UPDATE ordenes_trabajo \
             SET estado = 'CERRADA', fecha_cierre = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(orden) = &orden {
            sqlx::query(
                "INSERT INTO log_estados_ot (orden_trabajo_id, estado_anterior, estado_nuevo, motivo_cambio, cambiado_por) \
                 VALUES ($1, 'FINALIZADA', 'CERRADA', $2, $3)",
            )
            .bind(orden.id)
            .bind(observaciones)
            .bind(cambiado_por)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(orden)
    }

    /// Registrar la entrega o retiro del vehículo de una OT
    pub async fn create_entrega(
        &self,
        orden_trabajo_id: i32,
        tipo_entrega: &str,
        conductor_id: Option<i32>,
        responsable_taller_id: i32,
        condicion_vehiculo: Option<&str>,
        observaciones: Option<&str>,
    ) -> AppResult<EntregaVehiculo> {
        let entrega = sqlx::query_as::<_, EntregaVehiculo>(
            "INSERT INTO entregas_vehiculos \
                (orden_trabajo_id, tipo_entrega, conductor_id, responsable_taller_id, condicion_vehiculo, observaciones) \
             VALUES ($1, UPPER($2), $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(orden_trabajo_id)
        .bind(tipo_entrega)
        .bind(conductor_id)
        .bind(responsable_taller_id)
        .bind(condicion_vehiculo)
        .bind(observaciones)
        .fetch_one(&self.pool)
        .await?;
        Ok(entrega)
    }
}
