//! Consultas genéricas de historial
//!
//! Las siete consultas de historial comparten la misma forma: filtros
//! opcionales conjuntivos (búsqueda ILIKE, rango de fechas, igualdad por FK),
//! orden descendente por la columna canónica de tiempo y paginación opcional.
//! En vez de siete funciones a mano, cada tipo de entidad se describe con un
//! descriptor declarativo (tablas/joins, columnas de búsqueda, columna de
//! fecha, predicados de usuario/taller) y una proyección por fila; un único
//! runner arma ambas queries (count + data) con `QueryBuilder`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::dto::history_dto::HistoryFilters;
use crate::models::history::HistoryEntityType;
use crate::utils::errors::AppResult;

/// Proyección de una fila cruda a un registro plano del historial
type Projection = fn(&PgRow) -> AppResult<Value>;

/// Descriptor declarativo de una entidad del historial
pub struct HistoryEntity {
    /// SELECT con joins y aliases de columnas
    pub base_query: &'static str,
    /// COUNT sobre el mismo FROM y joins (los filtros referencian aliases)
    pub count_query: &'static str,
    /// Columnas contra las que aplica la búsqueda libre (ILIKE, OR entre sí)
    pub search_columns: &'static [&'static str],
    /// Columna canónica de tiempo (rango de fechas y ORDER BY DESC)
    pub date_column: &'static str,
    /// Columnas FK de usuario (igualdad, OR entre sí)
    pub user_columns: &'static [&'static str],
    /// Columna FK de taller, si la entidad la tiene
    pub taller_column: Option<&'static str>,
    pub projection: Projection,
}

impl HistoryEntity {
    /// Descriptor para un tipo de entidad
    pub fn for_type(entity_type: HistoryEntityType) -> &'static HistoryEntity {
        match entity_type {
            HistoryEntityType::SolicitudesRepuestos => &SOLICITUDES_REPUESTOS,
            HistoryEntityType::MovimientosRepuestos => &MOVIMIENTOS_REPUESTOS,
            HistoryEntityType::OrdenesTrabajo => &ORDENES_TRABAJO,
            HistoryEntityType::SolicitudesMantenimiento => &SOLICITUDES_MANTENIMIENTO,
            HistoryEntityType::LogEstadosOt => &LOG_ESTADOS_OT,
            HistoryEntityType::EntregasVehiculos => &ENTREGAS_VEHICULOS,
            HistoryEntityType::BreaksMecanico => &BREAKS_MECANICO,
        }
    }
}

pub struct HistoryRepository {
    pool: PgPool,
}

impl HistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ejecutar la consulta de datos (sin paginar) para una entidad
    pub async fn fetch_all(
        &self,
        entity: &HistoryEntity,
        filters: &HistoryFilters,
    ) -> AppResult<Vec<Value>> {
        let mut qb = QueryBuilder::<Postgres>::new(entity.base_query);
        push_filters(&mut qb, entity, filters);
        qb.push(" ORDER BY ");
        qb.push(entity.date_column);
        qb.push(" DESC");

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(entity.projection).collect()
    }

    /// Ejecutar el par count + data paginado para una entidad
    ///
    /// Las dos consultas se esperan en paralelo; no dependen entre sí.
    pub async fn fetch_page(
        &self,
        entity: &HistoryEntity,
        filters: &HistoryFilters,
        page: i64,
        limit: i64,
    ) -> AppResult<(Vec<Value>, i64)> {
        let offset = (page - 1) * limit;

        let mut data_qb = QueryBuilder::<Postgres>::new(entity.base_query);
        push_filters(&mut data_qb, entity, filters);
        data_qb.push(" ORDER BY ");
        data_qb.push(entity.date_column);
        data_qb.push(" DESC LIMIT ");
        data_qb.push_bind(limit);
        data_qb.push(" OFFSET ");
        data_qb.push_bind(offset);

        let mut count_qb = QueryBuilder::<Postgres>::new(entity.count_query);
        push_filters(&mut count_qb, entity, filters);

        let data_fut = data_qb.build().fetch_all(&self.pool);
        let count_fut = count_qb.build_query_scalar::<i64>().fetch_one(&self.pool);
        let (rows, total) = futures::try_join!(data_fut, count_fut)?;

        let data = rows
            .iter()
            .map(entity.projection)
            .collect::<AppResult<Vec<_>>>()?;
        Ok((data, total))
    }
}

/// Agregar los predicados WHERE conjuntivos según los filtros presentes
fn push_filters(
    qb: &mut QueryBuilder<'_, Postgres>,
    entity: &HistoryEntity,
    filters: &HistoryFilters,
) {
    let mut first = true;
    let mut push_connector = |qb: &mut QueryBuilder<'_, Postgres>| {
        qb.push(if first { " WHERE " } else { " AND " });
        first = false;
    };

    if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        push_connector(qb);
        qb.push("(");
        for (i, col) in entity.search_columns.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(*col);
            qb.push(" ILIKE ");
            qb.push_bind(pattern.clone());
        }
        qb.push(")");
    }

    // El rango se compara sobre la fecha para que fechaHasta sea inclusiva
    if let Some(desde) = filters.fecha_desde {
        push_connector(qb);
        qb.push("DATE(");
        qb.push(entity.date_column);
        qb.push(") >= ");
        qb.push_bind(desde);
    }

    if let Some(hasta) = filters.fecha_hasta {
        push_connector(qb);
        qb.push("DATE(");
        qb.push(entity.date_column);
        qb.push(") <= ");
        qb.push_bind(hasta);
    }

    if let Some(usuario_id) = filters.usuario_id {
        push_connector(qb);
        qb.push("(");
        for (i, col) in entity.user_columns.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(*col);
            qb.push(" = ");
            qb.push_bind(usuario_id);
        }
        qb.push(")");
    }

    if let (Some(taller_id), Some(col)) = (filters.taller_id, entity.taller_column) {
        push_connector(qb);
        qb.push(col);
        qb.push(" = ");
        qb.push_bind(taller_id);
    }
}

// ---- helpers de proyección --------------------------------------------------

fn ts(row: &PgRow, col: &str) -> AppResult<Value> {
    let value: Option<DateTime<Utc>> = row.try_get(col)?;
    Ok(match value {
        Some(v) => Value::String(v.to_rfc3339()),
        None => Value::Null,
    })
}

fn text(row: &PgRow, col: &str) -> AppResult<Value> {
    let value: Option<String> = row.try_get(col)?;
    Ok(value.map(Value::String).unwrap_or(Value::Null))
}

fn int(row: &PgRow, col: &str) -> AppResult<Value> {
    let value: Option<i32> = row.try_get(col)?;
    Ok(value.map(|v| json!(v)).unwrap_or(Value::Null))
}

fn decimal(row: &PgRow, col: &str) -> AppResult<Value> {
    let value: Option<Decimal> = row.try_get(col)?;
    Ok(value
        .map(|v| Value::String(v.to_string()))
        .unwrap_or(Value::Null))
}

// ---- descriptores por entidad ----------------------------------------------

static SOLICITUDES_REPUESTOS: HistoryEntity = HistoryEntity {
    base_query: "SELECT sol.id, ot.numero_ot, rep.nombre AS repuesto, rep.sku, \
                 sol.cantidad_solicitada, sol.urgencia, sol.estado, sol.comentarios, \
                 usuario.nombre_completo AS solicitado_por, sol.fecha_solicitud, \
                 sol.fecha_aprobacion, sol.fecha_estimada_entrega \
                 FROM solicitudes_repuestos sol \
                 LEFT JOIN ordenes_trabajo ot ON ot.id = sol.orden_trabajo_id \
                 LEFT JOIN repuestos rep ON rep.id = sol.repuesto_id \
                 LEFT JOIN usuarios usuario ON usuario.id = sol.solicitado_por",
    count_query: "SELECT COUNT(sol.id) \
                  FROM solicitudes_repuestos sol \
                  LEFT JOIN ordenes_trabajo ot ON ot.id = sol.orden_trabajo_id \
                  LEFT JOIN repuestos rep ON rep.id = sol.repuesto_id \
                  LEFT JOIN usuarios usuario ON usuario.id = sol.solicitado_por",
    search_columns: &["rep.nombre", "rep.sku", "ot.numero_ot::text"],
    date_column: "sol.fecha_solicitud",
    user_columns: &["sol.solicitado_por"],
    taller_column: None,
    projection: |row| {
        let mut obj = Map::new();
        obj.insert("id".into(), int(row, "id")?);
        obj.insert("numero_ot".into(), int(row, "numero_ot")?);
        obj.insert("repuesto".into(), text(row, "repuesto")?);
        obj.insert("sku".into(), text(row, "sku")?);
        obj.insert("cantidad_solicitada".into(), int(row, "cantidad_solicitada")?);
        obj.insert("urgencia".into(), text(row, "urgencia")?);
        obj.insert("estado".into(), text(row, "estado")?);
        obj.insert("comentarios".into(), text(row, "comentarios")?);
        obj.insert("solicitado_por".into(), text(row, "solicitado_por")?);
        obj.insert("fecha_solicitud".into(), ts(row, "fecha_solicitud")?);
        obj.insert("fecha_aprobacion".into(), ts(row, "fecha_aprobacion")?);
        obj.insert("fecha_estimada_entrega".into(), ts(row, "fecha_estimada_entrega")?);
        Ok(Value::Object(obj))
    },
};

static MOVIMIENTOS_REPUESTOS: HistoryEntity = HistoryEntity {
    base_query: "SELECT mov.id, rep.nombre AS repuesto, rep.sku, mov.tipo_movimiento, \
                 mov.cantidad, mov.costo_unitario, mov.motivo, \
                 usuario.nombre_completo AS movido_por, taller.nombre AS taller, \
                 ot.numero_ot, mov.fecha_movimiento \
                 FROM movimientos_repuestos mov \
                 LEFT JOIN repuestos rep ON rep.id = mov.repuesto_id \
                 LEFT JOIN usuarios usuario ON usuario.id = mov.movido_por \
                 LEFT JOIN talleres taller ON taller.id = mov.taller_id \
                 LEFT JOIN ordenes_trabajo ot ON ot.id = mov.orden_trabajo_id",
    count_query: "SELECT COUNT(mov.id) \
                  FROM movimientos_repuestos mov \
                  LEFT JOIN repuestos rep ON rep.id = mov.repuesto_id \
                  LEFT JOIN usuarios usuario ON usuario.id = mov.movido_por \
                  LEFT JOIN talleres taller ON taller.id = mov.taller_id \
                  LEFT JOIN ordenes_trabajo ot ON ot.id = mov.orden_trabajo_id",
    search_columns: &["rep.nombre", "rep.sku"],
    date_column: "mov.fecha_movimiento",
    user_columns: &["mov.movido_por"],
    taller_column: Some("mov.taller_id"),
    projection: |row| {
        let mut obj = Map::new();
        obj.insert("id".into(), int(row, "id")?);
        obj.insert("repuesto".into(), text(row, "repuesto")?);
        obj.insert("sku".into(), text(row, "sku")?);
        obj.insert("tipo_movimiento".into(), text(row, "tipo_movimiento")?);
        obj.insert("cantidad".into(), int(row, "cantidad")?);
        obj.insert("costo_unitario".into(), decimal(row, "costo_unitario")?);
        obj.insert("motivo".into(), text(row, "motivo")?);
        obj.insert("movido_por".into(), text(row, "movido_por")?);
        obj.insert("taller".into(), text(row, "taller")?);
        obj.insert("numero_ot".into(), int(row, "numero_ot")?);
        obj.insert("fecha_movimiento".into(), ts(row, "fecha_movimiento")?);
        Ok(Value::Object(obj))
    },
};

static ORDENES_TRABAJO: HistoryEntity = HistoryEntity {
    base_query: "SELECT ot.id, ot.numero_ot, veh.patente AS vehiculo, \
                 mecanico.nombre_completo AS mecanico, ot.estado, ot.prioridad, \
                 ot.descripcion_problema, taller.nombre AS taller, ot.fecha_creacion, \
                 ot.fecha_asignacion, ot.fecha_inicio_trabajo, ot.fecha_finalizacion, \
                 ot.fecha_cierre \
                 FROM ordenes_trabajo ot \
                 LEFT JOIN vehiculos veh ON veh.id = ot.vehiculo_id \
                 LEFT JOIN usuarios mecanico ON mecanico.id = ot.mecanico_asignado_id \
                 LEFT JOIN talleres taller ON taller.id = ot.taller_id",
    count_query: "SELECT COUNT(ot.id) \
                  FROM ordenes_trabajo ot \
                  LEFT JOIN vehiculos veh ON veh.id = ot.vehiculo_id \
                  LEFT JOIN usuarios mecanico ON mecanico.id = ot.mecanico_asignado_id \
                  LEFT JOIN talleres taller ON taller.id = ot.taller_id",
    search_columns: &["ot.numero_ot::text", "veh.patente", "mecanico.nombre_completo"],
    date_column: "ot.fecha_creacion",
    user_columns: &["ot.mecanico_asignado_id"],
    taller_column: Some("ot.taller_id"),
    projection: |row| {
        let mut obj = Map::new();
        obj.insert("id".into(), int(row, "id")?);
        obj.insert("numero_ot".into(), int(row, "numero_ot")?);
        obj.insert("vehiculo".into(), text(row, "vehiculo")?);
        obj.insert("mecanico".into(), text(row, "mecanico")?);
        obj.insert("estado".into(), text(row, "estado")?);
        obj.insert("prioridad".into(), text(row, "prioridad")?);
        obj.insert("descripcion_problema".into(), text(row, "descripcion_problema")?);
        obj.insert("taller".into(), text(row, "taller")?);
        obj.insert("fecha_creacion".into(), ts(row, "fecha_creacion")?);
        obj.insert("fecha_asignacion".into(), ts(row, "fecha_asignacion")?);
        obj.insert("fecha_inicio_trabajo".into(), ts(row, "fecha_inicio_trabajo")?);
        obj.insert("fecha_finalizacion".into(), ts(row, "fecha_finalizacion")?);
        obj.insert("fecha_cierre".into(), ts(row, "fecha_cierre")?);
        Ok(Value::Object(obj))
    },
};

static SOLICITUDES_MANTENIMIENTO: HistoryEntity = HistoryEntity {
    base_query: "SELECT sol.id, sol.numero_solicitud, veh.patente AS vehiculo, \
                 conductor.nombre_completo AS conductor, sol.tipo_solicitud, \
                 sol.descripcion_problema, sol.estado, sol.fecha_solicitud, \
                 sol.fecha_aprobacion \
                 FROM solicitudes_mantenimiento sol \
                 LEFT JOIN vehiculos veh ON veh.id = sol.vehiculo_id \
                 LEFT JOIN usuarios conductor ON conductor.id = sol.conductor_id",
    count_query: "SELECT COUNT(sol.id) \
                  FROM solicitudes_mantenimiento sol \
                  LEFT JOIN vehiculos veh ON veh.id = sol.vehiculo_id \
                  LEFT JOIN usuarios conductor ON conductor.id = sol.conductor_id",
    search_columns: &["sol.numero_solicitud", "veh.patente", "conductor.nombre_completo"],
    date_column: "sol.fecha_solicitud",
    user_columns: &["sol.conductor_id"],
    taller_column: None,
    projection: |row| {
        let mut obj = Map::new();
        obj.insert("id".into(), int(row, "id")?);
        obj.insert("numero_solicitud".into(), text(row, "numero_solicitud")?);
        obj.insert("vehiculo".into(), text(row, "vehiculo")?);
        obj.insert("conductor".into(), text(row, "conductor")?);
        obj.insert("tipo_solicitud".into(), text(row, "tipo_solicitud")?);
        obj.insert("descripcion_problema".into(), text(row, "descripcion_problema")?);
        obj.insert("estado".into(), text(row, "estado")?);
        obj.insert("fecha_solicitud".into(), ts(row, "fecha_solicitud")?);
        obj.insert("fecha_aprobacion".into(), ts(row, "fecha_aprobacion")?);
        Ok(Value::Object(obj))
    },
};

static LOG_ESTADOS_OT: HistoryEntity = HistoryEntity {
    base_query: "SELECT log.id, ot.numero_ot, log.estado_anterior, log.estado_nuevo, \
                 log.motivo_cambio, usuario.nombre_completo AS cambiado_por, \
                 log.fecha_cambio \
                 FROM log_estados_ot log \
                 LEFT JOIN ordenes_trabajo ot ON ot.id = log.orden_trabajo_id \
                 LEFT JOIN usuarios usuario ON usuario.id = log.cambiado_por",
    count_query: "SELECT COUNT(log.id) \
                  FROM log_estados_ot log \
                  LEFT JOIN ordenes_trabajo ot ON ot.id = log.orden_trabajo_id \
                  LEFT JOIN usuarios usuario ON usuario.id = log.cambiado_por",
    search_columns: &["ot.numero_ot::text"],
    date_column: "log.fecha_cambio",
    user_columns: &["log.cambiado_por"],
    taller_column: None,
    projection: |row| {
        let mut obj = Map::new();
        obj.insert("id".into(), int(row, "id")?);
        obj.insert("numero_ot".into(), int(row, "numero_ot")?);
        obj.insert("estado_anterior".into(), text(row, "estado_anterior")?);
        obj.insert("estado_nuevo".into(), text(row, "estado_nuevo")?);
        obj.insert("motivo_cambio".into(), text(row, "motivo_cambio")?);
        obj.insert("cambiado_por".into(), text(row, "cambiado_por")?);
        obj.insert("fecha_cambio".into(), ts(row, "fecha_cambio")?);
        Ok(Value::Object(obj))
    },
};

static ENTREGAS_VEHICULOS: HistoryEntity = HistoryEntity {
    base_query: "SELECT ent.id, ot.numero_ot, ent.tipo_entrega, \
                 conductor.nombre_completo AS conductor, \
                 responsable.nombre_completo AS responsable, ent.condicion_vehiculo, \
                 ent.observaciones, ent.fecha_firma \
                 FROM entregas_vehiculos ent \
                 LEFT JOIN ordenes_trabajo ot ON ot.id = ent.orden_trabajo_id \
                 LEFT JOIN usuarios conductor ON conductor.id = ent.conductor_id \
                 LEFT JOIN usuarios responsable ON responsable.id = ent.responsable_taller_id",
    count_query: "SELECT COUNT(ent.id) \
                  FROM entregas_vehiculos ent \
                  LEFT JOIN ordenes_trabajo ot ON ot.id = ent.orden_trabajo_id \
                  LEFT JOIN usuarios conductor ON conductor.id = ent.conductor_id \
                  LEFT JOIN usuarios responsable ON responsable.id = ent.responsable_taller_id",
    search_columns: &["ot.numero_ot::text"],
    date_column: "ent.fecha_firma",
    user_columns: &["ent.conductor_id", "ent.responsable_taller_id"],
    taller_column: None,
    projection: |row| {
        let mut obj = Map::new();
        obj.insert("id".into(), int(row, "id")?);
        obj.insert("numero_ot".into(), int(row, "numero_ot")?);
        obj.insert("tipo_entrega".into(), text(row, "tipo_entrega")?);
        obj.insert("conductor".into(), text(row, "conductor")?);
        obj.insert("responsable".into(), text(row, "responsable")?);
        obj.insert("condicion_vehiculo".into(), text(row, "condicion_vehiculo")?);
        obj.insert("observaciones".into(), text(row, "observaciones")?);
        obj.insert("fecha_firma".into(), ts(row, "fecha_firma")?);
        Ok(Value::Object(obj))
    },
};

static BREAKS_MECANICO: HistoryEntity = HistoryEntity {
    base_query: "SELECT b.id, u.nombre_completo AS mecanico, u.email AS mecanico_email, \
                 b.hora_inicio, b.hora_termino, b.mes, b.anno, b.fecha_creacion, \
                 b.fecha_actualizacion \
                 FROM breaks_mecanico b \
                 LEFT JOIN usuarios u ON u.id = b.mecanico_id",
    count_query: "SELECT COUNT(b.id) \
                  FROM breaks_mecanico b \
                  LEFT JOIN usuarios u ON u.id = b.mecanico_id",
    search_columns: &["u.nombre_completo"],
    date_column: "b.hora_inicio",
    user_columns: &["b.mecanico_id"],
    taller_column: None,
    projection: |row| {
        let hora_inicio: Option<DateTime<Utc>> = row.try_get("hora_inicio")?;
        let hora_termino: Option<DateTime<Utc>> = row.try_get("hora_termino")?;

        let duracion = match (hora_inicio, hora_termino) {
            (Some(inicio), Some(termino)) => {
                let diff_mins = (termino - inicio).num_minutes();
                let horas = diff_mins / 60;
                let minutos = diff_mins % 60;
                let texto = if horas > 0 {
                    format!("{}h {}m", horas, minutos)
                } else {
                    format!("{}m", minutos)
                };
                Value::String(texto)
            }
            (Some(_), None) => Value::String("En curso".to_string()),
            _ => Value::Null,
        };
        let estado = if hora_termino.is_some() {
            "Finalizado"
        } else {
            "En curso"
        };

        let mut obj = Map::new();
        obj.insert("id".into(), int(row, "id")?);
        obj.insert("mecanico".into(), text(row, "mecanico")?);
        obj.insert("mecanico_email".into(), text(row, "mecanico_email")?);
        obj.insert("hora_inicio".into(), ts(row, "hora_inicio")?);
        obj.insert("hora_termino".into(), ts(row, "hora_termino")?);
        obj.insert("duracion".into(), duracion);
        obj.insert("mes".into(), int(row, "mes")?);
        obj.insert("anno".into(), int(row, "anno")?);
        obj.insert("estado".into(), Value::String(estado.to_string()));
        obj.insert("fecha_creacion".into(), ts(row, "fecha_creacion")?);
        obj.insert("fecha_actualizacion".into(), ts(row, "fecha_actualizacion")?);
        Ok(Value::Object(obj))
    },
};
