//! Tipos del reporte mensual de breaks

use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;

/// Fila cruda de la consulta del reporte: break + mecánico + ventana de
/// colación del día de la semana en que inició el break
///
/// `dia_semana` usa la convención DOW de SQL (0=domingo .. 6=sábado).
/// La colación viene resuelta por un CASE sobre las columnas por día de
/// `horarios_trabajo`; NULL significa "sin colación configurada ese día".
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BreakReportRow {
    pub mecanico_id: i32,
    pub mecanico_rut: Option<String>,
    pub mecanico_nombre: String,
    pub mecanico_email: String,
    pub break_id: i32,
    pub hora_inicio: DateTime<Utc>,
    pub hora_termino: Option<DateTime<Utc>>,
    pub dia_semana: i32,
    pub colacion_inicio: Option<NaiveTime>,
    pub colacion_salida: Option<NaiveTime>,
}

/// Detalle de un break contabilizado
#[derive(Debug, Clone, Serialize)]
pub struct BreakDetalle {
    pub id: i32,
    pub hora_inicio: DateTime<Utc>,
    pub hora_termino: Option<DateTime<Utc>>,
}

/// Resumen de breaks por mecánico (derivado, nunca persistido)
#[derive(Debug, Clone, Serialize)]
pub struct MecanicoBreakResumen {
    pub mecanico_id: i32,
    pub mecanico_rut: String,
    pub mecanico_nombre: String,
    pub mecanico_email: String,
    pub total_breaks: i64,
    pub total_minutos: i64,
    pub total_horas_formateado: String,
    pub breaks: Vec<BreakDetalle>,
}

/// Reporte mensual de breaks
#[derive(Debug, Serialize)]
pub struct BreaksReport {
    pub mes: u32,
    pub anno: i32,
    pub total_mecanicos: usize,
    pub total_breaks: usize,
    pub mecanicos: Vec<MecanicoBreakResumen>,
}
