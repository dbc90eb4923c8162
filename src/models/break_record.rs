//! Modelo de breaks de mecánicos

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Break registrado por un mecánico
///
/// `hora_termino` queda en NULL mientras el break está en curso y se fija
/// una única vez al reanudar el trabajo.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BreakMecanico {
    pub id: i32,
    pub mecanico_id: i32,
    pub hora_inicio: DateTime<Utc>,
    pub hora_termino: Option<DateTime<Utc>>,
    pub mes: i32,
    pub anno: i32,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}
