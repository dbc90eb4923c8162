//! Modelo de usuarios y horarios semanales
//!
//! Los usuarios cubren todos los roles del sistema (ADMIN, JEFE_TALLER,
//! MECANICO, BODEGUERO, RECEPCIONISTA, CHOFER). El horario semanal solo
//! existe de lunes a viernes.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Usuario del sistema
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Usuario {
    pub id: i32,
    pub rut: Option<String>,
    pub nombre_completo: String,
    pub email: String,
    pub telefono: Option<String>,
    pub rol: String,
    #[serde(skip_serializing)]
    pub hash_contrasena: String,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

/// Ventana horaria de un día laboral
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiaHorario {
    pub activo: bool,
    pub hora_inicio: Option<NaiveTime>,
    pub hora_salida: Option<NaiveTime>,
    pub colacion_inicio: Option<NaiveTime>,
    pub colacion_salida: Option<NaiveTime>,
}

/// Horario semanal de un usuario, indexado por día (lunes a viernes)
///
/// Se construye una sola vez por fila de usuario a partir de las cinco
/// columnas nombradas de `horarios_trabajo`, en vez de re-derivar el día
/// por ramas condicionales en cada consulta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorarioSemanal {
    pub lunes: DiaHorario,
    pub martes: DiaHorario,
    pub miercoles: DiaHorario,
    pub jueves: DiaHorario,
    pub viernes: DiaHorario,
}

impl HorarioSemanal {
    /// Ventana de colación para un día de la semana (1=lunes .. 5=viernes,
    /// convención DOW de SQL). Fuera de ese rango no hay colación.
    pub fn colacion(&self, dia_semana: i32) -> Option<(NaiveTime, NaiveTime)> {
        let dia = match dia_semana {
            1 => &self.lunes,
            2 => &self.martes,
            3 => &self.miercoles,
            4 => &self.jueves,
            5 => &self.viernes,
            _ => return None,
        };
        match (dia.colacion_inicio, dia.colacion_salida) {
            (Some(inicio), Some(salida)) => Some((inicio, salida)),
            _ => None,
        }
    }
}

/// Usuario junto a su horario (si lo tiene configurado)
#[derive(Debug, Clone, Serialize)]
pub struct UsuarioConHorario {
    #[serde(flatten)]
    pub usuario: Usuario,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horario: Option<HorarioSemanal>,
}
