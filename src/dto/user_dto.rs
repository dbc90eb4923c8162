//! DTOs de usuarios, mecánicos y horarios

use chrono::NaiveTime;
use serde::Deserialize;
use validator::Validate;

use crate::models::user::{DiaHorario, HorarioSemanal};

/// Query params del listado de usuarios
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub rol: Option<String>,
}

/// Request para crear un mecánico
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMechanicRequest {
    #[validate(length(min = 1))]
    pub nombre_completo: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub rut: Option<String>,
    pub telefono: Option<String>,
    pub taller_id: Option<i32>,
}

/// Request para crear un usuario con rol arbitrario
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserWithRoleRequest {
    #[validate(length(min = 1))]
    pub nombre_completo: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub rol: String,
    pub rut: Option<String>,
    pub telefono: Option<String>,
}

/// Request de actualización parcial de usuario
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub nombre_completo: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub rol: Option<String>,
    pub rut: Option<String>,
    pub telefono: Option<String>,
    pub activo: Option<bool>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

/// Ventana horaria de un día en el request de horario
#[derive(Debug, Default, Deserialize)]
pub struct DiaHorarioRequest {
    #[serde(default)]
    pub activo: bool,
    pub hora_inicio: Option<NaiveTime>,
    pub hora_salida: Option<NaiveTime>,
    pub colacion_inicio: Option<NaiveTime>,
    pub colacion_salida: Option<NaiveTime>,
}

/// Request de actualización del horario semanal
#[derive(Debug, Default, Deserialize)]
pub struct UpdateScheduleRequest {
    pub lunes: Option<DiaHorarioRequest>,
    pub martes: Option<DiaHorarioRequest>,
    pub miercoles: Option<DiaHorarioRequest>,
    pub jueves: Option<DiaHorarioRequest>,
    pub viernes: Option<DiaHorarioRequest>,
}

impl UpdateScheduleRequest {
    /// Normalizar el horario: un día inactivo pierde todas sus horas
    pub fn normalizar(self) -> HorarioSemanal {
        fn dia(src: Option<DiaHorarioRequest>) -> DiaHorario {
            let src = src.unwrap_or_default();
            if src.activo {
                DiaHorario {
                    activo: true,
                    hora_inicio: src.hora_inicio,
                    hora_salida: src.hora_salida,
                    colacion_inicio: src.colacion_inicio,
                    colacion_salida: src.colacion_salida,
                }
            } else {
                DiaHorario::default()
            }
        }

        HorarioSemanal {
            lunes: dia(self.lunes),
            martes: dia(self.martes),
            miercoles: dia(self.miercoles),
            jueves: dia(self.jueves),
            viernes: dia(self.viernes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizar_inactive_day_drops_times() {
        let request = UpdateScheduleRequest {
            lunes: Some(DiaHorarioRequest {
                activo: false,
                hora_inicio: Some(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let horario = request.normalizar();
        assert!(!horario.lunes.activo);
        assert!(horario.lunes.hora_inicio.is_none());
    }

    #[test]
    fn test_normalizar_active_day_keeps_times() {
        let request = UpdateScheduleRequest {
            martes: Some(DiaHorarioRequest {
                activo: true,
                colacion_inicio: Some(NaiveTime::from_hms_opt(13, 0, 0).unwrap()),
                colacion_salida: Some(NaiveTime::from_hms_opt(14, 0, 0).unwrap()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let horario = request.normalizar();
        assert!(horario.martes.activo);
        assert!(horario.colacion(2).is_some());
    }
}
