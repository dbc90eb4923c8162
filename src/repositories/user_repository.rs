//! Acceso a datos de usuarios y horarios de trabajo

use chrono::NaiveTime;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::dto::user_dto::UpdateUserRequest;
use crate::models::user::{DiaHorario, HorarioSemanal, Usuario, UsuarioConHorario};
use crate::utils::errors::AppResult;

/// Fila plana de `horarios_trabajo` (una columna por día y campo)
#[derive(sqlx::FromRow)]
struct HorarioRow {
    usuario_id: i32,
    lunes_activo: bool,
    lunes_hora_inicio: Option<NaiveTime>,
    lunes_hora_salida: Option<NaiveTime>,
    lunes_colacion_inicio: Option<NaiveTime>,
    lunes_colacion_salida: Option<NaiveTime>,
    martes_activo: bool,
    martes_hora_inicio: Option<NaiveTime>,
    martes_hora_salida: Option<NaiveTime>,
    martes_colacion_inicio: Option<NaiveTime>,
    martes_colacion_salida: Option<NaiveTime>,
    miercoles_activo: bool,
    miercoles_hora_inicio: Option<NaiveTime>,
    miercoles_hora_salida: Option<NaiveTime>,
    miercoles_colacion_inicio: Option<NaiveTime>,
    miercoles_colacion_salida: Option<NaiveTime>,
    jueves_activo: bool,
    jueves_hora_inicio: Option<NaiveTime>,
    jueves_hora_salida: Option<NaiveTime>,
    jueves_colacion_inicio: Option<NaiveTime>,
    jueves_colacion_salida: Option<NaiveTime>,
    viernes_activo: bool,
    viernes_hora_inicio: Option<NaiveTime>,
    viernes_hora_salida: Option<NaiveTime>,
    viernes_colacion_inicio: Option<NaiveTime>,
    viernes_colacion_salida: Option<NaiveTime>,
}

impl HorarioRow {
    fn into_horario(self) -> HorarioSemanal {
        HorarioSemanal {
            lunes: DiaHorario {
                activo: self.lunes_activo,
                hora_inicio: self.lunes_hora_inicio,
                hora_salida: self.lunes_hora_salida,
                colacion_inicio: self.lunes_colacion_inicio,
                colacion_salida: self.lunes_colacion_salida,
            },
            martes: DiaHorario {
                activo: self.martes_activo,
                hora_inicio: self.martes_hora_inicio,
                hora_salida: self.martes_hora_salida,
                colacion_inicio: self.martes_colacion_inicio,
                colacion_salida: self.martes_colacion_salida,
            },
            miercoles: DiaHorario {
                activo: self.miercoles_activo,
                hora_inicio: self.miercoles_hora_inicio,
                hora_salida: self.miercoles_hora_salida,
                colacion_inicio: self.miercoles_colacion_inicio,
                colacion_salida: self.miercoles_colacion_salida,
            },
            jueves: DiaHorario {
                activo: self.jueves_activo,
                hora_inicio: self.jueves_hora_inicio,
                hora_salida: self.jueves_hora_salida,
                colacion_inicio: self.jueves_colacion_inicio,
                colacion_salida: self.jueves_colacion_salida,
            },
            viernes: DiaHorario {
                activo: self.viernes_activo,
                hora_inicio: self.viernes_hora_inicio,
                hora_salida: self.viernes_hora_salida,
                colacion_inicio: self.viernes_colacion_inicio,
                colacion_salida: self.viernes_colacion_salida,
            },
        }
    }
}

const HORARIO_COLUMNS: &str = "usuario_id, \
    lunes_activo, lunes_hora_inicio, lunes_hora_salida, lunes_colacion_inicio, lunes_colacion_salida, \
    martes_activo, martes_hora_inicio, martes_hora_salida, martes_colacion_inicio, martes_colacion_salida, \
    miercoles_activo, miercoles_hora_inicio, miercoles_hora_salida, miercoles_colacion_inicio, miercoles_colacion_salida, \
    jueves_activo, jueves_hora_inicio, jueves_hora_salida, jueves_colacion_inicio, jueves_colacion_salida, \
    viernes_activo, viernes_hora_inicio, viernes_hora_salida, viernes_colacion_inicio, viernes_colacion_salida";

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listar usuarios con su horario, opcionalmente filtrados por rol
    pub async fn find_all(&self, rol: Option<&str>) -> AppResult<Vec<UsuarioConHorario>> {
        let usuarios = match rol {
            Some(rol) => {
                sqlx::query_as::<_, Usuario>(
                    "SELECT * FROM usuarios WHERE UPPER(rol) = UPPER($1) ORDER BY nombre_completo ASC",
                )
                .bind(rol)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios ORDER BY nombre_completo ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        if usuarios.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = usuarios.iter().map(|u| u.id).collect();
        let horario_rows = sqlx::query_as::<_, HorarioRow>(&format!(
            "SELECT {} FROM horarios_trabajo WHERE usuario_id = ANY($1)",
            HORARIO_COLUMNS
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut horarios: HashMap<i32, HorarioSemanal> = horario_rows
            .into_iter()
            .map(|row| (row.usuario_id, row.into_horario()))
            .collect();

        Ok(usuarios
            .into_iter()
            .map(|usuario| {
                let horario = horarios.remove(&usuario.id);
                UsuarioConHorario { usuario, horario }
            })
            .collect())
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Usuario>> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    pub async fn find_by_id_with_horario(&self, id: i32) -> AppResult<Option<UsuarioConHorario>> {
        let Some(usuario) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let horario = self.find_horario(id).await?;
        Ok(Some(UsuarioConHorario { usuario, horario }))
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Usuario>> {
        let usuario =
            sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE LOWER(email) = LOWER($1)")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(usuario)
    }

    /// true si ya existe un usuario con ese email o ese rut
    pub async fn exists_email_or_rut(&self, email: &str, rut: Option<&str>) -> AppResult<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM usuarios \
             WHERE LOWER(email) = LOWER($1) OR ($2::text IS NOT NULL AND rut = $2)",
        )
        .bind(email)
        .bind(rut)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn create(
        &self,
        nombre_completo: &str,
        rut: Option<&str>,
        email: &str,
        telefono: Option<&str>,
        rol: &str,
        hash_contrasena: &str,
    ) -> AppResult<Usuario> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "INSERT INTO usuarios (nombre_completo, rut, email, telefono, rol, hash_contrasena, activo) \
             VALUES ($1, $2, $3, $4, UPPER($5), $6, true) \
             RETURNING *",
        )
        .bind(nombre_completo)
        .bind(rut)
        .bind(email)
        .bind(telefono)
        .bind(rol)
        .bind(hash_contrasena)
        .fetch_one(&self.pool)
        .await?;
        Ok(usuario)
    }

    /// Actualización parcial; los campos ausentes conservan su valor
    pub async fn update(&self, id: i32, req: &UpdateUserRequest) -> AppResult<Option<Usuario>> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "UPDATE usuarios SET \
                nombre_completo = COALESCE($2, nombre_completo), \
                email = COALESCE($3, email), \
                telefono = COALESCE($4, telefono), \
                rol = COALESCE(UPPER($5), rol), \
                rut = COALESCE($6, rut), \
                activo = COALESCE($7, activo), \
                fecha_actualizacion = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(req.nombre_completo.as_deref())
        .bind(req.email.as_deref())
        .bind(req.telefono.as_deref())
        .bind(req.rol.as_deref())
        .bind(req.rut.as_deref())
        .bind(req.activo)
        .fetch_optional(&self.pool)
        .await?;
        Ok(usuario)
    }

    pub async fn update_password(&self, id: i32, hash_contrasena: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE usuarios SET hash_contrasena = $2, fecha_actualizacion = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(hash_contrasena)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_horario(&self, usuario_id: i32) -> AppResult<Option<HorarioSemanal>> {
        let row = sqlx::query_as::<_, HorarioRow>(&format!(
            "SELECT {} FROM horarios_trabajo WHERE usuario_id = $1",
            HORARIO_COLUMNS
        ))
        .bind(usuario_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(HorarioRow::into_horario))
    }

    /// Crear o reemplazar el horario semanal de un usuario
    pub async fn upsert_horario(
        &self,
        usuario_id: i32,
        horario: &HorarioSemanal,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO horarios_trabajo ( \
                usuario_id, \
                lunes_activo, lunes_hora_inicio, lunes_hora_salida, lunes_colacion_inicio, lunes_colacion_salida, \
                martes_activo, martes_hora_inicio, martes_hora_salida, martes_colacion_inicio, martes_colacion_salida, \
                miercoles_activo, miercoles_hora_inicio, miercoles_hora_salida, miercoles_colacion_inicio, miercoles_colacion_salida, \
                jueves_activo, jueves_hora_inicio, jueves_hora_salida, jueves_colacion_inicio, jueves_colacion_salida, \
                viernes_activo, viernes_hora_inicio, viernes_hora_salida, viernes_colacion_inicio, viernes_colacion_salida \
             ) VALUES ( \
                $1, \
                $2, $3, $4, $5, $6, \
                $7, $8, $9, $10, $11, \
                $12, $13, $14, $15, $16, \
                $17, $18, $19, $20, $21, \
                $22, $23, $24, $25, $26 \
             ) \
             ON CONFLICT (usuario_id) DO UPDATE SET \
                lunes_activo = EXCLUDED.lunes_activo, \
                lunes_hora_inicio = EXCLUDED.lunes_hora_inicio, \
                lunes_hora_salida = EXCLUDED.lunes_hora_salida, \
                lunes_colacion_inicio = EXCLUDED.lunes_colacion_inicio, \
                lunes_colacion_salida = EXCLUDED.lunes_colacion_salida, \
                martes_activo = EXCLUDED.martes_activo, \
                martes_hora_inicio = EXCLUDED.martes_hora_inicio, \
                martes_hora_salida = EXCLUDED.martes_hora_salida, \
                martes_colacion_inicio = EXCLUDED.martes_colacion_inicio, \
                martes_colacion_salida = EXCLUDED.martes_colacion_salida, \
                miercoles_activo = EXCLUDED.miercoles_activo, \
                miercoles_hora_inicio = EXCLUDED.miercoles_hora_inicio, \
                miercoles_hora_salida = EXCLUDED.miercoles_hora_salida, \
                miercoles_colacion_inicio = EXCLUDED.miercoles_colacion_inicio, \
                miercoles_colacion_salida = EXCLUDED.miercoles_colacion_salida, \
                jueves_activo = EXCLUDED.jueves_activo, \
                jueves_hora_inicio = EXCLUDED.jueves_hora_inicio, \
                jueves_hora_salida = EXCLUDED.jueves_hora_salida, \
                jueves_colacion_inicio = EXCLUDED.jueves_colacion_inicio, \
                jueves_colacion_salida = EXCLUDED.jueves_colacion_salida, \
                viernes_activo = EXCLUDED.viernes_activo, \
                viernes_hora_inicio = EXCLUDED.viernes_hora_inicio, \
                viernes_hora_salida = EXCLUDED.viernes_hora_salida, \
                viernes_colacion_inicio = EXCLUDED.viernes_colacion_inicio, \
                viernes_colacion_salida = EXCLUDED.viernes_colacion_salida, \
                fecha_actualizacion = NOW()",
        )
        .bind(usuario_id)
        .bind(horario.lunes.activo)
        .bind(horario.lunes.hora_inicio)
        .bind(horario.lunes.hora_salida)
        .bind(horario.lunes.colacion_inicio)
        .bind(horario.lunes.colacion_salida)
        .bind(horario.martes.activo)
        .bind(horario.martes.hora_inicio)
        .bind(horario.martes.hora_salida)
        .bind(horario.martes.colacion_inicio)
        .bind(horario.martes.colacion_salida)
        .bind(horario.miercoles.activo)
        .bind(horario.miercoles.hora_inicio)
        .bind(horario.miercoles.hora_salida)
        .bind(horario.miercoles.colacion_inicio)
        .bind(horario.miercoles.colacion_salida)
        .bind(horario.jueves.activo)
        .bind(horario.jueves.hora_inicio)
        .bind(horario.jueves.hora_salida)
        .bind(horario.jueves.colacion_inicio)
        .bind(horario.jueves.colacion_salida)
        .bind(horario.viernes.activo)
        .bind(horario.viernes.hora_inicio)
        .bind(horario.viernes.hora_salida)
        .bind(horario.viernes.colacion_inicio)
        .bind(horario.viernes.colacion_salida)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Eliminar un usuario junto a sus registros dependientes
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM horarios_trabajo WHERE usuario_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM breaks_mecanico WHERE mecanico_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM notificaciones WHERE usuario_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
