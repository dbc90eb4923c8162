//! Acceso a datos de vehículos

use sqlx::PgPool;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::vehicle::Vehiculo;
use crate::utils::errors::AppResult;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Vehiculo>> {
        let vehiculos =
            sqlx::query_as::<_, Vehiculo>("SELECT * FROM vehiculos ORDER BY patente ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(vehiculos)
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Vehiculo>> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>("SELECT * FROM vehiculos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vehiculo)
    }

    pub async fn find_by_patente(&self, patente: &str) -> AppResult<Option<Vehiculo>> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>(
            "SELECT * FROM vehiculos WHERE UPPER(patente) = UPPER($1)",
        )
        .bind(patente)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vehiculo)
    }

    pub async fn create(&self, req: &CreateVehicleRequest) -> AppResult<Vehiculo> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>(
            "INSERT INTO vehiculos (patente, marca, modelo, anno, estado, conductor_actual_id, taller_id) \
             VALUES (UPPER($1), $2, $3, $4, 'DISPONIBLE', $5, $6) \
             RETURNING *",
        )
        .bind(&req.patente)
        .bind(req.marca.as_deref())
        .bind(req.modelo.as_deref())
        .bind(req.anno)
        .bind(req.conductor_actual_id)
        .bind(req.taller_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(vehiculo)
    }

    /// Actualización parcial; los campos ausentes conservan su valor
    pub async fn update(
        &self,
        id: i32,
        req: &UpdateVehicleRequest,
    ) -> AppResult<Option<Vehiculo>> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>(
            "UPDATE vehiculos SET \
                patente = COALESCE(UPPER($2), patente), \
                marca = COALESCE($3, marca), \
                modelo = COALESCE($4, modelo), \
                anno = COALESCE($5, anno), \
                conductor_actual_id = COALESCE($6, conductor_actual_id), \
                taller_id = COALESCE($7, taller_id), \
                fecha_actualizacion = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(req.patente.as_deref())
        .bind(req.marca.as_deref())
        .bind(req.modelo.as_deref())
        .bind(req.anno)
        .bind(req.conductor_actual_id)
        .bind(req.taller_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vehiculo)
    }

    pub async fn update_estado(&self, id: i32, estado: &str) -> AppResult<Option<Vehiculo>> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>(
            "UPDATE vehiculos \
             SET estado = UPPER($2), fecha_actualizacion = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vehiculo)
    }

    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehiculos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
