//! Gestión de vehículos de la flota

use sqlx::PgPool;
use validator::Validate;

use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, UpdateVehicleStatusRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{require_role, AuthenticatedUser};
use crate::models::vehicle::Vehiculo;
use crate::repositories::VehicleRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Vehiculo>> {
        self.repository.find_all().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Vehiculo> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id))
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> AppResult<ApiResponse<Vehiculo>> {
        require_role(user, &["ADMIN", "JEFE_TALLER", "RECEPCIONISTA"])?;
        request.validate()?;

        if self
            .repository
            .find_by_patente(&request.patente)
            .await?
            .is_some()
        {
            return Err(conflict_error("Vehículo", "patente", &request.patente));
        }

        let vehiculo = self.repository.create(&request).await?;
        Ok(ApiResponse::success_with_message(
            vehiculo,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: i32,
        request: UpdateVehicleRequest,
    ) -> AppResult<ApiResponse<Vehiculo>> {
        require_role(user, &["ADMIN", "JEFE_TALLER", "RECEPCIONISTA"])?;
        request.validate()?;

        if let Some(patente) = request.patente.as_deref() {
            if let Some(existente) = self.repository.find_by_patente(patente).await? {
                if existente.id != id {
                    return Err(conflict_error("Vehículo", "patente", patente));
                }
            }
        }

        let vehiculo = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id))?;
        Ok(ApiResponse::success_with_message(
            vehiculo,
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        user: &AuthenticatedUser,
        id: i32,
        request: UpdateVehicleStatusRequest,
    ) -> AppResult<ApiResponse<Vehiculo>> {
        require_role(user, &["ADMIN", "JEFE_TALLER"])?;
        request.validate()?;

        let vehiculo = self
            .repository
            .update_estado(id, &request.estado)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id))?;
        Ok(ApiResponse::success_with_message(
            vehiculo,
            "Estado del vehículo actualizado".to_string(),
        ))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: i32) -> AppResult<()> {
        require_role(user, &["ADMIN"])?;
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehículo", id));
        }
        Ok(())
    }
}
