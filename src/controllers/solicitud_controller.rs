//! Gestión de solicitudes de mantenimiento

use sqlx::PgPool;
use validator::Validate;

use crate::dto::solicitud_dto::{CreateSolicitudRequest, RespondSolicitudRequest, SolicitudFilters};
use crate::dto::ApiResponse;
use crate::middleware::auth::{require_role, AuthenticatedUser};
use crate::models::solicitud::SolicitudMantenimiento;
use crate::repositories::{NotificationRepository, SolicitudRepository, VehicleRepository};
use crate::utils::errors::{not_found_error, AppResult};

pub struct SolicitudController {
    repository: SolicitudRepository,
    vehicles: VehicleRepository,
    notifications: NotificationRepository,
}

impl SolicitudController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SolicitudRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        filters: &SolicitudFilters,
    ) -> AppResult<Vec<SolicitudMantenimiento>> {
        // Un chofer solo ve sus propias solicitudes
        if user.has_any_role(&["CHOFER"]) {
            let propios = SolicitudFilters {
                estado: filters.estado.clone(),
                conductor_id: Some(user.id),
            };
            return self.repository.find_all(&propios).await;
        }
        require_role(user, &["ADMIN", "JEFE_TALLER", "RECEPCIONISTA"])?;
        self.repository.find_all(filters).await
    }

    pub async fn get(&self, id: i32) -> AppResult<SolicitudMantenimiento> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Solicitud de mantenimiento", id))
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateSolicitudRequest,
    ) -> AppResult<ApiResponse<SolicitudMantenimiento>> {
        require_role(user, &["CHOFER", "RECEPCIONISTA", "ADMIN"])?;
        request.validate()?;

        if self
            .vehicles
            .find_by_id(request.vehiculo_id)
            .await?
            .is_none()
        {
            return Err(not_found_error("Vehículo", request.vehiculo_id));
        }

        let solicitud = self
            .repository
            .create(
                request.vehiculo_id,
                user.id,
                &request.tipo_solicitud,
                &request.descripcion_problema,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            solicitud,
            "Solicitud de mantenimiento creada".to_string(),
        ))
    }

    pub async fn respond(
        &self,
        user: &AuthenticatedUser,
        id: i32,
        request: RespondSolicitudRequest,
    ) -> AppResult<ApiResponse<SolicitudMantenimiento>> {
        require_role(user, &["ADMIN", "JEFE_TALLER"])?;
        request.validate()?;

        let solicitud = self
            .repository
            .respond(id, &request.estado, user.id)
            .await?
            .ok_or_else(|| not_found_error("Solicitud de mantenimiento", id))?;

        if let Some(conductor_id) = solicitud.conductor_id {
            self.notifications
                .create(
                    conductor_id,
                    "Respuesta de solicitud de mantenimiento",
                    &format!(
                        "Tu solicitud {} quedó {}",
                        solicitud.numero_solicitud, solicitud.estado
                    ),
                    "SOLICITUD_RESPONDIDA",
                    Some("solicitudes_mantenimiento"),
                    Some(solicitud.id),
                )
                .await?;
        }

        Ok(ApiResponse::success_with_message(
            solicitud,
            "Solicitud respondida exitosamente".to_string(),
        ))
    }
}
