//! Gestión de órdenes de trabajo y su ciclo de vida
//!
//! Incluye las pausas del mecánico: pausar una OT abre un break y la deja
//! EN_PAUSA; reanudarla cierra el break abierto y la vuelve a EN_PROCESO.

use sqlx::PgPool;
use validator::Validate;

use crate::dto::workorder_dto::{
    AssignMechanicRequest, ChangeStateRequest, CloseWorkOrderRequest, CreateWorkOrderRequest,
    EntregaVehiculoRequest, WorkOrderFilters,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{require_role, AuthenticatedUser};
use crate::models::break_record::BreakMecanico;
use crate::models::workorder::{EntregaVehiculo, OrdenTrabajo};
use crate::repositories::{
    BreakRepository, NotificationRepository, UserRepository, VehicleRepository,
    WorkOrderRepository,
};
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};

pub struct WorkOrderController {
    repository: WorkOrderRepository,
    vehicles: VehicleRepository,
    users: UserRepository,
    breaks: BreakRepository,
    notifications: NotificationRepository,
}

impl WorkOrderController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: WorkOrderRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            breaks: BreakRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: &WorkOrderFilters) -> AppResult<Vec<OrdenTrabajo>> {
        self.repository.find_all(filters).await
    }

    pub async fn get(&self, id: i32) -> AppResult<OrdenTrabajo> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Orden de trabajo", id))
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateWorkOrderRequest,
    ) -> AppResult<ApiResponse<OrdenTrabajo>> {
        require_role(user, &["ADMIN", "JEFE_TALLER"])?;
        request.validate()?;

        if self
            .vehicles
            .find_by_id(request.vehiculo_id)
            .await?
            .is_none()
        {
            return Err(not_found_error("Vehículo", request.vehiculo_id));
        }

        let orden = self.repository.create(&request, user.id).await?;
        self.vehicles
            .update_estado(request.vehiculo_id, "EN_MANTENCION")
            .await?;

        Ok(ApiResponse::success_with_message(
            orden,
            "Orden de trabajo creada exitosamente".to_string(),
        ))
    }

    pub async fn assign_mechanic(
        &self,
        user: &AuthenticatedUser,
        id: i32,
        request: AssignMechanicRequest,
    ) -> AppResult<ApiResponse<OrdenTrabajo>> {
        require_role(user, &["ADMIN", "JEFE_TALLER"])?;

        let mecanico = self
            .users
            .find_by_id(request.mecanico_id)
            .await?
            .ok_or_else(|| not_found_error("Usuario", request.mecanico_id))?;
        if !mecanico.rol.eq_ignore_ascii_case("MECANICO") {
            return Err(bad_request_error("El usuario asignado no es mecánico"));
        }

        let orden = self
            .repository
            .assign_mechanic(id, request.mecanico_id, user.id)
            .await?
            .ok_or_else(|| not_found_error("Orden de trabajo", id))?;

        self.notifications
            .create(
                mecanico.id,
                "Nueva orden asignada",
                &format!("Se te asignó la orden de trabajo #{}", orden.numero_ot),
                "OT_ASIGNADA",
                Some("ordenes_trabajo"),
                Some(orden.id),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            orden,
            "Mecánico asignado exitosamente".to_string(),
        ))
    }

    pub async fn change_state(
        &self,
        user: &AuthenticatedUser,
        id: i32,
        request: ChangeStateRequest,
    ) -> AppResult<ApiResponse<OrdenTrabajo>> {
        require_role(user, &["ADMIN", "JEFE_TALLER", "MECANICO"])?;
        request.validate()?;

        let orden = self
            .repository
            .change_estado(id, &request.estado, request.motivo.as_deref(), user.id)
            .await?
            .ok_or_else(|| not_found_error("Orden de trabajo", id))?;

        Ok(ApiResponse::success_with_message(
            orden,
            "Estado de la orden actualizado".to_string(),
        ))
    }

    pub async fn close(
        &self,
        user: &AuthenticatedUser,
        id: i32,
        request: CloseWorkOrderRequest,
    ) -> AppResult<ApiResponse<OrdenTrabajo>> {
        require_role(user, &["ADMIN", "JEFE_TALLER"])?;

        let actual = self.get(id).await?;
        if !actual.estado.eq_ignore_ascii_case("FINALIZADA") {
            return Err(bad_request_error(
                "Solo una orden finalizada puede cerrarse",
            ));
        }

        let orden = self
            .repository
            .close(id, request.observaciones.as_deref(), user.id)
            .await?
            .ok_or_else(|| not_found_error("Orden de trabajo", id))?;
        self.vehicles
            .update_estado(orden.vehiculo_id, "DISPONIBLE")
            .await?;

        Ok(ApiResponse::success_with_message(
            orden,
            "Orden de trabajo cerrada exitosamente".to_string(),
        ))
    }

    pub async fn register_entrega(
        &self,
        user: &AuthenticatedUser,
        id: i32,
        request: EntregaVehiculoRequest,
    ) -> AppResult<ApiResponse<EntregaVehiculo>> {
        require_role(user, &["ADMIN", "JEFE_TALLER", "RECEPCIONISTA"])?;
        request.validate()?;

        // La OT debe existir antes de firmar una entrega contra ella
        self.get(id).await?;

        let entrega = self
            .repository
            .create_entrega(
                id,
                &request.tipo_entrega,
                request.conductor_id,
                user.id,
                request.condicion_vehiculo.as_deref(),
                request.observaciones.as_deref(),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            entrega,
            "Entrega registrada exitosamente".to_string(),
        ))
    }

    /// Pausar la OT: abre un break del mecánico y deja la orden EN_PAUSA
    pub async fn pausar(
        &self,
        user: &AuthenticatedUser,
        id: i32,
    ) -> AppResult<ApiResponse<BreakMecanico>> {
        require_role(user, &["MECANICO"])?;

        let orden = self.get(id).await?;
        if orden.mecanico_asignado_id != Some(user.id) {
            return Err(AppError::Forbidden(
                "La orden no está asignada a este mecánico".to_string(),
            ));
        }
        if self.breaks.find_open(user.id).await?.is_some() {
            return Err(AppError::Conflict(
                "Ya existe un break en curso".to_string(),
            ));
        }

        let registro = self.breaks.start(user.id).await?;
        self.repository
            .change_estado(id, "EN_PAUSA", Some("Break del mecánico"), user.id)
            .await?;

        Ok(ApiResponse::success_with_message(
            registro,
            "Break iniciado".to_string(),
        ))
    }

    /// Reanudar la OT: cierra el break abierto y vuelve la orden a EN_PROCESO
    pub async fn reanudar(
        &self,
        user: &AuthenticatedUser,
        id: i32,
    ) -> AppResult<ApiResponse<BreakMecanico>> {
        require_role(user, &["MECANICO"])?;

        let orden = self.get(id).await?;
        if orden.mecanico_asignado_id != Some(user.id) {
            return Err(AppError::Forbidden(
                "La orden no está asignada a este mecánico".to_string(),
            ));
        }

        let registro = self
            .breaks
            .close_open(user.id)
            .await?
            .ok_or_else(|| bad_request_error("No hay un break en curso"))?;
        self.repository
            .change_estado(id, "EN_PROCESO", Some("Fin del break"), user.id)
            .await?;

        Ok(ApiResponse::success_with_message(
            registro,
            "Break finalizado".to_string(),
        ))
    }
}
