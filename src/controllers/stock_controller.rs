//! Gestión de repuestos, inventario y solicitudes de repuestos

use sqlx::PgPool;
use validator::Validate;

use crate::dto::stock_dto::{
    CreateMovimientoRequest, CreateRepuestoRequest, CreateSolicitudRepuestoRequest,
    RespondSolicitudRepuestoRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{require_role, AuthenticatedUser};
use crate::models::stock::{Inventario, MovimientoRepuesto, Repuesto, SolicitudRepuesto};
use crate::repositories::{NotificationRepository, StockRepository, WorkOrderRepository};
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

pub struct StockController {
    repository: StockRepository,
    workorders: WorkOrderRepository,
    notifications: NotificationRepository,
}

impl StockController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: StockRepository::new(pool.clone()),
            workorders: WorkOrderRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
        }
    }

    pub async fn list_repuestos(&self, search: Option<&str>) -> AppResult<Vec<Repuesto>> {
        self.repository.find_repuestos(search).await
    }

    pub async fn get_repuesto(&self, id: i32) -> AppResult<Repuesto> {
        self.repository
            .find_repuesto_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Repuesto", id))
    }

    pub async fn create_repuesto(
        &self,
        user: &AuthenticatedUser,
        request: CreateRepuestoRequest,
    ) -> AppResult<ApiResponse<Repuesto>> {
        require_role(user, &["ADMIN", "BODEGUERO"])?;
        request.validate()?;

        if self
            .repository
            .find_repuesto_by_sku(&request.sku)
            .await?
            .is_some()
        {
            return Err(conflict_error("Repuesto", "sku", &request.sku));
        }

        let repuesto = self.repository.create_repuesto(&request).await?;
        Ok(ApiResponse::success_with_message(
            repuesto,
            "Repuesto creado exitosamente".to_string(),
        ))
    }

    pub async fn inventario_taller(
        &self,
        user: &AuthenticatedUser,
        taller_id: i32,
    ) -> AppResult<Vec<Inventario>> {
        require_role(user, &["ADMIN", "BODEGUERO", "JEFE_TALLER"])?;
        self.repository.find_inventario(taller_id).await
    }

    pub async fn create_movimiento(
        &self,
        user: &AuthenticatedUser,
        request: CreateMovimientoRequest,
    ) -> AppResult<ApiResponse<MovimientoRepuesto>> {
        require_role(user, &["ADMIN", "BODEGUERO"])?;
        request.validate()?;

        self.get_repuesto(request.repuesto_id).await?;
        let movimiento = self.repository.create_movimiento(&request, user.id).await?;

        Ok(ApiResponse::success_with_message(
            movimiento,
            "Movimiento registrado exitosamente".to_string(),
        ))
    }

    pub async fn create_solicitud(
        &self,
        user: &AuthenticatedUser,
        request: CreateSolicitudRepuestoRequest,
    ) -> AppResult<ApiResponse<SolicitudRepuesto>> {
        require_role(user, &["MECANICO", "JEFE_TALLER"])?;
        request.validate()?;

        if self
            .workorders
            .find_by_id(request.orden_trabajo_id)
            .await?
            .is_none()
        {
            return Err(not_found_error("Orden de trabajo", request.orden_trabajo_id));
        }
        self.get_repuesto(request.repuesto_id).await?;

        let solicitud = self
            .repository
            .create_solicitud_repuesto(
                request.orden_trabajo_id,
                request.repuesto_id,
                request.cantidad_solicitada,
                request.urgencia.as_deref(),
                request.comentarios.as_deref(),
                user.id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            solicitud,
            "Solicitud de repuesto creada".to_string(),
        ))
    }

    pub async fn list_solicitudes(
        &self,
        user: &AuthenticatedUser,
        estado: Option<&str>,
    ) -> AppResult<Vec<SolicitudRepuesto>> {
        require_role(user, &["ADMIN", "BODEGUERO", "JEFE_TALLER"])?;
        self.repository.find_solicitudes_repuestos(estado).await
    }

    pub async fn respond_solicitud(
        &self,
        user: &AuthenticatedUser,
        id: i32,
        request: RespondSolicitudRepuestoRequest,
    ) -> AppResult<ApiResponse<SolicitudRepuesto>> {
        require_role(user, &["ADMIN", "BODEGUERO"])?;
        request.validate()?;

        let solicitud = self
            .repository
            .respond_solicitud_repuesto(
                id,
                &request.estado,
                request.comentarios.as_deref(),
                request.fecha_estimada_entrega,
            )
            .await?
            .ok_or_else(|| not_found_error("Solicitud de repuesto", id))?;

        self.notifications
            .create(
                solicitud.solicitado_por,
                "Respuesta de solicitud de repuesto",
                &format!(
                    "Tu solicitud de repuesto #{} quedó {}",
                    solicitud.id, solicitud.estado
                ),
                "SOLICITUD_REPUESTO_RESPONDIDA",
                Some("solicitudes_repuestos"),
                Some(solicitud.id),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            solicitud,
            "Solicitud respondida exitosamente".to_string(),
        ))
    }
}
