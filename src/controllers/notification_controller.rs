//! Notificaciones del usuario autenticado

use serde_json::{json, Value};
use sqlx::PgPool;
use validator::Validate;

use crate::dto::notification_dto::CreateNotificationRequest;
use crate::dto::ApiResponse;
use crate::middleware::auth::{require_role, AuthenticatedUser};
use crate::models::notificacion::Notificacion;
use crate::repositories::{NotificationRepository, UserRepository};
use crate::utils::errors::{not_found_error, AppResult};

pub struct NotificationController {
    repository: NotificationRepository,
    users: UserRepository,
}

impl NotificationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: NotificationRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateNotificationRequest,
    ) -> AppResult<ApiResponse<Notificacion>> {
        require_role(user, &["ADMIN", "JEFE_TALLER"])?;
        request.validate()?;

        self.users
            .find_by_id(request.usuario_id)
            .await?
            .ok_or_else(|| not_found_error("Usuario", request.usuario_id))?;

        let notificacion = self
            .repository
            .create(
                request.usuario_id,
                &request.titulo,
                &request.mensaje,
                &request.tipo_notificacion,
                request.tipo_entidad_relacionada.as_deref(),
                request.entidad_relacionada_id,
            )
            .await?;
        Ok(ApiResponse::success_with_message(
            notificacion,
            "Notificación creada exitosamente".to_string(),
        ))
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        solo_no_leidas: bool,
    ) -> AppResult<Vec<Notificacion>> {
        self.repository.find_by_usuario(user.id, solo_no_leidas).await
    }

    pub async fn unread_count(&self, user: &AuthenticatedUser) -> AppResult<Value> {
        let count = self.repository.count_unread(user.id).await?;
        Ok(json!({ "no_leidas": count }))
    }

    pub async fn mark_read(&self, user: &AuthenticatedUser, id: i32) -> AppResult<Notificacion> {
        self.repository
            .mark_read(id, user.id)
            .await?
            .ok_or_else(|| not_found_error("Notificación", id))
    }

    pub async fn mark_all_read(&self, user: &AuthenticatedUser) -> AppResult<Value> {
        let actualizadas = self.repository.mark_all_read(user.id).await?;
        Ok(json!({ "actualizadas": actualizadas }))
    }
}
