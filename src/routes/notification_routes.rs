use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::controllers::notification_controller::NotificationController;
use crate::dto::notification_dto::CreateNotificationRequest;
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::notificacion::Notificacion;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize)]
struct NotificationQuery {
    #[serde(default)]
    no_leidas: bool,
}

pub fn create_notification_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/", post(create_notification))
        .route("/no-leidas/total", get(unread_count))
        .route("/:id/leer", patch(mark_read))
        .route("/leer-todas", patch(mark_all_read))
}

async fn create_notification(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateNotificationRequest>,
) -> Result<Json<ApiResponse<Notificacion>>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<Vec<Notificacion>>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.list(&user, query.no_leidas).await?;
    Ok(Json(response))
}

async fn unread_count(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.unread_count(&user).await?;
    Ok(Json(response))
}

async fn mark_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<Notificacion>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.mark_read(&user, id).await?;
    Ok(Json(response))
}

async fn mark_all_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = NotificationController::new(state.pool.clone());
    let response = controller.mark_all_read(&user).await?;
    Ok(Json(response))
}
