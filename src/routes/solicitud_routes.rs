use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};

use crate::controllers::solicitud_controller::SolicitudController;
use crate::dto::solicitud_dto::{
    CreateSolicitudRequest, RespondSolicitudRequest, SolicitudFilters,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::solicitud::SolicitudMantenimiento;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_solicitud_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_solicitudes))
        .route("/", post(create_solicitud))
        .route("/:id", get(get_solicitud))
        .route("/:id/responder", patch(respond_solicitud))
}

async fn list_solicitudes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<SolicitudFilters>,
) -> Result<Json<Vec<SolicitudMantenimiento>>, AppError> {
    let controller = SolicitudController::new(state.pool.clone());
    let response = controller.list(&user, &filters).await?;
    Ok(Json(response))
}

async fn get_solicitud(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SolicitudMantenimiento>, AppError> {
    let controller = SolicitudController::new(state.pool.clone());
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn create_solicitud(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateSolicitudRequest>,
) -> Result<Json<ApiResponse<SolicitudMantenimiento>>, AppError> {
    let controller = SolicitudController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn respond_solicitud(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<RespondSolicitudRequest>,
) -> Result<Json<ApiResponse<SolicitudMantenimiento>>, AppError> {
    let controller = SolicitudController::new(state.pool.clone());
    let response = controller.respond(&user, id, request).await?;
    Ok(Json(response))
}
