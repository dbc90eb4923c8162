use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};
use serde::Deserialize;

use crate::controllers::stock_controller::StockController;
use crate::dto::stock_dto::{
    CreateMovimientoRequest, CreateRepuestoRequest, CreateSolicitudRepuestoRequest,
    RepuestoSearchQuery, RespondSolicitudRepuestoRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::stock::{Inventario, MovimientoRepuesto, Repuesto, SolicitudRepuesto};
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize)]
struct EstadoQuery {
    estado: Option<String>,
}

pub fn create_stock_router() -> Router<AppState> {
    Router::new()
        .route("/repuestos", get(list_repuestos))
        .route("/repuestos", post(create_repuesto))
        .route("/repuestos/:id", get(get_repuesto))
        .route("/inventario/:taller_id", get(inventario_taller))
        .route("/movimientos", post(create_movimiento))
        .route("/solicitudes", get(list_solicitudes))
        .route("/solicitudes", post(create_solicitud))
        .route("/solicitudes/:id/responder", patch(respond_solicitud))
}

async fn list_repuestos(
    State(state): State<AppState>,
    Query(query): Query<RepuestoSearchQuery>,
) -> Result<Json<Vec<Repuesto>>, AppError> {
    let controller = StockController::new(state.pool.clone());
    let response = controller.list_repuestos(query.search.as_deref()).await?;
    Ok(Json(response))
}

async fn get_repuesto(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Repuesto>, AppError> {
    let controller = StockController::new(state.pool.clone());
    let response = controller.get_repuesto(id).await?;
    Ok(Json(response))
}

async fn create_repuesto(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateRepuestoRequest>,
) -> Result<Json<ApiResponse<Repuesto>>, AppError> {
    let controller = StockController::new(state.pool.clone());
    let response = controller.create_repuesto(&user, request).await?;
    Ok(Json(response))
}

async fn inventario_taller(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(taller_id): Path<i32>,
) -> Result<Json<Vec<Inventario>>, AppError> {
    let controller = StockController::new(state.pool.clone());
    let response = controller.inventario_taller(&user, taller_id).await?;
    Ok(Json(response))
}

async fn create_movimiento(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateMovimientoRequest>,
) -> Result<Json<ApiResponse<MovimientoRepuesto>>, AppError> {
    let controller = StockController::new(state.pool.clone());
    let response = controller.create_movimiento(&user, request).await?;
    Ok(Json(response))
}

async fn list_solicitudes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<EstadoQuery>,
) -> Result<Json<Vec<SolicitudRepuesto>>, AppError> {
    let controller = StockController::new(state.pool.clone());
    let response = controller
        .list_solicitudes(&user, query.estado.as_deref())
        .await?;
    Ok(Json(response))
}

async fn create_solicitud(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateSolicitudRepuestoRequest>,
) -> Result<Json<ApiResponse<SolicitudRepuesto>>, AppError> {
    let controller = StockController::new(state.pool.clone());
    let response = controller.create_solicitud(&user, request).await?;
    Ok(Json(response))
}

async fn respond_solicitud(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<RespondSolicitudRepuestoRequest>,
) -> Result<Json<ApiResponse<SolicitudRepuesto>>, AppError> {
    let controller = StockController::new(state.pool.clone());
    let response = controller.respond_solicitud(&user, id, request).await?;
    Ok(Json(response))
}
