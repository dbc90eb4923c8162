use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};

use crate::controllers::workorder_controller::WorkOrderController;
use crate::dto::workorder_dto::{
    AssignMechanicRequest, ChangeStateRequest, CloseWorkOrderRequest, CreateWorkOrderRequest,
    EntregaVehiculoRequest, WorkOrderFilters,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::break_record::BreakMecanico;
use crate::models::workorder::{EntregaVehiculo, OrdenTrabajo};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_workorder_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workorders))
        .route("/", post(create_workorder))
        .route("/:id", get(get_workorder))
        .route("/:id/asignar", patch(assign_mechanic))
        .route("/:id/estado", patch(change_state))
        .route("/:id/cerrar", post(close_workorder))
        .route("/:id/entrega", post(register_entrega))
        .route("/:id/pausar", post(pausar))
        .route("/:id/reanudar", post(reanudar))
}

async fn list_workorders(
    State(state): State<AppState>,
    Query(filters): Query<WorkOrderFilters>,
) -> Result<Json<Vec<OrdenTrabajo>>, AppError> {
    let controller = WorkOrderController::new(state.pool.clone());
    let response = controller.list(&filters).await?;
    Ok(Json(response))
}

async fn get_workorder(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrdenTrabajo>, AppError> {
    let controller = WorkOrderController::new(state.pool.clone());
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn create_workorder(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateWorkOrderRequest>,
) -> Result<Json<ApiResponse<OrdenTrabajo>>, AppError> {
    let controller = WorkOrderController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn assign_mechanic(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<AssignMechanicRequest>,
) -> Result<Json<ApiResponse<OrdenTrabajo>>, AppError> {
    let controller = WorkOrderController::new(state.pool.clone());
    let response = controller.assign_mechanic(&user, id, request).await?;
    Ok(Json(response))
}

async fn change_state(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<ChangeStateRequest>,
) -> Result<Json<ApiResponse<OrdenTrabajo>>, AppError> {
    let controller = WorkOrderController::new(state.pool.clone());
    let response = controller.change_state(&user, id, request).await?;
    Ok(Json(response))
}

async fn close_workorder(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<CloseWorkOrderRequest>,
) -> Result<Json<ApiResponse<OrdenTrabajo>>, AppError> {
    let controller = WorkOrderController::new(state.pool.clone());
    let response = controller.close(&user, id, request).await?;
    Ok(Json(response))
}

async fn register_entrega(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<EntregaVehiculoRequest>,
) -> Result<Json<ApiResponse<EntregaVehiculo>>, AppError> {
    let controller = WorkOrderController::new(state.pool.clone());
    let response = controller.register_entrega(&user, id, request).await?;
    Ok(Json(response))
}

async fn pausar(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BreakMecanico>>, AppError> {
    let controller = WorkOrderController::new(state.pool.clone());
    let response = controller.pausar(&user, id).await?;
    Ok(Json(response))
}

async fn reanudar(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BreakMecanico>>, AppError> {
    let controller = WorkOrderController::new(state.pool.clone());
    let response = controller.reanudar(&user, id).await?;
    Ok(Json(response))
}
