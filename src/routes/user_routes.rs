use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post, put},
    Extension, Json, Router,
};

use crate::controllers::user_controller::UserController;
use crate::dto::user_dto::{
    CreateMechanicRequest, CreateUserWithRoleRequest, ListUsersQuery, UpdateScheduleRequest,
    UpdateUserRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::{HorarioSemanal, Usuario, UsuarioConHorario};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/", post(create_user_with_role))
        .route("/mecanicos", post(create_mechanic))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
        .route("/:id/schedule", get(get_schedule))
        .route("/:id/schedule", patch(update_schedule))
}

async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<UsuarioConHorario>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.list(&user, query.rol.as_deref()).await?;
    Ok(Json(response))
}

async fn get_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<UsuarioConHorario>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.get(&user, id).await?;
    Ok(Json(response))
}

async fn create_mechanic(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateMechanicRequest>,
) -> Result<Json<ApiResponse<Usuario>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.create_mechanic(&user, request).await?;
    Ok(Json(response))
}

async fn create_user_with_role(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateUserWithRoleRequest>,
) -> Result<Json<ApiResponse<Usuario>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.create_with_role(&user, request).await?;
    Ok(Json(response))
}

async fn update_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<Usuario>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = UserController::new(state.pool.clone());
    controller.delete(&user, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Usuario eliminado exitosamente"
    })))
}

async fn get_schedule(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<Option<HorarioSemanal>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.get_schedule(&user, id).await?;
    Ok(Json(response))
}

async fn update_schedule(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateScheduleRequest>,
) -> Result<Json<ApiResponse<HorarioSemanal>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.update_schedule(&user, id, request).await?;
    Ok(Json(response))
}
