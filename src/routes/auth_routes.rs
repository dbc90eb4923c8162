use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::UsuarioConHorario;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas públicas de autenticación
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Rutas de autenticación que requieren token (con su path completo, para
/// poder colgarlas del grupo protegido sin chocar con el prefijo público)
pub fn create_profile_router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/profile", get(profile))
        .route("/api/auth/register", post(register))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.login(request, &state.jwt_config()).await?;
    Ok(Json(response))
}

async fn register(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterResponse>>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.register(&user, request).await?;
    Ok(Json(response))
}

async fn profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UsuarioConHorario>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.profile(user.id).await?;
    Ok(Json(response))
}
