use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::history_controller::HistoryController;
use crate::dto::history_dto::HistoryFilters;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::history::HistoryResult;
use crate::routes::csv_response;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_history_router() -> Router<AppState> {
    Router::new()
        .route("/", get(query_history))
        .route("/export", get(export_history))
}

async fn query_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<HistoryFilters>,
) -> Result<Json<HistoryResult>, AppError> {
    let controller = HistoryController::new(state.pool.clone());
    let response = controller.query(&user, filters).await?;
    Ok(Json(response))
}

async fn export_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<HistoryFilters>,
) -> Result<Response, AppError> {
    let controller = HistoryController::new(state.pool.clone());
    let export = controller.export(&user, filters).await?;
    Ok(csv_response(export))
}
