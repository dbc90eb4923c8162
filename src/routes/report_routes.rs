use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::BreaksReportFilters;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::report::BreaksReport;
use crate::routes::csv_response;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/breaks", get(breaks_report))
        .route("/breaks/export", get(export_breaks_report))
}

async fn breaks_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<BreaksReportFilters>,
) -> Result<Json<BreaksReport>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.breaks_report(&user, filters).await?;
    Ok(Json(response))
}

async fn export_breaks_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<BreaksReportFilters>,
) -> Result<Response, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let export = controller.export_breaks(&user, filters).await?;
    Ok(csv_response(export))
}
