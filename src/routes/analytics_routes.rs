//! Rutas de Analytics y exports

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::controllers::analytics_controller::AnalyticsController;
use crate::controllers::export_controller::ExportController;
use crate::dto::analytics_dto::{
    AnalyticsFilters, CostPerKmResponse, ExportQuery, FuelEfficiencyResponse,
    OperationalCostResponse, VehicleRoiResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::services::access_policy::{authorize, Operation};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_analytics_router() -> Router<AppState> {
    Router::new()
        .route("/fuel-efficiency", get(fuel_efficiency))
        .route("/vehicle-roi", get(vehicle_roi))
        .route("/cost-per-km", get(cost_per_km))
        .route("/operational-cost", get(operational_cost))
        .route("/export/csv", get(export_csv))
        .route("/export/pdf", get(export_pdf))
}

async fn fuel_efficiency(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(filters): Query<AnalyticsFilters>,
) -> AppResult<Json<Vec<FuelEfficiencyResponse>>> {
    authorize(user.role, Operation::AnalyticsRead)?;
    let controller = AnalyticsController::new(state.pool.clone());
    Ok(Json(controller.fuel_efficiency(filters.vehicle_id).await?))
}

async fn vehicle_roi(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(filters): Query<AnalyticsFilters>,
) -> AppResult<Json<Vec<VehicleRoiResponse>>> {
    authorize(user.role, Operation::AnalyticsRead)?;
    let controller = AnalyticsController::new(state.pool.clone());
    Ok(Json(controller.vehicle_roi(filters.vehicle_id).await?))
}

async fn cost_per_km(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(filters): Query<AnalyticsFilters>,
) -> AppResult<Json<Vec<CostPerKmResponse>>> {
    authorize(user.role, Operation::AnalyticsRead)?;
    let controller = AnalyticsController::new(state.pool.clone());
    Ok(Json(controller.cost_per_km(filters.vehicle_id).await?))
}

async fn operational_cost(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(filters): Query<AnalyticsFilters>,
) -> AppResult<Json<Vec<OperationalCostResponse>>> {
    authorize(user.role, Operation::AnalyticsRead)?;
    let controller = AnalyticsController::new(state.pool.clone());
    Ok(Json(controller.operational_cost(filters.vehicle_id).await?))
}

async fn export_csv(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    authorize(user.role, Operation::AnalyticsExport)?;
    let controller = ExportController::new(state.pool.clone());
    let (filename, csv) = controller.export_csv(query.export_type.as_deref()).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        csv,
    ))
}

async fn export_pdf(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    authorize(user.role, Operation::AnalyticsExport)?;
    let controller = ExportController::new(state.pool.clone());
    let (filename, pdf) = controller.export_pdf(query.export_type.as_deref()).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        pdf,
    ))
}
