//! Rutas del Dashboard

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::KpiResponse;
use crate::dto::vehicle_dto::VehicleFilters;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::access_policy::{authorize, Operation};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/kpis", get(get_kpis))
}

async fn get_kpis(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> AppResult<Json<KpiResponse>> {
    authorize(user.role, Operation::DashboardKpis)?;
    let controller = DashboardController::new(state.pool.clone());
    Ok(Json(controller.kpis(filters).await?))
}
