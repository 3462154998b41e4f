//! Rutas de FuelLogs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::fuel_log_controller::FuelLogController;
use crate::dto::fuel_log_dto::{
    CreateFuelLogRequest, FuelLogResponse, LogFilters, UpdateFuelLogRequest,
};
use crate::dto::MessageResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::access_policy::{authorize, Operation};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_fuel_log_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_fuel_logs).post(create_fuel_log))
        .route(
            "/:id",
            get(get_fuel_log).put(update_fuel_log).delete(delete_fuel_log),
        )
}

async fn list_fuel_logs(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(filters): Query<LogFilters>,
) -> AppResult<Json<Vec<FuelLogResponse>>> {
    authorize(user.role, Operation::FuelLogList)?;
    let controller = FuelLogController::new(state.pool.clone());
    Ok(Json(controller.list(filters.vehicle_id).await?))
}

async fn get_fuel_log(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FuelLogResponse>> {
    authorize(user.role, Operation::FuelLogGet)?;
    let controller = FuelLogController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn create_fuel_log(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Json(request): Json<CreateFuelLogRequest>,
) -> AppResult<(StatusCode, Json<FuelLogResponse>)> {
    authorize(user.role, Operation::FuelLogCreate)?;
    let controller = FuelLogController::new(state.pool.clone());
    let log = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

async fn update_fuel_log(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFuelLogRequest>,
) -> AppResult<Json<FuelLogResponse>> {
    authorize(user.role, Operation::FuelLogUpdate)?;
    let controller = FuelLogController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_fuel_log(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    authorize(user.role, Operation::FuelLogDelete)?;
    let controller = FuelLogController::new(state.pool.clone());
    Ok(Json(controller.delete(id).await?))
}
