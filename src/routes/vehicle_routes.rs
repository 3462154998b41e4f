//! Rutas de Vehicles

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters};
use crate::dto::MessageResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::vehicle::Vehicle;
use crate::services::access_policy::{authorize, Operation};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/available", get(list_available_vehicles))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn list_vehicles(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> AppResult<Json<Vec<Vehicle>>> {
    authorize(user.role, Operation::VehicleList)?;
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.list(filters).await?))
}

async fn list_available_vehicles(
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Vehicle>>> {
    authorize(user.role, Operation::VehicleListAvailable)?;
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.list_available().await?))
}

async fn get_vehicle(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vehicle>> {
    authorize(user.role, Operation::VehicleGet)?;
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn create_vehicle(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> AppResult<(StatusCode, Json<Vehicle>)> {
    authorize(user.role, Operation::VehicleCreate)?;
    let controller = VehicleController::new(state.pool.clone());
    let vehicle = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn update_vehicle(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> AppResult<Json<Vehicle>> {
    authorize(user.role, Operation::VehicleUpdate)?;
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_vehicle(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    authorize(user.role, Operation::VehicleDelete)?;
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.delete(id).await?))
}
