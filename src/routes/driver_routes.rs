//! Rutas de Drivers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::dto::driver_dto::{CreateDriverRequest, DriverFilters, UpdateDriverRequest};
use crate::dto::MessageResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::driver::Driver;
use crate::services::access_policy::{authorize, Operation};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route("/available", get(list_available_drivers))
        .route(
            "/:id",
            get(get_driver).put(update_driver).delete(delete_driver),
        )
}

async fn list_drivers(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(filters): Query<DriverFilters>,
) -> AppResult<Json<Vec<Driver>>> {
    authorize(user.role, Operation::DriverList)?;
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.list(filters).await?))
}

async fn list_available_drivers(
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Driver>>> {
    authorize(user.role, Operation::DriverListAvailable)?;
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.list_available().await?))
}

async fn get_driver(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Driver>> {
    authorize(user.role, Operation::DriverGet)?;
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn create_driver(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> AppResult<(StatusCode, Json<Driver>)> {
    authorize(user.role, Operation::DriverCreate)?;
    let controller = DriverController::new(state.pool.clone());
    let driver = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(driver)))
}

async fn update_driver(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverRequest>,
) -> AppResult<Json<Driver>> {
    authorize(user.role, Operation::DriverUpdate)?;
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_driver(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    authorize(user.role, Operation::DriverDelete)?;
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.delete(id).await?))
}
