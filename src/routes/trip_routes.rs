//! Rutas de Trips

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::trip_controller::TripController;
use crate::dto::trip_dto::{
    CreateTripRequest, TripFilters, TripResponse, UpdateTripRequest, UpdateTripStatusRequest,
};
use crate::dto::MessageResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::access_policy::{authorize, Operation};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route(
            "/:id",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
        .route("/:id/status", patch(update_trip_status))
}

async fn list_trips(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(filters): Query<TripFilters>,
) -> AppResult<Json<Vec<TripResponse>>> {
    authorize(user.role, Operation::TripList)?;
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.list(filters).await?))
}

async fn get_trip(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TripResponse>> {
    authorize(user.role, Operation::TripGet)?;
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn create_trip(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Json(request): Json<CreateTripRequest>,
) -> AppResult<(StatusCode, Json<TripResponse>)> {
    authorize(user.role, Operation::TripCreate)?;
    let controller = TripController::new(state.pool.clone());
    let trip = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn update_trip(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTripRequest>,
) -> AppResult<Json<TripResponse>> {
    authorize(user.role, Operation::TripUpdate)?;
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn update_trip_status(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTripStatusRequest>,
) -> AppResult<Json<TripResponse>> {
    authorize(user.role, Operation::TripUpdateStatus)?;
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.update_status(id, request).await?))
}

async fn delete_trip(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    authorize(user.role, Operation::TripDelete)?;
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.delete(id).await?))
}
