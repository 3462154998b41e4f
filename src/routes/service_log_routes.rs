//! Rutas de ServiceLogs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::service_log_controller::ServiceLogController;
use crate::dto::fuel_log_dto::LogFilters;
use crate::dto::service_log_dto::{
    CreateServiceLogRequest, ServiceLogResponse, UpdateServiceLogRequest,
};
use crate::dto::MessageResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::access_policy::{authorize, Operation};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_service_log_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_service_logs).post(create_service_log))
        .route(
            "/:id",
            get(get_service_log)
                .put(update_service_log)
                .delete(delete_service_log),
        )
}

async fn list_service_logs(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Query(filters): Query<LogFilters>,
) -> AppResult<Json<Vec<ServiceLogResponse>>> {
    authorize(user.role, Operation::ServiceLogList)?;
    let controller = ServiceLogController::new(state.pool.clone());
    Ok(Json(controller.list(filters.vehicle_id).await?))
}

async fn get_service_log(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ServiceLogResponse>> {
    authorize(user.role, Operation::ServiceLogGet)?;
    let controller = ServiceLogController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn create_service_log(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Json(request): Json<CreateServiceLogRequest>,
) -> AppResult<(StatusCode, Json<ServiceLogResponse>)> {
    authorize(user.role, Operation::ServiceLogCreate)?;
    let controller = ServiceLogController::new(state.pool.clone());
    let log = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

async fn update_service_log(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateServiceLogRequest>,
) -> AppResult<Json<ServiceLogResponse>> {
    authorize(user.role, Operation::ServiceLogUpdate)?;
    let controller = ServiceLogController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_service_log(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    authorize(user.role, Operation::ServiceLogDelete)?;
    let controller = ServiceLogController::new(state.pool.clone());
    Ok(Json(controller.delete(id).await?))
}
