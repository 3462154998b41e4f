//! Rutas de autenticación
//!
//! login/forgot/reset son públicas; /me requiere bearer token pero no
//! restringe por rol.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, LoginResponse,
    ResetPasswordRequest,
};
use crate::dto::MessageResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::UserResponse;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
        .route("/me", get(me))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let controller = AuthController::new(state.pool.clone(), state.config.clone());
    Ok(Json(controller.login(request).await?))
}

async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> AppResult<Json<ForgotPasswordResponse>> {
    let controller = AuthController::new(state.pool.clone(), state.config.clone());
    Ok(Json(controller.forgot_password(request).await?))
}

async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let controller = AuthController::new(state.pool.clone(), state.config.clone());
    Ok(Json(controller.reset_password(request).await?))
}

async fn me(
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let controller = AuthController::new(state.pool.clone(), state.config.clone());
    Ok(Json(controller.me(user.id).await?))
}
