//! Controller de autenticación
//!
//! El login emite el bearer token; forgot/reset manejan el ciclo del
//! token de recuperación. El delivery del mail es un colaborador
//! externo: acá sólo se emite el link y se deja trazado.

use chrono::{Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::config::EnvironmentConfig;
use crate::dto::auth_dto::{
    ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, LoginResponse,
    ResetPasswordRequest,
};
use crate::dto::MessageResponse;
use crate::middleware::auth::generate_token;
use crate::models::user::UserResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, AppResult};

const RESET_TOKEN_TTL_MINUTES: i64 = 60;

pub struct AuthController {
    users: UserRepository,
    config: EnvironmentConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            config,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let (email, password) = match (request.email, request.password) {
            (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => (e, p),
            _ => {
                return Err(AppError::Validation(
                    "Email and password are required.".to_string(),
                ))
            }
        };

        // Mismo mensaje para email desconocido y password incorrecto
        let user = self
            .users
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password.".to_string()))?;

        if !bcrypt::verify(&password, &user.password_hash)? {
            return Err(AppError::Unauthorized(
                "Invalid email or password.".to_string(),
            ));
        }

        let token = generate_token(user.id, &self.config)?;
        info!(user_id = %user.id, role = user.role.as_str(), "user logged in");

        Ok(LoginResponse {
            token,
            user: UserResponse::from(user),
            expires_in: self.config.jwt_expiration,
        })
    }

    /// Siempre responde igual exista o no la cuenta, para no filtrar
    /// qué emails están registrados
    pub async fn forgot_password(
        &self,
        request: ForgotPasswordRequest,
    ) -> AppResult<ForgotPasswordResponse> {
        let email = match request.email {
            Some(e) if !e.trim().is_empty() => e.trim().to_lowercase(),
            _ => return Err(AppError::Validation("Email is required.".to_string())),
        };

        let generic = ForgotPasswordResponse {
            message: "If an account exists, a reset link has been sent.".to_string(),
            reset_token: None,
            reset_url: None,
        };

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => return Ok(generic),
        };

        let mut token_bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut token_bytes);
        let reset_token = hex::encode(token_bytes);
        let token_hash = hash_reset_token(&reset_token);
        let expires = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);

        self.users
            .set_reset_token(user.id, &token_hash, expires)
            .await?;

        let reset_url = format!(
            "{}/reset-password?token={}",
            self.config.frontend_url, reset_token
        );
        // El delivery real del mail es externo; el link queda en el log
        info!(user_id = %user.id, reset_url = %reset_url, "password reset link issued");

        if self.config.is_development() {
            Ok(ForgotPasswordResponse {
                reset_token: Some(reset_token),
                reset_url: Some(reset_url),
                ..generic
            })
        } else {
            Ok(generic)
        }
    }

    pub async fn reset_password(&self, request: ResetPasswordRequest) -> AppResult<MessageResponse> {
        let (token, new_password) = match (request.token, request.new_password) {
            (Some(t), Some(p)) if !t.is_empty() && p.len() >= 6 => (t, p),
            _ => {
                return Err(AppError::Validation(
                    "Valid token and password (min 6 chars) are required.".to_string(),
                ))
            }
        };

        let user = self
            .users
            .find_by_reset_token(&hash_reset_token(&token), Utc::now())
            .await?
            .ok_or_else(|| {
                AppError::Validation("Invalid or expired reset token.".to_string())
            })?;

        let password_hash = bcrypt::hash(&new_password, bcrypt::DEFAULT_COST)?;
        self.users
            .set_password_and_clear_reset(user.id, &password_hash)
            .await?;
        info!(user_id = %user.id, "password reset completed");

        Ok(MessageResponse::new(
            "Password reset successful. You can log in now.",
        ))
    }

    /// El principal ya viene re-leído del store por el extractor; acá se
    /// re-busca para devolver el registro completo sin el hash
    pub async fn me(&self, user_id: Uuid) -> AppResult<UserResponse> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found.".to_string()))?;
        Ok(UserResponse::from(user))
    }
}

/// El token viaja crudo y se guarda hasheado, como cualquier credencial
fn hash_reset_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_token_hash_is_deterministic_hex() {
        let a = hash_reset_token("abc123");
        let b = hash_reset_token("abc123");
        let c = hash_reset_token("abc124");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}
