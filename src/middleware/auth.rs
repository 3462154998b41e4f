//! Middleware de autenticación JWT
//!
//! El principal se extrae del bearer token y se re-lee de la base en
//! cada request: borrar un usuario revoca su acceso de inmediato.
//! Cada modo de falla del credential tiene su propio mensaje 401.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::EnvironmentConfig,
    models::user::{User, UserRole},
    repositories::user_repository::UserRepository,
    state::AppState,
    utils::errors::AppError,
};

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub exp: usize,
    pub iat: usize,
}

/// Usuario autenticado que se inyecta en los handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub name: String,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            name: user.name,
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Access denied. No token provided.".to_string()))?;

        let claims = decode_token(token, &state.config)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid token.".to_string()))?;

        // Re-fetch en cada request: un usuario borrado queda revocado al instante
        let user = UserRepository::new(state.pool.clone())
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found.".to_string()))?;

        Ok(AuthenticatedUser::from(user))
    }
}

/// Generar JWT token para un usuario
pub fn generate_token(user_id: Uuid, config: &EnvironmentConfig) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.jwt_expiration as i64);

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
}

/// Decodificar y validar un token, distinguiendo expirado de malformado
pub fn decode_token(token: &str, config: &EnvironmentConfig) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::Unauthorized("Token expired.".to_string()),
            _ => AppError::Unauthorized("Invalid token.".to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(expiration: u64) -> EnvironmentConfig {
        EnvironmentConfig {
            environment: "development".to_string(),
            port: 5000,
            host: "0.0.0.0".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: expiration,
            cors_origins: vec![],
            frontend_url: "http://localhost:3000".to_string(),
        }
    }

    #[test]
    fn test_generate_and_decode_token() {
        let config = config(3600);
        let user_id = Uuid::new_v4();

        let token = generate_token(user_id, &config).unwrap();
        assert!(!token.is_empty());

        let claims = decode_token(&token, &config).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_has_distinct_message() {
        // Vencido hace una hora (fuera del leeway default de 60s)
        let config = config(0);
        let now = chrono::Utc::now() - chrono::Duration::hours(1);
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: now.timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_ref()),
        )
        .unwrap();

        match decode_token(&token, &config) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Token expired."),
            other => panic!("expected expired token error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let config = config(3600);
        match decode_token("not-a-jwt", &config) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Invalid token."),
            other => panic!("expected invalid token error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let config_a = config(3600);
        let mut config_b = config(3600);
        config_b.jwt_secret = "other-secret".to_string();

        let token = generate_token(Uuid::new_v4(), &config_a).unwrap();
        assert!(decode_token(&token, &config_b).is_err());
    }
}
