//! Modelo de User
//!
//! El hash del password nunca se serializa hacia afuera: las respuestas
//! del API usan UserResponse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Rol del usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum UserRole {
    #[serde(rename = "Fleet Manager")]
    #[sqlx(rename = "Fleet Manager")]
    FleetManager,
    Dispatcher,
    #[serde(rename = "Safety Officer")]
    #[sqlx(rename = "Safety Officer")]
    SafetyOfficer,
    #[serde(rename = "Financial Analyst")]
    #[sqlx(rename = "Financial Analyst")]
    FinancialAnalyst,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::FleetManager => "Fleet Manager",
            UserRole::Dispatcher => "Dispatcher",
            UserRole::SafetyOfficer => "Safety Officer",
            UserRole::FinancialAnalyst => "Financial Analyst",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User principal - mapea a la tabla users
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub name: String,
    /// Hash sha256 (hex) del token de reset emitido, si hay uno vigente
    pub reset_password_token: Option<String>,
    pub reset_password_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Response de usuario para la API - sin password
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_to_wire_string() {
        let json = serde_json::to_string(&UserRole::FleetManager).unwrap();
        assert_eq!(json, "\"Fleet Manager\"");
        let back: UserRole = serde_json::from_str("\"Safety Officer\"").unwrap();
        assert_eq!(back, UserRole::SafetyOfficer);
    }

    #[test]
    fn test_user_response_excludes_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "manager@fleetflow.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            role: UserRole::FleetManager,
            name: "Ana".to_string(),
            reset_password_token: None,
            reset_password_expires: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
    }
}
