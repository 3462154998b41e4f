//! Modelo de ServiceLog
//!
//! Crear uno fuerza el estado del vehículo referenciado a "In Shop".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLog {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub service_type: String,
    pub cost: f64,
    pub date: DateTime<Utc>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}
