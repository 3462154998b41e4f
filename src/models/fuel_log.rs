//! Modelo de FuelLog
//!
//! Cada registro pertenece al vehículo referenciado; sólo se exige que el
//! vehículo exista en el momento de la creación.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FuelLog {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub liters: f64,
    pub cost: f64,
    pub date: DateTime<Utc>,
    /// Lectura del odómetro al cargar; None cuando no se registró
    pub odometer_at_fill: Option<f64>,
    pub created_at: DateTime<Utc>,
}
