//! DTOs de FuelLog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request para registrar una carga de combustible
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFuelLogRequest {
    pub vehicle_id: Option<Uuid>,
    pub liters: Option<f64>,
    pub cost: Option<f64>,
    pub date: Option<String>,
    pub odometer_at_fill: Option<f64>,
}

/// Request para actualizar una carga (parcial)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFuelLogRequest {
    pub liters: Option<f64>,
    pub cost: Option<f64>,
    pub date: Option<String>,
    pub odometer_at_fill: Option<f64>,
}

/// Filtro por vehículo para listados de logs
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilters {
    pub vehicle_id: Option<Uuid>,
}

/// Resumen del vehículo embebido en las respuestas de logs
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogVehicleRef {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
}

/// Response de fuel log con su vehículo poblado
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelLogResponse {
    pub id: Uuid,
    pub vehicle: Option<LogVehicleRef>,
    pub liters: f64,
    pub cost: f64,
    pub date: DateTime<Utc>,
    pub odometer_at_fill: Option<f64>,
    pub created_at: DateTime<Utc>,
}
