//! DTOs de ServiceLog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::vehicle::VehicleStatus;

/// Request para registrar un service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceLogRequest {
    pub vehicle_id: Option<Uuid>,
    pub service_type: Option<String>,
    pub cost: Option<f64>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

/// Request para actualizar un service (parcial)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceLogRequest {
    pub service_type: Option<String>,
    pub cost: Option<f64>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

/// Resumen del vehículo embebido, con su estado (queda In Shop al crear)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceVehicleRef {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
    pub status: VehicleStatus,
}

/// Response de service log con su vehículo poblado
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLogResponse {
    pub id: Uuid,
    pub vehicle: Option<ServiceVehicleRef>,
    pub service_type: String,
    pub cost: f64,
    pub date: DateTime<Utc>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}
