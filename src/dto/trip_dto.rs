//! DTOs de Trip
//!
//! Las respuestas llevan el vehículo y el conductor embebidos (el
//! populate del API original) en vez de los ids sueltos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::driver::DriverStatus;
use crate::models::trip::TripStatus;
use crate::models::vehicle::{VehicleStatus, VehicleType};

/// Request para crear un trip
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub cargo_weight: Option<f64>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub revenue: Option<f64>,
    pub distance: Option<f64>,
}

/// Request para editar un trip Draft (parcial)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTripRequest {
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub cargo_weight: Option<f64>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub revenue: Option<f64>,
    pub distance: Option<f64>,
}

/// Body del PATCH de estado
#[derive(Debug, Deserialize)]
pub struct UpdateTripStatusRequest {
    pub status: Option<String>,
}

/// Filtros para el listado de trips
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripFilters {
    pub status: Option<String>,
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
}

/// Resumen del vehículo embebido en las respuestas de trips
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripVehicleRef {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
    pub vehicle_type: VehicleType,
    pub max_load_capacity: f64,
    pub status: VehicleStatus,
}

/// Resumen del conductor embebido en las respuestas de trips
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDriverRef {
    pub id: Uuid,
    pub name: String,
    pub license_number: String,
    pub status: DriverStatus,
}

/// Response de trip con sus referencias pobladas
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    pub id: Uuid,
    pub vehicle: Option<TripVehicleRef>,
    pub driver: Option<TripDriverRef>,
    pub cargo_weight: f64,
    pub origin: String,
    pub destination: String,
    pub revenue: f64,
    pub distance: f64,
    pub status: TripStatus,
    pub dispatched_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
