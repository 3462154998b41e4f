//! DTOs de Vehicle
//!
//! Los campos enum llegan como strings y se parsean en el controller,
//! así cada valor inválido produce su mensaje específico en vez del
//! error genérico de deserialización.

use serde::Deserialize;
use validator::Validate;

/// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub name: Option<String>,
    pub model: Option<String>,
    pub license_plate: Option<String>,
    pub vehicle_type: Option<String>,
    #[validate(range(min = 0.0))]
    pub max_load_capacity: Option<f64>,
    #[validate(range(min = 0.0))]
    pub odometer: Option<f64>,
    pub status: Option<String>,
    pub region: Option<String>,
    pub acquisition_cost: Option<f64>,
}

/// Request para actualizar un vehículo (parcial)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub name: Option<String>,
    pub model: Option<String>,
    pub license_plate: Option<String>,
    pub vehicle_type: Option<String>,
    #[validate(range(min = 0.0))]
    pub max_load_capacity: Option<f64>,
    #[validate(range(min = 0.0))]
    pub odometer: Option<f64>,
    pub status: Option<String>,
    pub region: Option<String>,
    pub acquisition_cost: Option<f64>,
    /// true fuerza Out of Service; false lo vuelve a Available
    pub out_of_service: Option<bool>,
}

/// Filtros para el listado de vehículos
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilters {
    pub vehicle_type: Option<String>,
    pub status: Option<String>,
    /// Substring case-insensitive sobre la región
    pub region: Option<String>,
}
