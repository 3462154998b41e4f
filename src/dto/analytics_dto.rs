//! DTOs de analytics

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Filtro opcional por vehículo en los cuatro endpoints de analytics
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsFilters {
    pub vehicle_id: Option<Uuid>,
}

/// Query del export: type ∈ {vehicles, trips, analytics}
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(rename = "type")]
    pub export_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelEfficiencyResponse {
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub license_plate: String,
    pub total_liters: f64,
    pub total_km: f64,
    pub km_per_liter: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRoiResponse {
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub license_plate: String,
    pub revenue: f64,
    pub total_operational_cost: f64,
    pub acquisition_cost: f64,
    pub roi: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostPerKmResponse {
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub license_plate: String,
    pub total_distance: f64,
    pub total_operational_cost: f64,
    pub cost_per_km: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalCostResponse {
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub license_plate: String,
    pub total_fuel_cost: f64,
    pub total_maintenance_cost: f64,
    pub total_operational_cost: f64,
}
