//! DTOs del dashboard

use serde::Serialize;

/// KPIs de la flota, sobre los vehículos que matchean el filtro
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiResponse {
    /// Vehículos On Trip
    pub active_fleet: i64,
    /// Vehículos In Shop
    pub maintenance_alerts: i64,
    /// Porcentaje (redondeado) de vehículos On Trip sobre el total filtrado
    pub utilization_rate: i64,
    /// Trips en Draft (sin filtrar)
    pub pending_cargo: i64,
    pub total_vehicles: i64,
}
