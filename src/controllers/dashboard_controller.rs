//! Controller del Dashboard

use sqlx::PgPool;

use crate::dto::dashboard_dto::KpiResponse;
use crate::dto::vehicle_dto::VehicleFilters;
use crate::models::trip::TripStatus;
use crate::models::vehicle::VehicleStatus;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppResult;

pub struct DashboardController {
    vehicles: VehicleRepository,
    trips: TripRepository,
}

impl DashboardController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            trips: TripRepository::new(pool),
        }
    }

    /// KPIs de la flota sobre los vehículos que matchean el filtro;
    /// pendingCargo (trips Draft) no se filtra
    pub async fn kpis(&self, filters: VehicleFilters) -> AppResult<KpiResponse> {
        let vehicles = self.vehicles.list(&filters).await?;

        let total = vehicles.len() as i64;
        let on_trip = vehicles
            .iter()
            .filter(|v| v.status == VehicleStatus::OnTrip)
            .count() as i64;
        let in_shop = vehicles
            .iter()
            .filter(|v| v.status == VehicleStatus::InShop)
            .count() as i64;

        let utilization_rate = if total > 0 {
            ((on_trip as f64 / total as f64) * 100.0).round() as i64
        } else {
            0
        };

        let pending_cargo = self.trips.count_by_status(TripStatus::Draft).await?;

        Ok(KpiResponse {
            active_fleet: on_trip,
            maintenance_alerts: in_shop,
            utilization_rate,
            pending_cargo,
            total_vehicles: total,
        })
    }
}
