//! Controller de Analytics
//!
//! Los cuatro endpoints son de sólo lectura y se computan por vehículo
//! de forma independiente, así que el cálculo se abre en paralelo con
//! try_join_all. La matemática vive en services::analytics_service.

use futures::future::try_join_all;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::analytics_dto::{
    CostPerKmResponse, FuelEfficiencyResponse, OperationalCostResponse, VehicleRoiResponse,
};
use crate::dto::vehicle_dto::VehicleFilters;
use crate::models::vehicle::Vehicle;
use crate::repositories::fuel_log_repository::FuelLogRepository;
use crate::repositories::service_log_repository::ServiceLogRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::analytics_service::{self, CostTotals};
use crate::utils::errors::{AppError, AppResult};

pub struct AnalyticsController {
    vehicles: VehicleRepository,
    trips: TripRepository,
    fuel_logs: FuelLogRepository,
    service_logs: ServiceLogRepository,
}

impl AnalyticsController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            trips: TripRepository::new(pool.clone()),
            fuel_logs: FuelLogRepository::new(pool.clone()),
            service_logs: ServiceLogRepository::new(pool),
        }
    }

    /// Vehículos alcanzados por el filtro opcional
    async fn target_vehicles(&self, vehicle_id: Option<Uuid>) -> AppResult<Vec<Vehicle>> {
        match vehicle_id {
            Some(id) => Ok(self.vehicles.find_by_id(id).await?.into_iter().collect()),
            None => self.vehicles.list(&VehicleFilters::default()).await,
        }
    }

    /// Costos de combustible y mantenimiento de un vehículo
    pub async fn aggregate_costs(&self, vehicle_id: Uuid) -> AppResult<CostTotals> {
        let fuel = self.fuel_logs.total_cost(vehicle_id).await?;
        let maintenance = self.service_logs.total_cost(vehicle_id).await?;
        Ok(CostTotals::new(fuel, maintenance))
    }

    pub async fn fuel_efficiency(
        &self,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<FuelEfficiencyResponse>> {
        let vehicles = self.target_vehicles(vehicle_id).await?;
        try_join_all(vehicles.into_iter().map(|vehicle| async move {
            let logs = self.fuel_logs.list_for_vehicle_by_date(vehicle.id).await?;
            let efficiency = analytics_service::fuel_efficiency(&logs);
            Ok::<_, AppError>(FuelEfficiencyResponse {
                vehicle_id: vehicle.id,
                vehicle_name: vehicle.name,
                license_plate: vehicle.license_plate,
                total_liters: efficiency.total_liters,
                total_km: efficiency.total_km,
                km_per_liter: efficiency.km_per_liter,
            })
        }))
        .await
    }

    pub async fn vehicle_roi(
        &self,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<VehicleRoiResponse>> {
        let vehicles = self.target_vehicles(vehicle_id).await?;
        try_join_all(vehicles.into_iter().map(|vehicle| async move {
            let revenue = self.trips.completed_revenue_total(vehicle.id).await?;
            let costs = self.aggregate_costs(vehicle.id).await?;
            Ok::<_, AppError>(VehicleRoiResponse {
                vehicle_id: vehicle.id,
                vehicle_name: vehicle.name,
                license_plate: vehicle.license_plate,
                revenue,
                total_operational_cost: costs.total_operational_cost,
                acquisition_cost: vehicle.acquisition_cost,
                roi: analytics_service::vehicle_roi(
                    revenue,
                    costs.total_operational_cost,
                    vehicle.acquisition_cost,
                ),
            })
        }))
        .await
    }

    pub async fn cost_per_km(
        &self,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<CostPerKmResponse>> {
        let vehicles = self.target_vehicles(vehicle_id).await?;
        try_join_all(vehicles.into_iter().map(|vehicle| async move {
            let distance = self.trips.completed_distance_total(vehicle.id).await?;
            let costs = self.aggregate_costs(vehicle.id).await?;
            Ok::<_, AppError>(CostPerKmResponse {
                vehicle_id: vehicle.id,
                vehicle_name: vehicle.name,
                license_plate: vehicle.license_plate,
                total_distance: distance,
                total_operational_cost: costs.total_operational_cost,
                cost_per_km: analytics_service::cost_per_km(
                    costs.total_operational_cost,
                    distance,
                ),
            })
        }))
        .await
    }

    pub async fn operational_cost(
        &self,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<OperationalCostResponse>> {
        let vehicles = self.target_vehicles(vehicle_id).await?;
        try_join_all(vehicles.into_iter().map(|vehicle| async move {
            let costs = self.aggregate_costs(vehicle.id).await?;
            Ok::<_, AppError>(OperationalCostResponse {
                vehicle_id: vehicle.id,
                vehicle_name: vehicle.name,
                license_plate: vehicle.license_plate,
                total_fuel_cost: costs.total_fuel_cost,
                total_maintenance_cost: costs.total_maintenance_cost,
                total_operational_cost: costs.total_operational_cost,
            })
        }))
        .await
    }
}
