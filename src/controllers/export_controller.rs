//! Controller de exports CSV/PDF
//!
//! Junta los datos desde los repositories y delega el armado de bytes
//! en services::export_service.

use chrono::Utc;
use sqlx::PgPool;

use crate::controllers::analytics_controller::AnalyticsController;
use crate::dto::trip_dto::TripFilters;
use crate::dto::vehicle_dto::VehicleFilters;
use crate::models::vehicle::Vehicle;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::export_service;
use crate::utils::errors::{AppError, AppResult};

pub struct ExportController {
    vehicles: VehicleRepository,
    trips: TripRepository,
    analytics: AnalyticsController,
}

impl ExportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            trips: TripRepository::new(pool.clone()),
            analytics: AnalyticsController::new(pool),
        }
    }

    async fn all_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.vehicles.list(&VehicleFilters::default()).await
    }

    async fn analytics_rows(&self, vehicles: &[Vehicle]) -> AppResult<Vec<Vec<String>>> {
        let mut rows = Vec::with_capacity(vehicles.len());
        for vehicle in vehicles {
            let costs = self.analytics.aggregate_costs(vehicle.id).await?;
            rows.push(vec![
                vehicle.name.clone(),
                vehicle.license_plate.clone(),
                costs.total_fuel_cost.to_string(),
                costs.total_maintenance_cost.to_string(),
                costs.total_operational_cost.to_string(),
            ]);
        }
        Ok(rows)
    }

    /// CSV de vehicles, trips o analytics; otro type es un error
    pub async fn export_csv(&self, export_type: Option<&str>) -> AppResult<(String, String)> {
        let (export_type, csv) = match export_type {
            Some("vehicles") => {
                let headers = [
                    "name",
                    "model",
                    "licensePlate",
                    "vehicleType",
                    "maxLoadCapacity",
                    "odometer",
                    "status",
                    "region",
                ];
                let rows: Vec<Vec<String>> = self
                    .all_vehicles()
                    .await?
                    .into_iter()
                    .map(|v| {
                        vec![
                            v.name,
                            v.model,
                            v.license_plate,
                            v.vehicle_type.as_str().to_string(),
                            v.max_load_capacity.to_string(),
                            v.odometer.to_string(),
                            v.status.as_str().to_string(),
                            v.region,
                        ]
                    })
                    .collect();
                ("vehicles", export_service::build_csv(&headers, &rows))
            }
            Some("trips") => {
                let headers = [
                    "origin",
                    "destination",
                    "cargoWeight",
                    "revenue",
                    "status",
                    "vehicle",
                    "driver",
                ];
                let rows: Vec<Vec<String>> = self
                    .trips
                    .list_with_refs(&TripFilters::default())
                    .await?
                    .into_iter()
                    .map(|t| {
                        vec![
                            t.origin,
                            t.destination,
                            t.cargo_weight.to_string(),
                            t.revenue.to_string(),
                            t.status.as_str().to_string(),
                            t.vehicle_name.unwrap_or_default(),
                            t.driver_name.unwrap_or_default(),
                        ]
                    })
                    .collect();
                ("trips", export_service::build_csv(&headers, &rows))
            }
            Some("analytics") => {
                let headers = [
                    "vehicleName",
                    "licensePlate",
                    "totalFuelCost",
                    "totalMaintenanceCost",
                    "totalOperationalCost",
                ];
                let vehicles = self.all_vehicles().await?;
                let rows = self.analytics_rows(&vehicles).await?;
                ("analytics", export_service::build_csv(&headers, &rows))
            }
            _ => {
                return Err(AppError::Validation(
                    "Export type required: vehicles, trips, or analytics.".to_string(),
                ))
            }
        };

        let filename = format!(
            "fleetflow-{}-{}.csv",
            export_type,
            Utc::now().timestamp_millis()
        );
        Ok((filename, csv))
    }

    /// Reporte PDF de una página; un type desconocido cae al resumen
    /// de analytics, igual que el reporte original
    pub async fn export_pdf(&self, export_type: Option<&str>) -> AppResult<(String, Vec<u8>)> {
        let title = format!("FleetFlow Report - {}", export_type.unwrap_or("summary"));

        let (header_line, rows) = match export_type {
            Some("vehicles") => {
                let rows: Vec<String> = self
                    .all_vehicles()
                    .await?
                    .into_iter()
                    .map(|v| {
                        format!(
                            "{} | {} | {} | {} | {}",
                            v.name,
                            v.license_plate,
                            v.vehicle_type,
                            v.status,
                            v.max_load_capacity
                        )
                    })
                    .collect();
                ("Name | License | Type | Status | Max Load (kg)", rows)
            }
            Some("trips") => {
                let rows: Vec<String> = self
                    .trips
                    .list_with_refs(&TripFilters::default())
                    .await?
                    .into_iter()
                    .map(|t| {
                        format!(
                            "{} | {} | {} | {} | {} | {}",
                            t.origin,
                            t.destination,
                            t.status,
                            t.revenue,
                            t.vehicle_name.unwrap_or_default(),
                            t.driver_name.unwrap_or_default()
                        )
                    })
                    .collect();
                ("Origin | Destination | Status | Revenue | Vehicle | Driver", rows)
            }
            _ => {
                let vehicles = self.all_vehicles().await?;
                let mut rows = Vec::with_capacity(vehicles.len().min(20));
                for vehicle in vehicles.iter().take(20) {
                    let costs = self.analytics.aggregate_costs(vehicle.id).await?;
                    rows.push(format!(
                        "{} ({}) | {} | {} | {}",
                        vehicle.name,
                        vehicle.license_plate,
                        costs.total_fuel_cost,
                        costs.total_maintenance_cost,
                        costs.total_operational_cost
                    ));
                }
                ("Vehicle | Fuel Cost | Maintenance Cost | Total Operational Cost", rows)
            }
        };

        let filename = format!(
            "fleetflow-{}-{}.pdf",
            export_type.unwrap_or("report"),
            Utc::now().timestamp_millis()
        );
        Ok((filename, export_service::build_pdf(&title, header_line, &rows)))
    }
}