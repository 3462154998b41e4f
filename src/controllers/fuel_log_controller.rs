//! Controller de FuelLogs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::fuel_log_dto::{CreateFuelLogRequest, FuelLogResponse, UpdateFuelLogRequest};
use crate::dto::MessageResponse;
use crate::models::fuel_log::FuelLog;
use crate::repositories::fuel_log_repository::FuelLogRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::dates::parse_date_flexible;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct FuelLogController {
    logs: FuelLogRepository,
    vehicles: VehicleRepository,
}

impl FuelLogController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            logs: FuelLogRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self, vehicle_id: Option<Uuid>) -> AppResult<Vec<FuelLogResponse>> {
        let rows = self.logs.list_with_vehicle(vehicle_id).await?;
        Ok(rows.into_iter().map(FuelLogResponse::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<FuelLogResponse> {
        let row = self
            .logs
            .find_with_vehicle(id)
            .await?
            .ok_or_else(|| not_found_error("Fuel log"))?;
        Ok(FuelLogResponse::from(row))
    }

    pub async fn create(&self, request: CreateFuelLogRequest) -> AppResult<FuelLogResponse> {
        let (vehicle_id, liters, cost) =
            match (request.vehicle_id, request.liters, request.cost) {
                (Some(v), Some(l), Some(c)) => (v, l, c),
                _ => {
                    return Err(AppError::Validation(
                        "vehicleId, liters, and cost are required.".to_string(),
                    ))
                }
            };

        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        let date = parse_request_date(request.date.as_deref())?;

        let log = FuelLog {
            id: Uuid::new_v4(),
            vehicle_id,
            liters,
            cost,
            date,
            // Sin lectura explícita se toma el odómetro actual del vehículo
            odometer_at_fill: request.odometer_at_fill.or(Some(vehicle.odometer)),
            created_at: Utc::now(),
        };
        let log = self.logs.insert(&log).await?;

        self.get(log.id).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateFuelLogRequest) -> AppResult<FuelLogResponse> {
        let mut log = self
            .logs
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Fuel log"))?;

        if let Some(liters) = request.liters {
            log.liters = liters;
        }
        if let Some(cost) = request.cost {
            log.cost = cost;
        }
        if let Some(raw) = request.date.as_deref() {
            log.date = parse_date_flexible(raw)
                .ok_or_else(|| AppError::Validation("date must be a valid date.".to_string()))?;
        }
        if let Some(odometer) = request.odometer_at_fill {
            log.odometer_at_fill = Some(odometer);
        }
        self.logs.update(&log).await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<MessageResponse> {
        if !self.logs.delete(id).await? {
            return Err(not_found_error("Fuel log"));
        }
        Ok(MessageResponse::new("Fuel log deleted."))
    }
}

/// Fecha del request o ahora si no vino
pub(crate) fn parse_request_date(
    raw: Option<&str>,
) -> AppResult<chrono::DateTime<Utc>> {
    match raw {
        Some(value) => parse_date_flexible(value)
            .ok_or_else(|| AppError::Validation("date must be a valid date.".to_string())),
        None => Ok(Utc::now()),
    }
}
