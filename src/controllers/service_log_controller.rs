//! Controller de ServiceLogs
//!
//! Registrar un service manda el vehículo al taller: el estado queda
//! forzado a In Shop como efecto de la creación.

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::controllers::fuel_log_controller::parse_request_date;
use crate::dto::service_log_dto::{
    CreateServiceLogRequest, ServiceLogResponse, UpdateServiceLogRequest,
};
use crate::dto::MessageResponse;
use crate::models::service_log::ServiceLog;
use crate::models::vehicle::VehicleStatus;
use crate::repositories::service_log_repository::ServiceLogRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::dates::parse_date_flexible;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct ServiceLogController {
    logs: ServiceLogRepository,
    vehicles: VehicleRepository,
}

impl ServiceLogController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            logs: ServiceLogRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self, vehicle_id: Option<Uuid>) -> AppResult<Vec<ServiceLogResponse>> {
        let rows = self.logs.list_with_vehicle(vehicle_id).await?;
        Ok(rows.into_iter().map(ServiceLogResponse::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<ServiceLogResponse> {
        let row = self
            .logs
            .find_with_vehicle(id)
            .await?
            .ok_or_else(|| not_found_error("Service log"))?;
        Ok(ServiceLogResponse::from(row))
    }

    pub async fn create(&self, request: CreateServiceLogRequest) -> AppResult<ServiceLogResponse> {
        let (vehicle_id, service_type, cost) = match (
            request.vehicle_id,
            request
                .service_type
                .as_deref()
                .filter(|s| !s.trim().is_empty()),
            request.cost,
        ) {
            (Some(v), Some(t), Some(c)) => (v, t.to_string(), c),
            _ => {
                return Err(AppError::Validation(
                    "vehicleId, serviceType, and cost are required.".to_string(),
                ))
            }
        };

        self.vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        let date = parse_request_date(request.date.as_deref())?;

        let log = ServiceLog {
            id: Uuid::new_v4(),
            vehicle_id,
            service_type,
            cost,
            date,
            notes: request.notes.unwrap_or_default(),
            created_at: Utc::now(),
        };
        let log = self.logs.insert(&log).await?;

        // Efecto de la creación: el vehículo entra al taller
        self.vehicles
            .set_status(vehicle_id, VehicleStatus::InShop)
            .await?;
        info!(vehicle_id = %vehicle_id, "vehicle sent to shop by service log");

        self.get(log.id).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateServiceLogRequest,
    ) -> AppResult<ServiceLogResponse> {
        let mut log = self
            .logs
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Service log"))?;

        if let Some(service_type) = request.service_type {
            log.service_type = service_type;
        }
        if let Some(cost) = request.cost {
            log.cost = cost;
        }
        if let Some(raw) = request.date.as_deref() {
            log.date = parse_date_flexible(raw)
                .ok_or_else(|| AppError::Validation("date must be a valid date.".to_string()))?;
        }
        if let Some(notes) = request.notes {
            log.notes = notes;
        }
        self.logs.update(&log).await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<MessageResponse> {
        if !self.logs.delete(id).await? {
            return Err(not_found_error("Service log"));
        }
        Ok(MessageResponse::new("Service log deleted."))
    }
}
