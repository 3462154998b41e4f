//! Controller de Vehicles

use chrono::Utc;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters};
use crate::dto::MessageResponse;
use crate::models::vehicle::{normalize_license_plate, Vehicle, VehicleStatus, VehicleType};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: VehicleFilters) -> AppResult<Vec<Vehicle>> {
        self.repository.list(&filters).await
    }

    pub async fn list_available(&self) -> AppResult<Vec<Vehicle>> {
        self.repository.list_available().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Vehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;

        let (name, license_plate, vehicle_type, max_load_capacity) = match (
            request.name.as_deref().filter(|s| !s.trim().is_empty()),
            request.license_plate.as_deref().filter(|s| !s.trim().is_empty()),
            request.vehicle_type.as_deref(),
            request.max_load_capacity,
        ) {
            (Some(n), Some(p), Some(t), Some(c)) => (n.to_string(), p, t, c),
            _ => {
                return Err(AppError::Validation(
                    "name, licensePlate, vehicleType, and maxLoadCapacity are required."
                        .to_string(),
                ))
            }
        };

        let vehicle_type = VehicleType::from_str(vehicle_type).map_err(|_| {
            AppError::Validation(format!(
                "Invalid vehicleType. Use: {}",
                VehicleType::valid_values()
            ))
        })?;

        let license_plate = normalize_license_plate(license_plate);
        if self
            .repository
            .license_plate_exists(&license_plate, None)
            .await?
        {
            return Err(AppError::Validation(
                "License plate already in use.".to_string(),
            ));
        }

        // Un status inválido no es error: se cae al default Available
        let status = request
            .status
            .as_deref()
            .and_then(|s| VehicleStatus::from_str(s).ok())
            .unwrap_or(VehicleStatus::Available);

        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            name,
            model: request.model.unwrap_or_default(),
            license_plate,
            vehicle_type,
            max_load_capacity,
            odometer: request.odometer.unwrap_or(0.0),
            status,
            region: request.region.unwrap_or_default(),
            acquisition_cost: request.acquisition_cost.unwrap_or(0.0),
            created_at: now,
            updated_at: now,
        };

        self.repository.insert(&vehicle).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;

        let mut vehicle = self.get(id).await?;

        if let Some(name) = request.name {
            vehicle.name = name;
        }
        if let Some(model) = request.model {
            vehicle.model = model;
        }
        if let Some(license_plate) = request.license_plate {
            let normalized = normalize_license_plate(&license_plate);
            if normalized != vehicle.license_plate {
                if self
                    .repository
                    .license_plate_exists(&normalized, Some(id))
                    .await?
                {
                    return Err(AppError::Validation(
                        "License plate already in use.".to_string(),
                    ));
                }
                vehicle.license_plate = normalized;
            }
        }
        // Valores de enum inválidos se ignoran en el update parcial
        if let Some(vehicle_type) = request
            .vehicle_type
            .as_deref()
            .and_then(|t| VehicleType::from_str(t).ok())
        {
            vehicle.vehicle_type = vehicle_type;
        }
        if let Some(capacity) = request.max_load_capacity {
            vehicle.max_load_capacity = capacity;
        }
        if let Some(odometer) = request.odometer {
            vehicle.odometer = odometer;
        }
        if let Some(status) = request
            .status
            .as_deref()
            .and_then(|s| VehicleStatus::from_str(s).ok())
        {
            vehicle.status = status;
        }
        if let Some(region) = request.region {
            vehicle.region = region;
        }
        if let Some(acquisition_cost) = request.acquisition_cost {
            vehicle.acquisition_cost = acquisition_cost;
        }
        // El toggle explícito pisa cualquier status del body
        match request.out_of_service {
            Some(true) => vehicle.status = VehicleStatus::OutOfService,
            Some(false) if vehicle.status == VehicleStatus::OutOfService => {
                vehicle.status = VehicleStatus::Available;
            }
            _ => {}
        }

        self.repository.update(&vehicle).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<MessageResponse> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehicle"));
        }
        Ok(MessageResponse::new("Vehicle deleted."))
    }
}
