//! Controller de Drivers

use chrono::Utc;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::dto::driver_dto::{CreateDriverRequest, DriverFilters, UpdateDriverRequest};
use crate::dto::MessageResponse;
use crate::models::driver::{clamp_safety_score, Driver, DriverStatus};
use crate::models::vehicle::VehicleType;
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::dates::parse_date_flexible;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct DriverController {
    repository: DriverRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: DriverFilters) -> AppResult<Vec<Driver>> {
        self.repository.list(&filters).await
    }

    pub async fn list_available(&self) -> AppResult<Vec<Driver>> {
        self.repository.list_available().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Driver> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver"))
    }

    pub async fn create(&self, request: CreateDriverRequest) -> AppResult<Driver> {
        request.validate()?;

        let (name, license_number, expiry_raw) = match (
            request.name.as_deref().filter(|s| !s.trim().is_empty()),
            request
                .license_number
                .as_deref()
                .filter(|s| !s.trim().is_empty()),
            request.license_expiry_date.as_deref(),
        ) {
            (Some(n), Some(l), Some(e)) => (n.to_string(), l.to_string(), e),
            _ => {
                return Err(AppError::Validation(
                    "name, licenseNumber, and licenseExpiryDate are required.".to_string(),
                ))
            }
        };

        let license_expiry_date = parse_date_flexible(expiry_raw).ok_or_else(|| {
            AppError::Validation("licenseExpiryDate must be a valid date.".to_string())
        })?;

        let allowed_vehicle_type = parse_allowed_types(
            request
                .allowed_vehicle_type
                .map(|types| types.into_vec())
                .unwrap_or_default(),
        )?;
        if allowed_vehicle_type.is_empty() {
            return Err(AppError::Validation(
                "At least one allowedVehicleType is required.".to_string(),
            ));
        }

        if self
            .repository
            .license_number_exists(&license_number, None)
            .await?
        {
            return Err(AppError::Validation(
                "License number already in use.".to_string(),
            ));
        }

        let status = request
            .status
            .as_deref()
            .and_then(|s| DriverStatus::from_str(s).ok())
            .unwrap_or(DriverStatus::OffDuty);

        let now = Utc::now();
        let driver = Driver {
            id: Uuid::new_v4(),
            name,
            license_number,
            license_expiry_date,
            allowed_vehicle_type,
            status,
            safety_score: request.safety_score.unwrap_or(100.0),
            trips_completed: 0,
            email: request.email.unwrap_or_default(),
            phone: request.phone.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        self.repository.insert(&driver).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateDriverRequest) -> AppResult<Driver> {
        let mut driver = self.get(id).await?;

        if let Some(name) = request.name {
            driver.name = name;
        }
        if let Some(license_number) = request.license_number {
            if license_number != driver.license_number {
                if self
                    .repository
                    .license_number_exists(&license_number, Some(id))
                    .await?
                {
                    return Err(AppError::Validation(
                        "License number already in use.".to_string(),
                    ));
                }
                driver.license_number = license_number;
            }
        }
        if let Some(expiry_raw) = request.license_expiry_date.as_deref() {
            driver.license_expiry_date = parse_date_flexible(expiry_raw).ok_or_else(|| {
                AppError::Validation("licenseExpiryDate must be a valid date.".to_string())
            })?;
        }
        if let Some(types) = request.allowed_vehicle_type {
            let types = parse_allowed_types(types.into_vec())
                .map_err(|_| AppError::Validation("Invalid allowedVehicleType.".to_string()))?;
            // Un array vacío se ignora: el set nunca puede quedar vacío
            if !types.is_empty() {
                driver.allowed_vehicle_type = types;
            }
        }
        if let Some(status) = request
            .status
            .as_deref()
            .and_then(|s| DriverStatus::from_str(s).ok())
        {
            driver.status = status;
        }
        if let Some(score) = request.safety_score {
            driver.safety_score = clamp_safety_score(score);
        }
        if let Some(email) = request.email {
            driver.email = email;
        }
        if let Some(phone) = request.phone {
            driver.phone = phone;
        }

        self.repository.update(&driver).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<MessageResponse> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Driver"));
        }
        Ok(MessageResponse::new("Driver deleted."))
    }
}

/// Parsear el set de tipos permitidos; cualquier miembro inválido falla
fn parse_allowed_types(raw: Vec<String>) -> AppResult<Vec<VehicleType>> {
    raw.iter()
        .map(|t| {
            VehicleType::from_str(t).map_err(|_| {
                AppError::Validation(format!(
                    "Invalid allowedVehicleType. Use: {}",
                    VehicleType::valid_values()
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_types() {
        let types =
            parse_allowed_types(vec!["Truck".to_string(), "Van".to_string()]).unwrap();
        assert_eq!(types, vec![VehicleType::Truck, VehicleType::Van]);

        let err = parse_allowed_types(vec!["Truck".to_string(), "Submarine".to_string()]);
        assert!(err.is_err());

        assert!(parse_allowed_types(vec![]).unwrap().is_empty());
    }
}
