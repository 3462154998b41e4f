//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y los enums cerrados de tipo
//! y estado. Los valores se serializan con los strings del API original
//! ("On Trip", "Out of Service", ...) tanto en JSON como en la columna TEXT.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgHasArrayType, PgTypeInfo};
use sqlx::FromRow;
use uuid::Uuid;

/// Tipo de vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum VehicleType {
    Truck,
    Van,
    Bike,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [VehicleType::Truck, VehicleType::Van, VehicleType::Bike];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Truck => "Truck",
            VehicleType::Van => "Van",
            VehicleType::Bike => "Bike",
        }
    }

    /// Lista legible para mensajes de validación
    pub fn valid_values() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VehicleType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Truck" => Ok(VehicleType::Truck),
            "Van" => Ok(VehicleType::Van),
            "Bike" => Ok(VehicleType::Bike),
            _ => Err(()),
        }
    }
}

// Los sets de tipos permitidos de los drivers se guardan como TEXT[]
impl PgHasArrayType for VehicleType {
    fn array_type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("_text")
    }
}

/// Estado del vehículo
///
/// Las transiciones están gobernadas por la máquina de estados de trips
/// y por la creación de service logs (fuerza In Shop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum VehicleStatus {
    Available,
    #[serde(rename = "On Trip")]
    #[sqlx(rename = "On Trip")]
    OnTrip,
    #[serde(rename = "In Shop")]
    #[sqlx(rename = "In Shop")]
    InShop,
    #[serde(rename = "Out of Service")]
    #[sqlx(rename = "Out of Service")]
    OutOfService,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::OnTrip => "On Trip",
            VehicleStatus::InShop => "In Shop",
            VehicleStatus::OutOfService => "Out of Service",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VehicleStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(VehicleStatus::Available),
            "On Trip" => Ok(VehicleStatus::OnTrip),
            "In Shop" => Ok(VehicleStatus::InShop),
            "Out of Service" => Ok(VehicleStatus::OutOfService),
            _ => Err(()),
        }
    }
}

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub model: String,
    pub license_plate: String,
    pub vehicle_type: VehicleType,
    /// Capacidad máxima de carga en kg
    pub max_load_capacity: f64,
    pub odometer: f64,
    pub status: VehicleStatus,
    pub region: String,
    pub acquisition_cost: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalizar una matrícula: trim + mayúsculas
pub fn normalize_license_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_normalize_license_plate() {
        assert_eq!(normalize_license_plate("  ab-123-cd "), "AB-123-CD");
        assert_eq!(normalize_license_plate("XY-9"), "XY-9");
    }

    #[test]
    fn test_vehicle_status_round_trip() {
        for status in [
            VehicleStatus::Available,
            VehicleStatus::OnTrip,
            VehicleStatus::InShop,
            VehicleStatus::OutOfService,
        ] {
            assert_eq!(VehicleStatus::from_str(status.as_str()), Ok(status));
        }
        assert!(VehicleStatus::from_str("Parked").is_err());
    }

    #[test]
    fn test_vehicle_type_valid_values() {
        assert_eq!(VehicleType::valid_values(), "Truck, Van, Bike");
    }

    #[test]
    fn test_status_serializes_to_wire_string() {
        let json = serde_json::to_string(&VehicleStatus::OutOfService).unwrap();
        assert_eq!(json, "\"Out of Service\"");
    }
}
