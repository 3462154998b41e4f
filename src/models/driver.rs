//! Modelo de Driver

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::vehicle::VehicleType;

/// Estado del conductor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum DriverStatus {
    #[serde(rename = "On Duty")]
    #[sqlx(rename = "On Duty")]
    OnDuty,
    #[serde(rename = "Off Duty")]
    #[sqlx(rename = "Off Duty")]
    OffDuty,
    Suspended,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::OnDuty => "On Duty",
            DriverStatus::OffDuty => "Off Duty",
            DriverStatus::Suspended => "Suspended",
        }
    }
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DriverStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "On Duty" => Ok(DriverStatus::OnDuty),
            "Off Duty" => Ok(DriverStatus::OffDuty),
            "Suspended" => Ok(DriverStatus::Suspended),
            _ => Err(()),
        }
    }
}

/// Driver principal - mapea a la tabla drivers
///
/// Invariante: allowed_vehicle_type nunca es vacío y cada miembro es
/// un tipo de vehículo válido (validado en la creación y edición).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub license_number: String,
    pub license_expiry_date: DateTime<Utc>,
    pub allowed_vehicle_type: Vec<VehicleType>,
    pub status: DriverStatus,
    /// Puntaje de seguridad en [0, 100]
    pub safety_score: f64,
    pub trips_completed: i32,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Acotar el safety score al rango [0, 100]
pub fn clamp_safety_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_driver_status_round_trip() {
        for status in [
            DriverStatus::OnDuty,
            DriverStatus::OffDuty,
            DriverStatus::Suspended,
        ] {
            assert_eq!(DriverStatus::from_str(status.as_str()), Ok(status));
        }
        assert!(DriverStatus::from_str("Retired").is_err());
    }

    #[test]
    fn test_clamp_safety_score() {
        assert_eq!(clamp_safety_score(150.0), 100.0);
        assert_eq!(clamp_safety_score(-3.0), 0.0);
        assert_eq!(clamp_safety_score(87.5), 87.5);
    }
}
