//! Modelo de Trip y su máquina de estados
//!
//! El ciclo de vida es Draft → Dispatched → Completed, con Cancelled
//! alcanzable desde Draft o Dispatched. Toda otra transición es ilegal
//! y se rechaza antes de escribir nada.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum TripStatus {
    Draft,
    Dispatched,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub const ALL: [TripStatus; 4] = [
        TripStatus::Draft,
        TripStatus::Dispatched,
        TripStatus::Completed,
        TripStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Draft => "Draft",
            TripStatus::Dispatched => "Dispatched",
            TripStatus::Completed => "Completed",
            TripStatus::Cancelled => "Cancelled",
        }
    }

    pub fn valid_values() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Aristas legales de la máquina de estados
    pub fn can_transition_to(self, next: TripStatus) -> bool {
        matches!(
            (self, next),
            (TripStatus::Draft, TripStatus::Dispatched)
                | (TripStatus::Dispatched, TripStatus::Completed)
                | (TripStatus::Draft, TripStatus::Cancelled)
                | (TripStatus::Dispatched, TripStatus::Cancelled)
        )
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TripStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(TripStatus::Draft),
            "Dispatched" => Ok(TripStatus::Dispatched),
            "Completed" => Ok(TripStatus::Completed),
            "Cancelled" => Ok(TripStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// Trip principal - mapea a la tabla trips
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    /// Peso de la carga en kg; nunca supera la capacidad del vehículo asignado
    pub cargo_weight: f64,
    pub origin: String,
    pub destination: String,
    pub revenue: f64,
    /// Distancia en km, usada por analytics
    pub distance: f64,
    pub status: TripStatus,
    pub dispatched_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_legal_transitions() {
        assert!(TripStatus::Draft.can_transition_to(TripStatus::Dispatched));
        assert!(TripStatus::Draft.can_transition_to(TripStatus::Cancelled));
        assert!(TripStatus::Dispatched.can_transition_to(TripStatus::Completed));
        assert!(TripStatus::Dispatched.can_transition_to(TripStatus::Cancelled));
    }

    #[test]
    fn test_illegal_transitions() {
        // Los estados terminales no tienen salida
        for next in TripStatus::ALL {
            assert!(!TripStatus::Completed.can_transition_to(next));
            assert!(!TripStatus::Cancelled.can_transition_to(next));
        }
        // No se puede saltar Draft → Completed ni volver a Draft
        assert!(!TripStatus::Draft.can_transition_to(TripStatus::Draft));
        assert!(!TripStatus::Draft.can_transition_to(TripStatus::Completed));
        assert!(!TripStatus::Dispatched.can_transition_to(TripStatus::Draft));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(TripStatus::from_str("Dispatched"), Ok(TripStatus::Dispatched));
        assert!(TripStatus::from_str("dispatched").is_err());
        assert_eq!(
            TripStatus::valid_values(),
            "Draft, Dispatched, Completed, Cancelled"
        );
    }
}
