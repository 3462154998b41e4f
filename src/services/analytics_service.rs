//! Motor de agregación de costos
//!
//! Matemática pura sobre logs y trips ya cargados; los controllers
//! arman los inputs desde los repositories. Todo es de sólo lectura y
//! computable por vehículo de forma independiente.

use crate::models::fuel_log::FuelLog;

/// Totales de costo operacional de un vehículo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostTotals {
    pub total_fuel_cost: f64,
    pub total_maintenance_cost: f64,
    pub total_operational_cost: f64,
}

impl CostTotals {
    pub fn new(total_fuel_cost: f64, total_maintenance_cost: f64) -> Self {
        Self {
            total_fuel_cost,
            total_maintenance_cost,
            total_operational_cost: total_fuel_cost + total_maintenance_cost,
        }
    }
}

/// Eficiencia de combustible de un vehículo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelEfficiency {
    pub total_liters: f64,
    pub total_km: f64,
    /// None cuando no hay litros registrados
    pub km_per_liter: Option<f64>,
}

/// Redondear a 2 decimales (semántica toFixed del API original)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calcular eficiencia sobre los fuel logs de un vehículo
///
/// Los logs deben venir ordenados por fecha ascendente. La distancia es
/// la suma de deltas de odómetro entre pares consecutivos con ambas
/// lecturas presentes; un delta negativo cuenta como 0, nunca resta.
pub fn fuel_efficiency(logs: &[FuelLog]) -> FuelEfficiency {
    let mut total_liters = 0.0;
    let mut total_km = 0.0;
    for (i, log) in logs.iter().enumerate() {
        total_liters += log.liters;
        if i > 0 {
            if let (Some(current), Some(previous)) =
                (log.odometer_at_fill, logs[i - 1].odometer_at_fill)
            {
                total_km += (current - previous).max(0.0);
            }
        }
    }
    let km_per_liter = if total_liters > 0.0 {
        Some(round2(total_km / total_liters))
    } else {
        None
    };
    FuelEfficiency {
        total_liters,
        total_km,
        km_per_liter,
    }
}

/// ROI = (revenue − costo operacional) / costo de adquisición
///
/// None cuando el costo de adquisición no es positivo.
pub fn vehicle_roi(revenue: f64, total_operational_cost: f64, acquisition_cost: f64) -> Option<f64> {
    if acquisition_cost > 0.0 {
        Some(round2((revenue - total_operational_cost) / acquisition_cost))
    } else {
        None
    }
}

/// Costo por km sobre la distancia de trips completados
///
/// None cuando la distancia total no es positiva.
pub fn cost_per_km(total_operational_cost: f64, total_distance: f64) -> Option<f64> {
    if total_distance > 0.0 {
        Some(round2(total_operational_cost / total_distance))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn log(liters: f64, odometer: Option<f64>, day: i64) -> FuelLog {
        FuelLog {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::nil(),
            liters,
            cost: 0.0,
            date: Utc::now() + Duration::days(day),
            odometer_at_fill: odometer,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_cost_totals() {
        let totals = CostTotals::new(120.5, 79.5);
        assert_eq!(totals.total_operational_cost, 200.0);
    }

    #[test]
    fn test_fuel_efficiency_clips_negative_deltas() {
        // Lecturas [100, 150, 140, 200]: 50 + 0 + 60 = 110 km sobre 40 litros
        let logs = vec![
            log(10.0, Some(100.0), 0),
            log(10.0, Some(150.0), 1),
            log(10.0, Some(140.0), 2),
            log(10.0, Some(200.0), 3),
        ];
        let eff = fuel_efficiency(&logs);
        assert_eq!(eff.total_liters, 40.0);
        assert_eq!(eff.total_km, 110.0);
        assert_eq!(eff.km_per_liter, Some(2.75));
    }

    #[test]
    fn test_fuel_efficiency_skips_missing_readings() {
        let logs = vec![
            log(5.0, Some(100.0), 0),
            log(5.0, None, 1),
            log(5.0, Some(130.0), 2),
        ];
        // El par con lectura faltante no aporta distancia
        let eff = fuel_efficiency(&logs);
        assert_eq!(eff.total_km, 0.0);
        assert_eq!(eff.total_liters, 15.0);
        assert_eq!(eff.km_per_liter, Some(0.0));
    }

    #[test]
    fn test_fuel_efficiency_without_liters_is_null() {
        let eff = fuel_efficiency(&[]);
        assert_eq!(eff.km_per_liter, None);

        let logs = vec![log(0.0, Some(100.0), 0), log(0.0, Some(200.0), 1)];
        assert_eq!(fuel_efficiency(&logs).km_per_liter, None);
    }

    #[test]
    fn test_roi_null_without_acquisition_cost() {
        assert_eq!(vehicle_roi(10_000.0, 2_000.0, 0.0), None);
        assert_eq!(vehicle_roi(10_000.0, 2_000.0, -5.0), None);
        assert_eq!(vehicle_roi(10_000.0, 2_000.0, 40_000.0), Some(0.2));
    }

    #[test]
    fn test_cost_per_km() {
        assert_eq!(cost_per_km(300.0, 0.0), None);
        assert_eq!(cost_per_km(300.0, 450.0), Some(0.67));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(2.749999), 2.75);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(10.0), 10.0);
    }
}
