//! Reglas de elegibilidad y disponibilidad para el dispatch
//!
//! Funciones de decisión puras, sin efectos sobre la persistencia.
//! El trip controller las invoca en la creación y edición de trips;
//! cada falla corta con su propio mensaje de validación.

use chrono::{DateTime, Utc};

use crate::models::driver::{Driver, DriverStatus};
use crate::models::vehicle::{Vehicle, VehicleStatus};

/// Un vehículo sólo puede asignarse si está Available
pub fn vehicle_available_for_dispatch(vehicle: &Vehicle) -> bool {
    vehicle.status == VehicleStatus::Available
}

/// Un conductor sólo puede asignarse si está Off Duty y con licencia vigente
pub fn driver_available_for_dispatch(driver: &Driver, now: DateTime<Utc>) -> bool {
    driver.status == DriverStatus::OffDuty && driver.license_expiry_date > now
}

pub fn driver_license_expired(driver: &Driver, now: DateTime<Utc>) -> bool {
    driver.license_expiry_date <= now
}

/// El conductor debe estar habilitado para el tipo del vehículo
pub fn driver_eligible_for_vehicle(driver: &Driver, vehicle: &Vehicle) -> bool {
    driver.allowed_vehicle_type.contains(&vehicle.vehicle_type)
}

/// La carga debe entrar en la capacidad máxima del vehículo
pub fn cargo_fits(weight: f64, vehicle: &Vehicle) -> bool {
    weight <= vehicle.max_load_capacity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleType;
    use chrono::Duration;
    use uuid::Uuid;

    fn vehicle(status: VehicleStatus) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            name: "Truck 1".to_string(),
            model: "Volvo FH".to_string(),
            license_plate: "AB-123-CD".to_string(),
            vehicle_type: VehicleType::Truck,
            max_load_capacity: 1000.0,
            odometer: 0.0,
            status,
            region: "North".to_string(),
            acquisition_cost: 50_000.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn driver(status: DriverStatus, expiry: DateTime<Utc>) -> Driver {
        Driver {
            id: Uuid::new_v4(),
            name: "Marco".to_string(),
            license_number: "LIC-001".to_string(),
            license_expiry_date: expiry,
            allowed_vehicle_type: vec![VehicleType::Truck],
            status,
            safety_score: 100.0,
            trips_completed: 0,
            email: String::new(),
            phone: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_only_available_vehicles_can_dispatch() {
        assert!(vehicle_available_for_dispatch(&vehicle(VehicleStatus::Available)));
        for status in [
            VehicleStatus::OnTrip,
            VehicleStatus::InShop,
            VehicleStatus::OutOfService,
        ] {
            assert!(!vehicle_available_for_dispatch(&vehicle(status)));
        }
    }

    #[test]
    fn test_driver_availability_requires_off_duty_and_valid_license() {
        let now = Utc::now();
        let future = now + Duration::days(30);
        let past = now - Duration::days(1);

        assert!(driver_available_for_dispatch(&driver(DriverStatus::OffDuty, future), now));
        assert!(!driver_available_for_dispatch(&driver(DriverStatus::OnDuty, future), now));
        assert!(!driver_available_for_dispatch(&driver(DriverStatus::Suspended, future), now));
        assert!(!driver_available_for_dispatch(&driver(DriverStatus::OffDuty, past), now));
    }

    #[test]
    fn test_license_expiry_is_inclusive() {
        let now = Utc::now();
        // Una licencia que vence exactamente ahora ya no sirve
        assert!(driver_license_expired(&driver(DriverStatus::OffDuty, now), now));
        assert!(!driver_license_expired(
            &driver(DriverStatus::OffDuty, now + Duration::seconds(1)),
            now
        ));
    }

    #[test]
    fn test_driver_eligibility_by_vehicle_type() {
        let truck = vehicle(VehicleStatus::Available);
        let mut d = driver(DriverStatus::OffDuty, Utc::now() + Duration::days(30));
        assert!(driver_eligible_for_vehicle(&d, &truck));

        d.allowed_vehicle_type = vec![VehicleType::Bike, VehicleType::Van];
        assert!(!driver_eligible_for_vehicle(&d, &truck));
    }

    #[test]
    fn test_cargo_fits_boundary() {
        let v = vehicle(VehicleStatus::Available);
        assert!(cargo_fits(1000.0, &v));
        assert!(!cargo_fits(1000.1, &v));
        assert!(cargo_fits(0.0, &v));
    }
}
