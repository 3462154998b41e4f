//! Controller de Trips: la máquina de estados del dispatch
//!
//! Draft → Dispatched → Completed, con Cancelled desde Draft o
//! Dispatched. Las precondiciones se validan en orden y la primera que
//! falla corta con su mensaje. Los efectos sobre Vehicle/Driver son
//! escrituras independientes de un registro: el trip se persiste y
//! después se tocan los otros dos, sin transacción que los abarque.
//!
//! El dispatch usa escrituras condicionales para reservar el par
//! vehículo/conductor, así dos dispatches concurrentes no pueden
//! quedarse ambos con el mismo vehículo.

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::trip_dto::{
    CreateTripRequest, TripFilters, TripResponse, UpdateTripRequest, UpdateTripStatusRequest,
};
use crate::dto::MessageResponse;
use crate::models::driver::{Driver, DriverStatus};
use crate::models::trip::{Trip, TripStatus};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::dispatch_rules;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct TripController {
    trips: TripRepository,
    vehicles: VehicleRepository,
    drivers: DriverRepository,
}

impl TripController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            trips: TripRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: TripFilters) -> AppResult<Vec<TripResponse>> {
        let rows = self.trips.list_with_refs(&filters).await?;
        Ok(rows.into_iter().map(TripResponse::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<TripResponse> {
        let row = self
            .trips
            .find_with_refs(id)
            .await?
            .ok_or_else(|| not_found_error("Trip"))?;
        Ok(TripResponse::from(row))
    }

    /// Crear un trip en Draft; sin efectos sobre Vehicle/Driver todavía
    pub async fn create(&self, request: CreateTripRequest) -> AppResult<TripResponse> {
        let (vehicle_id, driver_id, cargo_weight, origin, destination) = match (
            request.vehicle_id,
            request.driver_id,
            request.cargo_weight,
            non_empty(request.origin),
            non_empty(request.destination),
        ) {
            (Some(v), Some(d), Some(w), Some(o), Some(dest)) => (v, d, w, o, dest),
            _ => {
                return Err(AppError::Validation(
                    "vehicleId, driverId, cargoWeight, origin, and destination are required."
                        .to_string(),
                ))
            }
        };

        let vehicle = self.find_vehicle(vehicle_id).await?;
        check_vehicle_for_assignment(&vehicle)?;

        let driver = self.find_driver(driver_id).await?;
        check_driver_for_assignment(&driver)?;
        check_eligibility_and_cargo(&driver, &vehicle, cargo_weight)?;

        let now = Utc::now();
        let trip = Trip {
            id: Uuid::new_v4(),
            vehicle_id,
            driver_id,
            cargo_weight,
            origin,
            destination,
            revenue: request.revenue.unwrap_or(0.0),
            distance: request.distance.unwrap_or(0.0),
            status: TripStatus::Draft,
            dispatched_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        let trip = self.trips.insert(&trip).await?;

        self.get(trip.id).await
    }

    /// Editar un trip; sólo los Draft son editables
    pub async fn update(&self, id: Uuid, request: UpdateTripRequest) -> AppResult<TripResponse> {
        let mut trip = self.find_trip(id).await?;
        if trip.status != TripStatus::Draft {
            return Err(AppError::Validation(
                "Only draft trips can be edited.".to_string(),
            ));
        }

        let vehicle_changed = request
            .vehicle_id
            .map_or(false, |v| v != trip.vehicle_id);
        let driver_changed = request.driver_id.map_or(false, |d| d != trip.driver_id);

        let vehicle = self
            .find_vehicle(request.vehicle_id.unwrap_or(trip.vehicle_id))
            .await?;
        let driver = self
            .find_driver(request.driver_id.unwrap_or(trip.driver_id))
            .await?;

        // Cambiar la referencia re-corre los checks de elegibilidad
        // completos contra el nuevo par
        if vehicle_changed {
            check_vehicle_for_assignment(&vehicle)?;
        }
        if driver_changed {
            check_driver_for_assignment(&driver)?;
        }
        if vehicle_changed || driver_changed {
            if !dispatch_rules::driver_eligible_for_vehicle(&driver, &vehicle) {
                return Err(AppError::Validation(
                    "Driver is not allowed to drive this vehicle type.".to_string(),
                ));
            }
        }

        // La carga se re-valida siempre contra el vehículo efectivo
        let weight = request.cargo_weight.unwrap_or(trip.cargo_weight);
        if !dispatch_rules::cargo_fits(weight, &vehicle) {
            return Err(AppError::Validation(cargo_over_capacity_message(
                weight,
                vehicle.max_load_capacity,
            )));
        }

        trip.vehicle_id = vehicle.id;
        trip.driver_id = driver.id;
        trip.cargo_weight = weight;
        if let Some(origin) = request.origin {
            trip.origin = origin;
        }
        if let Some(destination) = request.destination {
            trip.destination = destination;
        }
        if let Some(revenue) = request.revenue {
            trip.revenue = revenue;
        }
        if let Some(distance) = request.distance {
            trip.distance = distance;
        }
        self.trips.update(&trip).await?;

        self.get(trip.id).await
    }

    /// Transición de estado con sus efectos sobre Vehicle/Driver
    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateTripStatusRequest,
    ) -> AppResult<TripResponse> {
        let trip = self.find_trip(id).await?;

        let next: TripStatus = request
            .status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Valid status required: {}",
                    TripStatus::valid_values()
                ))
            })?;

        if !trip.status.can_transition_to(next) {
            return Err(AppError::Validation(illegal_transition_message(next)));
        }

        match next {
            TripStatus::Dispatched => self.dispatch(trip).await,
            TripStatus::Completed => self.complete(trip).await,
            TripStatus::Cancelled => self.cancel(trip).await,
            TripStatus::Draft => unreachable!("no transition re-enters Draft"),
        }
    }

    /// Draft → Dispatched: reserva el par con escrituras condicionales
    /// y recién después persiste el trip
    async fn dispatch(&self, mut trip: Trip) -> AppResult<TripResponse> {
        let vehicle = self.find_vehicle(trip.vehicle_id).await?;
        let driver = self.find_driver(trip.driver_id).await?;
        let now = Utc::now();

        if !dispatch_rules::vehicle_available_for_dispatch(&vehicle) {
            return Err(AppError::Validation(
                "Vehicle is not available for dispatch.".to_string(),
            ));
        }
        if !dispatch_rules::driver_available_for_dispatch(&driver, now) {
            return Err(AppError::Validation(
                "Driver is not available for dispatch.".to_string(),
            ));
        }

        // Claim condicional: si otro dispatch se adelantó entre el check
        // y la escritura, rows_affected = 0 y se aborta sin tomar nada
        if !self.vehicles.claim_for_dispatch(vehicle.id).await? {
            return Err(AppError::Validation(
                "Vehicle is no longer available for dispatch.".to_string(),
            ));
        }
        if !self.drivers.claim_for_dispatch(driver.id).await? {
            // Devolver el vehículo reservado antes de abortar
            self.vehicles
                .set_status(vehicle.id, VehicleStatus::Available)
                .await?;
            return Err(AppError::Validation(
                "Driver is no longer available for dispatch.".to_string(),
            ));
        }

        trip.status = TripStatus::Dispatched;
        trip.dispatched_at = Some(now);
        self.trips.update(&trip).await?;
        info!(trip_id = %trip.id, vehicle_id = %vehicle.id, driver_id = %driver.id, "trip dispatched");

        self.get(trip.id).await
    }

    /// Dispatched → Completed: libera el par y suma el viaje al conductor
    async fn complete(&self, mut trip: Trip) -> AppResult<TripResponse> {
        trip.status = TripStatus::Completed;
        trip.completed_at = Some(Utc::now());
        self.trips.update(&trip).await?;

        self.vehicles
            .set_status(trip.vehicle_id, VehicleStatus::Available)
            .await?;
        self.drivers.release_and_count_trip(trip.driver_id).await?;
        info!(trip_id = %trip.id, "trip completed");

        self.get(trip.id).await
    }

    /// Draft|Dispatched → Cancelled: sólo libera si había algo reservado
    async fn cancel(&self, mut trip: Trip) -> AppResult<TripResponse> {
        let previous = trip.status;
        trip.status = TripStatus::Cancelled;
        self.trips.update(&trip).await?;

        if previous == TripStatus::Dispatched {
            self.vehicles
                .set_status(trip.vehicle_id, VehicleStatus::Available)
                .await?;
            self.drivers
                .set_status(trip.driver_id, DriverStatus::OffDuty)
                .await?;
        }
        info!(trip_id = %trip.id, from = %previous, "trip cancelled");

        self.get(trip.id).await
    }

    /// Un trip Dispatched no se puede borrar: primero hay que cancelarlo
    pub async fn delete(&self, id: Uuid) -> AppResult<MessageResponse> {
        let trip = self.find_trip(id).await?;
        if trip.status == TripStatus::Dispatched {
            return Err(AppError::Validation(
                "Cannot delete a dispatched trip. Cancel it first.".to_string(),
            ));
        }
        self.trips.delete(id).await?;
        Ok(MessageResponse::new("Trip deleted."))
    }

    async fn find_trip(&self, id: Uuid) -> AppResult<Trip> {
        self.trips
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trip"))
    }

    async fn find_vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))
    }

    async fn find_driver(&self, id: Uuid) -> AppResult<Driver> {
        self.drivers
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver"))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Chequeos de vehículo para asignar a un trip, con mensaje por estado
fn check_vehicle_for_assignment(vehicle: &Vehicle) -> AppResult<()> {
    if dispatch_rules::vehicle_available_for_dispatch(vehicle) {
        return Ok(());
    }
    Err(AppError::Validation(match vehicle.status {
        VehicleStatus::OnTrip => "Vehicle is already on a trip.".to_string(),
        _ => "Vehicle is not available for dispatch (In Shop or Out of Service).".to_string(),
    }))
}

/// Chequeos de conductor para asignar: suspensión y licencia vigente
fn check_driver_for_assignment(driver: &Driver) -> AppResult<()> {
    if driver.status == DriverStatus::Suspended {
        return Err(AppError::Validation(
            "Driver is suspended and cannot be assigned.".to_string(),
        ));
    }
    if dispatch_rules::driver_license_expired(driver, Utc::now()) {
        return Err(AppError::Validation(
            "Driver license has expired.".to_string(),
        ));
    }
    Ok(())
}

fn check_eligibility_and_cargo(driver: &Driver, vehicle: &Vehicle, weight: f64) -> AppResult<()> {
    if !dispatch_rules::driver_eligible_for_vehicle(driver, vehicle) {
        return Err(AppError::Validation(
            "Driver is not allowed to drive this vehicle type.".to_string(),
        ));
    }
    if !dispatch_rules::cargo_fits(weight, vehicle) {
        return Err(AppError::Validation(cargo_over_capacity_message(
            weight,
            vehicle.max_load_capacity,
        )));
    }
    Ok(())
}

/// El mensaje nombra el peso pedido y la capacidad del vehículo
fn cargo_over_capacity_message(weight: f64, capacity: f64) -> String {
    format!(
        "Cargo weight ({} kg) exceeds vehicle max load capacity ({} kg).",
        weight, capacity
    )
}

fn illegal_transition_message(next: TripStatus) -> String {
    match next {
        TripStatus::Draft => "A trip cannot be moved back to draft.".to_string(),
        TripStatus::Dispatched => "Only a draft trip can be dispatched.".to_string(),
        TripStatus::Completed => "Only a dispatched trip can be completed.".to_string(),
        TripStatus::Cancelled => "Only a draft or dispatched trip can be cancelled.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleType;
    use chrono::Duration;

    fn vehicle(status: VehicleStatus) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            name: "Van 2".to_string(),
            model: String::new(),
            license_plate: "VN-002".to_string(),
            vehicle_type: VehicleType::Van,
            max_load_capacity: 800.0,
            odometer: 0.0,
            status,
            region: String::new(),
            acquisition_cost: 0.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn driver(status: DriverStatus, expiry_days: i64) -> Driver {
        Driver {
            id: Uuid::new_v4(),
            name: "Lucía".to_string(),
            license_number: "LIC-9".to_string(),
            license_expiry_date: Utc::now() + Duration::days(expiry_days),
            allowed_vehicle_type: vec![VehicleType::Van],
            status,
            safety_score: 90.0,
            trips_completed: 4,
            email: String::new(),
            phone: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn validation_message(result: AppResult<()>) -> String {
        match result.unwrap_err() {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_vehicle_assignment_messages_by_status() {
        assert!(check_vehicle_for_assignment(&vehicle(VehicleStatus::Available)).is_ok());
        assert_eq!(
            validation_message(check_vehicle_for_assignment(&vehicle(VehicleStatus::OnTrip))),
            "Vehicle is already on a trip."
        );
        for status in [VehicleStatus::InShop, VehicleStatus::OutOfService] {
            assert_eq!(
                validation_message(check_vehicle_for_assignment(&vehicle(status))),
                "Vehicle is not available for dispatch (In Shop or Out of Service)."
            );
        }
    }

    #[test]
    fn test_driver_assignment_checks() {
        // Un conductor On Duty puede quedar asignado a un Draft
        assert!(check_driver_for_assignment(&driver(DriverStatus::OnDuty, 30)).is_ok());
        assert_eq!(
            validation_message(check_driver_for_assignment(&driver(DriverStatus::Suspended, 30))),
            "Driver is suspended and cannot be assigned."
        );
        assert_eq!(
            validation_message(check_driver_for_assignment(&driver(DriverStatus::OffDuty, -1))),
            "Driver license has expired."
        );
    }

    #[test]
    fn test_cargo_message_names_both_values() {
        let v = vehicle(VehicleStatus::Available);
        let d = driver(DriverStatus::OffDuty, 30);
        let msg = validation_message(check_eligibility_and_cargo(&d, &v, 900.0));
        assert_eq!(
            msg,
            "Cargo weight (900 kg) exceeds vehicle max load capacity (800 kg)."
        );
    }

    #[test]
    fn test_eligibility_checked_before_cargo() {
        let v = vehicle(VehicleStatus::Available);
        let mut d = driver(DriverStatus::OffDuty, 30);
        d.allowed_vehicle_type = vec![VehicleType::Bike];
        // Aunque la carga tampoco entre, el primer check que falla gana
        let msg = validation_message(check_eligibility_and_cargo(&d, &v, 900.0));
        assert_eq!(msg, "Driver is not allowed to drive this vehicle type.");
    }

    #[test]
    fn test_illegal_transition_messages() {
        assert_eq!(
            illegal_transition_message(TripStatus::Dispatched),
            "Only a draft trip can be dispatched."
        );
        assert_eq!(
            illegal_transition_message(TripStatus::Completed),
            "Only a dispatched trip can be completed."
        );
        assert_eq!(
            illegal_transition_message(TripStatus::Cancelled),
            "Only a draft or dispatched trip can be cancelled."
        );
    }
}
