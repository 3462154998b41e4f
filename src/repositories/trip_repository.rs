//! Repository de Trip
//!
//! El listado y el get devuelven filas joineadas con el vehículo y el
//! conductor para poblar las referencias de la respuesta.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::trip_dto::{TripDriverRef, TripFilters, TripResponse, TripVehicleRef};
use crate::models::driver::DriverStatus;
use crate::models::trip::{Trip, TripStatus};
use crate::models::vehicle::{VehicleStatus, VehicleType};
use crate::utils::errors::AppResult;

const TRIP_WITH_REFS_SELECT: &str = r#"
    SELECT t.*,
           v.name AS vehicle_name, v.license_plate AS vehicle_license_plate,
           v.vehicle_type AS vehicle_type, v.max_load_capacity AS vehicle_max_load_capacity,
           v.status AS vehicle_status,
           d.name AS driver_name, d.license_number AS driver_license_number,
           d.status AS driver_status
    FROM trips t
    LEFT JOIN vehicles v ON v.id = t.vehicle_id
    LEFT JOIN drivers d ON d.id = t.driver_id
"#;

/// Fila de trip con las columnas joineadas de vehicle y driver
#[derive(Debug, FromRow)]
pub struct TripWithRefsRow {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub cargo_weight: f64,
    pub origin: String,
    pub destination: String,
    pub revenue: f64,
    pub distance: f64,
    pub status: TripStatus,
    pub dispatched_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub vehicle_name: Option<String>,
    pub vehicle_license_plate: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub vehicle_max_load_capacity: Option<f64>,
    pub vehicle_status: Option<VehicleStatus>,
    pub driver_name: Option<String>,
    pub driver_license_number: Option<String>,
    pub driver_status: Option<DriverStatus>,
}

impl From<TripWithRefsRow> for TripResponse {
    fn from(row: TripWithRefsRow) -> Self {
        let vehicle = match (row.vehicle_name, row.vehicle_license_plate, row.vehicle_type) {
            (Some(name), Some(license_plate), Some(vehicle_type)) => Some(TripVehicleRef {
                id: row.vehicle_id,
                name,
                license_plate,
                vehicle_type,
                max_load_capacity: row.vehicle_max_load_capacity.unwrap_or(0.0),
                status: row.vehicle_status.unwrap_or(VehicleStatus::Available),
            }),
            _ => None,
        };
        let driver = match (row.driver_name, row.driver_license_number, row.driver_status) {
            (Some(name), Some(license_number), Some(status)) => Some(TripDriverRef {
                id: row.driver_id,
                name,
                license_number,
                status,
            }),
            _ => None,
        };
        TripResponse {
            id: row.id,
            vehicle,
            driver,
            cargo_weight: row.cargo_weight,
            origin: row.origin,
            destination: row.destination,
            revenue: row.revenue,
            distance: row.distance,
            status: row.status,
            dispatched_at: row.dispatched_at,
            completed_at: row.completed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, trip: &Trip) -> AppResult<Trip> {
        let row = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (id, vehicle_id, driver_id, cargo_weight, origin, destination,
                               revenue, distance, status, dispatched_at, completed_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(trip.id)
        .bind(trip.vehicle_id)
        .bind(trip.driver_id)
        .bind(trip.cargo_weight)
        .bind(&trip.origin)
        .bind(&trip.destination)
        .bind(trip.revenue)
        .bind(trip.distance)
        .bind(trip.status.as_str())
        .bind(trip.dispatched_at)
        .bind(trip.completed_at)
        .bind(trip.created_at)
        .bind(trip.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Trip>> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trip)
    }

    pub async fn find_with_refs(&self, id: Uuid) -> AppResult<Option<TripWithRefsRow>> {
        let sql = format!("{} WHERE t.id = $1", TRIP_WITH_REFS_SELECT);
        let row = sqlx::query_as::<_, TripWithRefsRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn list_with_refs(&self, filters: &TripFilters) -> AppResult<Vec<TripWithRefsRow>> {
        let mut query = QueryBuilder::new(TRIP_WITH_REFS_SELECT);
        query.push(" WHERE 1=1");
        if let Some(status) = &filters.status {
            query.push(" AND t.status = ");
            query.push_bind(status.clone());
        }
        if let Some(vehicle_id) = filters.vehicle_id {
            query.push(" AND t.vehicle_id = ");
            query.push_bind(vehicle_id);
        }
        if let Some(driver_id) = filters.driver_id {
            query.push(" AND t.driver_id = ");
            query.push_bind(driver_id);
        }
        query.push(" ORDER BY t.created_at DESC");

        let rows = query
            .build_query_as::<TripWithRefsRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn update(&self, trip: &Trip) -> AppResult<Trip> {
        let row = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET vehicle_id = $2, driver_id = $3, cargo_weight = $4, origin = $5, destination = $6,
                revenue = $7, distance = $8, status = $9, dispatched_at = $10, completed_at = $11,
                updated_at = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(trip.id)
        .bind(trip.vehicle_id)
        .bind(trip.driver_id)
        .bind(trip.cargo_weight)
        .bind(&trip.origin)
        .bind(&trip.destination)
        .bind(trip.revenue)
        .bind(trip.distance)
        .bind(trip.status.as_str())
        .bind(trip.dispatched_at)
        .bind(trip.completed_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn count_by_status(&self, status: TripStatus) -> AppResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trips WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(row.0)
    }

    /// Revenue total de los trips completados del vehículo
    pub async fn completed_revenue_total(&self, vehicle_id: Uuid) -> AppResult<f64> {
        let row: (f64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(revenue), 0) FROM trips WHERE vehicle_id = $1 AND status = 'Completed'",
        )
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Distancia total de los trips completados del vehículo
    pub async fn completed_distance_total(&self, vehicle_id: Uuid) -> AppResult<f64> {
        let row: (f64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(distance), 0) FROM trips WHERE vehicle_id = $1 AND status = 'Completed'",
        )
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }
}
