//! Repository de Vehicle
//!
//! Todas las operaciones son lecturas/escrituras de un solo registro;
//! la única escritura condicional es el claim del dispatch, que evita
//! que dos trips concurrentes tomen el mismo vehículo.

use chrono::Utc;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::vehicle_dto::VehicleFilters;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::utils::errors::AppResult;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, name, model, license_plate, vehicle_type, max_load_capacity,
                                  odometer, status, region, acquisition_cost, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.name)
        .bind(&vehicle.model)
        .bind(&vehicle.license_plate)
        .bind(vehicle.vehicle_type.as_str())
        .bind(vehicle.max_load_capacity)
        .bind(vehicle.odometer)
        .bind(vehicle.status.as_str())
        .bind(&vehicle.region)
        .bind(vehicle.acquisition_cost)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let mut query = QueryBuilder::new("SELECT * FROM vehicles WHERE 1=1");
        if let Some(vehicle_type) = &filters.vehicle_type {
            query.push(" AND vehicle_type = ");
            query.push_bind(vehicle_type.clone());
        }
        if let Some(status) = &filters.status {
            query.push(" AND status = ");
            query.push_bind(status.clone());
        }
        if let Some(region) = &filters.region {
            query.push(" AND region ILIKE ");
            query.push_bind(format!("%{}%", region));
        }
        query.push(" ORDER BY created_at DESC");

        let vehicles = query
            .build_query_as::<Vehicle>()
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    /// Vehículos listos para asignar a un trip
    pub async fn list_available(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE status = 'Available' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn license_plate_exists(
        &self,
        license_plate: &str,
        exclude_id: Option<Uuid>,
    ) -> AppResult<bool> {
        let row: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM vehicles
                WHERE license_plate = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(license_plate)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    pub async fn update(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET name = $2, model = $3, license_plate = $4, vehicle_type = $5,
                max_load_capacity = $6, odometer = $7, status = $8, region = $9,
                acquisition_cost = $10, updated_at = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.name)
        .bind(&vehicle.model)
        .bind(&vehicle.license_plate)
        .bind(vehicle.vehicle_type.as_str())
        .bind(vehicle.max_load_capacity)
        .bind(vehicle.odometer)
        .bind(vehicle.status.as_str())
        .bind(&vehicle.region)
        .bind(vehicle.acquisition_cost)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Escritura condicional Available → On Trip; false si otro dispatch
    /// (u otro estado) se adelantó
    pub async fn claim_for_dispatch(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE vehicles SET status = 'On Trip', updated_at = $2 WHERE id = $1 AND status = 'Available'",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn set_status(&self, id: Uuid, status: VehicleStatus) -> AppResult<()> {
        sqlx::query("UPDATE vehicles SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
