//! Repository de Driver

use chrono::Utc;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::driver_dto::DriverFilters;
use crate::models::driver::{Driver, DriverStatus};
use crate::utils::errors::AppResult;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn allowed_types_as_text(driver: &Driver) -> Vec<String> {
        driver
            .allowed_vehicle_type
            .iter()
            .map(|t| t.as_str().to_string())
            .collect()
    }

    pub async fn insert(&self, driver: &Driver) -> AppResult<Driver> {
        let row = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, name, license_number, license_expiry_date, allowed_vehicle_type,
                                 status, safety_score, trips_completed, email, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.name)
        .bind(&driver.license_number)
        .bind(driver.license_expiry_date)
        .bind(Self::allowed_types_as_text(driver))
        .bind(driver.status.as_str())
        .bind(driver.safety_score)
        .bind(driver.trips_completed)
        .bind(&driver.email)
        .bind(&driver.phone)
        .bind(driver.created_at)
        .bind(driver.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn list(&self, filters: &DriverFilters) -> AppResult<Vec<Driver>> {
        let mut query = QueryBuilder::new("SELECT * FROM drivers WHERE 1=1");
        if let Some(status) = &filters.status {
            query.push(" AND status = ");
            query.push_bind(status.clone());
        }
        query.push(" ORDER BY name");

        let drivers = query
            .build_query_as::<Driver>()
            .fetch_all(&self.pool)
            .await?;

        Ok(drivers)
    }

    /// Conductores Off Duty con licencia vigente
    pub async fn list_available(&self) -> AppResult<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>(
            "SELECT * FROM drivers WHERE status = 'Off Duty' AND license_expiry_date > $1 ORDER BY name",
        )
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }

    pub async fn license_number_exists(
        &self,
        license_number: &str,
        exclude_id: Option<Uuid>,
    ) -> AppResult<bool> {
        let row: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM drivers
                WHERE license_number = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(license_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    pub async fn update(&self, driver: &Driver) -> AppResult<Driver> {
        let row = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET name = $2, license_number = $3, license_expiry_date = $4, allowed_vehicle_type = $5,
                status = $6, safety_score = $7, email = $8, phone = $9, updated_at = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.name)
        .bind(&driver.license_number)
        .bind(driver.license_expiry_date)
        .bind(Self::allowed_types_as_text(driver))
        .bind(driver.status.as_str())
        .bind(driver.safety_score)
        .bind(&driver.email)
        .bind(&driver.phone)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Escritura condicional Off Duty → On Duty para el dispatch
    pub async fn claim_for_dispatch(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE drivers SET status = 'On Duty', updated_at = $2 WHERE id = $1 AND status = 'Off Duty'",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn set_status(&self, id: Uuid, status: DriverStatus) -> AppResult<()> {
        sqlx::query("UPDATE drivers SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Al completar un trip: libera al conductor y suma el viaje en la
    /// misma escritura
    pub async fn release_and_count_trip(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE drivers
            SET status = 'Off Duty', trips_completed = trips_completed + 1, updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
