//! Repository de FuelLog

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::fuel_log_dto::{FuelLogResponse, LogVehicleRef};
use crate::models::fuel_log::FuelLog;
use crate::utils::errors::AppResult;

const FUEL_LOG_WITH_VEHICLE_SELECT: &str = r#"
    SELECT f.*, v.name AS vehicle_name, v.license_plate AS vehicle_license_plate
    FROM fuel_logs f
    LEFT JOIN vehicles v ON v.id = f.vehicle_id
"#;

/// Fila de fuel log con las columnas joineadas del vehículo
#[derive(Debug, FromRow)]
pub struct FuelLogWithVehicleRow {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub liters: f64,
    pub cost: f64,
    pub date: DateTime<Utc>,
    pub odometer_at_fill: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub vehicle_name: Option<String>,
    pub vehicle_license_plate: Option<String>,
}

impl From<FuelLogWithVehicleRow> for FuelLogResponse {
    fn from(row: FuelLogWithVehicleRow) -> Self {
        let vehicle = match (row.vehicle_name, row.vehicle_license_plate) {
            (Some(name), Some(license_plate)) => Some(LogVehicleRef {
                id: row.vehicle_id,
                name,
                license_plate,
            }),
            _ => None,
        };
        FuelLogResponse {
            id: row.id,
            vehicle,
            liters: row.liters,
            cost: row.cost,
            date: row.date,
            odometer_at_fill: row.odometer_at_fill,
            created_at: row.created_at,
        }
    }
}

pub struct FuelLogRepository {
    pool: PgPool,
}

impl FuelLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, log: &FuelLog) -> AppResult<FuelLog> {
        let row = sqlx::query_as::<_, FuelLog>(
            r#"
            INSERT INTO fuel_logs (id, vehicle_id, liters, cost, date, odometer_at_fill, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(log.id)
        .bind(log.vehicle_id)
        .bind(log.liters)
        .bind(log.cost)
        .bind(log.date)
        .bind(log.odometer_at_fill)
        .bind(log.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FuelLog>> {
        let log = sqlx::query_as::<_, FuelLog>("SELECT * FROM fuel_logs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(log)
    }

    pub async fn find_with_vehicle(&self, id: Uuid) -> AppResult<Option<FuelLogWithVehicleRow>> {
        let sql = format!("{} WHERE f.id = $1", FUEL_LOG_WITH_VEHICLE_SELECT);
        let row = sqlx::query_as::<_, FuelLogWithVehicleRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn list_with_vehicle(
        &self,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<FuelLogWithVehicleRow>> {
        let mut query = QueryBuilder::new(FUEL_LOG_WITH_VEHICLE_SELECT);
        query.push(" WHERE 1=1");
        if let Some(vehicle_id) = vehicle_id {
            query.push(" AND f.vehicle_id = ");
            query.push_bind(vehicle_id);
        }
        query.push(" ORDER BY f.date DESC");

        let rows = query
            .build_query_as::<FuelLogWithVehicleRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Logs de un vehículo en orden cronológico, para fuel efficiency
    pub async fn list_for_vehicle_by_date(&self, vehicle_id: Uuid) -> AppResult<Vec<FuelLog>> {
        let logs = sqlx::query_as::<_, FuelLog>(
            "SELECT * FROM fuel_logs WHERE vehicle_id = $1 ORDER BY date ASC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    pub async fn total_cost(&self, vehicle_id: Uuid) -> AppResult<f64> {
        let row: (f64,) =
            sqlx::query_as("SELECT COALESCE(SUM(cost), 0) FROM fuel_logs WHERE vehicle_id = $1")
                .bind(vehicle_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(row.0)
    }

    pub async fn update(&self, log: &FuelLog) -> AppResult<FuelLog> {
        let row = sqlx::query_as::<_, FuelLog>(
            r#"
            UPDATE fuel_logs
            SET liters = $2, cost = $3, date = $4, odometer_at_fill = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(log.id)
        .bind(log.liters)
        .bind(log.cost)
        .bind(log.date)
        .bind(log.odometer_at_fill)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM fuel_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
