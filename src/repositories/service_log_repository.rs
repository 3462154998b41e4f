//! Repository de ServiceLog

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::service_log_dto::{ServiceLogResponse, ServiceVehicleRef};
use crate::models::service_log::ServiceLog;
use crate::models::vehicle::VehicleStatus;
use crate::utils::errors::AppResult;

const SERVICE_LOG_WITH_VEHICLE_SELECT: &str = r#"
    SELECT s.*, v.name AS vehicle_name, v.license_plate AS vehicle_license_plate,
           v.status AS vehicle_status
    FROM service_logs s
    LEFT JOIN vehicles v ON v.id = s.vehicle_id
"#;

/// Fila de service log con las columnas joineadas del vehículo
#[derive(Debug, FromRow)]
pub struct ServiceLogWithVehicleRow {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub service_type: String,
    pub cost: f64,
    pub date: DateTime<Utc>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub vehicle_name: Option<String>,
    pub vehicle_license_plate: Option<String>,
    pub vehicle_status: Option<VehicleStatus>,
}

impl From<ServiceLogWithVehicleRow> for ServiceLogResponse {
    fn from(row: ServiceLogWithVehicleRow) -> Self {
        let vehicle = match (
            row.vehicle_name,
            row.vehicle_license_plate,
            row.vehicle_status,
        ) {
            (Some(name), Some(license_plate), Some(status)) => Some(ServiceVehicleRef {
                id: row.vehicle_id,
                name,
                license_plate,
                status,
            }),
            _ => None,
        };
        ServiceLogResponse {
            id: row.id,
            vehicle,
            service_type: row.service_type,
            cost: row.cost,
            date: row.date,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

pub struct ServiceLogRepository {
    pool: PgPool,
}

impl ServiceLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, log: &ServiceLog) -> AppResult<ServiceLog> {
        let row = sqlx::query_as::<_, ServiceLog>(
            r#"
            INSERT INTO service_logs (id, vehicle_id, service_type, cost, date, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(log.id)
        .bind(log.vehicle_id)
        .bind(&log.service_type)
        .bind(log.cost)
        .bind(log.date)
        .bind(&log.notes)
        .bind(log.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceLog>> {
        let log = sqlx::query_as::<_, ServiceLog>("SELECT * FROM service_logs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(log)
    }

    pub async fn find_with_vehicle(&self, id: Uuid) -> AppResult<Option<ServiceLogWithVehicleRow>> {
        let sql = format!("{} WHERE s.id = $1", SERVICE_LOG_WITH_VEHICLE_SELECT);
        let row = sqlx::query_as::<_, ServiceLogWithVehicleRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn list_with_vehicle(
        &self,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<ServiceLogWithVehicleRow>> {
        let mut query = QueryBuilder::new(SERVICE_LOG_WITH_VEHICLE_SELECT);
        query.push(" WHERE 1=1");
        if let Some(vehicle_id) = vehicle_id {
            query.push(" AND s.vehicle_id = ");
            query.push_bind(vehicle_id);
        }
        query.push(" ORDER BY s.date DESC");

        let rows = query
            .build_query_as::<ServiceLogWithVehicleRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn total_cost(&self, vehicle_id: Uuid) -> AppResult<f64> {
        let row: (f64,) =
            sqlx::query_as("SELECT COALESCE(SUM(cost), 0) FROM service_logs WHERE vehicle_id = $1")
                .bind(vehicle_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(row.0)
    }

    pub async fn update(&self, log: &ServiceLog) -> AppResult<ServiceLog> {
        let row = sqlx::query_as::<_, ServiceLog>(
            r#"
            UPDATE service_logs
            SET service_type = $2, cost = $3, date = $4, notes = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(log.id)
        .bind(&log.service_type)
        .bind(log.cost)
        .bind(log.date)
        .bind(&log.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM service_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
