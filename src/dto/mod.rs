pub mod analytics_dto;
pub mod auth_dto;
pub mod dashboard_dto;
pub mod driver_dto;
pub mod fuel_log_dto;
pub mod service_log_dto;
pub mod trip_dto;
pub mod vehicle_dto;

use serde::Serialize;

/// Response genérica con sólo un mensaje (deletes, resets, etc.)
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
