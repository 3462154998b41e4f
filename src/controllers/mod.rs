pub mod analytics_controller;
pub mod auth_controller;
pub mod dashboard_controller;
pub mod driver_controller;
pub mod export_controller;
pub mod fuel_log_controller;
pub mod service_log_controller;
pub mod trip_controller;
pub mod vehicle_controller;
