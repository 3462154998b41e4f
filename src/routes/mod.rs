pub mod analytics_routes;
pub mod auth_routes;
pub mod dashboard_routes;
pub mod driver_routes;
pub mod fuel_log_routes;
pub mod service_log_routes;
pub mod trip_routes;
pub mod vehicle_routes;
