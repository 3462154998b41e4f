pub mod driver;
pub mod fuel_log;
pub mod service_log;
pub mod trip;
pub mod user;
pub mod vehicle;
