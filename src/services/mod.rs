pub mod access_policy;
pub mod analytics_service;
pub mod dispatch_rules;
pub mod export_service;
