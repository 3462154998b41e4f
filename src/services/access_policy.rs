//! Tabla de políticas de acceso
//!
//! Una sola tabla declarativa operación → roles permitidos, cargada una
//! vez. Los handlers autorizan contra ella antes de despachar a los
//! controllers, así las listas de roles no se duplican por ruta.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::models::user::UserRole;
use crate::utils::errors::{AppError, AppResult};

/// Operaciones expuestas por el API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    VehicleList,
    VehicleGet,
    VehicleListAvailable,
    VehicleCreate,
    VehicleUpdate,
    VehicleDelete,
    DriverList,
    DriverGet,
    DriverListAvailable,
    DriverCreate,
    DriverUpdate,
    DriverDelete,
    TripList,
    TripGet,
    TripCreate,
    TripUpdate,
    TripUpdateStatus,
    TripDelete,
    FuelLogList,
    FuelLogGet,
    FuelLogCreate,
    FuelLogUpdate,
    FuelLogDelete,
    ServiceLogList,
    ServiceLogGet,
    ServiceLogCreate,
    ServiceLogUpdate,
    ServiceLogDelete,
    DashboardKpis,
    AnalyticsRead,
    AnalyticsExport,
}

const ALL_ROLES: &[UserRole] = &[
    UserRole::FleetManager,
    UserRole::Dispatcher,
    UserRole::SafetyOfficer,
    UserRole::FinancialAnalyst,
];
const MANAGER: &[UserRole] = &[UserRole::FleetManager];
const MANAGER_DISPATCHER: &[UserRole] = &[UserRole::FleetManager, UserRole::Dispatcher];
const MANAGER_SAFETY: &[UserRole] = &[UserRole::FleetManager, UserRole::SafetyOfficer];
const MANAGER_ANALYST: &[UserRole] = &[UserRole::FleetManager, UserRole::FinancialAnalyst];

lazy_static! {
    static ref POLICY: HashMap<Operation, &'static [UserRole]> = {
        use Operation::*;
        let mut table: HashMap<Operation, &'static [UserRole]> = HashMap::new();
        table.insert(VehicleList, ALL_ROLES);
        table.insert(VehicleGet, ALL_ROLES);
        table.insert(VehicleListAvailable, MANAGER_DISPATCHER);
        table.insert(VehicleCreate, MANAGER);
        table.insert(VehicleUpdate, MANAGER);
        table.insert(VehicleDelete, MANAGER);
        table.insert(DriverList, ALL_ROLES);
        table.insert(DriverGet, ALL_ROLES);
        table.insert(DriverListAvailable, MANAGER_DISPATCHER);
        table.insert(DriverCreate, MANAGER);
        table.insert(DriverUpdate, MANAGER_SAFETY);
        table.insert(DriverDelete, MANAGER);
        table.insert(TripList, ALL_ROLES);
        table.insert(TripGet, ALL_ROLES);
        table.insert(TripCreate, MANAGER_DISPATCHER);
        table.insert(TripUpdate, MANAGER_DISPATCHER);
        table.insert(TripUpdateStatus, MANAGER_DISPATCHER);
        table.insert(TripDelete, MANAGER_DISPATCHER);
        table.insert(FuelLogList, ALL_ROLES);
        table.insert(FuelLogGet, ALL_ROLES);
        table.insert(FuelLogCreate, MANAGER_DISPATCHER);
        table.insert(FuelLogUpdate, MANAGER_ANALYST);
        table.insert(FuelLogDelete, MANAGER_ANALYST);
        table.insert(ServiceLogList, ALL_ROLES);
        table.insert(ServiceLogGet, ALL_ROLES);
        table.insert(ServiceLogCreate, MANAGER_SAFETY);
        table.insert(ServiceLogUpdate, MANAGER_SAFETY);
        table.insert(ServiceLogDelete, MANAGER);
        table.insert(DashboardKpis, ALL_ROLES);
        table.insert(AnalyticsRead, MANAGER_ANALYST);
        table.insert(AnalyticsExport, MANAGER_ANALYST);
        table
    };
}

/// Roles permitidos para una operación
pub fn allowed_roles(operation: Operation) -> &'static [UserRole] {
    POLICY.get(&operation).copied().unwrap_or(&[])
}

/// Verificar que el rol puede ejecutar la operación
pub fn authorize(role: UserRole, operation: Operation) -> AppResult<()> {
    if allowed_roles(operation).contains(&role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Insufficient permissions for this action.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operation_has_a_policy() {
        use Operation::*;
        let operations = [
            VehicleList, VehicleGet, VehicleListAvailable, VehicleCreate, VehicleUpdate,
            VehicleDelete, DriverList, DriverGet, DriverListAvailable, DriverCreate,
            DriverUpdate, DriverDelete, TripList, TripGet, TripCreate, TripUpdate,
            TripUpdateStatus, TripDelete, FuelLogList, FuelLogGet, FuelLogCreate,
            FuelLogUpdate, FuelLogDelete, ServiceLogList, ServiceLogGet, ServiceLogCreate,
            ServiceLogUpdate, ServiceLogDelete, DashboardKpis, AnalyticsRead, AnalyticsExport,
        ];
        for op in operations {
            assert!(!allowed_roles(op).is_empty(), "{:?} has no allowed roles", op);
        }
    }

    #[test]
    fn test_reads_open_to_all_roles() {
        for role in [
            UserRole::FleetManager,
            UserRole::Dispatcher,
            UserRole::SafetyOfficer,
            UserRole::FinancialAnalyst,
        ] {
            assert!(authorize(role, Operation::VehicleList).is_ok());
            assert!(authorize(role, Operation::TripGet).is_ok());
            assert!(authorize(role, Operation::DashboardKpis).is_ok());
        }
    }

    #[test]
    fn test_dispatch_operations_restricted() {
        assert!(authorize(UserRole::Dispatcher, Operation::TripCreate).is_ok());
        assert!(authorize(UserRole::SafetyOfficer, Operation::TripCreate).is_err());
        assert!(authorize(UserRole::FinancialAnalyst, Operation::TripUpdateStatus).is_err());
    }

    #[test]
    fn test_analytics_restricted_to_manager_and_analyst() {
        assert!(authorize(UserRole::FinancialAnalyst, Operation::AnalyticsRead).is_ok());
        assert!(authorize(UserRole::FleetManager, Operation::AnalyticsExport).is_ok());
        assert!(authorize(UserRole::Dispatcher, Operation::AnalyticsRead).is_err());
        assert!(authorize(UserRole::SafetyOfficer, Operation::AnalyticsExport).is_err());
    }

    #[test]
    fn test_fleet_manager_only_writes() {
        assert!(authorize(UserRole::FleetManager, Operation::VehicleCreate).is_ok());
        assert!(authorize(UserRole::Dispatcher, Operation::VehicleCreate).is_err());
        assert!(authorize(UserRole::SafetyOfficer, Operation::DriverUpdate).is_ok());
        assert!(authorize(UserRole::SafetyOfficer, Operation::DriverDelete).is_err());
    }

    #[test]
    fn test_forbidden_message() {
        let err = authorize(UserRole::Dispatcher, Operation::AnalyticsRead).unwrap_err();
        match err {
            AppError::Forbidden(msg) => {
                assert_eq!(msg, "Insufficient permissions for this action.")
            }
            _ => panic!("expected Forbidden"),
        }
    }
}
