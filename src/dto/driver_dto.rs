//! DTOs de Driver

use serde::Deserialize;
use validator::Validate;

/// El API original acepta un tipo suelto o un array de tipos
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// Request para crear un conductor
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    pub name: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry_date: Option<String>,
    pub allowed_vehicle_type: Option<OneOrMany>,
    pub status: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub safety_score: Option<f64>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Request para actualizar un conductor (parcial)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriverRequest {
    pub name: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry_date: Option<String>,
    pub allowed_vehicle_type: Option<OneOrMany>,
    pub status: Option<String>,
    /// Se acota a [0, 100] en vez de rechazarse
    pub safety_score: Option<f64>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Filtros para el listado de conductores
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverFilters {
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_or_many_accepts_both_shapes() {
        let one: OneOrMany = serde_json::from_str("\"Truck\"").unwrap();
        assert_eq!(one.into_vec(), vec!["Truck".to_string()]);

        let many: OneOrMany = serde_json::from_str("[\"Truck\", \"Van\"]").unwrap();
        assert_eq!(
            many.into_vec(),
            vec!["Truck".to_string(), "Van".to_string()]
        );
    }
}
