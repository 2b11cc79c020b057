//! Charging station and charger value rules.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorType {
    Type2,
    Ccs2,
    Chademo,
    Gbt,
    Schuko,
}

impl ConnectorType {
    pub const ALL: [ConnectorType; 5] = [
        Self::Type2,
        Self::Ccs2,
        Self::Chademo,
        Self::Gbt,
        Self::Schuko,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Type2 => "type2",
            Self::Ccs2 => "ccs2",
            Self::Chademo => "chademo",
            Self::Gbt => "gbt",
            Self::Schuko => "schuko",
        }
    }
}

impl FromStr for ConnectorType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid connector type '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargerStatus {
    Available,
    Occupied,
    OutOfService,
}

impl ChargerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::OutOfService => "out_of_service",
        }
    }
}

impl FromStr for ChargerStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "out_of_service" => Ok(Self::OutOfService),
            other => Err(CoreError::Validation(format!(
                "Invalid charger status '{other}'"
            ))),
        }
    }
}

/// Latitude in `[-90, 90]`, longitude in `[-180, 180]`.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), CoreError> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(CoreError::Validation(format!(
            "Coordinates ({latitude}, {longitude}) are out of range"
        )));
    }
    Ok(())
}

pub fn validate_power_kw(power_kw: f64) -> Result<(), CoreError> {
    if !power_kw.is_finite() || power_kw <= 0.0 {
        return Err(CoreError::Validation(
            "power_kw must be greater than zero".into(),
        ));
    }
    Ok(())
}

pub fn validate_price_per_kwh(price: Option<f64>) -> Result<(), CoreError> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(CoreError::Validation(
            "price_per_kwh must not be negative".into(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connector_types_parse() {
        assert_eq!("ccs2".parse::<ConnectorType>().unwrap(), ConnectorType::Ccs2);
        assert!("tesla".parse::<ConnectorType>().is_err());
    }

    #[test]
    fn charger_status_matches_serde_names() {
        let status: ChargerStatus = "out_of_service".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            format!("\"{}\"", status.as_str())
        );
    }

    #[test]
    fn coordinates_are_range_checked() {
        assert!(validate_coordinates(41.01, 28.97).is_ok());
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
    }

    #[test]
    fn power_and_price_bounds() {
        assert!(validate_power_kw(22.0).is_ok());
        assert!(validate_power_kw(0.0).is_err());
        assert!(validate_power_kw(f64::NAN).is_err());
        assert!(validate_price_per_kwh(None).is_ok());
        assert!(validate_price_per_kwh(Some(-0.1)).is_err());
    }
}
