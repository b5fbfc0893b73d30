//! Request DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::models::RampConfiguration;

/// Request to price a configuration without an inquiry.
///
/// Either `distance_miles` or `address` must be supplied; an explicit
/// distance skips the distance lookup.
#[derive(Debug, Deserialize)]
pub struct CalculatePricingRequest {
    pub ramp_config: RampConfiguration,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub distance_miles: Option<Decimal>,
}

/// Request to price a configuration for a stored inquiry
#[derive(Debug, Deserialize)]
pub struct CalculateQuoteRequest {
    pub ramp_config: RampConfiguration,
}
