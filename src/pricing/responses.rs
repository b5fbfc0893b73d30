//! Response DTOs for pricing API endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::format_currency;
use super::distance::DistanceSource;
use super::models::{PricingResult, RampConfiguration};
use crate::models::Quote;

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoneyResponse {
    pub cents: i64,
    pub display: String,
}

impl From<i64> for MoneyResponse {
    fn from(cents: i64) -> Self {
        Self {
            cents,
            display: format_currency(cents),
        }
    }
}

/// Fee breakdown for a calculation
#[derive(Debug, Serialize)]
pub struct PricingResponse {
    pub delivery_fee: MoneyResponse,
    pub install_fee: MoneyResponse,
    pub monthly_rate: MoneyResponse,
    pub surcharge: MoneyResponse,
    pub upfront_total: MoneyResponse,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub distance_miles: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_source: Option<DistanceSource>,
}

impl PricingResponse {
    pub fn new(pricing: &PricingResult, distance_source: Option<DistanceSource>) -> Self {
        Self {
            delivery_fee: pricing.delivery_fee.into(),
            install_fee: pricing.install_fee.into(),
            monthly_rate: pricing.monthly_rate.into(),
            surcharge: pricing.surcharge.into(),
            upfront_total: pricing.upfront_total.into(),
            distance_miles: pricing.distance,
            distance_source,
        }
    }
}

/// Response for a quote calculated against an inquiry
#[derive(Debug, Serialize)]
pub struct QuoteCalculationResponse {
    pub inquiry_id: i32,
    #[serde(flatten)]
    pub pricing: PricingResponse,
    pub ramp_config: RampConfiguration,
}

/// Response for a saved quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub id: i32,
    pub inquiry_id: i32,
    pub delivery_fee: MoneyResponse,
    pub install_fee: MoneyResponse,
    pub monthly_rate: MoneyResponse,
    pub surcharge: MoneyResponse,
    pub upfront_total: MoneyResponse,
    pub ramp_config: RampConfiguration,
    pub created_at: DateTime<Utc>,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            inquiry_id: quote.inquiry_id,
            delivery_fee: quote.delivery_fee.into(),
            install_fee: quote.install_fee.into(),
            monthly_rate: quote.monthly_rate.into(),
            surcharge: quote.surcharge.into(),
            upfront_total: quote.upfront_total.into(),
            ramp_config: quote.ramp_config.0,
            created_at: quote.created_at,
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
