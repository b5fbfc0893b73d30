//! Pricing service functions with database and network access.
//!
//! These compose the pure calculators with inquiry lookup, distance
//! resolution and quote persistence.

use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use crate::cache::AppCache;
use crate::db;
use crate::error::AppError;
use crate::models::{Inquiry, InquiryStatus, Quote};
use crate::validation::{self, ValidationErrors};

use super::calculators::{FeeOverflow, PricingEngine};
use super::distance::{DistanceEstimate, DistanceResolver, DistanceSource};
use super::models::{PricingResult, QuoteDraft, RampConfiguration};
use super::queries;

/// Result of pricing a configuration for delivery
#[derive(Debug, Clone)]
pub struct PricingCalculation {
    pub pricing: PricingResult,
    /// `None` when the caller supplied the distance
    pub distance_source: Option<DistanceSource>,
}

/// Result of pricing a configuration for a stored inquiry
#[derive(Debug, Clone)]
pub struct QuoteCalculation {
    pub inquiry_id: i32,
    pub pricing: PricingResult,
    pub distance: DistanceEstimate,
    pub ramp_config: RampConfiguration,
}

/// Pricing service error types
#[derive(Debug)]
pub enum PricingError {
    InquiryNotFound { inquiry_id: i32 },
    Validation(ValidationErrors),
    Unpriceable(FeeOverflow),
    Storage(AppError),
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::InquiryNotFound { inquiry_id } => {
                write!(f, "Inquiry {} not found", inquiry_id)
            }
            PricingError::Validation(errors) => write!(f, "Validation failed: {}", errors),
            PricingError::Unpriceable(e) => write!(f, "Cannot price configuration: {}", e),
            PricingError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for PricingError {}

impl From<ValidationErrors> for PricingError {
    fn from(errors: ValidationErrors) -> Self {
        PricingError::Validation(errors)
    }
}

impl From<FeeOverflow> for PricingError {
    fn from(err: FeeOverflow) -> Self {
        PricingError::Unpriceable(err)
    }
}

impl PricingError {
    fn from_lookup(inquiry_id: i32, err: AppError) -> Self {
        match err {
            AppError::NotFound => PricingError::InquiryNotFound { inquiry_id },
            other => PricingError::Storage(other),
        }
    }
}

/// Price a configuration from an explicit distance or an address.
///
/// An explicit `distance_miles` wins; otherwise the address is resolved.
pub async fn calculate_pricing(
    engine: &PricingEngine,
    resolver: &DistanceResolver,
    config: &RampConfiguration,
    address: Option<&str>,
    distance_miles: Option<Decimal>,
) -> Result<PricingCalculation, PricingError> {
    let calculation = match distance_miles {
        Some(miles) => PricingCalculation {
            pricing: engine.calculate(config, miles)?,
            distance_source: None,
        },
        None => {
            let estimate = resolver.resolve(address.unwrap_or_default()).await;
            PricingCalculation {
                pricing: engine.calculate(config, estimate.miles)?,
                distance_source: Some(estimate.source),
            }
        }
    };
    Ok(calculation)
}

/// Load an inquiry, trying the cache first
pub async fn load_inquiry(
    pool: &PgPool,
    cache: &AppCache,
    inquiry_id: i32,
) -> Result<Arc<Inquiry>, PricingError> {
    cache
        .inquiry(pool, inquiry_id)
        .await
        .map_err(|e| PricingError::from_lookup(inquiry_id, e))
}

/// Calculate a quote for an inquiry using its stored address.
///
/// Nothing is persisted; see [`save_quote`].
pub async fn calculate_quote(
    pool: &PgPool,
    cache: &AppCache,
    engine: &PricingEngine,
    resolver: &DistanceResolver,
    inquiry_id: i32,
    config: RampConfiguration,
) -> Result<QuoteCalculation, PricingError> {
    validation::validate_ramp_configuration(&config)?;

    let inquiry = load_inquiry(pool, cache, inquiry_id).await?;
    let distance = resolver.resolve(&inquiry.address).await;
    let pricing = engine.calculate(&config, distance.miles)?;

    Ok(QuoteCalculation {
        inquiry_id,
        pricing,
        distance,
        ramp_config: config,
    })
}

/// Persist a quote and move the inquiry to `quoted`.
///
/// Both writes share one transaction.
pub async fn save_quote(
    pool: &PgPool,
    cache: &AppCache,
    inquiry_id: i32,
    draft: &QuoteDraft,
) -> Result<Quote, PricingError> {
    validation::validate_quote(inquiry_id, draft)?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| PricingError::Storage(e.into()))?;

    db::get_inquiry(&mut *tx, inquiry_id)
        .await
        .map_err(|e| PricingError::from_lookup(inquiry_id, e))?;

    let quote = queries::insert_quote(&mut *tx, inquiry_id, draft)
        .await
        .map_err(PricingError::Storage)?;

    db::update_inquiry_status(&mut *tx, inquiry_id, InquiryStatus::Quoted)
        .await
        .map_err(PricingError::Storage)?;

    tx.commit()
        .await
        .map_err(|e| PricingError::Storage(e.into()))?;

    cache.invalidate_inquiry(inquiry_id).await;
    info!(inquiry_id, quote_id = quote.id, upfront_total = quote.upfront_total, "Quote saved");

    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::distance::FallbackReason;
    use crate::pricing::models::{PlatformSize, PlatformSpec, RampSection};
    use rust_decimal_macros::dec;

    fn config() -> RampConfiguration {
        RampConfiguration {
            platforms: vec![PlatformSpec { size: PlatformSize::FiveByFive, quantity: 1 }],
            ramps: vec![RampSection { length: dec!(6), quantity: 1 }],
        }
    }

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::InquiryNotFound { inquiry_id: 42 };
        assert_eq!(err.to_string(), "Inquiry 42 not found");

        let mut errors = ValidationErrors::new();
        errors.push("ramps[0].length must be between 2 and 32 feet");
        let err = PricingError::from(errors);
        assert!(err.to_string().contains("ramps[0].length"));

        let err = PricingError::from(FeeOverflow { fee: "delivery_fee" });
        assert_eq!(
            err.to_string(),
            "Cannot price configuration: delivery_fee is too large to price"
        );

        let err = PricingError::Storage(AppError::Database(sqlx::Error::PoolTimedOut));
        assert!(err.to_string().starts_with("Storage error"));
    }

    #[test]
    fn test_lookup_not_found_maps_to_inquiry_not_found() {
        let err = PricingError::from_lookup(7, AppError::NotFound);
        assert!(matches!(err, PricingError::InquiryNotFound { inquiry_id: 7 }));
    }

    #[tokio::test]
    async fn test_explicit_distance_skips_lookup() {
        let resolver = DistanceResolver::new(None, "origin");
        let result = calculate_pricing(
            &PricingEngine::default(),
            &resolver,
            &config(),
            None,
            Some(dec!(20)),
        )
        .await
        .unwrap();

        assert!(result.distance_source.is_none());
        assert_eq!(result.pricing.distance, Some(dec!(20)));
        assert_eq!(result.pricing.surcharge, 2500);
        assert_eq!(result.pricing.upfront_total, 2500 + 11500 + 15000 + 2500);
    }

    #[tokio::test]
    async fn test_address_without_key_uses_fallback_distance() {
        let resolver = DistanceResolver::new(None, "origin");
        let result = calculate_pricing(
            &PricingEngine::default(),
            &resolver,
            &config(),
            Some("5 Birch Ln"),
            None,
        )
        .await
        .unwrap();

        assert_eq!(
            result.distance_source,
            Some(DistanceSource::Fallback(FallbackReason::MissingApiKey))
        );
        assert_eq!(result.pricing.distance, Some(dec!(10)));
        assert_eq!(result.pricing.upfront_total, 29000);
    }

    #[tokio::test]
    async fn test_unpriceable_distance_is_an_error() {
        let resolver = DistanceResolver::new(None, "origin");
        let result = calculate_pricing(
            &PricingEngine::default(),
            &resolver,
            &config(),
            None,
            Some(Decimal::MAX),
        )
        .await;

        assert!(matches!(
            result,
            Err(PricingError::Unpriceable(FeeOverflow { fee: "delivery_fee" }))
        ));
    }
}
