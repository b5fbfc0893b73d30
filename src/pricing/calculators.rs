//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database or network access.
//! Coefficients live in a [`Tariff`] value owned by a [`PricingEngine`], so
//! alternate rate cards can be swapped in without touching global state.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use super::models::{PricingResult, RampConfiguration};

/// Rate card for ramp rentals, in dollars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tariff {
    pub delivery_per_mile: Decimal,
    pub delivery_minimum: Decimal,
    pub install_base: Decimal,
    pub install_per_platform: Decimal,
    pub install_per_ramp_section: Decimal,
    pub monthly_base: Decimal,
    pub monthly_per_platform: Decimal,
    pub monthly_per_ramp_foot: Decimal,
    /// Surcharge applies strictly beyond this many miles
    pub surcharge_threshold_miles: Decimal,
    pub surcharge_amount: Decimal,
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            delivery_per_mile: dec!(0.50),
            delivery_minimum: dec!(25),
            install_base: dec!(75),
            install_per_platform: dec!(25),
            install_per_ramp_section: dec!(15),
            monthly_base: dec!(100),
            monthly_per_platform: dec!(20),
            monthly_per_ramp_foot: dec!(5),
            surcharge_threshold_miles: dec!(15),
            surcharge_amount: dec!(25),
        }
    }
}

/// Round to specified decimal places, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use ramp_rental_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// assert_eq!(round_money(dec!(1.235), 2), dec!(1.24));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a dollar amount to whole cents, `None` if it does not fit in an `i64`.
pub fn to_cents(dollars: Decimal) -> Option<i64> {
    dollars
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| round_money(cents, 0).to_i64())
}

/// Sum the four fee components. No further rounding.
pub fn upfront_total(delivery_fee: i64, install_fee: i64, monthly_rate: i64, surcharge: i64) -> Option<i64> {
    delivery_fee
        .checked_add(install_fee)?
        .checked_add(monthly_rate)?
        .checked_add(surcharge)
}

/// A fee too large to represent in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{fee} is too large to price")]
pub struct FeeOverflow {
    pub fee: &'static str,
}

impl FeeOverflow {
    fn of(fee: &'static str) -> Self {
        Self { fee }
    }
}

/// Stateless fee calculator bound to a tariff
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    tariff: Tariff,
}

impl PricingEngine {
    pub fn new(tariff: Tariff) -> Self {
        Self { tariff }
    }

    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// Per-mile delivery with a floor, in cents.
    pub fn delivery_fee(&self, distance_miles: Decimal) -> Result<i64, FeeOverflow> {
        let overflow = || FeeOverflow::of("delivery_fee");
        let fee = distance_miles
            .checked_mul(self.tariff.delivery_per_mile)
            .ok_or_else(overflow)?
            .max(self.tariff.delivery_minimum);
        to_cents(fee).ok_or_else(overflow)
    }

    /// One-time installation charge, in cents.
    ///
    /// The base charge applies even for an empty configuration.
    pub fn install_fee(&self, config: &RampConfiguration) -> Result<i64, FeeOverflow> {
        let platforms = Decimal::from(config.platform_count()).checked_mul(self.tariff.install_per_platform);
        let sections =
            Decimal::from(config.ramp_section_count()).checked_mul(self.tariff.install_per_ramp_section);

        Some(self.tariff.install_base)
            .zip(platforms)
            .and_then(|(base, p)| base.checked_add(p))
            .zip(sections)
            .and_then(|(sum, r)| sum.checked_add(r))
            .and_then(to_cents)
            .ok_or(FeeOverflow::of("install_fee"))
    }

    /// Recurring monthly rental rate, in cents.
    pub fn monthly_rate(&self, config: &RampConfiguration) -> Result<i64, FeeOverflow> {
        let platforms = Decimal::from(config.platform_count()).checked_mul(self.tariff.monthly_per_platform);
        let feet = config
            .total_ramp_feet()
            .and_then(|feet| feet.checked_mul(self.tariff.monthly_per_ramp_foot));

        Some(self.tariff.monthly_base)
            .zip(platforms)
            .and_then(|(base, p)| base.checked_add(p))
            .zip(feet)
            .and_then(|(sum, f)| sum.checked_add(f))
            .and_then(to_cents)
            .ok_or(FeeOverflow::of("monthly_rate"))
    }

    /// Flat long-distance surcharge, in cents.
    pub fn surcharge(&self, distance_miles: Decimal) -> Result<i64, FeeOverflow> {
        if distance_miles > self.tariff.surcharge_threshold_miles {
            to_cents(self.tariff.surcharge_amount).ok_or(FeeOverflow::of("surcharge"))
        } else {
            Ok(0)
        }
    }

    /// Full fee breakdown for a configuration delivered `distance_miles` away.
    pub fn calculate(
        &self,
        config: &RampConfiguration,
        distance_miles: Decimal,
    ) -> Result<PricingResult, FeeOverflow> {
        let delivery_fee = self.delivery_fee(distance_miles)?;
        let install_fee = self.install_fee(config)?;
        let monthly_rate = self.monthly_rate(config)?;
        let surcharge = self.surcharge(distance_miles)?;
        let upfront_total = upfront_total(delivery_fee, install_fee, monthly_rate, surcharge)
            .ok_or(FeeOverflow::of("upfront_total"))?;

        Ok(PricingResult {
            delivery_fee,
            install_fee,
            monthly_rate,
            upfront_total,
            surcharge,
            distance: Some(distance_miles),
        })
    }
}

/// Full pricing at the standard tariff.
pub fn calculate_full_pricing(
    config: &RampConfiguration,
    distance_miles: Decimal,
) -> Result<PricingResult, FeeOverflow> {
    PricingEngine::default().calculate(config, distance_miles)
}

/// Format cents as US dollars, e.g. `2550` -> `"$25.50"`, `123456` -> `"$1,234.56"`.
pub fn format_currency(amount_in_cents: i64) -> String {
    let sign = if amount_in_cents < 0 { "-" } else { "" };
    let cents = amount_in_cents.unsigned_abs();
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}
