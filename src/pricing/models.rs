//! Value objects for ramp pricing.
//!
//! These are transient: built per request, never mutated after creation.
//! `RampConfiguration` is also the JSONB payload stored alongside quotes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Platform sizes stocked for rental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformSize {
    #[serde(rename = "4x4")]
    FourByFour,
    #[serde(rename = "5x5")]
    FiveByFive,
    #[serde(rename = "6x6")]
    SixBySix,
    #[serde(rename = "8x8")]
    EightByEight,
}

impl PlatformSize {
    pub const ALL: [PlatformSize; 4] = [
        PlatformSize::FourByFour,
        PlatformSize::FiveByFive,
        PlatformSize::SixBySix,
        PlatformSize::EightByEight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformSize::FourByFour => "4x4",
            PlatformSize::FiveByFive => "5x5",
            PlatformSize::SixBySix => "6x6",
            PlatformSize::EightByEight => "8x8",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.as_str() == value.trim())
    }
}

impl std::fmt::Display for PlatformSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A platform line in a configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub size: PlatformSize,
    pub quantity: i32,
}

/// A ramp segment line in a configuration (length in feet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RampSection {
    pub length: Decimal,
    pub quantity: i32,
}

/// The set of platforms and ramp segments composing a rental
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RampConfiguration {
    #[serde(default)]
    pub platforms: Vec<PlatformSpec>,
    #[serde(default)]
    pub ramps: Vec<RampSection>,
}

impl RampConfiguration {
    /// Total number of platforms across all lines
    pub fn platform_count(&self) -> i64 {
        self.platforms.iter().map(|p| i64::from(p.quantity)).sum()
    }

    /// Total number of ramp sections across all lines
    pub fn ramp_section_count(&self) -> i64 {
        self.ramps.iter().map(|r| i64::from(r.quantity)).sum()
    }

    /// Total linear feet of ramp, `None` past the decimal range
    pub fn total_ramp_feet(&self) -> Option<Decimal> {
        self.ramps.iter().try_fold(Decimal::ZERO, |total, r| {
            r.length
                .checked_mul(Decimal::from(r.quantity))
                .and_then(|feet| total.checked_add(feet))
        })
    }
}

/// Fee breakdown for one configuration at one distance.
///
/// Every amount is in cents. `upfront_total` is always the plain sum of the
/// other four fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingResult {
    pub delivery_fee: i64,
    pub install_fee: i64,
    pub monthly_rate: i64,
    pub upfront_total: i64,
    pub surcharge: i64,
    pub distance: Option<Decimal>,
}

/// Quote amounts submitted for persistence
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuoteDraft {
    pub delivery_fee: i64,
    pub install_fee: i64,
    pub monthly_rate: i64,
    pub upfront_total: i64,
    #[serde(default)]
    pub surcharge: i64,
    pub ramp_config: RampConfiguration,
}

impl From<(&PricingResult, &RampConfiguration)> for QuoteDraft {
    fn from((pricing, config): (&PricingResult, &RampConfiguration)) -> Self {
        Self {
            delivery_fee: pricing.delivery_fee,
            install_fee: pricing.install_fee,
            monthly_rate: pricing.monthly_rate,
            upfront_total: pricing.upfront_total,
            surcharge: pricing.surcharge,
            ramp_config: config.clone(),
        }
    }
}
