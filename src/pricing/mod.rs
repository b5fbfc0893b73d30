//! Pricing engine module.
//!
//! Turns a ramp configuration and a travel distance into a fee breakdown,
//! resolves distances against an external service, and persists quotes.

pub mod calculators;
pub mod distance;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    calculate_full_pricing, format_currency, round_money, FeeOverflow, PricingEngine, Tariff,
};
pub use distance::{
    DistanceEstimate, DistanceResolver, DistanceSource, FallbackReason, MAX_DISTANCE_MILES,
};
pub use models::{PlatformSize, PlatformSpec, PricingResult, RampConfiguration, RampSection};
pub use routes::router;
pub use services::PricingError;
