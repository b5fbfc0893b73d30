//! Persisted quote model

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::pricing::models::RampConfiguration;

/// Quote from the quotes table. Amounts are in cents.
#[derive(Debug, Clone, FromRow)]
pub struct Quote {
    pub id: i32,
    pub inquiry_id: i32,
    pub delivery_fee: i64,
    pub install_fee: i64,
    pub monthly_rate: i64,
    pub upfront_total: i64,
    pub surcharge: i64,
    pub ramp_config: Json<RampConfiguration>,
    pub created_at: DateTime<Utc>,
}
