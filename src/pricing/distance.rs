//! Travel distance lookup against a distance-matrix service.
//!
//! Pricing must never block on the service: any failure resolves to
//! [`FALLBACK_DISTANCE_MILES`], and the returned [`DistanceEstimate`] records
//! which path produced the number.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Distance used whenever the service cannot answer
pub const FALLBACK_DISTANCE_MILES: Decimal = dec!(10);

/// Longest trip the business quotes; anything further is treated as a bad reading
pub const MAX_DISTANCE_MILES: Decimal = dec!(1000);

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const DISTANCE_MATRIX_PATH: &str = "/maps/api/distancematrix/json";

const FEET_PER_MILE: Decimal = dec!(5280);

/// Why a fallback distance was used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No API key configured
    MissingApiKey,
    /// Destination address was blank
    EmptyDestination,
    /// Transport failure or timeout
    Request,
    /// Service answered without an OK status for the pair
    Status,
    /// Response body or distance text could not be read
    Unparseable,
}

/// Where a distance figure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum DistanceSource {
    Service,
    Fallback(FallbackReason),
}

/// A resolved travel distance in miles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceEstimate {
    pub miles: Decimal,
    pub source: DistanceSource,
}

impl DistanceEstimate {
    pub fn fallback(reason: FallbackReason) -> Self {
        Self {
            miles: FALLBACK_DISTANCE_MILES,
            source: DistanceSource::Fallback(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, DistanceSource::Fallback(_))
    }
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<DistanceMatrixRow>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixRow {
    #[serde(default)]
    elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixElement {
    status: String,
    distance: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    text: String,
}

/// Resolves customer addresses to miles from the business address.
///
/// One request per call, no retries, no caching.
#[derive(Debug, Clone)]
pub struct DistanceResolver {
    client: reqwest::Client,
    api_key: Option<String>,
    origin: String,
    base_url: String,
    timeout: Duration,
}

impl DistanceResolver {
    pub fn new(api_key: Option<String>, origin: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            origin: origin.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Estimate the distance to `destination`, falling back on any failure.
    pub async fn resolve(&self, destination: &str) -> DistanceEstimate {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("Distance service key not configured, using default distance");
            return DistanceEstimate::fallback(FallbackReason::MissingApiKey);
        };

        let destination = destination.trim();
        if destination.is_empty() {
            warn!("Empty destination address, using default distance");
            return DistanceEstimate::fallback(FallbackReason::EmptyDestination);
        }

        match self.fetch(api_key, destination).await {
            Ok(miles) => {
                debug!(%miles, destination, "Distance resolved");
                DistanceEstimate {
                    miles,
                    source: DistanceSource::Service,
                }
            }
            Err(reason) => {
                warn!(?reason, destination, "Distance lookup failed, using default distance");
                DistanceEstimate::fallback(reason)
            }
        }
    }

    async fn fetch(&self, api_key: &str, destination: &str) -> Result<Decimal, FallbackReason> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), DISTANCE_MATRIX_PATH);

        let response = self
            .client
            .get(url)
            .query(&[
                ("origins", self.origin.as_str()),
                ("destinations", destination),
                ("units", "imperial"),
                ("key", api_key),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!("Distance service request error: {}", e);
                FallbackReason::Request
            })?;

        if !response.status().is_success() {
            warn!("Distance service HTTP status: {}", response.status());
            return Err(FallbackReason::Status);
        }

        let body: DistanceMatrixResponse = response.json().await.map_err(|e| {
            warn!("Distance service response unreadable: {}", e);
            FallbackReason::Unparseable
        })?;

        distance_from_response(&body)
    }
}

fn distance_from_response(body: &DistanceMatrixResponse) -> Result<Decimal, FallbackReason> {
    if body.status != "OK" {
        warn!(status = %body.status, "Distance service error status");
        return Err(FallbackReason::Status);
    }

    let element = body
        .rows
        .first()
        .and_then(|row| row.elements.first())
        .ok_or(FallbackReason::Status)?;

    if element.status != "OK" {
        warn!(status = %element.status, "Distance service element status");
        return Err(FallbackReason::Status);
    }

    let text = element
        .distance
        .as_ref()
        .map(|d| d.text.as_str())
        .ok_or(FallbackReason::Unparseable)?;

    let miles = parse_distance_text(text).ok_or(FallbackReason::Unparseable)?;
    if miles > MAX_DISTANCE_MILES {
        warn!(%miles, "Distance beyond quoting range");
        return Err(FallbackReason::Unparseable);
    }
    Ok(miles)
}

/// Parse a human-readable distance such as `"12.3 mi"` into miles.
///
/// Keeps only digits and dots before parsing, so `"1,204 mi"` reads as 1204.
/// Short trips reported in feet (`"850 ft"`) are converted to miles.
pub fn parse_distance_text(text: &str) -> Option<Decimal> {
    let numeric: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let value: Decimal = numeric.parse().ok()?;

    if text.trim_end().ends_with("ft") {
        Some(value / FEET_PER_MILE)
    } else {
        Some(value)
    }
}
