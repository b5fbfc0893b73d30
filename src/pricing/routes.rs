//! JSON API routes for pricing and quotes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::pricing::models::QuoteDraft;
use crate::validation;
use crate::AppState;

use super::requests::{CalculatePricingRequest, CalculateQuoteRequest};
use super::responses::{PricingErrorResponse, PricingResponse, QuoteCalculationResponse, QuoteResponse};
use super::services::{self, PricingError};

/// Pricing API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/calculate", post(calculate_pricing))
        .route("/api/inquiries/:id/quote/calculate", post(calculate_quote))
        .route("/api/inquiries/:id/quotes", post(save_quote))
}

impl IntoResponse for PricingError {
    fn into_response(self) -> Response {
        let (status, error_type, details) = match &self {
            PricingError::InquiryNotFound { inquiry_id } => (
                StatusCode::NOT_FOUND,
                "inquiry_not_found",
                Some(serde_json::json!({ "inquiry_id": inquiry_id })),
            ),
            PricingError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                Some(serde_json::json!({ "errors": errors.messages() })),
            ),
            PricingError::Unpriceable(overflow) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "pricing_out_of_range",
                Some(serde_json::json!({ "fee": overflow.fee })),
            ),
            PricingError::Storage(e) => {
                tracing::error!("Pricing storage error: {}", e);
                (e.status(), "storage_error", None)
            }
        };

        let message = match &self {
            PricingError::Storage(_) => "Storage error".to_string(),
            other => other.to_string(),
        };

        let body = PricingErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Price a configuration from an address or explicit distance
pub async fn calculate_pricing(
    State(state): State<AppState>,
    Json(request): Json<CalculatePricingRequest>,
) -> Result<Json<PricingResponse>, PricingError> {
    validation::validate_pricing_request(&request)?;

    let calculation = services::calculate_pricing(
        &state.pricing,
        &state.distance,
        &request.ramp_config,
        request.address.as_deref(),
        request.distance_miles,
    )
    .await?;

    Ok(Json(PricingResponse::new(
        &calculation.pricing,
        calculation.distance_source,
    )))
}

/// Price a configuration for a stored inquiry
pub async fn calculate_quote(
    State(state): State<AppState>,
    Path(inquiry_id): Path<i32>,
    Json(request): Json<CalculateQuoteRequest>,
) -> Result<Json<QuoteCalculationResponse>, PricingError> {
    let calculation = services::calculate_quote(
        &state.db,
        &state.cache,
        &state.pricing,
        &state.distance,
        inquiry_id,
        request.ramp_config,
    )
    .await?;

    Ok(Json(QuoteCalculationResponse {
        inquiry_id: calculation.inquiry_id,
        pricing: PricingResponse::new(&calculation.pricing, Some(calculation.distance.source)),
        ramp_config: calculation.ramp_config,
    }))
}

/// Persist a quote for an inquiry
pub async fn save_quote(
    State(state): State<AppState>,
    Path(inquiry_id): Path<i32>,
    Json(draft): Json<QuoteDraft>,
) -> Result<(StatusCode, Json<QuoteResponse>), PricingError> {
    let quote = services::save_quote(&state.db, &state.cache, inquiry_id, &draft).await?;
    Ok((StatusCode::CREATED, Json(quote.into())))
}
