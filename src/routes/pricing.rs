//! Pricing calculator pages.
//!
//! Platform and ramp lines are posted as repeated `platform_size` /
//! `platform_quantity` and `ramp_length` / `ramp_quantity` fields, paired by
//! position. A line with a blank quantity is dropped, which is how the page
//! removes lines; every render adds one blank line of each kind.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::Inquiry;
use crate::pricing::models::{PlatformSize, PlatformSpec, QuoteDraft, RampConfiguration, RampSection};
use crate::pricing::requests::CalculatePricingRequest;
use crate::pricing::services::{self, PricingError};
use crate::validation::{self, ValidationErrors};
use crate::AppState;

use super::views::{BreakdownView, InquiryRow, PlatformLineView, RampLineView};

/// Pricing calculator template
#[derive(Template)]
#[template(path = "pricing.html")]
struct PricingTemplate {
    inquiry_id: Option<i32>,
    customer: Option<InquiryRow>,
    address: String,
    platforms: Vec<PlatformLineView>,
    ramps: Vec<RampLineView>,
    errors: Vec<String>,
    breakdown: Option<BreakdownView>,
}

/// `?inquiry=<id>`; anything that is not a number is ignored
#[derive(Debug, Default, Deserialize)]
pub struct PricingQuery {
    pub inquiry: Option<String>,
}

/// Raw text of one platform line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformLine {
    pub size: String,
    pub quantity: String,
}

/// Raw text of one ramp line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RampLine {
    pub length: String,
    pub quantity: String,
}

/// Calculator form as posted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculatorForm {
    pub inquiry: Option<i32>,
    pub address: String,
    pub platforms: Vec<PlatformLine>,
    pub ramps: Vec<RampLine>,
    pub delivery_fee: String,
    pub install_fee: String,
    pub monthly_rate: String,
    pub surcharge: String,
    pub upfront_total: String,
}

fn parse_inquiry_id(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

fn pair_up<T>(left: Vec<String>, right: Vec<String>, make: impl Fn(String, String) -> T) -> Vec<T> {
    let len = left.len().max(right.len());
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    (0..len)
        .map(|_| make(left.next().unwrap_or_default(), right.next().unwrap_or_default()))
        .collect()
}

impl CalculatorForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        let (mut sizes, mut platform_quantities) = (Vec::new(), Vec::new());
        let (mut lengths, mut ramp_quantities) = (Vec::new(), Vec::new());

        for (key, value) in pairs {
            match key.as_str() {
                "inquiry" => form.inquiry = parse_inquiry_id(&value),
                "address" => form.address = value,
                "platform_size" => sizes.push(value),
                "platform_quantity" => platform_quantities.push(value),
                "ramp_length" => lengths.push(value),
                "ramp_quantity" => ramp_quantities.push(value),
                "delivery_fee" => form.delivery_fee = value,
                "install_fee" => form.install_fee = value,
                "monthly_rate" => form.monthly_rate = value,
                "surcharge" => form.surcharge = value,
                "upfront_total" => form.upfront_total = value,
                _ => {}
            }
        }

        form.platforms = pair_up(sizes, platform_quantities, |size, quantity| PlatformLine { size, quantity });
        form.ramps = pair_up(lengths, ramp_quantities, |length, quantity| RampLine { length, quantity });
        form
    }

    /// Parse the non-blank lines and apply the configuration bounds
    pub fn ramp_configuration(&self) -> std::result::Result<RampConfiguration, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut config = RampConfiguration::default();

        for (i, line) in self.platforms.iter().enumerate() {
            let quantity = line.quantity.trim();
            if quantity.is_empty() {
                continue;
            }
            let size = PlatformSize::parse(&line.size);
            let parsed = quantity.parse::<i32>().ok();
            if size.is_none() {
                errors.push(format!("Platform line {}: unknown size '{}'", i + 1, line.size.trim()));
            }
            if parsed.is_none() {
                errors.push(format!("Platform line {}: quantity must be a whole number", i + 1));
            }
            if let (Some(size), Some(quantity)) = (size, parsed) {
                config.platforms.push(PlatformSpec { size, quantity });
            }
        }

        for (i, line) in self.ramps.iter().enumerate() {
            let quantity = line.quantity.trim();
            if quantity.is_empty() {
                continue;
            }
            let length = line.length.trim().parse::<Decimal>().ok();
            let parsed = quantity.parse::<i32>().ok();
            if length.is_none() {
                errors.push(format!("Ramp line {}: length must be a number of feet", i + 1));
            }
            if parsed.is_none() {
                errors.push(format!("Ramp line {}: quantity must be a whole number", i + 1));
            }
            if let (Some(length), Some(quantity)) = (length, parsed) {
                config.ramps.push(RampSection { length, quantity });
            }
        }

        validation::check_ramp_configuration(&config, &mut errors);
        errors.finish(config)
    }

    /// Amounts carried over from a calculation, ready to save
    pub fn quote_draft(&self) -> std::result::Result<QuoteDraft, ValidationErrors> {
        let config = self.ramp_configuration();
        let amounts: Option<Vec<i64>> = [
            &self.delivery_fee,
            &self.install_fee,
            &self.monthly_rate,
            &self.surcharge,
            &self.upfront_total,
        ]
        .into_iter()
        .map(|amount| amount.trim().parse().ok())
        .collect();

        let mut errors = match &config {
            Ok(_) => ValidationErrors::new(),
            Err(errors) => errors.clone(),
        };
        let amounts = match amounts {
            Some(amounts) => amounts,
            None => {
                errors.push("Calculate the quote before saving it");
                return Err(errors);
            }
        };

        let ramp_config = config?;
        Ok(QuoteDraft {
            delivery_fee: amounts[0],
            install_fee: amounts[1],
            monthly_rate: amounts[2],
            surcharge: amounts[3],
            upfront_total: amounts[4],
            ramp_config,
        })
    }
}

fn platform_lines(form: &CalculatorForm) -> Vec<PlatformLineView> {
    form.platforms
        .iter()
        .filter(|line| !line.quantity.trim().is_empty())
        .map(|line| {
            let size = PlatformSize::parse(&line.size).unwrap_or(PlatformSize::FiveByFive);
            PlatformLineView::new(size, line.quantity.trim().to_string())
        })
        .chain(std::iter::once(PlatformLineView::new(PlatformSize::FiveByFive, String::new())))
        .collect()
}

fn ramp_lines(form: &CalculatorForm) -> Vec<RampLineView> {
    form.ramps
        .iter()
        .filter(|line| !line.quantity.trim().is_empty())
        .map(|line| RampLineView {
            length: line.length.trim().to_string(),
            quantity: line.quantity.trim().to_string(),
        })
        .chain(std::iter::once(RampLineView {
            length: "6".to_string(),
            quantity: String::new(),
        }))
        .collect()
}

/// Starting configuration: one 5x5 platform and one 6 ft ramp
fn starting_form() -> CalculatorForm {
    CalculatorForm {
        platforms: vec![PlatformLine {
            size: PlatformSize::FiveByFive.as_str().to_string(),
            quantity: "1".to_string(),
        }],
        ramps: vec![RampLine {
            length: dec!(6).to_string(),
            quantity: "1".to_string(),
        }],
        ..CalculatorForm::default()
    }
}

fn render(
    form: &CalculatorForm,
    customer: Option<&Inquiry>,
    errors: Vec<String>,
    breakdown: Option<BreakdownView>,
) -> Result<String> {
    let template = PricingTemplate {
        inquiry_id: form.inquiry,
        customer: customer.map(InquiryRow::from),
        address: form.address.clone(),
        platforms: platform_lines(form),
        ramps: ramp_lines(form),
        errors,
        breakdown,
    };
    Ok(template.render()?)
}

fn invalid(form: &CalculatorForm, errors: Vec<String>) -> Result<Response> {
    let html = render(form, None, errors, None)?;
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
}

/// Messages to show on the page, or an error page for lookups and storage
fn page_messages(err: PricingError) -> std::result::Result<Vec<String>, AppError> {
    match err {
        PricingError::Validation(errors) => Ok(errors.into_messages()),
        PricingError::Unpriceable(overflow) => Ok(vec![overflow.to_string()]),
        PricingError::InquiryNotFound { .. } => Err(AppError::NotFound),
        PricingError::Storage(e) => Err(e),
    }
}

/// Calculator page, optionally for one inquiry
pub async fn calculator(
    State(state): State<AppState>,
    Query(query): Query<PricingQuery>,
) -> Result<Html<String>> {
    let mut form = starting_form();
    let requested = query.inquiry.as_deref().and_then(parse_inquiry_id);

    let customer = match requested {
        Some(id) => match state.cache.inquiry(&state.db, id).await {
            Ok(inquiry) => Some(inquiry),
            Err(AppError::NotFound) => None,
            Err(e) => return Err(e),
        },
        None => None,
    };

    if let Some(inquiry) = &customer {
        form.inquiry = Some(inquiry.id);
        form.address = inquiry.address.clone();
    }

    Ok(Html(render(&form, customer.as_deref(), Vec::new(), None)?))
}

/// Price the posted lines against the inquiry's address or a typed address
pub async fn calculate(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let form = CalculatorForm::from_pairs(pairs);
    let config = match form.ramp_configuration() {
        Ok(config) => config,
        Err(errors) => return invalid(&form, errors.into_messages()),
    };

    let Some(inquiry_id) = form.inquiry else {
        let request = CalculatePricingRequest {
            ramp_config: config,
            address: Some(form.address.clone()),
            distance_miles: None,
        };
        if let Err(errors) = validation::validate_pricing_request(&request) {
            return invalid(&form, errors.into_messages());
        }

        let calculated = services::calculate_pricing(
            &state.pricing,
            &state.distance,
            &request.ramp_config,
            request.address.as_deref(),
            None,
        )
        .await;

        return match calculated {
            Ok(calculation) => {
                let breakdown = BreakdownView::new(&calculation.pricing, calculation.distance_source);
                Ok(Html(render(&form, None, Vec::new(), Some(breakdown))?).into_response())
            }
            Err(err) => invalid(&form, page_messages(err)?),
        };
    };

    let calculation = match services::calculate_quote(
        &state.db,
        &state.cache,
        &state.pricing,
        &state.distance,
        inquiry_id,
        config,
    )
    .await
    {
        Ok(calculation) => calculation,
        Err(err) => return invalid(&form, page_messages(err)?),
    };

    let customer = state.cache.inquiry(&state.db, inquiry_id).await?;
    let breakdown = BreakdownView::new(&calculation.pricing, Some(calculation.distance.source));

    Ok(Html(render(&form, Some(customer.as_ref()), Vec::new(), Some(breakdown))?).into_response())
}

/// Save the calculated amounts and return to the inquiry
pub async fn save(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let form = CalculatorForm::from_pairs(pairs);

    let Some(inquiry_id) = form.inquiry else {
        return invalid(&form, vec!["Quotes can only be saved for an inquiry".to_string()]);
    };

    let draft = match form.quote_draft() {
        Ok(draft) => draft,
        Err(errors) => return invalid(&form, errors.into_messages()),
    };

    match services::save_quote(&state.db, &state.cache, inquiry_id, &draft).await {
        Ok(quote) => {
            tracing::info!(inquiry_id, quote_id = quote.id, "Quote saved from calculator");
            Ok(Redirect::to(&format!("/inquiries/{}", inquiry_id)).into_response())
        }
        Err(err) => invalid(&form, page_messages(err)?),
    }
}
