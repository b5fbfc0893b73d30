//! Input validation for forms and API payloads.
//!
//! Validators collect every problem instead of stopping at the first one.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{InquiryForm, MobilityAid, NewInquiry};
use crate::pricing::distance::MAX_DISTANCE_MILES;
use crate::pricing::models::{QuoteDraft, RampConfiguration};
use crate::pricing::requests::CalculatePricingRequest;

/// Most units of one platform size or ramp length on a single line
pub const MAX_LINE_QUANTITY: i32 = 10;

pub const MIN_RAMP_LENGTH_FEET: Decimal = dec!(2);

pub const MAX_RAMP_LENGTH_FEET: Decimal = dec!(32);

/// Accumulated validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    /// `Ok(value)` when nothing was recorded
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Loose structural email check: `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Validate an inquiry form into an insertable record
pub fn validate_inquiry(form: &InquiryForm) -> Result<NewInquiry, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.push("Name is required");
    }

    let email = form.email.trim();
    if !is_valid_email(email) {
        errors.push("Invalid email address");
    }

    let phone = form.phone.trim();
    if phone.chars().count() < 10 {
        errors.push("Phone must be at least 10 digits");
    }

    let address = form.address.trim();
    if address.is_empty() {
        errors.push("Address is required");
    }

    let height = match non_blank(&form.height) {
        None => None,
        Some(raw) => match raw.parse::<i32>() {
            Ok(h) if h > 0 => Some(h),
            _ => {
                errors.push("Height must be a positive whole number");
                None
            }
        },
    };

    let mobility_aid = match non_blank(&form.mobility_aid) {
        None => None,
        Some(raw) => {
            let parsed = MobilityAid::parse(raw);
            if parsed.is_none() {
                errors.push(format!("Unknown mobility aid '{}'", raw));
            }
            parsed
        }
    };

    errors.finish(NewInquiry {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        height,
        mobility_aid,
        notes: non_blank(&form.notes).map(str::to_string),
    })
}

/// Record problems with platform and ramp lines
pub fn check_ramp_configuration(config: &RampConfiguration, errors: &mut ValidationErrors) {
    let quantity_ok = |quantity: i32| (1..=MAX_LINE_QUANTITY).contains(&quantity);

    for (i, platform) in config.platforms.iter().enumerate() {
        if !quantity_ok(platform.quantity) {
            errors.push(format!(
                "platforms[{}].quantity must be between 1 and {}",
                i, MAX_LINE_QUANTITY
            ));
        }
    }
    for (i, ramp) in config.ramps.iter().enumerate() {
        if !quantity_ok(ramp.quantity) {
            errors.push(format!(
                "ramps[{}].quantity must be between 1 and {}",
                i, MAX_LINE_QUANTITY
            ));
        }
        if ramp.length < MIN_RAMP_LENGTH_FEET || ramp.length > MAX_RAMP_LENGTH_FEET {
            errors.push(format!(
                "ramps[{}].length must be between {} and {} feet",
                i, MIN_RAMP_LENGTH_FEET, MAX_RAMP_LENGTH_FEET
            ));
        }
    }
}

pub fn validate_ramp_configuration(config: &RampConfiguration) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_ramp_configuration(config, &mut errors);
    errors.finish(())
}

/// Validate a stand-alone pricing request
pub fn validate_pricing_request(request: &CalculatePricingRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_ramp_configuration(&request.ramp_config, &mut errors);

    match request.distance_miles {
        Some(miles) if miles < Decimal::ZERO => {
            errors.push("distance_miles must not be negative");
        }
        Some(miles) if miles > MAX_DISTANCE_MILES => {
            errors.push(format!("distance_miles must not exceed {}", MAX_DISTANCE_MILES));
        }
        Some(_) => {}
        None => {
            if non_blank(&request.address).is_none() {
                errors.push("Address is required for distance calculation");
            }
        }
    }

    errors.finish(())
}

/// Validate quote amounts before persisting
pub fn validate_quote(inquiry_id: i32, draft: &QuoteDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if inquiry_id <= 0 {
        errors.push("inquiry_id must be positive");
    }

    for (field, amount) in [
        ("delivery_fee", draft.delivery_fee),
        ("install_fee", draft.install_fee),
        ("monthly_rate", draft.monthly_rate),
        ("upfront_total", draft.upfront_total),
        ("surcharge", draft.surcharge),
    ] {
        if amount < 0 {
            errors.push(format!("{} must not be negative", field));
        }
    }

    let expected = draft
        .delivery_fee
        .checked_add(draft.install_fee)
        .and_then(|v| v.checked_add(draft.monthly_rate))
        .and_then(|v| v.checked_add(draft.surcharge));
    if expected != Some(draft.upfront_total) {
        errors.push("upfront_total must equal the sum of the fees");
    }

    check_ramp_configuration(&draft.ramp_config, &mut errors);

    errors.finish(())
}
