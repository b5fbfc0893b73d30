//! Display rows for templates.
//!
//! Templates only see preformatted strings; dates and money are rendered here.

use chrono::{DateTime, Utc};

use crate::models::{ActiveRental, Inquiry, InquiryForm, MobilityAid, Quote};
use crate::pricing::models::{PlatformSize, PricingResult, RampConfiguration};
use crate::pricing::{format_currency, DistanceSource, FallbackReason};

const DASH: &str = "-";

pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| DASH.to_string())
}

pub fn format_datetime(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y %I:%M %p").to_string()
}

/// One inquiry in a table
#[derive(Debug, Clone)]
pub struct InquiryRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub mobility_aid: String,
    pub height: String,
    pub notes: String,
    pub status: &'static str,
    pub status_class: &'static str,
    pub created: String,
    pub created_full: String,
    pub can_quote: bool,
}

impl From<&Inquiry> for InquiryRow {
    fn from(inquiry: &Inquiry) -> Self {
        Self {
            id: inquiry.id,
            name: inquiry.name.clone(),
            email: inquiry.email.clone(),
            phone: inquiry.phone.clone(),
            address: inquiry.address.clone(),
            mobility_aid: inquiry
                .mobility_aid
                .map(|aid| aid.as_str().to_string())
                .unwrap_or_else(|| DASH.to_string()),
            height: inquiry
                .height
                .map(|h| format!("{} in", h))
                .unwrap_or_else(|| DASH.to_string()),
            notes: inquiry.notes.clone().unwrap_or_default(),
            status: inquiry.status.as_str(),
            status_class: inquiry.status.badge_class(),
            created: format_date(Some(inquiry.created_at)),
            created_full: format_datetime(inquiry.created_at),
            can_quote: inquiry.status.can_quote(),
        }
    }
}

/// One active rental in the dashboard table
#[derive(Debug, Clone)]
pub struct RentalRow {
    pub id: i32,
    pub inquiry_id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub status: &'static str,
    pub start_date: String,
    pub next_billing: String,
}

impl From<&ActiveRental> for RentalRow {
    fn from(rental: &ActiveRental) -> Self {
        Self {
            id: rental.id,
            inquiry_id: rental.inquiry_id,
            customer_name: rental
                .customer_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            customer_email: rental.customer_email.clone().unwrap_or_default(),
            status: rental.status_label(),
            start_date: format_date(rental.start_date),
            next_billing: format_date(rental.next_billing_date()),
        }
    }
}

/// One saved quote on the inquiry page
#[derive(Debug, Clone)]
pub struct QuoteRow {
    pub id: i32,
    pub delivery_fee: String,
    pub install_fee: String,
    pub monthly_rate: String,
    pub surcharge: String,
    pub upfront_total: String,
    pub configuration: String,
    pub created: String,
}

/// Summarise a configuration, e.g. `1 x 5x5 platform; 2 x 6 ft ramp`
pub fn describe_configuration(config: &RampConfiguration) -> String {
    let platforms = config
        .platforms
        .iter()
        .map(|p| format!("{} x {} platform", p.quantity, p.size));
    let ramps = config
        .ramps
        .iter()
        .map(|r| format!("{} x {} ft ramp", r.quantity, r.length.normalize()));
    let parts: Vec<String> = platforms.chain(ramps).collect();

    if parts.is_empty() {
        "No equipment".to_string()
    } else {
        parts.join("; ")
    }
}

impl From<&Quote> for QuoteRow {
    fn from(quote: &Quote) -> Self {
        Self {
            id: quote.id,
            delivery_fee: format_currency(quote.delivery_fee),
            install_fee: format_currency(quote.install_fee),
            monthly_rate: format_currency(quote.monthly_rate),
            surcharge: format_currency(quote.surcharge),
            upfront_total: format_currency(quote.upfront_total),
            configuration: describe_configuration(&quote.ramp_config),
            created: format_date(Some(quote.created_at)),
        }
    }
}

/// Mobility aid option in a select
#[derive(Debug, Clone)]
pub struct AidOption {
    pub value: &'static str,
    pub selected: bool,
}

/// Inquiry form contents with text fields flattened
#[derive(Debug, Clone, Default)]
pub struct FormView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub height: String,
    pub notes: String,
    pub mobility_aids: Vec<AidOption>,
}

impl From<&InquiryForm> for FormView {
    fn from(form: &InquiryForm) -> Self {
        let chosen = form.mobility_aid.as_deref().and_then(MobilityAid::parse);
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            address: form.address.clone(),
            height: form.height.clone().unwrap_or_default(),
            notes: form.notes.clone().unwrap_or_default(),
            mobility_aids: MobilityAid::ALL
                .into_iter()
                .map(|aid| AidOption {
                    value: aid.as_str(),
                    selected: chosen == Some(aid),
                })
                .collect(),
        }
    }
}

/// Platform size option in a calculator line
#[derive(Debug, Clone)]
pub struct SizeOption {
    pub value: &'static str,
    pub selected: bool,
}

/// One editable platform line on the pricing page
#[derive(Debug, Clone)]
pub struct PlatformLineView {
    pub size: &'static str,
    pub quantity: String,
    pub sizes: Vec<SizeOption>,
}

impl PlatformLineView {
    pub fn new(size: PlatformSize, quantity: String) -> Self {
        Self {
            size: size.as_str(),
            quantity,
            sizes: PlatformSize::ALL
                .into_iter()
                .map(|option| SizeOption {
                    value: option.as_str(),
                    selected: option == size,
                })
                .collect(),
        }
    }
}

/// One editable ramp line on the pricing page
#[derive(Debug, Clone)]
pub struct RampLineView {
    pub length: String,
    pub quantity: String,
}

/// Fee breakdown shown after a calculation, with raw cents for the save form
#[derive(Debug, Clone)]
pub struct BreakdownView {
    pub delivery_fee: String,
    pub install_fee: String,
    pub monthly_rate: String,
    pub surcharge: String,
    pub upfront_total: String,
    pub has_surcharge: bool,
    pub distance: String,
    pub distance_note: String,
    pub delivery_cents: i64,
    pub install_cents: i64,
    pub monthly_cents: i64,
    pub surcharge_cents: i64,
    pub upfront_cents: i64,
}

pub fn distance_note(source: Option<DistanceSource>) -> String {
    let reason = match source {
        None | Some(DistanceSource::Service) => return String::new(),
        Some(DistanceSource::Fallback(reason)) => reason,
    };
    let why = match reason {
        FallbackReason::MissingApiKey => "no distance service key is configured",
        FallbackReason::EmptyDestination => "the address is blank",
        FallbackReason::Request => "the distance service did not respond",
        FallbackReason::Status => "the distance service could not route this address",
        FallbackReason::Unparseable => "the distance service reply was unusable",
    };
    format!("(default distance: {})", why)
}

impl BreakdownView {
    pub fn new(pricing: &PricingResult, source: Option<DistanceSource>) -> Self {
        Self {
            delivery_fee: format_currency(pricing.delivery_fee),
            install_fee: format_currency(pricing.install_fee),
            monthly_rate: format_currency(pricing.monthly_rate),
            surcharge: format_currency(pricing.surcharge),
            upfront_total: format_currency(pricing.upfront_total),
            has_surcharge: pricing.surcharge > 0,
            distance: pricing
                .distance
                .map(|miles| format!("{:.1}", miles))
                .unwrap_or_else(|| DASH.to_string()),
            distance_note: distance_note(source),
            delivery_cents: pricing.delivery_fee,
            install_cents: pricing.install_fee,
            monthly_cents: pricing.monthly_rate,
            surcharge_cents: pricing.surcharge,
            upfront_cents: pricing.upfront_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{PlatformSize, PlatformSpec, RampSection};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(format_date(Some(date)), "Mar 5, 2024");
        assert_eq!(format_date(None), "-");
        assert_eq!(format_datetime(date), "March 5, 2024 02:30 PM");
    }

    #[test]
    fn test_describe_configuration() {
        let config = RampConfiguration {
            platforms: vec![PlatformSpec { size: PlatformSize::FiveByFive, quantity: 1 }],
            ramps: vec![RampSection { length: dec!(6.0), quantity: 2 }],
        };
        assert_eq!(describe_configuration(&config), "1 x 5x5 platform; 2 x 6 ft ramp");
        assert_eq!(describe_configuration(&RampConfiguration::default()), "No equipment");
    }

    #[test]
    fn test_form_view_marks_selected_aid() {
        let form = InquiryForm {
            mobility_aid: Some("walker".to_string()),
            ..InquiryForm::default()
        };
        let view = FormView::from(&form);
        let selected: Vec<&str> = view
            .mobility_aids
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(selected, vec!["walker"]);
        assert_eq!(view.mobility_aids.len(), 5);
    }

    #[test]
    fn test_breakdown_view() {
        let pricing = PricingResult {
            delivery_fee: 3015,
            install_fee: 11500,
            monthly_rate: 15000,
            upfront_total: 32015,
            surcharge: 2500,
            distance: Some(dec!(60.3)),
        };
        let view = BreakdownView::new(
            &pricing,
            Some(DistanceSource::Fallback(FallbackReason::Request)),
        );

        assert_eq!(view.delivery_fee, "$30.15");
        assert_eq!(view.upfront_total, "$320.15");
        assert!(view.has_surcharge);
        assert_eq!(view.distance, "60.3");
        assert_eq!(
            view.distance_note,
            "(default distance: the distance service did not respond)"
        );
        assert_eq!(view.upfront_cents, 32015);
    }

    #[test]
    fn test_distance_note_empty_for_service() {
        assert_eq!(distance_note(Some(DistanceSource::Service)), "");
        assert_eq!(distance_note(None), "");
    }

    #[test]
    fn test_platform_line_selects_size() {
        let line = PlatformLineView::new(PlatformSize::SixBySix, "2".to_string());
        let selected: Vec<&str> = line.sizes.iter().filter(|o| o.selected).map(|o| o.value).collect();
        assert_eq!(selected, vec!["6x6"]);
        assert_eq!(line.size, "6x6");
    }
}
