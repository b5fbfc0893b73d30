//! Dashboard route handler

use askama::Template;
use axum::{extract::State, response::Html};

use crate::cache::RECENT_INQUIRY_LIMIT;
use crate::error::Result;
use crate::AppState;

use super::views::{InquiryRow, RentalRow};

/// Dashboard template
#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    inquiries: Vec<InquiryRow>,
    rentals: Vec<RentalRow>,
}

/// Recent inquiries and active rentals
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let inquiries = state
        .cache
        .inquiry_listing(&state.db, Some(RECENT_INQUIRY_LIMIT))
        .await?;
    let rentals = state.cache.active_rental_listing(&state.db).await?;

    let template = DashboardTemplate {
        inquiries: inquiries.iter().map(InquiryRow::from).collect(),
        rentals: rentals.iter().map(RentalRow::from).collect(),
    };

    Ok(Html(template.render()?))
}
