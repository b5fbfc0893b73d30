//! Inquiry route handlers

use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::db;
use crate::error::Result;
use crate::models::{Inquiry, InquiryForm, InquiryStatus};
use crate::pricing::queries as quote_queries;
use crate::validation;
use crate::AppState;

use super::views::{FormView, InquiryRow, QuoteRow};

/// Inquiry listing template
#[derive(Template)]
#[template(path = "inquiries/list.html")]
struct InquiryListTemplate {
    inquiries: Vec<InquiryRow>,
}

/// New inquiry template
#[derive(Template)]
#[template(path = "inquiries/new.html")]
struct NewInquiryTemplate {
    form: FormView,
    errors: Vec<String>,
    action: String,
}

/// Inquiry detail template
#[derive(Template)]
#[template(path = "inquiries/detail.html")]
struct InquiryDetailTemplate {
    inquiry: InquiryRow,
    quotes: Vec<QuoteRow>,
    form: FormView,
    errors: Vec<String>,
    action: String,
}

/// Body for a status change
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: InquiryStatus,
}

async fn render_detail(
    state: &AppState,
    inquiry: &Inquiry,
    form: &InquiryForm,
    errors: Vec<String>,
) -> Result<String> {
    let quotes = quote_queries::list_quotes_for_inquiry(&state.db, inquiry.id).await?;

    let template = InquiryDetailTemplate {
        inquiry: InquiryRow::from(inquiry),
        quotes: quotes.iter().map(QuoteRow::from).collect(),
        form: FormView::from(form),
        errors,
        action: format!("/inquiries/{}", inquiry.id),
    };

    Ok(template.render()?)
}

/// All inquiries, newest first
pub async fn list(State(state): State<AppState>) -> Result<Html<String>> {
    let inquiries = state.cache.inquiry_listing(&state.db, None).await?;

    let template = InquiryListTemplate {
        inquiries: inquiries.iter().map(InquiryRow::from).collect(),
    };

    Ok(Html(template.render()?))
}

/// Empty inquiry form
pub async fn new_form() -> Result<Html<String>> {
    let template = NewInquiryTemplate {
        form: FormView::from(&InquiryForm::default()),
        errors: Vec::new(),
        action: "/inquiries".to_string(),
    };

    Ok(Html(template.render()?))
}

/// Create an inquiry from a form post
pub async fn create(State(state): State<AppState>, Form(form): Form<InquiryForm>) -> Result<Response> {
    let new_inquiry = match validation::validate_inquiry(&form) {
        Ok(valid) => valid,
        Err(errors) => {
            let template = NewInquiryTemplate {
                form: FormView::from(&form),
                errors: errors.into_messages(),
                action: "/inquiries".to_string(),
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(template.render()?)).into_response());
        }
    };

    let inquiry = db::insert_inquiry(&state.db, &new_inquiry).await?;
    state.cache.invalidate_inquiry(inquiry.id).await;
    tracing::info!(inquiry_id = inquiry.id, "Inquiry created");

    Ok(Redirect::to(&format!("/inquiries/{}", inquiry.id)).into_response())
}

/// Inquiry detail with saved quotes and edit form
pub async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Html<String>> {
    let inquiry = state.cache.inquiry(&state.db, id).await?;
    let form = InquiryForm::from(inquiry.as_ref());
    Ok(Html(render_detail(&state, &inquiry, &form, Vec::new()).await?))
}

/// Update an inquiry from the edit form
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<InquiryForm>,
) -> Result<Response> {
    let new_inquiry = match validation::validate_inquiry(&form) {
        Ok(valid) => valid,
        Err(errors) => {
            let inquiry = state.cache.inquiry(&state.db, id).await?;
            let html = render_detail(&state, &inquiry, &form, errors.into_messages()).await?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
        }
    };

    db::update_inquiry(&state.db, id, &new_inquiry).await?;
    state.cache.invalidate_inquiry(id).await;
    tracing::info!(inquiry_id = id, "Inquiry updated");

    Ok(Redirect::to(&format!("/inquiries/{}", id)).into_response())
}

/// Update an inquiry from a JSON body
pub async fn update_json(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<InquiryForm>,
) -> Result<Response> {
    let new_inquiry = match validation::validate_inquiry(&form) {
        Ok(valid) => valid,
        Err(errors) => {
            let body = json!({ "errors": errors.into_messages() });
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response());
        }
    };

    let inquiry = db::update_inquiry(&state.db, id, &new_inquiry).await?;
    state.cache.invalidate_inquiry(id).await;
    tracing::info!(inquiry_id = id, "Inquiry updated");

    Ok(Json(inquiry).into_response())
}

/// Change an inquiry's status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Inquiry>> {
    let inquiry = db::update_inquiry_status(&state.db, id, request.status).await?;
    state.cache.invalidate_inquiry(id).await;
    tracing::info!(inquiry_id = id, status = request.status.as_str(), "Inquiry status updated");

    Ok(Json(inquiry))
}

/// Delete an inquiry and its quotes
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Inquiry>> {
    let inquiry = db::delete_inquiry(&state.db, id).await?;
    state.cache.invalidate_inquiry(id).await;
    tracing::info!(inquiry_id = id, "Inquiry deleted");

    Ok(Json(inquiry))
}
