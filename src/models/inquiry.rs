//! Customer inquiry models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Inquiry lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "inquiry_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    New,
    Quoted,
    Approved,
    Rejected,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::Quoted => "quoted",
            InquiryStatus::Approved => "approved",
            InquiryStatus::Rejected => "rejected",
        }
    }

    /// CSS classes for the status badge
    pub fn badge_class(&self) -> &'static str {
        match self {
            InquiryStatus::New => "badge badge-blue",
            InquiryStatus::Quoted => "badge badge-yellow",
            InquiryStatus::Approved => "badge badge-green",
            InquiryStatus::Rejected => "badge badge-red",
        }
    }

    /// Quotes are only drafted for fresh inquiries
    pub fn can_quote(&self) -> bool {
        matches!(self, InquiryStatus::New)
    }
}

/// Mobility aid used by the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "mobility_aid", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MobilityAid {
    Wheelchair,
    Scooter,
    Walker,
    None,
    Other,
}

impl MobilityAid {
    pub const ALL: [MobilityAid; 5] = [
        MobilityAid::Wheelchair,
        MobilityAid::Scooter,
        MobilityAid::Walker,
        MobilityAid::None,
        MobilityAid::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MobilityAid::Wheelchair => "wheelchair",
            MobilityAid::Scooter => "scooter",
            MobilityAid::Walker => "walker",
            MobilityAid::None => "none",
            MobilityAid::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|aid| aid.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// Inquiry from the inquiries table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Inquiry {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Customer height in inches
    pub height: Option<i32>,
    pub mobility_aid: Option<MobilityAid>,
    pub picture_blob_url: Option<String>,
    pub status: InquiryStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw inquiry form submission; every field arrives as text
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub height: Option<String>,
    pub mobility_aid: Option<String>,
    pub notes: Option<String>,
}

impl From<&Inquiry> for InquiryForm {
    fn from(inquiry: &Inquiry) -> Self {
        Self {
            name: inquiry.name.clone(),
            email: inquiry.email.clone(),
            phone: inquiry.phone.clone(),
            address: inquiry.address.clone(),
            height: inquiry.height.map(|h| h.to_string()),
            mobility_aid: inquiry.mobility_aid.map(|aid| aid.as_str().to_string()),
            notes: inquiry.notes.clone(),
        }
    }
}

/// Validated inquiry ready for insert or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub height: Option<i32>,
    pub mobility_aid: Option<MobilityAid>,
    pub notes: Option<String>,
}
