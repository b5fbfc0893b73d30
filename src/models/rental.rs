//! Rental models for dashboard listings

use chrono::{DateTime, Months, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// E-signature state of a rental agreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(type_name = "signature_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SignatureStatus {
    Pending,
    Signed,
    Expired,
}

/// Rental joined with its customer's name and email
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActiveRental {
    pub id: i32,
    pub inquiry_id: i32,
    pub quote_id: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub signature_status: SignatureStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
}

impl ActiveRental {
    pub fn status_label(&self) -> &'static str {
        if self.end_date.is_some() {
            "Completed"
        } else if self.start_date.is_some() {
            "Active"
        } else {
            "Pending"
        }
    }

    /// One month after the start date; `None` until the rental starts
    pub fn next_billing_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
            .and_then(|start| start.checked_add_months(Months::new(1)))
    }
}
