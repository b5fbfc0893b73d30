//! Database models

pub mod inquiry;
pub mod quote;
pub mod rental;

pub use inquiry::{Inquiry, InquiryForm, InquiryStatus, MobilityAid, NewInquiry};
pub use quote::Quote;
pub use rental::{ActiveRental, SignatureStatus};
