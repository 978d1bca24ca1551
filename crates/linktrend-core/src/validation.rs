//! Boundary validation for user-submitted payloads.

use crate::error::AppError;
use crate::models::{NewTransaction, NewVideo};
use regex::Regex;
use std::sync::OnceLock;

// Local mobile-number shape: 11 digits, operator prefix 013-019.
fn mobile_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^01[3-9]\d{8}$").expect("mobile number regex is valid"))
}

/// Whether `number` looks like a valid local mobile number.
pub fn is_valid_mobile_number(number: &str) -> bool {
    mobile_number_regex().is_match(number)
}

/// Validate a payment-request submission before it reaches storage.
pub fn validate_transaction(new: &NewTransaction) -> Result<(), AppError> {
    if new.trx_ref.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Transaction ID is required".to_string(),
        ));
    }
    if new.amount <= 0 {
        return Err(AppError::InvalidInput(
            "Amount must be positive".to_string(),
        ));
    }
    if !is_valid_mobile_number(&new.mobile_number) {
        return Err(AppError::InvalidInput(
            "Invalid mobile number".to_string(),
        ));
    }
    Ok(())
}

/// Validate metadata for a new catalog entry.
pub fn validate_video(new: &NewVideo) -> Result<(), AppError> {
    if new.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title is required".to_string()));
    }
    if new.creator_name.trim().is_empty() || new.creator_id.trim().is_empty() {
        return Err(AppError::InvalidInput("Creator is required".to_string()));
    }
    if new.thumbnail_url.trim().is_empty() || new.video_url.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Thumbnail and video URLs are required".to_string(),
        ));
    }
    if new.price < 0 {
        return Err(AppError::InvalidInput(
            "Price must not be negative".to_string(),
        ));
    }
    Ok(())
}
