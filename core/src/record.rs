//! Order records — one row of the order log per attempted transaction.

use crate::types::{CountryCode, PartnerId, UserId, SUCCESS_STATUS};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub user_id: UserId,
    pub partner_id: PartnerId,
    /// `None` when the source timestamp could not be parsed.
    pub created_at: Option<NaiveDateTime>,
    pub status: String,
    pub error: Option<String>,
    pub country: Option<CountryCode>,
    pub provider: Option<String>,
}

impl OrderRecord {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    /// Calendar day of `created_at`. Null timestamps give a null day.
    pub fn date(&self) -> Option<NaiveDate> {
        self.created_at.map(|ts| ts.date())
    }
}

/// An error counts as a valid failure unless it mentions `marker`
/// (case-insensitive). An absent error is always a valid failure.
pub fn is_valid_failure(error: Option<&str>, marker: &str) -> bool {
    match error {
        Some(text) => !text.to_lowercase().contains(&marker.to_lowercase()),
        None => true,
    }
}

/// A record that passed the record filter, with its derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedOrder {
    pub order: OrderRecord,
    pub date: Option<NaiveDate>,
    pub valid_failure: bool,
}

impl ClassifiedOrder {
    pub fn classify(order: OrderRecord, bad_scoring_marker: &str) -> Self {
        let valid_failure = is_valid_failure(order.error.as_deref(), bad_scoring_marker);
        Self {
            date: order.date(),
            valid_failure,
            order,
        }
    }
}
