// src/expiry.rs
//! Calendar helpers turning an expiration date into the engine's
//! `time_to_expiry` (years). "Today" is always passed in so results stay
//! reproducible.

use crate::error::{GreeksError, GreeksResult};
use chrono::NaiveDate;

/// Expiration dates are `YYYY-MM-DD`
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%d";

pub fn parse_expiration(input: &str) -> GreeksResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), EXPIRATION_FORMAT).map_err(|e| {
        GreeksError::ParseError {
            input: input.to_string(),
            reason: format!("expected YYYY-MM-DD ({})", e),
        }
    })
}

/// Whole calendar days from `today` to `expiration`; negative once expired
pub fn days_to_expiry(expiration: NaiveDate, today: NaiveDate) -> i64 {
    (expiration - today).num_days()
}

/// Years to expiry on a `days_per_year` day count
pub fn time_to_expiry_years(expiration: NaiveDate, today: NaiveDate, days_per_year: f64) -> f64 {
    days_to_expiry(expiration, today) as f64 / days_per_year
}
