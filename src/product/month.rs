//! Resolves month query parameters to calendar months.
//!
//! Month-scoped queries match on the calendar month only, so records from
//! every year in the store are included.

use time::Month;

use crate::Error;

/// Resolve a full English month name (any case) or a number from 1 to 12.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `input` is neither.
pub fn resolve_month(input: &str) -> Result<Month, Error> {
    let trimmed = input.trim();

    if let Ok(month) = resolve_numeric_month(trimmed) {
        return Ok(month);
    }

    all_months()
        .find(|month| month.to_string().eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| Error::InvalidMonth(input.to_owned()))
}

/// Resolve a month number from 1 to 12, rejecting month names.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `input` is not an integer from 1 to 12.
pub fn resolve_numeric_month(input: &str) -> Result<Month, Error> {
    input
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .ok_or_else(|| Error::InvalidMonth(input.to_owned()))
}

fn all_months() -> impl Iterator<Item = Month> {
    (1..=12).filter_map(|number| Month::try_from(number).ok())
}
