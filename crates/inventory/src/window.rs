//! Calendar windows: trailing day ranges and Monday-based weeks.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use stockline_core::{DomainError, DomainResult};

/// The `days` calendar dates ending at `today`, oldest first.
///
/// Fails with [`DomainError::InvalidWindow`] when `days <= 0`.
pub fn trailing_days(today: NaiveDate, days: i64) -> DomainResult<Vec<NaiveDate>> {
    if days <= 0 {
        return Err(DomainError::invalid_window(days));
    }

    let span = Duration::try_days(days - 1)
        .ok_or_else(|| DomainError::validation(format!("window of {days} days is too long")))?;
    let first = today.checked_sub_signed(span).ok_or_else(|| {
        DomainError::validation(format!("window of {days} days ending {today} predates the calendar"))
    })?;

    Ok(first.iter_days().take_while(|d| *d <= today).collect())
}

/// The seven dates Monday..Sunday of the ISO week containing `date`.
pub fn week_of(date: NaiveDate) -> Vec<NaiveDate> {
    let offset = i64::from(date.weekday().num_days_from_monday());
    let monday = date
        .checked_sub_signed(Duration::days(offset))
        .unwrap_or(date);
    monday.iter_days().take(7).collect()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
