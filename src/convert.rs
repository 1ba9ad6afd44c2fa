//! Conversion between stored ISO dates and the per-granularity input form.
//!
//! Stored dates are always `YYYY-MM-DD`. In month granularity the input shows
//! `YYYY-MM`, and a typed month is stored as its first day.

use crate::{CalendarDate, Granularity, MONTH_INPUT_DAY_SUFFIX, ParseError, has_digit_shape};

/// Length of the `YYYY-MM` prefix of a stored date.
const MONTH_PREFIX_LEN: usize = 7;

/// Display form of a stored date string. Empty stays empty; malformed input is
/// passed through (truncated in month mode) for validation to reject.
pub fn format_for_display(stored: &str, granularity: Granularity) -> String {
    if granularity.is_month() {
        stored.get(..MONTH_PREFIX_LEN).unwrap_or(stored).to_owned()
    } else {
        stored.to_owned()
    }
}

/// Stored form of a display input. Clearing the input clears the date.
pub fn parse_from_display(input: &str, granularity: Granularity) -> String {
    if granularity.is_month() && !input.is_empty() {
        format!("{input}{MONTH_INPUT_DAY_SUFFIX}")
    } else {
        input.to_owned()
    }
}

/// Reads a stored value that may be a full date or a bare `YYYY-MM` month.
pub fn parse_stored(stored: &str) -> Option<CalendarDate> {
    if has_digit_shape(stored, &[4, 2]) {
        return format!("{stored}{MONTH_INPUT_DAY_SUFFIX}").parse().ok();
    }
    stored.parse().ok()
}

impl CalendarDate {
    /// Display form in the given granularity.
    pub fn format_for(&self, granularity: Granularity) -> String {
        if granularity.is_month() {
            self.to_month_string()
        } else {
            self.to_string()
        }
    }

    /// Parses a display-form input; a month input becomes the month's first day.
    ///
    /// # Errors
    /// Returns `ParseError` if the input does not have the granularity's shape
    /// or names an impossible date.
    pub fn parse_for(input: &str, granularity: Granularity) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        if !has_digit_shape(input, granularity.display_shape()) {
            return Err(ParseError::InvalidFormat(input.to_owned()));
        }
        parse_from_display(input, granularity).parse()
    }
}
