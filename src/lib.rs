//! Validation and reconciliation of the two comparable date periods behind
//! the review-analytics dashboard.
//!
//! A [`ComparisonConfiguration`] holds what the user typed into the four date
//! inputs together with the active [`Granularity`]. Every change is followed by
//! [`ComparisonConfiguration::validate`], which recomputes the full
//! [`ValidationErrors`] mapping and the non-blocking length [`Advisory`].

mod bounds;
mod chart;
mod consts;
mod constraints;
mod convert;
mod filter;
mod granularity;
mod prelude;
mod query;
mod range;
mod reconcile;
mod types;
mod validate;

#[cfg(test)]
mod test_utils;

pub use bounds::{BoundsError, CalendarBounds, is_in_bounds};
pub use chart::{ChartAttributes, ChartConfig, ChartDraft, ChartError, ChartType, DashboardPage, ProductRef};
pub use consts::*;
pub use constraints::{FieldLimits, InputLimits, input_limits, is_period2_before_period1, max_for_period2_end};
pub use convert::{format_for_display, parse_from_display, parse_stored};
pub use filter::{ComparisonConfiguration, DateField};
pub use granularity::{Granularity, GranularityError};
pub use query::{QueryError, StatsQuery};
pub use range::{DateRange, PeriodInput, RangeError, is_range_valid, length_of};
pub use reconcile::{reconcile_to_month, round_to_month_end, round_to_month_start, triggers_month_reconcile};
pub use types::{Day, Month, Year};
pub use validate::{Advisory, FieldKey, ValidationErrors, ValidationIssue, ValidationReport, validate};

use crate::prelude::*;
use std::str::FromStr;
use types::{civil_from_days, days_from_civil, days_in_month};

/// A concrete Gregorian calendar date, written `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date from numeric components, validating each of them.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first invalid component.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
            day:   Day::new(day, year, month)?,
        })
    }

    /// Compile-time constructor; an invalid date fails const evaluation.
    pub const fn from_ymd_const(year: u16, month: u8, day: u8) -> Self {
        Self {
            year:  Year::new_const(year),
            month: Month::new_const(month),
            day:   Day::new_const(day, year, month),
        }
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Days since 1970-01-01.
    pub const fn to_days(&self) -> i64 {
        days_from_civil(self.year(), self.month(), self.day())
    }

    /// Date `days` days after 1970-01-01, if it falls in `1..=MAX_YEAR`.
    pub fn from_days(days: i64) -> Option<Self> {
        let (year, month, day) = civil_from_days(days)?;
        Self::new(year, month, day).ok()
    }

    /// Months since January of year 0, used for month arithmetic.
    pub const fn month_index(&self) -> i64 {
        self.year() as i64 * consts::MONTHS_PER_YEAR + (self.month() as i64 - 1)
    }

    /// First day of this date's month.
    pub const fn month_start(&self) -> Self {
        Self {
            year:  self.year,
            month: self.month,
            day:   Day::new_const(MIN_DAY, self.year(), self.month()),
        }
    }

    /// Last day of this date's month.
    pub const fn month_end(&self) -> Self {
        let last = days_in_month(self.year(), self.month());
        Self {
            year:  self.year,
            month: self.month,
            day:   Day::new_const(last, self.year(), self.month()),
        }
    }

    /// The calendar day before this one.
    pub fn previous_day(&self) -> Option<Self> {
        Self::from_days(self.to_days() - 1)
    }

    /// First day of the month before this one.
    pub fn previous_month(&self) -> Option<Self> {
        let (year, month) = if self.month() == JANUARY {
            (self.year().checked_sub(1)?, DECEMBER)
        } else {
            (self.year(), self.month() - 1)
        };
        Self::new(year, month, MIN_DAY).ok()
    }

    /// Writes the date as `YYYY-MM`, dropping the day.
    pub fn to_month_string(&self) -> String {
        format!("{}-{}", self.year, self.month)
    }

    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

/// `true` when every byte is an ASCII digit and the widths match, e.g. `[4, 2, 2]`.
pub(crate) fn has_digit_shape(s: &str, widths: &[usize]) -> bool {
    let parts: Vec<&str> = s.split(DATE_SEPARATOR).collect();
    parts.len() == widths.len()
        && parts
            .iter()
            .zip(widths)
            .all(|(part, &width)| part.len() == width && part.bytes().all(|b| b.is_ascii_digit()))
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Accepts strictly `YYYY-MM-DD` with zero-padded components.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        if !has_digit_shape(s, &[4, 2, 2]) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }

        let parts: Vec<&str> = s.split(DATE_SEPARATOR).collect();
        let year = Self::parse_u16(parts[0])?;
        let month = Self::parse_u8(parts[1])?;
        let day = Self::parse_u8(parts[2])?;

        Self::new(year, month, day)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_parse_iso_date() {
        let parsed = "2025-03-15".parse::<CalendarDate>().unwrap();
        assert_eq!(parsed, date(2025, 3, 15));
        assert_eq!(parsed.year(), 2025);
        assert_eq!(parsed.month(), 3);
        assert_eq!(parsed.day(), 15);
    }

    #[test]
    fn test_parse_rejects_loose_shapes() {
        struct TestCase {
            input:       &'static str,
            description: &'static str,
        }

        let cases = [
            TestCase { input: "2025-3-15", description: "unpadded month" },
            TestCase { input: "2025-03-5", description: "unpadded day" },
            TestCase { input: "2025-03", description: "month only" },
            TestCase { input: " 2025-03-15", description: "leading whitespace" },
            TestCase { input: "2025/03/15", description: "wrong separator" },
            TestCase { input: "2025-03-15-01", description: "extra component" },
            TestCase { input: "+202-03-15", description: "sign in year" },
        ];

        for case in &cases {
            assert!(
                matches!(case.input.parse::<CalendarDate>(), Err(ParseError::InvalidFormat(_))),
                "Expected InvalidFormat for: {}",
                case.description
            );
        }
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!("".parse::<CalendarDate>(), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_parse_impossible_dates() {
        assert!(matches!("2025-02-29".parse::<CalendarDate>(), Err(ParseError::InvalidDay { .. })));
        assert!(matches!("2025-13-01".parse::<CalendarDate>(), Err(ParseError::InvalidMonth(13))));
        assert!(matches!("0000-01-01".parse::<CalendarDate>(), Err(ParseError::InvalidYear(0))));
        assert!("2024-02-29".parse::<CalendarDate>().is_ok());
    }

    #[test]
    fn test_display_is_zero_padded_iso() {
        assert_eq!(date(2025, 3, 1).to_string(), "2025-03-01");
        assert_eq!(date(2024, 12, 31).to_month_string(), "2024-12");
    }

    #[test]
    fn test_ordering_is_calendar_order() {
        assert!(date(2024, 12, 31) < date(2025, 1, 1));
        assert!(date(2025, 2, 28) < date(2025, 3, 1));
        assert!(date(2025, 10, 1) > date(2025, 9, 30));
    }

    #[test]
    fn test_month_start_and_end() {
        assert_eq!(date(2025, 3, 15).month_start(), date(2025, 3, 1));
        assert_eq!(date(2025, 5, 20).month_end(), date(2025, 5, 31));
        assert_eq!(date(2024, 2, 10).month_end(), date(2024, 2, 29));
        assert_eq!(date(2025, 2, 10).month_end(), date(2025, 2, 28));
        assert_eq!(date(2025, 4, 30).month_end(), date(2025, 4, 30));
    }

    #[test]
    fn test_previous_day_crosses_boundaries() {
        assert_eq!(date(2025, 3, 1).previous_day(), Some(date(2025, 2, 28)));
        assert_eq!(date(2024, 3, 1).previous_day(), Some(date(2024, 2, 29)));
        assert_eq!(date(2025, 1, 1).previous_day(), Some(date(2024, 12, 31)));
        assert_eq!(date(1, 1, 1).previous_day(), None);
    }

    #[test]
    fn test_previous_month() {
        assert_eq!(date(2025, 3, 1).previous_month(), Some(date(2025, 2, 1)));
        assert_eq!(date(2025, 1, 31).previous_month(), Some(date(2024, 12, 1)));
        assert_eq!(date(1, 1, 1).previous_month(), None);
    }

    #[test]
    fn test_days_round_trip() {
        let d = date(2025, 5, 31);
        assert_eq!(CalendarDate::from_days(d.to_days()), Some(d));
        assert_eq!(CalendarDate::from_days(i64::MAX), None);
        assert_eq!(date(2025, 5, 31).to_days() - date(2025, 3, 1).to_days(), 91);
    }

    #[test]
    fn test_constants() {
        assert_eq!(MIN_DATE.to_string(), "2024-01-01");
        assert_eq!(MAX_DATE.to_string(), "2025-05-31");
    }

    #[test]
    fn test_serde_string_format() {
        let d = date(2025, 3, 1);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"2025-03-01\"");
        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, d);
        assert!(serde_json::from_str::<CalendarDate>("\"2025-02-30\"").is_err());
    }

    #[test]
    fn test_digit_shape() {
        assert!(has_digit_shape("2025-03", &[4, 2]));
        assert!(!has_digit_shape("2025-03", &[4, 2, 2]));
        assert!(!has_digit_shape("2025-0a", &[4, 2]));
        assert!(!has_digit_shape("", &[4, 2]));
    }
}
