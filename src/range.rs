use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, Granularity, ParseError, RANGE_SEPARATOR, format_for_display, prelude::*};

/// A validated period between two calendar dates (inclusive).
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: CalendarDate,
    end:   CalendarDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// Error parsing date component.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// `true` if this range finishes strictly before `other` begins.
    pub fn ends_before(&self, other: &Self) -> bool {
        self.end < other.start
    }

    /// Inclusive length in units of `granularity`. See [`length_of`].
    pub fn length_in(&self, granularity: Granularity) -> i64 {
        length_of(&self.start, &self.end, granularity)
    }

    /// Both ends in display form.
    pub fn format_for(&self, granularity: Granularity) -> (String, String) {
        (self.start.format_for(granularity), self.end.format_for(granularity))
    }
}

/// Inclusive length of `start..=end`: calendar months in month granularity,
/// calendar days otherwise (week granularity also counts days).
pub fn length_of(start: &CalendarDate, end: &CalendarDate, granularity: Granularity) -> i64 {
    if granularity.is_month() {
        end.month_index() - start.month_index() + 1
    } else {
        end.to_days() - start.to_days() + 1
    }
}

/// Checks that `end` does not precede `start`, both given in display form.
/// Vacuously true when either side is empty or not a date of this granularity;
/// the bounds check reports those.
pub fn is_range_valid(start: &str, end: &str, granularity: Granularity) -> bool {
    match (
        CalendarDate::parse_for(start, granularity),
        CalendarDate::parse_for(end, granularity),
    ) {
        (Ok(start), Ok(end)) => end >= start,
        _ => true,
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((start, end)) = trimmed.split_once(RANGE_SEPARATOR) else {
            return Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            )));
        };
        if end.contains(RANGE_SEPARATOR) {
            return Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {}",
                trimmed.matches(RANGE_SEPARATOR).count()
            )));
        }

        let start = start.trim().parse::<CalendarDate>()?;
        let end = end.trim().parse::<CalendarDate>()?;
        Self::new(start, end)
    }
}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One period as the user entered it: stored-form date strings, possibly
/// empty or malformed. An empty string means the input is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodInput {
    pub start: String,
    pub end:   String,
}

impl PeriodInput {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end:   end.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }

    /// The typed range, when both ends parse in `granularity` and are ordered.
    pub fn to_range(&self, granularity: Granularity) -> Option<DateRange> {
        let parse = |stored: &str| {
            CalendarDate::parse_for(&format_for_display(stored, granularity), granularity).ok()
        };
        DateRange::new(parse(self.start.as_str())?, parse(self.end.as_str())?).ok()
    }
}

impl From<DateRange> for PeriodInput {
    fn from(range: DateRange) -> Self {
        Self::new(range.start.to_string(), range.end.to_string())
    }
}
