use std::env;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{CalendarDate, Granularity, MAX_DATE, MAX_DATE_ENV, MIN_DATE, MIN_DATE_ENV, has_digit_shape};

/// The calendar window in which review data exists. No date input may leave it,
/// whatever the granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarBounds {
    pub min: CalendarDate,
    pub max: CalendarDate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundsError {
    #[error("Invalid calendar bounds: min ({min}) is after max ({max})")]
    Inverted { min: CalendarDate, max: CalendarDate },
}

impl Default for CalendarBounds {
    fn default() -> Self {
        Self {
            min: MIN_DATE,
            max: MAX_DATE,
        }
    }
}

impl CalendarBounds {
    /// # Errors
    /// Returns `BoundsError::Inverted` if `min > max`.
    pub fn new(min: CalendarDate, max: CalendarDate) -> Result<Self, BoundsError> {
        if min > max {
            return Err(BoundsError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Reads the bounds from `REVIEW_PERIOD_MIN_DATE` / `REVIEW_PERIOD_MAX_DATE`,
    /// keeping the built-in value for any variable that is unset or unparsable.
    ///
    /// # Errors
    /// Returns `BoundsError::Inverted` if the resulting window is empty.
    pub fn from_env() -> Result<Self, BoundsError> {
        Self::from_values(env::var(MIN_DATE_ENV).ok(), env::var(MAX_DATE_ENV).ok())
    }

    fn from_values(min: Option<String>, max: Option<String>) -> Result<Self, BoundsError> {
        let min = date_or_default(MIN_DATE_ENV, min, MIN_DATE);
        let max = date_or_default(MAX_DATE_ENV, max, MAX_DATE);
        Self::new(min, max)
    }

    #[inline]
    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.min <= *date && *date <= self.max
    }

    /// Checks a display-form input: it must have the granularity's shape
    /// (`YYYY-MM` or `YYYY-MM-DD`), name a real date, and lie inside the window.
    /// A month input is accepted if any day of it lies inside the window.
    pub fn is_in_bounds(&self, input: &str, granularity: Granularity) -> bool {
        if !has_digit_shape(input, granularity.display_shape()) {
            return false;
        }
        let min = if granularity.is_month() {
            self.min.month_start()
        } else {
            self.min
        };
        CalendarDate::parse_for(input, granularity).is_ok_and(|date| min <= date && date <= self.max)
    }

    /// Lowest value the date inputs accept, in display form.
    pub fn min_for(&self, granularity: Granularity) -> String {
        self.min.format_for(granularity)
    }

    /// Highest value the date inputs accept, in display form.
    pub fn max_for(&self, granularity: Granularity) -> String {
        self.max.format_for(granularity)
    }

    /// Hint rendered under the date inputs.
    pub fn info_text(&self, granularity: Granularity) -> String {
        let text = format!(
            "Доступный период: {} – {}",
            dotted(&self.min),
            dotted(&self.max)
        );
        if granularity.is_month() {
            format!("{text} (выбор по месяцам)")
        } else {
            text
        }
    }
}

/// Checks a display-form input against the default window.
pub fn is_in_bounds(input: &str, granularity: Granularity) -> bool {
    CalendarBounds::default().is_in_bounds(input, granularity)
}

fn dotted(date: &CalendarDate) -> String {
    format!("{:02}.{:02}.{:04}", date.day(), date.month(), date.year())
}

fn date_or_default(key: &str, raw: Option<String>, default: CalendarDate) -> CalendarDate {
    let Some(raw) = raw else {
        info!("{key} not set, using default: {default}");
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
