use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};
use tracing::{debug, trace};

use crate::{
    CalendarBounds, ComparisonConfiguration, Granularity, PeriodInput, format_for_display, is_period2_before_period1,
    is_range_valid, parse_stored, prelude::*,
};

/// Key of one entry in [`ValidationErrors`], named after the input or pair of
/// inputs the message is shown next to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    #[display(fmt = "period1Start")]
    Period1Start,
    #[display(fmt = "period1End")]
    Period1End,
    #[display(fmt = "period1Range")]
    Period1Range,
    #[display(fmt = "period2Start")]
    Period2Start,
    #[display(fmt = "period2End")]
    Period2End,
    #[display(fmt = "period2Range")]
    Period2Range,
    #[display(fmt = "period2BeforePeriod1")]
    Period2BeforePeriod1,
}

/// A blocking validation failure. The `Display` text is the message shown to
/// the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ValidationIssue {
    /// Outside the calendar bounds or malformed for the active granularity.
    #[error("Дата выходит за пределы доступного периода")]
    OutOfBounds,
    /// End precedes start within one period.
    #[error("Конечная дата не может быть раньше начальной")]
    InvertedRange,
    /// Comparison period does not end before the primary period starts.
    #[error("Второй период должен быть раньше первого")]
    PeriodOrderViolation,
}

/// Non-blocking notice; never disables saving or fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Advisory {
    #[error("Периоды имеют разную длительность")]
    LengthMismatch { primary: i64, secondary: i64 },
}

/// Field-keyed blocking failures. An absent key means that check passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldKey, ValidationIssue>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: FieldKey) -> Option<ValidationIssue> {
        self.0.get(&key).copied()
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.0.contains_key(&key)
    }

    /// User-facing message for `key`, if that check failed.
    pub fn message(&self, key: FieldKey) -> Option<String> {
        self.get(key).map(|issue| issue.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, ValidationIssue)> + '_ {
        self.0.iter().map(|(key, issue)| (*key, *issue))
    }

    pub(crate) fn insert(&mut self, key: FieldKey, issue: ValidationIssue) {
        self.0.insert(key, issue);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, issue)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{key}: {issue}")?;
        }
        Ok(())
    }
}

/// Serializes as `{ "<fieldKey>": "<message>" }`, the shape the form renders.
impl Serialize for ValidationErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, issue) in &self.0 {
            map.serialize_entry(key, &issue.to_string())?;
        }
        map.end()
    }
}

/// Outcome of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors:   ValidationErrors,
    pub advisory: Option<Advisory>,
}

impl ValidationReport {
    /// Whether fetch and save actions must stay disabled. The advisory never blocks.
    pub fn is_blocking(&self) -> bool {
        !self.errors.is_empty()
    }
}

struct PeriodKeys {
    start: FieldKey,
    end:   FieldKey,
    range: FieldKey,
}

const PERIOD1_KEYS: PeriodKeys = PeriodKeys {
    start: FieldKey::Period1Start,
    end:   FieldKey::Period1End,
    range: FieldKey::Period1Range,
};

const PERIOD2_KEYS: PeriodKeys = PeriodKeys {
    start: FieldKey::Period2Start,
    end:   FieldKey::Period2End,
    range: FieldKey::Period2Range,
};

/// Recomputes every check from scratch. Pure; safe to run on every keystroke.
pub fn validate(config: &ComparisonConfiguration, bounds: &CalendarBounds) -> ValidationReport {
    let granularity = config.granularity;
    let mut errors = ValidationErrors::default();

    check_period(&mut errors, &config.primary, granularity, bounds, &PERIOD1_KEYS);

    let mut advisory = None;
    if config.comparison_enabled {
        check_period(&mut errors, &config.secondary, granularity, bounds, &PERIOD2_KEYS);

        if stored_in_bounds(&config.primary.start, granularity, bounds)
            && stored_in_bounds(&config.secondary.end, granularity, bounds)
            && !is_period2_before_period1(
                &format_for_display(&config.primary.start, granularity),
                &format_for_display(&config.secondary.end, granularity),
                granularity,
            )
        {
            errors.insert(FieldKey::Period2BeforePeriod1, ValidationIssue::PeriodOrderViolation);
        }

        if errors.is_empty() {
            advisory = length_advisory(config);
        }
    }

    if errors.is_empty() {
        trace!(%granularity, comparison = config.comparison_enabled, "dates valid");
    } else {
        debug!(%granularity, %errors, "dates invalid");
    }

    ValidationReport { errors, advisory }
}

/// A stored value must be a real date before its display form is bounds-checked;
/// month mode shows only the `YYYY-MM` prefix.
fn stored_in_bounds(stored: &str, granularity: Granularity, bounds: &CalendarBounds) -> bool {
    parse_stored(stored).is_some() && bounds.is_in_bounds(&format_for_display(stored, granularity), granularity)
}

fn check_period(
    errors: &mut ValidationErrors,
    period: &PeriodInput,
    granularity: Granularity,
    bounds: &CalendarBounds,
    keys: &PeriodKeys,
) {
    let start_ok = stored_in_bounds(&period.start, granularity, bounds);
    let end_ok = stored_in_bounds(&period.end, granularity, bounds);

    if !period.start.is_empty() && !start_ok {
        errors.insert(keys.start, ValidationIssue::OutOfBounds);
    }
    if !period.end.is_empty() && !end_ok {
        errors.insert(keys.end, ValidationIssue::OutOfBounds);
    }
    if start_ok
        && end_ok
        && !is_range_valid(
            &format_for_display(&period.start, granularity),
            &format_for_display(&period.end, granularity),
            granularity,
        )
    {
        errors.insert(keys.range, ValidationIssue::InvertedRange);
    }
}

fn length_advisory(config: &ComparisonConfiguration) -> Option<Advisory> {
    let granularity = config.granularity;
    let primary = config.primary.to_range(granularity)?.length_in(granularity);
    let secondary = config.secondary.to_range(granularity)?.length_in(granularity);
    (primary != secondary).then_some(Advisory::LengthMismatch { primary, secondary })
}
