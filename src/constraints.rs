//! Cross-period ordering and the min/max each date input may take.
//!
//! All strings here are display-form values of the active granularity.

use serde::Serialize;

use crate::{CalendarBounds, CalendarDate, Granularity, PeriodInput, format_for_display};

/// Checks that the comparison period ends strictly before the primary one
/// starts. Vacuously true when either value is empty or unparsable.
pub fn is_period2_before_period1(primary_start: &str, secondary_end: &str, granularity: Granularity) -> bool {
    match (
        CalendarDate::parse_for(primary_start, granularity),
        CalendarDate::parse_for(secondary_end, granularity),
    ) {
        (Ok(primary_start), Ok(secondary_end)) => secondary_end < primary_start,
        _ => true,
    }
}

/// Latest value the comparison period may end on: one unit before the primary
/// start (previous day, or previous month in month granularity), kept inside
/// the bounds. Without a primary start this is the upper bound itself.
///
/// When the primary period starts on the lower bound no earlier value exists;
/// the result is then the lower bound, and validation reports the order error.
pub fn max_for_period2_end(primary_start: &str, granularity: Granularity, bounds: &CalendarBounds) -> String {
    let Ok(start) = CalendarDate::parse_for(primary_start, granularity) else {
        return bounds.max_for(granularity);
    };
    let before = if granularity.is_month() {
        start.previous_month()
    } else {
        start.previous_day()
    };
    before.map_or_else(
        || bounds.min_for(granularity),
        |date| date.min(bounds.max).max(bounds.min).format_for(granularity),
    )
}

/// Allowed range of one input, in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldLimits {
    pub min: String,
    pub max: String,
}

/// Limits for all four date inputs, derived from the other three values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputLimits {
    pub period1_start: FieldLimits,
    pub period1_end:   FieldLimits,
    pub period2_start: FieldLimits,
    pub period2_end:   FieldLimits,
}

/// Derives [`InputLimits`] from stored-form periods so that an inverted or
/// overlapping combination cannot be picked. A value that does not parse in
/// the active granularity counts as unset.
pub fn input_limits(
    primary: &PeriodInput,
    secondary: &PeriodInput,
    granularity: Granularity,
    bounds: &CalendarBounds,
) -> InputLimits {
    let shown = |stored: &str| {
        let display = format_for_display(stored, granularity);
        CalendarDate::parse_for(&display, granularity).ok().map(|_| display)
    };
    let min = bounds.min_for(granularity);
    let max = bounds.max_for(granularity);

    let primary_start = shown(&primary.start);
    let period2_end_max = max_for_period2_end(primary_start.as_deref().unwrap_or_default(), granularity, bounds);

    InputLimits {
        period1_start: FieldLimits {
            min: min.clone(),
            max: shown(&primary.end).unwrap_or_else(|| max.clone()),
        },
        period1_end:   FieldLimits {
            min: primary_start.unwrap_or_else(|| min.clone()),
            max,
        },
        period2_start: FieldLimits {
            min: min.clone(),
            max: shown(&secondary.end).unwrap_or_else(|| period2_end_max.clone()),
        },
        period2_end:   FieldLimits {
            min: shown(&secondary.start).unwrap_or(min),
            max: period2_end_max,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::period;

    #[test]
    fn test_period2_before_period1_cases() {
        struct TestCase {
            primary_start: &'static str,
            secondary_end: &'static str,
            granularity:   Granularity,
            expected:      bool,
            description:   &'static str,
        }

        let cases = [
            TestCase {
                primary_start: "2025-03-01",
                secondary_end: "2025-02-28",
                granularity:   Granularity::Day,
                expected:      true,
                description:   "ends the day before",
            },
            TestCase {
                primary_start: "2025-03-01",
                secondary_end: "2025-03-01",
                granularity:   Granularity::Day,
                expected:      false,
                description:   "same day is not strictly before",
            },
            TestCase {
                primary_start: "2025-03-01",
                secondary_end: "2025-04-15",
                granularity:   Granularity::Week,
                expected:      false,
                description:   "ends after",
            },
            TestCase {
                primary_start: "2025-03",
                secondary_end: "2025-03",
                granularity:   Granularity::Month,
                expected:      false,
                description:   "same month",
            },
            TestCase {
                primary_start: "2025-03",
                secondary_end: "2025-02",
                granularity:   Granularity::Month,
                expected:      true,
                description:   "previous month",
            },
            TestCase {
                primary_start: "",
                secondary_end: "2025-02-28",
                granularity:   Granularity::Day,
                expected:      true,
                description:   "unset primary start",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_period2_before_period1(case.primary_start, case.secondary_end, case.granularity),
                case.expected,
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_max_for_period2_end_is_one_unit_before() {
        let bounds = CalendarBounds::default();
        assert_eq!(max_for_period2_end("2025-03-01", Granularity::Day, &bounds), "2025-02-28");
        assert_eq!(max_for_period2_end("2024-03-01", Granularity::Week, &bounds), "2024-02-29");
        assert_eq!(max_for_period2_end("2025-01-01", Granularity::Day, &bounds), "2024-12-31");
        assert_eq!(max_for_period2_end("2025-03", Granularity::Month, &bounds), "2025-02");
        assert_eq!(max_for_period2_end("2025-01", Granularity::Month, &bounds), "2024-12");
    }

    #[test]
    fn test_max_for_period2_end_never_below_lower_bound() {
        let bounds = CalendarBounds::default();
        assert_eq!(max_for_period2_end("2024-01-01", Granularity::Day, &bounds), "2024-01-01");
        assert_eq!(max_for_period2_end("2024-01", Granularity::Month, &bounds), "2024-01");
        assert_eq!(max_for_period2_end("2023-06-01", Granularity::Week, &bounds), "2024-01-01");

        let limits = input_limits(
            &period("2024-01-01", "2024-03-31"),
            &PeriodInput::default(),
            Granularity::Day,
            &bounds,
        );
        assert!(limits.period2_end.min <= limits.period2_end.max);
        assert!(limits.period2_start.min <= limits.period2_start.max);
    }

    #[test]
    fn test_max_for_period2_end_clips_to_upper_bound() {
        let bounds = CalendarBounds::default();
        assert_eq!(max_for_period2_end("", Granularity::Day, &bounds), "2025-05-31");
        assert_eq!(max_for_period2_end("", Granularity::Month, &bounds), "2025-05");
        assert_eq!(max_for_period2_end("2025-08-01", Granularity::Day, &bounds), "2025-05-31");
        assert_eq!(max_for_period2_end("2025-08", Granularity::Month, &bounds), "2025-05");
        assert_eq!(max_for_period2_end("garbage", Granularity::Day, &bounds), "2025-05-31");
    }

    #[test]
    fn test_input_limits_with_all_values_set() {
        let limits = input_limits(
            &period("2025-03-01", "2025-05-31"),
            &period("2024-12-01", "2025-02-28"),
            Granularity::Day,
            &CalendarBounds::default(),
        );

        assert_eq!(limits.period1_start.min, "2024-01-01");
        assert_eq!(limits.period1_start.max, "2025-05-31");
        assert_eq!(limits.period1_end.min, "2025-03-01");
        assert_eq!(limits.period1_end.max, "2025-05-31");
        assert_eq!(limits.period2_start.min, "2024-01-01");
        assert_eq!(limits.period2_start.max, "2025-02-28");
        assert_eq!(limits.period2_end.min, "2024-12-01");
        assert_eq!(limits.period2_end.max, "2025-02-28");
    }

    #[test]
    fn test_input_limits_fall_back_when_unset() {
        let limits = input_limits(
            &period("2025-04-10", ""),
            &period("", ""),
            Granularity::Day,
            &CalendarBounds::default(),
        );

        assert_eq!(limits.period1_start.max, "2025-05-31");
        assert_eq!(limits.period1_end.min, "2025-04-10");
        assert_eq!(limits.period2_start.max, "2025-04-09");
        assert_eq!(limits.period2_end.min, "2024-01-01");
        assert_eq!(limits.period2_end.max, "2025-04-09");
    }

    #[test]
    fn test_input_limits_in_month_granularity() {
        let limits = input_limits(
            &period("2025-03-15", "2025-05-20"),
            &period("2024-12-01", ""),
            Granularity::Month,
            &CalendarBounds::default(),
        );

        assert_eq!(limits.period1_start.min, "2024-01");
        assert_eq!(limits.period1_start.max, "2025-05");
        assert_eq!(limits.period1_end.min, "2025-03");
        assert_eq!(limits.period2_start.max, "2025-02");
        assert_eq!(limits.period2_end.min, "2024-12");
        assert_eq!(limits.period2_end.max, "2025-02");
    }

    #[test]
    fn test_input_limits_ignore_malformed_values() {
        let limits = input_limits(
            &period("2025-3-1", "2025-05-31"),
            &period("", ""),
            Granularity::Day,
            &CalendarBounds::default(),
        );

        assert_eq!(limits.period1_end.min, "2024-01-01");
        assert_eq!(limits.period2_end.max, "2025-05-31");
    }

    #[test]
    fn test_input_limits_serialize_camel_case() {
        let limits = input_limits(
            &period("", ""),
            &period("", ""),
            Granularity::Month,
            &CalendarBounds::default(),
        );
        let json = serde_json::to_value(&limits).unwrap();
        assert_eq!(json["period2End"]["max"], "2025-05");
        assert_eq!(json["period1Start"]["min"], "2024-01");
    }
}
