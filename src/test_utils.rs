use crate::{CalendarDate, ComparisonConfiguration, Granularity, PeriodInput};

pub fn date(year: u16, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day).expect("test date must be valid")
}

pub fn period(start: &str, end: &str) -> PeriodInput {
    PeriodInput::new(start, end)
}

pub fn configuration(
    primary: (&str, &str),
    secondary: (&str, &str),
    granularity: Granularity,
) -> ComparisonConfiguration {
    ComparisonConfiguration {
        primary: period(primary.0, primary.1),
        secondary: period(secondary.0, secondary.1),
        granularity,
        comparison_enabled: true,
        saved_secondary: None,
    }
}
