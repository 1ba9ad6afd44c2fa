use tracing::debug;

use crate::{Granularity, PeriodInput, parse_stored};

/// First day of the month of a stored date, or `None` if it does not parse.
pub fn round_to_month_start(stored: &str) -> Option<String> {
    parse_stored(stored).map(|date| date.month_start().to_string())
}

/// Last day of the month of a stored date, or `None` if it does not parse.
pub fn round_to_month_end(stored: &str) -> Option<String> {
    parse_stored(stored).map(|date| date.month_end().to_string())
}

/// Only a switch from day or week into month snaps the dates.
pub const fn triggers_month_reconcile(from: Granularity, to: Granularity) -> bool {
    matches!(
        (from, to),
        (Granularity::Day | Granularity::Week, Granularity::Month)
    )
}

/// Snaps a period to whole months: start to the 1st of its own month, end to
/// the last day of its own month. Values that do not parse are left alone.
/// Returns whether anything changed.
pub fn reconcile_to_month(period: &mut PeriodInput) -> bool {
    let start = round_to_month_start(&period.start);
    let end = round_to_month_end(&period.end);
    let mut changed = false;

    if let Some(start) = start.filter(|s| *s != period.start) {
        debug!(from = %period.start, to = %start, "snapped period start to month start");
        period.start = start;
        changed = true;
    }
    if let Some(end) = end.filter(|e| *e != period.end) {
        debug!(from = %period.end, to = %end, "snapped period end to month end");
        period.end = end;
        changed = true;
    }
    changed
}
