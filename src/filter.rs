use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    CalendarBounds, DEFAULT_PRIMARY_END, DEFAULT_PRIMARY_START, DEFAULT_SECONDARY_END, DEFAULT_SECONDARY_START,
    FieldLimits, Granularity, InputLimits, PeriodInput, ValidationReport, format_for_display, input_limits, parse_from_display,
    reconcile_to_month, triggers_month_reconcile, validate,
};

/// One of the four date inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateField {
    Period1Start,
    Period1End,
    Period2Start,
    Period2End,
}

/// State of the date filter: two periods, the granularity, and whether the
/// comparison period takes part. Owned by the page or chart editor that shows
/// the filter; every edit goes through the setters below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonConfiguration {
    pub primary:            PeriodInput,
    pub secondary:          PeriodInput,
    pub granularity:        Granularity,
    pub comparison_enabled: bool,
    /// Comparison period put aside while comparison is switched off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_secondary:    Option<PeriodInput>,
}

impl Default for ComparisonConfiguration {
    fn default() -> Self {
        Self {
            primary:            PeriodInput::new(DEFAULT_PRIMARY_START, DEFAULT_PRIMARY_END),
            secondary:          default_secondary(),
            granularity:        Granularity::default(),
            comparison_enabled: true,
            saved_secondary:    None,
        }
    }
}

fn default_secondary() -> PeriodInput {
    PeriodInput::new(DEFAULT_SECONDARY_START, DEFAULT_SECONDARY_END)
}

impl ComparisonConfiguration {
    fn slot_mut(&mut self, field: DateField) -> &mut String {
        match field {
            DateField::Period1Start => &mut self.primary.start,
            DateField::Period1End => &mut self.primary.end,
            DateField::Period2Start => &mut self.secondary.start,
            DateField::Period2End => &mut self.secondary.end,
        }
    }

    fn slot(&self, field: DateField) -> &str {
        match field {
            DateField::Period1Start => &self.primary.start,
            DateField::Period1End => &self.primary.end,
            DateField::Period2Start => &self.secondary.start,
            DateField::Period2End => &self.secondary.end,
        }
    }

    /// Value to show in `field`'s input for the active granularity.
    pub fn display_value(&self, field: DateField) -> String {
        format_for_display(self.slot(field), self.granularity)
    }

    /// Stores what the user typed into `field` (display form).
    pub fn set_input(&mut self, field: DateField, input: &str) {
        let stored = parse_from_display(input, self.granularity);
        *self.slot_mut(field) = stored;
    }

    /// Switches granularity. Moving from day or week into month snaps every
    /// period, including one put aside by the comparison toggle, to whole
    /// months. Returns whether dates were rewritten.
    pub fn set_granularity(&mut self, granularity: Granularity) -> bool {
        let previous = std::mem::replace(&mut self.granularity, granularity);
        if !triggers_month_reconcile(previous, granularity) {
            return false;
        }

        debug!(from = %previous, to = %granularity, "aligning periods to months");
        let mut changed = reconcile_to_month(&mut self.primary);
        changed |= reconcile_to_month(&mut self.secondary);
        if let Some(saved) = self.saved_secondary.as_mut() {
            changed |= reconcile_to_month(saved);
        }
        changed
    }

    /// Turns the comparison period on or off. Switching off keeps the current
    /// comparison period aside and clears it; switching on restores it, or the
    /// default comparison period if none was kept.
    pub fn set_comparison_enabled(&mut self, enabled: bool) {
        if enabled == self.comparison_enabled {
            return;
        }
        self.comparison_enabled = enabled;

        if enabled {
            self.secondary = self.saved_secondary.take().unwrap_or_else(default_secondary);
        } else {
            self.saved_secondary = Some(std::mem::take(&mut self.secondary));
        }
        debug!(enabled, "comparison toggled");
    }

    pub fn validate(&self, bounds: &CalendarBounds) -> ValidationReport {
        validate(self, bounds)
    }

    /// Min/max for each input. Without comparison the comparison inputs are
    /// limited only by the calendar bounds.
    pub fn input_limits(&self, bounds: &CalendarBounds) -> InputLimits {
        if self.comparison_enabled {
            return input_limits(&self.primary, &self.secondary, self.granularity, bounds);
        }

        let mut limits = input_limits(&self.primary, &PeriodInput::default(), self.granularity, bounds);
        let open = FieldLimits {
            min: bounds.min_for(self.granularity),
            max: bounds.max_for(self.granularity),
        };
        limits.period2_start = open.clone();
        limits.period2_end = open;
        limits
    }
}
