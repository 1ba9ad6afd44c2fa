//! Query parameters for the statistics endpoints, built only from dates that
//! passed validation.

use serde::Serialize;
use tracing::debug;

use crate::{CalendarBounds, ComparisonConfiguration, DateRange, FieldKey, Granularity, PeriodInput, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Blocking validation errors are present.
    #[error("Date filter has errors: {0}")]
    Invalid(ValidationErrors),
    /// A date needed for the request is not filled in.
    #[error("Date is not set: {0}")]
    Missing(FieldKey),
}

/// Parameters of one statistics request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsQuery {
    pub granularity: Granularity,
    pub primary:     DateRange,
    /// `None` when comparison is switched off.
    pub secondary:   Option<DateRange>,
    pub product_id:  Option<u64>,
    pub category_id: Option<u64>,
    pub source:      Option<String>,
}

impl StatsQuery {
    /// Validates `config` and captures its periods.
    ///
    /// # Errors
    /// Returns `QueryError::Invalid` while any blocking error exists and
    /// `QueryError::Missing` if a required date is empty.
    pub fn from_configuration(config: &ComparisonConfiguration, bounds: &CalendarBounds) -> Result<Self, QueryError> {
        let report = config.validate(bounds);
        if report.is_blocking() {
            debug!(errors = %report.errors, "refusing to build stats query");
            return Err(QueryError::Invalid(report.errors));
        }

        let granularity = config.granularity;
        let primary = captured(&config.primary, granularity, FieldKey::Period1Start, FieldKey::Period1End)?;
        let secondary = if config.comparison_enabled {
            Some(captured(&config.secondary, granularity, FieldKey::Period2Start, FieldKey::Period2End)?)
        } else {
            None
        };

        Ok(Self {
            granularity,
            primary,
            secondary,
            product_id: None,
            category_id: None,
            source: None,
        })
    }

    #[must_use]
    pub fn with_product(mut self, product_id: u64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category_id: u64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// An empty source means all sources.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let source = source.into();
        self.source = (!source.is_empty()).then_some(source);
        self
    }

    /// Query pairs in request order. Dates use the display form of the
    /// granularity (`YYYY-MM` for month). `aggregation_type` is sent only to
    /// endpoints that aggregate.
    pub fn to_pairs(&self, with_aggregation: bool) -> Vec<(&'static str, String)> {
        let g = self.granularity;
        let mut pairs = Vec::with_capacity(8);

        if let Some(product_id) = self.product_id {
            pairs.push(("product_id", product_id.to_string()));
        }
        pairs.push(("start_date", self.primary.start().format_for(g)));
        pairs.push(("end_date", self.primary.end().format_for(g)));
        if let Some(secondary) = &self.secondary {
            pairs.push(("start_date2", secondary.start().format_for(g)));
            pairs.push(("end_date2", secondary.end().format_for(g)));
        }
        if with_aggregation {
            pairs.push(("aggregation_type", g.to_string()));
        }
        if let Some(category_id) = self.category_id {
            pairs.push(("category_id", category_id.to_string()));
        }
        if let Some(source) = &self.source {
            pairs.push(("source", source.clone()));
        }
        pairs
    }
}

fn captured(
    period: &PeriodInput,
    granularity: Granularity,
    start_key: FieldKey,
    end_key: FieldKey,
) -> Result<DateRange, QueryError> {
    if period.start.is_empty() {
        return Err(QueryError::Missing(start_key));
    }
    if period.end.is_empty() {
        return Err(QueryError::Missing(end_key));
    }
    period.to_range(granularity).ok_or(QueryError::Missing(start_key))
}
