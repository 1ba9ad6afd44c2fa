//! Saved chart configurations and the dashboard pages that hold them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    CalendarBounds, ComparisonConfiguration, DateField, Granularity, PeriodInput, QueryError, StatsQuery,
};

/// Kind of chart a dashboard page can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartType {
    #[default]
    #[serde(rename = "product_stats")]
    ProductStats,
    #[serde(rename = "monthly-review-count")]
    MonthlyReviewCount,
    #[serde(rename = "regional-bar-chart")]
    RegionalBarChart,
    #[serde(rename = "change-chart")]
    ChangeChart,
}

impl ChartType {
    pub const ALL: [Self; 4] = [
        Self::ProductStats,
        Self::MonthlyReviewCount,
        Self::RegionalBarChart,
        Self::ChangeChart,
    ];

    /// Name a new chart of this type is saved under.
    pub const fn title(self) -> &'static str {
        match self {
            Self::ProductStats => "Статистика продуктов",
            Self::MonthlyReviewCount => "Тональность отзывов",
            Self::RegionalBarChart => "Динамика отзывов",
            Self::ChangeChart => "Общая статистика",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::ProductStats => "Таблица с аналитикой продуктов",
            Self::MonthlyReviewCount => "График тональности отзывов по периодам",
            Self::RegionalBarChart => "График динамики количества отзывов",
            Self::ChangeChart => "Круговая диаграмма общей статистики",
        }
    }

    /// Charts that plot a time series take an aggregation granularity; the
    /// rest only pick how dates are entered (the date mode).
    pub const fn supports_aggregation(self) -> bool {
        matches!(self, Self::MonthlyReviewCount | Self::RegionalBarChart)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    #[error("Выберите продукт")]
    MissingProduct,
    #[error("Исправьте ошибки в настройках дат")]
    Dates(#[from] QueryError),
}

/// A node of the product tree, as far as a chart needs it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductRef {
    pub id:   u64,
    pub name: String,
}

/// Stored attributes of a chart. The comparison dates are absent when the
/// chart was saved with comparison switched off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartAttributes {
    pub date_start_1:     String,
    pub date_end_1:       String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_start_2:     Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_end_2:       Option<String>,
    pub product_id:       u64,
    pub product_name:     String,
    #[serde(default)]
    pub source:           String,
    pub aggregation_type: Granularity,
    #[serde(default)]
    pub date_mode:        Option<Granularity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub id:         String,
    pub name:       String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub attributes: ChartAttributes,
}

/// Form state of the add/edit chart dialog. The date filter always runs in
/// the chart's effective granularity; changing the chart type, aggregation or
/// date mode re-applies it, snapping dates when that means entering month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDraft {
    editing_id:  Option<String>,
    chart_type:  ChartType,
    product:     Option<ProductRef>,
    source:      Option<String>,
    aggregation: Granularity,
    date_mode:   Granularity,
    dates:       ComparisonConfiguration,
}

impl Default for ChartDraft {
    fn default() -> Self {
        Self {
            editing_id:  None,
            chart_type:  ChartType::default(),
            product:     None,
            source:      None,
            aggregation: Granularity::Month,
            date_mode:   Granularity::Month,
            dates:       ComparisonConfiguration::default(),
        }
    }
}

impl ChartDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an existing chart for editing.
    pub fn from_config(config: &ChartConfig) -> Self {
        let attrs = &config.attributes;
        let secondary = match (&attrs.date_start_2, &attrs.date_end_2) {
            (Some(start), Some(end)) => Some(PeriodInput::new(start.clone(), end.clone())),
            _ => None,
        };

        let date_mode = attrs.date_mode.unwrap_or_default();
        let granularity = if config.chart_type.supports_aggregation() {
            attrs.aggregation_type
        } else {
            date_mode
        };

        Self {
            editing_id: Some(config.id.clone()),
            chart_type: config.chart_type,
            product: Some(ProductRef {
                id:   attrs.product_id,
                name: attrs.product_name.clone(),
            }),
            source: (!attrs.source.is_empty()).then(|| attrs.source.clone()),
            aggregation: attrs.aggregation_type,
            date_mode,
            dates: ComparisonConfiguration {
                primary: PeriodInput::new(attrs.date_start_1.clone(), attrs.date_end_1.clone()),
                comparison_enabled: secondary.is_some(),
                secondary: secondary.unwrap_or_default(),
                granularity,
                saved_secondary: None,
            },
        }
    }

    /// Granularity the date filter uses for this chart.
    pub const fn effective_granularity(&self) -> Granularity {
        if self.chart_type.supports_aggregation() {
            self.aggregation
        } else {
            self.date_mode
        }
    }

    pub const fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    pub const fn dates(&self) -> &ComparisonConfiguration {
        &self.dates
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        self.chart_type = chart_type;
        self.apply_granularity();
    }

    pub fn set_aggregation(&mut self, aggregation: Granularity) {
        self.aggregation = aggregation;
        self.apply_granularity();
    }

    pub fn set_date_mode(&mut self, date_mode: Granularity) {
        self.date_mode = date_mode;
        self.apply_granularity();
    }

    pub fn set_product(&mut self, product: Option<ProductRef>) {
        self.product = product;
    }

    pub fn set_source(&mut self, source: Option<String>) {
        self.source = source.filter(|s| !s.is_empty());
    }

    pub fn set_date_input(&mut self, field: DateField, input: &str) {
        self.dates.set_input(field, input);
    }

    pub fn set_comparison_enabled(&mut self, enabled: bool) {
        self.dates.set_comparison_enabled(enabled);
    }

    fn apply_granularity(&mut self) {
        let granularity = self.effective_granularity();
        if self.dates.set_granularity(granularity) {
            debug!(chart_type = ?self.chart_type, %granularity, "chart dates aligned to months");
        }
    }

    /// Produces the chart to save. `new_id` is used only when the draft is not
    /// editing an existing chart.
    ///
    /// # Errors
    /// `ChartError::MissingProduct` without a product; `ChartError::Dates` while
    /// the date filter has blocking errors or an unset date.
    pub fn build(&self, new_id: impl Into<String>, bounds: &CalendarBounds) -> Result<ChartConfig, ChartError> {
        let product = self.product.as_ref().ok_or(ChartError::MissingProduct)?;
        StatsQuery::from_configuration(&self.dates, bounds)?;

        let (date_start_2, date_end_2) = if self.dates.comparison_enabled {
            (
                Some(self.dates.secondary.start.clone()),
                Some(self.dates.secondary.end.clone()),
            )
        } else {
            (None, None)
        };
        let aggregates = self.chart_type.supports_aggregation();

        Ok(ChartConfig {
            id:         self.editing_id.clone().unwrap_or_else(|| new_id.into()),
            name:       self.chart_type.title().to_owned(),
            chart_type: self.chart_type,
            attributes: ChartAttributes {
                date_start_1: self.dates.primary.start.clone(),
                date_end_1: self.dates.primary.end.clone(),
                date_start_2,
                date_end_2,
                product_id: product.id,
                product_name: product.name.clone(),
                source: self.source.clone().unwrap_or_default(),
                aggregation_type: if aggregates { self.aggregation } else { Granularity::Month },
                date_mode: (!aggregates).then_some(self.date_mode),
            },
        })
    }
}

/// A user's named collection of charts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardPage {
    pub name:   String,
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

impl DashboardPage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:   name.into(),
            charts: Vec::new(),
        }
    }

    pub fn chart(&self, id: &str) -> Option<&ChartConfig> {
        self.charts.iter().find(|c| c.id == id)
    }

    /// Replaces the chart with the same id in place, or appends it.
    /// Returns `true` if an existing chart was replaced.
    pub fn upsert_chart(&mut self, chart: ChartConfig) -> bool {
        if let Some(slot) = self.charts.iter_mut().find(|c| c.id == chart.id) {
            *slot = chart;
            true
        } else {
            self.charts.push(chart);
            false
        }
    }

    pub fn remove_chart(&mut self, id: &str) -> Option<ChartConfig> {
        let index = self.charts.iter().position(|c| c.id == id)?;
        Some(self.charts.remove(index))
    }
}
