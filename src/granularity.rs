use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Aggregation unit of the dashboard: how dates are entered and how period
/// lengths are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "week")]
    Week,
    #[default]
    #[display(fmt = "month")]
    Month,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown aggregation type: {0} (expected day, week or month)")]
pub struct GranularityError(String);

impl Granularity {
    pub const ALL: [Self; 3] = [Self::Day, Self::Week, Self::Month];

    #[inline]
    pub const fn is_month(self) -> bool {
        matches!(self, Self::Month)
    }

    /// HTML input type the host renders for this granularity.
    pub const fn input_kind(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Day | Self::Week => "date",
        }
    }

    /// Label shown in the aggregation selector.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Day => "По дням",
            Self::Week => "По неделям",
            Self::Month => "По месяцам",
        }
    }

    /// Digit widths of the display form, `YYYY-MM` or `YYYY-MM-DD`.
    pub(crate) const fn display_shape(self) -> &'static [usize] {
        match self {
            Self::Month => &[4, 2],
            Self::Day | Self::Week => &[4, 2, 2],
        }
    }
}

impl FromStr for Granularity {
    type Err = GranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(GranularityError(other.to_owned())),
        }
    }
}
