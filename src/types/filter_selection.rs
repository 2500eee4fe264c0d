use crate::aggregation::error::AggregationError;
use crate::types::air_quality_frame::AirQualityFrame;
use serde::Serialize;
use std::collections::BTreeSet;

/// The active station and year selection restricting which rows are visible.
///
/// Years are held as labels (`"2013"`), matching the labels offered by the
/// year picker; membership is a set test, never a numeric range. An empty set
/// on either dimension selects nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterSelection {
    pub stations: BTreeSet<String>,
    pub years: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new<S, Y>(stations: S, years: Y) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        Y: IntoIterator,
        Y::Item: Into<String>,
    {
        Self {
            stations: stations.into_iter().map(Into::into).collect(),
            years: years.into_iter().map(Into::into).collect(),
        }
    }

    /// The default selection: every station and every year present in `frame`.
    pub fn all(frame: &AirQualityFrame) -> Result<Self, AggregationError> {
        Ok(Self::new(frame.stations()?, frame.year_labels()?))
    }

    /// Whether a row with this station and year label passes the selection.
    pub fn matches(&self, station: &str, year_label: &str) -> bool {
        self.stations.contains(station) && self.years.contains(year_label)
    }

    /// True when either dimension is empty, so no row can match.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty() || self.years.is_empty()
    }
}
