//! Derived outputs computed from a filtered [`crate::AirQualityFrame`]: per-station
//! summaries, yearly trends, correlations, binned groupings and map markers.

pub mod binning;
pub mod correlation;
pub mod error;
pub mod markers;
pub mod summary;
pub mod trend;

use crate::aggregation::error::AggregationError;
use polars::prelude::{Column, DataFrame};

/// Retrieves a column by name from a DataFrame.
pub(crate) fn get_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, AggregationError> {
    df.column(name)
        .map_err(|e| AggregationError::ColumnNotFound(name.to_string(), e))
}

/// Extracts a nullable `Float64` column as optional values, in row order.
pub(crate) fn get_opt_floats(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, AggregationError> {
    Ok(get_column(df, name)?.f64()?.into_iter().collect())
}
