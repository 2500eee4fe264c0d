use crate::aggregation::error::AggregationError;
use crate::dataset::schema::{COL_LATITUDE, COL_LONGITUDE, COL_STATION, COL_YEAR};
use crate::types::air_quality_frame::AirQualityFrame;
use crate::types::filter_selection::FilterSelection;
use crate::types::station::StationCoordinates;
use log::debug;
use polars::prelude::{col, lit, DataType, Expr, LazyFrame, NamedFrom, PlSmallStr, Series};
use std::collections::BTreeSet;

/// `column ∈ values`. An empty set matches nothing.
fn one_of(column: Expr, values: &BTreeSet<String>) -> Expr {
    let values: Vec<&str> = values.iter().map(String::as_str).collect();
    column.is_in(lit(Series::new(PlSmallStr::EMPTY, values)))
}

pub trait AirQualityFrameFilterExt {
    /// Keeps rows recorded at one of the given stations.
    /// Station names are matched exactly (case-sensitive).
    ///
    /// # Arguments
    /// * `stations`: The station names to keep. An empty set keeps no rows.
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied.
    fn filter_stations(self, stations: &BTreeSet<String>) -> LazyFrame;

    /// Keeps rows whose `year`, rendered as a label (`"2013"`), is one of `years`.
    /// This is set membership on labels, not a numeric range, so `"2014.0"`
    /// matches nothing.
    ///
    /// # Arguments
    /// * `years`: The year labels to keep. An empty set keeps no rows.
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied.
    fn filter_year_labels(self, years: &BTreeSet<String>) -> LazyFrame;

    /// Applies both dimensions of a [`FilterSelection`]; a row must match the
    /// station set and the year set.
    ///
    /// # Arguments
    /// * `selection`: The active station and year selection.
    ///
    /// # Returns
    /// A new `LazyFrame` with both filters applied. Nothing is evaluated
    /// until the frame is collected.
    fn filter_selection(self, selection: &FilterSelection) -> LazyFrame;
}

impl AirQualityFrameFilterExt for LazyFrame {
    fn filter_stations(self, stations: &BTreeSet<String>) -> LazyFrame {
        self.filter(one_of(col(COL_STATION), stations))
    }

    fn filter_year_labels(self, years: &BTreeSet<String>) -> LazyFrame {
        self.filter(one_of(col(COL_YEAR).cast(DataType::String), years))
    }

    fn filter_selection(self, selection: &FilterSelection) -> LazyFrame {
        self.filter_stations(&selection.stations)
            .filter_year_labels(&selection.years)
    }
}

impl AirQualityFrame {
    /// Returns the rows matching `selection`.
    ///
    /// Matching nothing is not an error: the result is an empty frame with the
    /// same schema, which callers surface as a "no data" state.
    pub fn filter_rows(&self, selection: &FilterSelection) -> Result<AirQualityFrame, AggregationError> {
        let df = self.lazy().filter_selection(selection).collect()?;
        debug!(
            "Selection of {} stations x {} years kept {} of {} rows",
            selection.stations.len(),
            selection.years.len(),
            df.height(),
            self.height()
        );
        Ok(AirQualityFrame::from_validated(df))
    }

    /// Adds `latitude`/`longitude` columns by looking up each row's station.
    ///
    /// Rows of unmapped stations get null coordinates, never `(0, 0)`.
    pub fn with_coordinates(
        &self,
        coordinates: &StationCoordinates,
    ) -> Result<AirQualityFrame, AggregationError> {
        let locations: Vec<_> = self
            .column(COL_STATION)?
            .str()?
            .into_iter()
            .map(|station| station.and_then(|s| coordinates.get(s)))
            .collect();
        let latitudes: Vec<Option<f64>> = locations.iter().map(|l| l.map(|l| l.0)).collect();
        let longitudes: Vec<Option<f64>> = locations.iter().map(|l| l.map(|l| l.1)).collect();

        let mut df = self.frame().clone();
        df.with_column(Series::new(COL_LATITUDE.into(), latitudes))?;
        df.with_column(Series::new(COL_LONGITUDE.into(), longitudes))?;
        Ok(AirQualityFrame::from_validated(df))
    }
}
