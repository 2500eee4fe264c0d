//! Contains the `AirQualityFrame` structure, the validated in-memory table every
//! pipeline stage consumes and produces.

use crate::aggregation::error::AggregationError;
use crate::aggregation::{get_column, get_opt_floats};
use crate::dataset::error::DatasetError;
use crate::dataset::schema::{
    self, COL_DATETIME, COL_DAY, COL_HOUR, COL_LATITUDE, COL_LONGITUDE, COL_MONTH, COL_STATION,
    COL_YEAR,
};
use crate::types::measurement::Measurement;
use crate::types::observation::Observation;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::collections::HashSet;

/// Composes a timestamp from the four integer time parts.
///
/// Returns `None` for negative parts and for impossible calendar values
/// (month 13, 30 February, hour 24, ...).
pub(crate) fn compose_timestamp(year: i32, month: i32, day: i32, hour: i32) -> Option<NaiveDateTime> {
    let month = u32::try_from(month).ok()?;
    let day = u32::try_from(day).ok()?;
    let hour = u32::try_from(hour).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, 0, 0)
}

fn time_part(ca: &Int32Chunked, column: &str, row: usize) -> Result<i32, DatasetError> {
    ca.get(row).ok_or_else(|| DatasetError::MissingTimePart {
        column: column.to_string(),
        row,
    })
}

/// Builds the `datetime` column (`Datetime(ms)`, timezone-naive) from the
/// normalised `Int32` time parts. Fails on the first row that cannot be composed.
fn compose_datetime_column(df: &DataFrame) -> Result<Series, DatasetError> {
    let years = df.column(COL_YEAR)?.i32()?;
    let months = df.column(COL_MONTH)?.i32()?;
    let days = df.column(COL_DAY)?.i32()?;
    let hours = df.column(COL_HOUR)?.i32()?;

    let mut millis = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let year = time_part(years, COL_YEAR, row)?;
        let month = time_part(months, COL_MONTH, row)?;
        let day = time_part(days, COL_DAY, row)?;
        let hour = time_part(hours, COL_HOUR, row)?;

        let timestamp = compose_timestamp(year, month, day, hour).ok_or(
            DatasetError::InvalidTimestamp {
                row,
                year,
                month,
                day,
                hour,
            },
        )?;
        millis.push(timestamp.and_utc().timestamp_millis());
    }

    Ok(Int64Chunked::from_vec(COL_DATETIME.into(), millis)
        .into_datetime(TimeUnit::Milliseconds, None)
        .into_series())
}

/// A validated air-quality table.
///
/// Guarantees the fixed schema: `station` (non-null String), `year`/`month`/`day`/`hour`
/// (Int32), the nine [`Measurement`] readings (Float64, missing values as null,
/// never `NaN`) and the derived `datetime` column (`Datetime(ms)`). Frames
/// returned by `with_coordinates` additionally carry `latitude`/`longitude`.
///
/// The wrapped `DataFrame` is never mutated in place; every pipeline stage
/// returns a new frame.
#[derive(Debug, Clone)]
pub struct AirQualityFrame {
    frame: DataFrame,
}

impl AirQualityFrame {
    /// Validates `df` against the fixed schema, normalises dtypes and derives the
    /// `datetime` column.
    ///
    /// # Errors
    ///
    /// * [`DatasetError::MissingColumn`] when a required column is absent.
    /// * [`DatasetError::InvalidColumnType`] when a column has the wrong dtype.
    /// * [`DatasetError::MissingTimePart`] / [`DatasetError::InvalidTimestamp`]
    ///   when any row cannot be composed into a timestamp.
    pub fn try_from_dataframe(df: DataFrame) -> Result<Self, DatasetError> {
        schema::validate(&df)?;
        let mut frame = df.lazy().with_columns(schema::normalize_exprs()).collect()?;
        let datetime = compose_datetime_column(&frame)?;
        frame.with_column(datetime)?;
        Ok(Self { frame })
    }

    /// Wraps a frame produced by one of the pipeline stages, which preserve the schema.
    pub(crate) fn from_validated(frame: DataFrame) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// A lazy view of the table, for composing further polars expressions.
    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Whether `latitude`/`longitude` columns have been attached.
    pub fn has_coordinates(&self) -> bool {
        self.frame.get_column_index(COL_LATITUDE).is_some()
            && self.frame.get_column_index(COL_LONGITUDE).is_some()
    }

    pub(crate) fn column(&self, name: &str) -> Result<&Column, AggregationError> {
        get_column(&self.frame, name)
    }

    /// Values of a nullable `Float64` column, in row order.
    pub(crate) fn float_values(&self, name: &str) -> Result<Vec<Option<f64>>, AggregationError> {
        get_opt_floats(&self.frame, name)
    }

    /// Values of one reading column, in row order.
    pub fn measurement_values(
        &self,
        measurement: Measurement,
    ) -> Result<Vec<Option<f64>>, AggregationError> {
        self.float_values(measurement.column_name())
    }

    /// Distinct station names, in order of first appearance.
    pub fn stations(&self) -> Result<Vec<String>, AggregationError> {
        let mut seen = HashSet::new();
        Ok(self
            .column(COL_STATION)?
            .str()?
            .into_iter()
            .flatten()
            .filter(|station| seen.insert(*station))
            .map(str::to_string)
            .collect())
    }

    /// Distinct year labels (`"2013"`, ...), in order of first appearance.
    pub fn year_labels(&self) -> Result<Vec<String>, AggregationError> {
        let mut seen = HashSet::new();
        Ok(self
            .column(COL_YEAR)?
            .i32()?
            .into_iter()
            .flatten()
            .filter(|year| seen.insert(*year))
            .map(|year| year.to_string())
            .collect())
    }

    /// Extracts every row as a typed [`Observation`].
    pub fn observations(&self) -> Result<Vec<Observation>, AggregationError> {
        let stations = self.column(COL_STATION)?.str()?;
        let years = self.column(COL_YEAR)?.i32()?;
        let months = self.column(COL_MONTH)?.i32()?;
        let days = self.column(COL_DAY)?.i32()?;
        let hours = self.column(COL_HOUR)?.i32()?;
        let readings = Measurement::ALL
            .iter()
            .map(|m| self.measurement_values(*m))
            .collect::<Result<Vec<_>, _>>()?;
        let (latitudes, longitudes) = if self.has_coordinates() {
            (
                self.float_values(COL_LATITUDE)?,
                self.float_values(COL_LONGITUDE)?,
            )
        } else {
            (vec![None; self.height()], vec![None; self.height()])
        };

        let mut observations = Vec::with_capacity(self.height());
        for row in 0..self.height() {
            let (Some(year), Some(month), Some(day), Some(hour)) =
                (years.get(row), months.get(row), days.get(row), hours.get(row))
            else {
                continue;
            };
            let Some(datetime) = compose_timestamp(year, month, day, hour) else {
                continue;
            };
            let Some(station) = stations.get(row) else {
                continue;
            };
            let reading = |m: Measurement| readings[m as usize][row];
            observations.push(Observation {
                station: station.to_string(),
                datetime,
                year,
                month: month as u32,
                day: day as u32,
                hour: hour as u32,
                pm25: reading(Measurement::Pm25),
                pm10: reading(Measurement::Pm10),
                so2: reading(Measurement::So2),
                no2: reading(Measurement::No2),
                co: reading(Measurement::Co),
                o3: reading(Measurement::O3),
                temperature: reading(Measurement::Temperature),
                pressure: reading(Measurement::Pressure),
                dew_point: reading(Measurement::DewPoint),
                latitude: latitudes[row],
                longitude: longitudes[row],
            });
        }
        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{sample_frame, sample_dataframe};

    #[test]
    fn test_compose_timestamp_rejects_impossible_dates() {
        assert!(compose_timestamp(2013, 3, 1, 0).is_some());
        assert!(compose_timestamp(2013, 13, 1, 0).is_none());
        assert!(compose_timestamp(2013, 2, 30, 0).is_none());
        assert!(compose_timestamp(2013, 3, 1, 24).is_none());
        assert!(compose_timestamp(2013, -1, 1, 0).is_none());
    }

    #[test]
    fn test_frame_gains_datetime_column() -> Result<(), Box<dyn std::error::Error>> {
        let frame = sample_frame();
        let dt_col = frame.frame().column(COL_DATETIME)?;
        assert!(matches!(
            dt_col.dtype(),
            DataType::Datetime(TimeUnit::Milliseconds, None)
        ));
        assert_eq!(dt_col.null_count(), 0);

        let first = &frame.observations()?[0];
        let expected = NaiveDate::from_ymd_opt(2013, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(first.datetime, expected);
        Ok(())
    }

    #[test]
    fn test_nan_readings_become_missing() -> Result<(), Box<dyn std::error::Error>> {
        let frame = sample_frame();
        let pm25 = frame.measurement_values(Measurement::Pm25)?;
        // Row 2 holds NaN in the fixture.
        assert_eq!(pm25[2], None);
        assert_eq!(frame.frame().column("PM2.5")?.null_count(), 1);
        Ok(())
    }

    #[test]
    fn test_invalid_row_fails_whole_conversion() {
        let mut df = sample_dataframe();
        let bad_hour = Series::new("hour".into(), vec![0i64, 1, 25, 3, 4, 5, 6, 7]);
        df.with_column(bad_hour).unwrap();

        match AirQualityFrame::try_from_dataframe(df) {
            Err(DatasetError::InvalidTimestamp { row, hour, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(hour, 25);
            }
            other => panic!("expected InvalidTimestamp, got {:?}", other.map(|f| f.height())),
        }
    }

    #[test]
    fn test_null_time_part_is_reported() {
        let mut df = sample_dataframe();
        let day = Series::new(
            "day".into(),
            vec![Some(1i64), Some(1), Some(1), None, Some(1), Some(1), Some(1), Some(1)],
        );
        df.with_column(day).unwrap();

        match AirQualityFrame::try_from_dataframe(df) {
            Err(DatasetError::MissingTimePart { column, row }) => {
                assert_eq!(column, "day");
                assert_eq!(row, 3);
            }
            other => panic!("expected MissingTimePart, got {:?}", other.map(|f| f.height())),
        }
    }

    #[test]
    fn test_distinct_stations_and_years_keep_first_appearance_order(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let frame = sample_frame();
        assert_eq!(frame.stations()?, vec!["Dongsi", "Gucheng", "Unknown"]);
        assert_eq!(frame.year_labels()?, vec!["2013", "2014"]);
        Ok(())
    }
}
