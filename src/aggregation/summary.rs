use crate::aggregation::error::AggregationError;
use crate::aggregation::{get_column, get_opt_floats};
use crate::dataset::schema::{COL_DATETIME, COL_LATITUDE, COL_LONGITUDE, COL_STATION};
use crate::types::air_quality_frame::AirQualityFrame;
use crate::types::measurement::Measurement;
use crate::types::station::LatLon;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

const COL_ROW_COUNT: &str = "__row_count";
const COL_PM25_COUNT: &str = "__pm25_count";

/// How a station's coordinates are derived when its rows are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryPolicy {
    /// Mean of the per-row coordinates. Only meaningful because every row of a
    /// station carries the same coordinates.
    MeanCoordinates,
    /// First non-missing coordinate observed for the station. Well-defined
    /// regardless of which columns are numeric.
    #[default]
    FirstObservedCoordinates,
}

impl SummaryPolicy {
    fn coordinate_expr(&self, column: &str) -> Expr {
        match self {
            SummaryPolicy::MeanCoordinates => col(column).mean(),
            SummaryPolicy::FirstObservedCoordinates => col(column).drop_nulls().first(),
        }
        .alias(column)
    }
}

/// Per-station aggregate over the filtered rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSummary {
    pub station: String,
    /// Rows of this station in the filtered table.
    pub row_count: usize,
    /// Rows that contributed a PM2.5 value to `pm25_mean`.
    pub pm25_count: usize,
    pub pm25_mean: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Mean of every reading, ignoring missing values. `None` when the station
    /// has no value at all for that reading.
    pub means: BTreeMap<Measurement, Option<f64>>,
}

impl StationSummary {
    pub fn mean(&self, measurement: Measurement) -> Option<f64> {
        self.means.get(&measurement).copied().flatten()
    }

    /// The station position, when both coordinates are known.
    pub fn location(&self) -> Option<LatLon> {
        Some(LatLon(self.latitude?, self.longitude?))
    }
}

/// Groups `frame` by station and averages every reading, skipping missing values.
///
/// Summaries come out in order of each station's first row. Coordinates are
/// taken from `latitude`/`longitude` according to `policy`, or left missing when
/// the frame has no coordinate columns.
pub fn summarize_by_station(
    frame: &AirQualityFrame,
    policy: SummaryPolicy,
) -> Result<Vec<StationSummary>, AggregationError> {
    let with_coordinates = frame.has_coordinates();

    let mut aggregations = vec![
        // `datetime` is never null, so its count is the group's row count.
        col(COL_DATETIME).count().cast(DataType::Int64).alias(COL_ROW_COUNT),
        col(Measurement::Pm25.column_name())
            .count()
            .cast(DataType::Int64)
            .alias(COL_PM25_COUNT),
    ];
    aggregations.extend(
        Measurement::ALL
            .iter()
            .map(|m| col(m.column_name()).mean().alias(m.column_name())),
    );
    if with_coordinates {
        aggregations.push(policy.coordinate_expr(COL_LATITUDE));
        aggregations.push(policy.coordinate_expr(COL_LONGITUDE));
    }

    let grouped = frame
        .lazy()
        .group_by_stable([col(COL_STATION)])
        .agg(aggregations)
        .collect()?;

    let stations = get_column(&grouped, COL_STATION)?.str()?;
    let row_counts = get_column(&grouped, COL_ROW_COUNT)?.i64()?;
    let pm25_counts = get_column(&grouped, COL_PM25_COUNT)?.i64()?;
    let means = Measurement::ALL
        .iter()
        .map(|m| Ok((*m, get_opt_floats(&grouped, m.column_name())?)))
        .collect::<Result<Vec<_>, AggregationError>>()?;
    let (latitudes, longitudes) = if with_coordinates {
        (
            get_opt_floats(&grouped, COL_LATITUDE)?,
            get_opt_floats(&grouped, COL_LONGITUDE)?,
        )
    } else {
        (vec![None; grouped.height()], vec![None; grouped.height()])
    };

    let mut summaries = Vec::with_capacity(grouped.height());
    for row in 0..grouped.height() {
        let Some(station) = stations.get(row) else {
            continue;
        };
        let station_means: BTreeMap<Measurement, Option<f64>> = means
            .iter()
            .map(|(measurement, values)| (*measurement, values[row]))
            .collect();
        summaries.push(StationSummary {
            station: station.to_string(),
            row_count: row_counts.get(row).unwrap_or(0) as usize,
            pm25_count: pm25_counts.get(row).unwrap_or(0) as usize,
            pm25_mean: station_means.get(&Measurement::Pm25).copied().flatten(),
            latitude: latitudes[row],
            longitude: longitudes[row],
            means: station_means,
        });
    }
    Ok(summaries)
}
