use crate::aggregation::error::AggregationError;
use crate::aggregation::{get_column, get_opt_floats};
use crate::dataset::schema::{COL_STATION, COL_YEAR};
use crate::types::air_quality_frame::AirQualityFrame;
use crate::types::measurement::Measurement;
use polars::prelude::*;
use serde::Serialize;

const COL_MEAN: &str = "__mean";
const COL_COUNT: &str = "__count";

/// Mean of one reading for a station in one year; one point of a trend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub station: String,
    pub year: i32,
    /// `None` when the station reported no value for the whole year.
    pub mean: Option<f64>,
    /// Rows that contributed to `mean`.
    pub count: usize,
}

/// Averages `measurement` per (station, year), one line per station.
///
/// Points are ordered by station name, then year.
pub fn yearly_trend(
    frame: &AirQualityFrame,
    measurement: Measurement,
) -> Result<Vec<TrendPoint>, AggregationError> {
    let name = measurement.column_name();
    let grouped = frame
        .lazy()
        .group_by_stable([col(COL_STATION), col(COL_YEAR)])
        .agg([
            col(name).mean().alias(COL_MEAN),
            col(name).count().cast(DataType::Int64).alias(COL_COUNT),
        ])
        .collect()?;

    let stations = get_column(&grouped, COL_STATION)?.str()?;
    let years = get_column(&grouped, COL_YEAR)?.i32()?;
    let counts = get_column(&grouped, COL_COUNT)?.i64()?;
    let means = get_opt_floats(&grouped, COL_MEAN)?;

    let mut points: Vec<TrendPoint> = (0..grouped.height())
        .filter_map(|row| {
            Some(TrendPoint {
                station: stations.get(row)?.to_string(),
                year: years.get(row)?,
                mean: means[row],
                count: counts.get(row).unwrap_or(0) as usize,
            })
        })
        .collect();
    points.sort_by(|a, b| a.station.cmp(&b.station).then(a.year.cmp(&b.year)));
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::sample_frame;
    use crate::types::filter_selection::FilterSelection;

    #[test]
    fn test_pm25_trend_per_station_and_year() -> Result<(), AggregationError> {
        let points = yearly_trend(&sample_frame(), Measurement::Pm25)?;
        let summary: Vec<(&str, i32, Option<f64>, usize)> = points
            .iter()
            .map(|p| (p.station.as_str(), p.year, p.mean, p.count))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("Dongsi", 2013, Some(15.0), 2),
                // Dongsi's only 2014 value is missing.
                ("Dongsi", 2014, None, 0),
                ("Gucheng", 2013, Some(100.0), 1),
                ("Gucheng", 2014, Some(175.0), 2),
                ("Unknown", 2013, Some(60.0), 1),
                ("Unknown", 2014, Some(80.0), 1),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_trend_follows_selection() -> Result<(), AggregationError> {
        let frame = sample_frame().filter_rows(&FilterSelection::new(["Gucheng"], ["2014"]))?;
        let points = yearly_trend(&frame, Measurement::Temperature)?;
        assert_eq!(points.len(), 1);
        // TEMP is [20, null] for Gucheng in 2014.
        assert_eq!(points[0].mean, Some(20.0));
        assert_eq!(points[0].count, 1);
        Ok(())
    }
}
