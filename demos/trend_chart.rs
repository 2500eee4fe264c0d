//! Plots the yearly PM2.5 trend of every station, one line per station.
//!
//! cargo run --example trend_chart --features plotting -- [DATASET_PATH]

use std::collections::BTreeMap;
use std::error::Error;

use airquality::{yearly_trend, Dashboard, Measurement, TrendPoint, DEFAULT_DATASET_PATH};
use plotlars::{Legend, Plot, Text, TimeSeriesPlot};
use polars::prelude::*;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATASET_PATH.to_string());

    let dashboard = Dashboard::load(path)?;
    let selection = dashboard.default_selection()?;
    let table = dashboard.table().filter_rows(&selection)?;
    let trend = yearly_trend(&table, Measurement::Pm25)?;

    let wide = trend_to_wide(&trend)?;
    let stations: Vec<&str> = wide
        .get_column_names_str()
        .into_iter()
        .filter(|name| *name != "year")
        .collect();
    let Some((first, rest)) = stations.split_first() else {
        println!("No PM2.5 readings to plot.");
        return Ok(());
    };

    TimeSeriesPlot::builder()
        .data(&wide)
        .x("year")
        .y(first)
        .additional_series(rest.to_vec())
        .plot_title(Text::from("Mean PM2.5 per year").size(18))
        .legend(&Legend::new().x(0.05).y(0.9))
        .x_title("year")
        .y_title("PM2.5 (µg/m³)")
        .build()
        .plot();
    Ok(())
}

/// One row per year, one column per station.
fn trend_to_wide(points: &[TrendPoint]) -> PolarsResult<DataFrame> {
    let years: Vec<i32> = {
        let mut years: Vec<i32> = points.iter().map(|p| p.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    };
    let mut by_station: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();
    for point in points {
        let series = by_station
            .entry(point.station.as_str())
            .or_insert_with(|| vec![None; years.len()]);
        if let Ok(i) = years.binary_search(&point.year) {
            series[i] = point.mean;
        }
    }

    let mut columns = vec![Column::new(
        "year".into(),
        years.iter().map(|y| y.to_string()).collect::<Vec<_>>(),
    )];
    for (station, means) in by_station {
        columns.push(Column::new(station.into(), means));
    }
    DataFrame::new(columns)
}
