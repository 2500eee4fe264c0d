//! A dashboard session: the loaded table plus everything needed to recompute all
//! panels when the selection changes.

use crate::aggregation::binning::{binned_grouping, BinnedGrouping};
use crate::aggregation::correlation::{correlation_matrix, CorrelationMatrix};
use crate::aggregation::markers::{
    map_markers, MapView, DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM, DEFAULT_RADIUS_PER_UNIT,
};
use crate::aggregation::summary::{summarize_by_station, StationSummary, SummaryPolicy};
use crate::aggregation::trend::{yearly_trend, TrendPoint};
use crate::dataset::loader::DatasetLoader;
use crate::error::AirQualityError;
use crate::types::air_quality_frame::AirQualityFrame;
use crate::types::filter_selection::FilterSelection;
use crate::types::measurement::Measurement;
use crate::types::station::{LatLon, StationCoordinates};
use bon::bon;
use log::{debug, info, warn};
use serde::Serialize;
use std::path::PathBuf;

pub const NO_DATA_MESSAGE: &str = "No data available for the selected stations and years.";

/// Which panels are computed, and how.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub summary_policy: SummaryPolicy,
    pub bin_count: usize,
    pub correlation_columns: Vec<Measurement>,
    /// Columns PM2.5 is grouped by, one box-plot panel each.
    pub binned_columns: Vec<Measurement>,
    pub trend_measurement: Measurement,
    pub coordinates: StationCoordinates,
    pub radius_per_unit: f64,
    pub map_center: LatLon,
    pub map_zoom: u8,
}

#[bon]
impl DashboardConfig {
    /// Every setting is optional:
    ///
    /// * `summary_policy`: [`SummaryPolicy::FirstObservedCoordinates`]
    /// * `bin_count`: 10
    /// * `correlation_columns`: PM2.5, TEMP, PRES, DEWP
    /// * `binned_columns`: TEMP, PRES, DEWP
    /// * `trend_measurement`: PM2.5
    /// * `coordinates`: [`StationCoordinates::beijing`]
    /// * `radius_per_unit`: 20 m per µg/m³
    /// * `map_center` / `map_zoom`: 39.9 N 116.4 E, zoom 10
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        summary_policy: Option<SummaryPolicy>,
        bin_count: Option<usize>,
        correlation_columns: Option<Vec<Measurement>>,
        binned_columns: Option<Vec<Measurement>>,
        trend_measurement: Option<Measurement>,
        coordinates: Option<StationCoordinates>,
        radius_per_unit: Option<f64>,
        map_center: Option<LatLon>,
        map_zoom: Option<u8>,
    ) -> Self {
        Self {
            summary_policy: summary_policy.unwrap_or_default(),
            bin_count: bin_count.unwrap_or(10),
            correlation_columns: correlation_columns.unwrap_or_else(|| {
                vec![
                    Measurement::Pm25,
                    Measurement::Temperature,
                    Measurement::Pressure,
                    Measurement::DewPoint,
                ]
            }),
            binned_columns: binned_columns.unwrap_or_else(|| {
                vec![
                    Measurement::Temperature,
                    Measurement::Pressure,
                    Measurement::DewPoint,
                ]
            }),
            trend_measurement: trend_measurement.unwrap_or(Measurement::Pm25),
            coordinates: coordinates.unwrap_or_default(),
            radius_per_unit: radius_per_unit.unwrap_or(DEFAULT_RADIUS_PER_UNIT),
            map_center: map_center.unwrap_or(DEFAULT_MAP_CENTER),
            map_zoom: map_zoom.unwrap_or(DEFAULT_MAP_ZOOM),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// All panels for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPanels {
    pub selection: FilterSelection,
    pub row_count: usize,
    pub trend: Vec<TrendPoint>,
    pub correlation: CorrelationMatrix,
    pub binned: Vec<BinnedGrouping>,
    pub summaries: Vec<StationSummary>,
    pub map: MapView,
}

/// Result of a refresh: either every panel, or an explicit empty state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    NoData { message: String },
    Ready(Box<DashboardPanels>),
}

impl DashboardView {
    pub fn is_no_data(&self) -> bool {
        matches!(self, DashboardView::NoData { .. })
    }

    pub fn panels(&self) -> Option<&DashboardPanels> {
        match self {
            DashboardView::Ready(panels) => Some(panels),
            DashboardView::NoData { .. } => None,
        }
    }
}

/// One user session. Owns its copy of the full table; the table is loaded once
/// and never modified, and each [`Dashboard::refresh`] is independent.
#[derive(Debug, Clone)]
pub struct Dashboard {
    table: AirQualityFrame,
    config: DashboardConfig,
}

#[bon]
impl Dashboard {
    #[builder]
    pub fn new(table: AirQualityFrame, config: Option<DashboardConfig>) -> Self {
        Self {
            table,
            config: config.unwrap_or_default(),
        }
    }

    /// Loads the dataset at `path` and starts a session with the default config.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::Dataset`] when the file cannot be loaded.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AirQualityError> {
        let table = DatasetLoader::builder().path(path).build().load()?;
        Ok(Self::builder().table(table).build())
    }

    pub fn table(&self) -> &AirQualityFrame {
        &self.table
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Every station and every year of the loaded table.
    pub fn default_selection(&self) -> Result<FilterSelection, AirQualityError> {
        Ok(FilterSelection::all(&self.table)?)
    }

    /// Recomputes every panel for `selection`.
    ///
    /// A selection matching no rows is not an error; it yields
    /// [`DashboardView::NoData`].
    pub fn refresh(&self, selection: &FilterSelection) -> Result<DashboardView, AirQualityError> {
        let filtered = self.table.filter_rows(selection)?;
        if filtered.is_empty() {
            warn!("Selection {:?} matched no rows", selection);
            return Ok(DashboardView::NoData {
                message: NO_DATA_MESSAGE.to_string(),
            });
        }

        let config = &self.config;
        let located = filtered.with_coordinates(&config.coordinates)?;
        let trend = yearly_trend(&located, config.trend_measurement)?;
        let correlation = correlation_matrix(&located, &config.correlation_columns)?;
        let binned = config
            .binned_columns
            .iter()
            .map(|column| binned_grouping(&located, *column, config.bin_count))
            .collect::<Result<Vec<_>, _>>()?;
        let summaries = summarize_by_station(&located, config.summary_policy)?;
        let markers = map_markers(&summaries, config.radius_per_unit);
        debug!(
            "{} of {} stations placed on the map",
            markers.len(),
            summaries.len()
        );

        info!(
            "Refreshed dashboard: {} rows, {} stations",
            located.height(),
            summaries.len()
        );
        Ok(DashboardView::Ready(Box::new(DashboardPanels {
            selection: selection.clone(),
            row_count: located.height(),
            trend,
            correlation,
            binned,
            summaries,
            map: MapView {
                center: config.map_center,
                zoom: config.map_zoom,
                markers,
            },
        })))
    }
}
