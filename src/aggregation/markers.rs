use crate::aggregation::summary::StationSummary;
use crate::types::color_bucket::ColorBucket;
use crate::types::station::LatLon;
use serde::Serialize;

/// Circle radius per µg/m³ of mean PM2.5, in metres.
pub const DEFAULT_RADIUS_PER_UNIT: f64 = 20.0;
pub const DEFAULT_MAP_CENTER: LatLon = LatLon(39.9, 116.4);
pub const DEFAULT_MAP_ZOOM: u8 = 10;

/// One station on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    /// Popup text.
    pub station: String,
    pub location: LatLon,
    pub pm25_mean: Option<f64>,
    /// `None` when the station has no PM2.5 mean to colour by.
    pub color: Option<ColorBucket>,
    pub radius_m: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLon,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

/// One marker per summary with known coordinates; the rest are left off the map.
pub fn map_markers(summaries: &[StationSummary], radius_per_unit: f64) -> Vec<MapMarker> {
    summaries
        .iter()
        .filter_map(|summary| {
            Some(MapMarker {
                station: summary.station.clone(),
                location: summary.location()?,
                pm25_mean: summary.pm25_mean,
                color: summary.pm25_mean.map(ColorBucket::for_pm25),
                radius_m: summary.pm25_mean.map(|mean| mean * radius_per_unit),
            })
        })
        .collect()
}
