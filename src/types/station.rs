//! Defines the static station → coordinate mapping used to place monitoring
//! stations on the map.

use serde::Serialize;
use std::collections::HashMap;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use airquality::LatLon;
///
/// let dongsi = LatLon(39.929, 116.417);
/// assert_eq!(dongsi.0, 39.929); // Latitude
/// assert_eq!(dongsi.1, 116.417); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }
}

/// Static lookup table from station name to its location.
///
/// Only stations present in the table have a position; every other station
/// resolves to `None`, which callers must carry as missing coordinates rather
/// than substituting `(0, 0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct StationCoordinates {
    coordinates: HashMap<String, LatLon>,
}

impl StationCoordinates {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            coordinates: HashMap::new(),
        }
    }

    /// The three Beijing monitoring stations with a known location.
    pub fn beijing() -> Self {
        Self::new()
            .with_station("Dongsi", LatLon(39.929, 116.417))
            .with_station("Gucheng", LatLon(39.928, 116.342))
            .with_station("Huairou", LatLon(40.316, 116.637))
    }

    /// Adds (or replaces) a station's location.
    pub fn with_station(mut self, station: impl Into<String>, location: LatLon) -> Self {
        self.coordinates.insert(station.into(), location);
        self
    }

    /// Looks up a station's location.
    pub fn get(&self, station: &str) -> Option<LatLon> {
        self.coordinates.get(station).copied()
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

impl Default for StationCoordinates {
    fn default() -> Self {
        Self::beijing()
    }
}

impl<S: Into<String>> FromIterator<(S, LatLon)> for StationCoordinates {
    fn from_iter<I: IntoIterator<Item = (S, LatLon)>>(iter: I) -> Self {
        Self {
            coordinates: iter
                .into_iter()
                .map(|(name, location)| (name.into(), location))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_stations_resolve_exactly() {
        let coords = StationCoordinates::beijing();
        assert_eq!(coords.len(), 3);
        assert_eq!(coords.get("Dongsi"), Some(LatLon(39.929, 116.417)));
        assert_eq!(coords.get("Gucheng"), Some(LatLon(39.928, 116.342)));
        assert_eq!(coords.get("Huairou"), Some(LatLon(40.316, 116.637)));
    }

    #[test]
    fn test_unknown_station_has_no_location() {
        let coords = StationCoordinates::beijing();
        assert_eq!(coords.get("Unknown"), None);
        assert_eq!(coords.get("dongsi"), None);
    }

    #[test]
    fn test_collect_from_pairs() {
        let coords: StationCoordinates = vec![("A", LatLon(1.0, 2.0))].into_iter().collect();
        assert_eq!(coords.get("A").map(|l| l.latitude()), Some(1.0));
        assert!(StationCoordinates::new().is_empty());
    }
}
