//! Defines the `Measurement` enum, naming the numeric pollutant and meteorological
//! readings carried by every observation row.

use serde::Serialize;
use std::fmt;

/// A numeric reading column of the air-quality dataset.
///
/// Each variant maps to the exact column header used in the source CSV
/// (see [`Measurement::column_name`]). Readings are stored as nullable `Float64`
/// columns; a missing reading is always `None`, never `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Measurement {
    /// Fine particulate matter (µg/m³), column `PM2.5`.
    #[serde(rename = "PM2.5")]
    Pm25,
    /// Coarse particulate matter (µg/m³), column `PM10`.
    #[serde(rename = "PM10")]
    Pm10,
    /// Sulfur dioxide (µg/m³), column `SO2`.
    #[serde(rename = "SO2")]
    So2,
    /// Nitrogen dioxide (µg/m³), column `NO2`.
    #[serde(rename = "NO2")]
    No2,
    /// Carbon monoxide (µg/m³), column `CO`.
    #[serde(rename = "CO")]
    Co,
    /// Ozone (µg/m³), column `O3`.
    #[serde(rename = "O3")]
    O3,
    /// Temperature (°C), column `TEMP`.
    #[serde(rename = "TEMP")]
    Temperature,
    /// Air pressure (hPa), column `PRES`.
    #[serde(rename = "PRES")]
    Pressure,
    /// Dew point temperature (°C), column `DEWP`.
    #[serde(rename = "DEWP")]
    DewPoint,
}

impl Measurement {
    /// Every measurement, in the column order of the source file.
    pub const ALL: [Measurement; 9] = [
        Measurement::Pm25,
        Measurement::Pm10,
        Measurement::So2,
        Measurement::No2,
        Measurement::Co,
        Measurement::O3,
        Measurement::Temperature,
        Measurement::Pressure,
        Measurement::DewPoint,
    ];

    /// Returns the CSV column header for this measurement.
    ///
    /// # Examples
    ///
    /// ```
    /// use airquality::Measurement;
    ///
    /// assert_eq!(Measurement::Pm25.column_name(), "PM2.5");
    /// assert_eq!(Measurement::DewPoint.column_name(), "DEWP");
    /// ```
    pub fn column_name(&self) -> &'static str {
        match self {
            Measurement::Pm25 => "PM2.5",
            Measurement::Pm10 => "PM10",
            Measurement::So2 => "SO2",
            Measurement::No2 => "NO2",
            Measurement::Co => "CO",
            Measurement::O3 => "O3",
            Measurement::Temperature => "TEMP",
            Measurement::Pressure => "PRES",
            Measurement::DewPoint => "DEWP",
        }
    }

    /// Looks up a measurement by its CSV column header.
    ///
    /// Matching is exact (`"pm2.5"` is not recognised).
    pub fn from_column_name(name: &str) -> Option<Self> {
        Measurement::ALL
            .into_iter()
            .find(|m| m.column_name() == name)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}
