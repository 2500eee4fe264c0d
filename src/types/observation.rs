use crate::types::measurement::Measurement;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One typed row of the air-quality table.
///
/// Readings are `None` when the source cell was empty, `NA` or `NaN`.
/// `latitude`/`longitude` are only populated once coordinates have been attached
/// and the station has a known location.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Observation {
    pub station: String,
    pub datetime: NaiveDateTime,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub so2: Option<f64>,
    pub no2: Option<f64>,
    pub co: Option<f64>,
    pub o3: Option<f64>,
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
    pub dew_point: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Observation {
    /// Returns the reading stored for `measurement`.
    pub fn reading(&self, measurement: Measurement) -> Option<f64> {
        match measurement {
            Measurement::Pm25 => self.pm25,
            Measurement::Pm10 => self.pm10,
            Measurement::So2 => self.so2,
            Measurement::No2 => self.no2,
            Measurement::Co => self.co,
            Measurement::O3 => self.o3,
            Measurement::Temperature => self.temperature,
            Measurement::Pressure => self.pressure,
            Measurement::DewPoint => self.dew_point,
        }
    }

    /// The label used for the year filter (`"2013"`).
    pub fn year_label(&self) -> String {
        self.year.to_string()
    }
}
