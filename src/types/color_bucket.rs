//! Defines the `ColorBucket` enum, mapping a mean PM2.5 concentration to a
//! discrete severity colour used for map markers.

use serde::Serialize;
use std::fmt;

/// A severity category derived from a PM2.5 concentration (µg/m³).
///
/// | range (inclusive lower, exclusive upper) | bucket |
/// |---|---|
/// | (-∞, 50) | `green` |
/// | [50, 100) | `yellow` |
/// | [100, 150) | `orange` |
/// | [150, 200) | `red` |
/// | [200, ∞) | `darkred` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBucket {
    Green,
    Yellow,
    Orange,
    Red,
    DarkRed,
}

impl ColorBucket {
    /// Buckets a PM2.5 value.
    ///
    /// Total over `f64`: values below 50 are `Green` with no lower bound and values
    /// of 200 or more are `DarkRed` with no upper bound. `NaN` compares below no
    /// threshold and therefore lands in `DarkRed`; missing means should be
    /// filtered out before calling this.
    ///
    /// # Examples
    ///
    /// ```
    /// use airquality::ColorBucket;
    ///
    /// assert_eq!(ColorBucket::for_pm25(49.9), ColorBucket::Green);
    /// assert_eq!(ColorBucket::for_pm25(50.0), ColorBucket::Yellow);
    /// assert_eq!(ColorBucket::for_pm25(250.0), ColorBucket::DarkRed);
    /// assert_eq!(ColorBucket::for_pm25(-3.0), ColorBucket::Green);
    /// ```
    pub fn for_pm25(value: f64) -> Self {
        if value < 50.0 {
            ColorBucket::Green
        } else if value < 100.0 {
            ColorBucket::Yellow
        } else if value < 150.0 {
            ColorBucket::Orange
        } else if value < 200.0 {
            ColorBucket::Red
        } else {
            ColorBucket::DarkRed
        }
    }

    /// The colour name understood by map renderers (`"darkred"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorBucket::Green => "green",
            ColorBucket::Yellow => "yellow",
            ColorBucket::Orange => "orange",
            ColorBucket::Red => "red",
            ColorBucket::DarkRed => "darkred",
        }
    }
}

impl fmt::Display for ColorBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
