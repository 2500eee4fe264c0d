use crate::aggregation::error::AggregationError;
use crate::types::air_quality_frame::AirQualityFrame;
use crate::types::measurement::Measurement;
use log::debug;
use ordered_float::OrderedFloat;
use serde::Serialize;

/// Five-number summary plus count, as drawn by a box plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxStats {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl BoxStats {
    /// Computes the statistics with linearly interpolated quantiles.
    /// Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<OrderedFloat<f64>> = values.iter().copied().map(OrderedFloat).collect();
        sorted.sort_unstable();
        let sorted: Vec<f64> = sorted.into_iter().map(|v| v.0).collect();

        Some(BoxStats {
            count: sorted.len(),
            min: *sorted.first()?,
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: *sorted.last()?,
        })
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    let fraction = position - below as f64;
    sorted[below] + (sorted[above] - sorted[below]) * fraction
}

/// One equal-width interval of the binned column and the target values that fell in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    /// Whether `lower` belongs to the bin (only for the first bin). `upper`
    /// always does.
    pub lower_closed: bool,
    /// Non-missing target values of the rows in this bin.
    pub values: Vec<f64>,
    /// `None` when no row of the bin has a target value.
    pub stats: Option<BoxStats>,
}

impl Bin {
    pub fn label(&self) -> String {
        let open = if self.lower_closed { '[' } else { '(' };
        format!("{}{}, {}]", open, self.lower, self.upper)
    }

    pub fn contains(&self, value: f64) -> bool {
        (value > self.lower || (self.lower_closed && value >= self.lower)) && value <= self.upper
    }
}

/// Target readings grouped by equal-width bins of another reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinnedGrouping {
    /// The binned column.
    pub column: Measurement,
    /// The column whose values are grouped.
    pub target: Measurement,
    /// `bins.len() + 1` ascending edges; empty when `column` had no values.
    pub edges: Vec<f64>,
    pub bins: Vec<Bin>,
}

/// Groups PM2.5 by `bin_count` equal-width bins of `column`.
pub fn binned_grouping(
    frame: &AirQualityFrame,
    column: Measurement,
    bin_count: usize,
) -> Result<BinnedGrouping, AggregationError> {
    binned_grouping_by(frame, column, Measurement::Pm25, bin_count)
}

/// Groups `target` by `bin_count` equal-width bins spanning the observed range
/// of `column`.
///
/// Bins are `(lo, hi]` except the first, which is `[lo, hi]`. A degenerate range
/// (a single observed value) is widened by 0.1% of the value on each side, or
/// by 0.001 when the value is zero. Rows with a missing `column` value are skipped.
pub fn binned_grouping_by(
    frame: &AirQualityFrame,
    column: Measurement,
    target: Measurement,
    bin_count: usize,
) -> Result<BinnedGrouping, AggregationError> {
    if bin_count == 0 {
        return Err(AggregationError::InvalidBinCount(bin_count));
    }

    let keys = frame.measurement_values(column)?;
    let targets = frame.measurement_values(target)?;

    let observed = keys.iter().flatten().copied();
    let Some((min, max)) = observed.fold(None, |range: Option<(f64, f64)>, v| match range {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    }) else {
        debug!("No {} values to bin", column);
        return Ok(BinnedGrouping {
            column,
            target,
            edges: Vec::new(),
            bins: Vec::new(),
        });
    };

    let edges = bin_edges(min, max, bin_count);
    let mut grouped: Vec<Vec<f64>> = vec![Vec::new(); bin_count];
    for (key, value) in keys.iter().zip(&targets) {
        let (Some(key), Some(value)) = (key, value) else {
            continue;
        };
        grouped[bin_index(&edges, *key)].push(*value);
    }

    let bins = grouped
        .into_iter()
        .enumerate()
        .map(|(i, values)| Bin {
            lower: edges[i],
            upper: edges[i + 1],
            lower_closed: i == 0,
            stats: BoxStats::from_values(&values),
            values,
        })
        .collect();

    Ok(BinnedGrouping {
        column,
        target,
        edges,
        bins,
    })
}

fn bin_edges(min: f64, max: f64, bin_count: usize) -> Vec<f64> {
    let (lo, hi) = if min == max {
        let pad = if min == 0.0 { 0.001 } else { min.abs() * 0.001 };
        (min - pad, max + pad)
    } else {
        (min, max)
    };
    let n = bin_count as f64;
    let width = (hi - lo) / n;
    let mut edges: Vec<f64> = (0..bin_count)
        .map(|i| {
            if width.is_finite() {
                lo + width * i as f64
            } else {
                // The span overflows f64; interpolate between the bounds instead.
                let t = i as f64 / n;
                lo * (1.0 - t) + hi * t
            }
        })
        .collect();
    edges.push(hi);
    edges
}

/// Index of the bin holding `value`, given ascending `edges` that span it.
fn bin_index(edges: &[f64], value: f64) -> usize {
    let last = edges.len() - 2;
    let width = edges[1] - edges[0];
    let offset = value - edges[0];
    let position = if offset.is_finite() {
        offset / width
    } else {
        value / width - edges[0] / width
    };
    let mut index = ((position.ceil() - 1.0).max(0.0) as usize).min(last);
    // Floating-point division can land one bin off near an edge.
    while index > 0 && value <= edges[index] {
        index -= 1;
    }
    while index < last && value > edges[index + 1] {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{sample_dataframe, sample_frame};
    use crate::types::filter_selection::FilterSelection;
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn test_temperature_bins_cover_observed_range() -> Result<(), AggregationError> {
        // TEMP spans [-10, 30] in the sample data.
        let grouping = binned_grouping(&sample_frame(), Measurement::Temperature, 10)?;
        assert_eq!(grouping.bins.len(), 10);
        assert_eq!(grouping.edges.first(), Some(&-10.0));
        assert_eq!(grouping.edges.last(), Some(&30.0));
        for bin in &grouping.bins {
            assert!((bin.upper - bin.lower - 4.0).abs() < 1e-9);
        }
        assert!(grouping.bins[0].lower_closed);
        assert!(grouping.bins[1..].iter().all(|b| !b.lower_closed));
        Ok(())
    }

    #[test]
    fn test_values_land_in_right_closed_bins() -> Result<(), AggregationError> {
        let grouping = binned_grouping(&sample_frame(), Measurement::Temperature, 10)?;
        let values: Vec<Vec<f64>> = grouping.bins.iter().map(|b| b.values.clone()).collect();

        // The observed min falls in the closed first bin.
        assert_eq!(values[0], vec![10.0]); // TEMP -10
        assert_eq!(values[2], vec![20.0]); // TEMP 0
        assert_eq!(values[3], vec![60.0]); // TEMP 5
        // TEMP 10 sits on an edge and belongs to (6, 10], but its PM2.5 is missing.
        assert!(values[4].is_empty());
        assert_eq!(grouping.bins[4].stats, None);
        assert!(values[5].is_empty());
        assert_eq!(values[6], vec![80.0]); // TEMP 15
        assert_eq!(values[7], vec![200.0]); // TEMP 20
        assert_eq!(values[9], vec![100.0]); // TEMP 30
        // The row with a missing TEMP is skipped entirely.
        assert_eq!(values.iter().map(Vec::len).sum::<usize>(), 6);
        Ok(())
    }

    #[test]
    fn test_interior_edge_value_goes_to_lower_bin() -> Result<(), AggregationError> {
        // PM10 is present on the row with TEMP 10.
        let grouping =
            binned_grouping_by(&sample_frame(), Measurement::Temperature, Measurement::Pm10, 10)?;
        assert_eq!(grouping.bins[4].label(), "(6, 10]");
        assert_eq!(grouping.bins[4].values, vec![30.0]);
        assert!(grouping.bins[5].values.is_empty());
        Ok(())
    }

    #[test]
    fn test_span_beyond_f64_range_keeps_finite_edges() -> Result<(), Box<dyn std::error::Error>> {
        let mut df = sample_dataframe();
        df.with_column(Series::new(
            "TEMP".into(),
            vec![-1e308, 0.0, 1e308, 0.0, 0.0, 0.0, 0.0, 0.0],
        ))?;
        let frame = AirQualityFrame::try_from_dataframe(df)?;

        let grouping = binned_grouping_by(&frame, Measurement::Temperature, Measurement::Pm10, 10)?;
        assert!(grouping.edges.iter().all(|e| e.is_finite()));
        assert!(grouping.edges.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(grouping.bins[0].values, vec![12.0]); // TEMP -1e308
        assert_eq!(grouping.bins[9].values, vec![30.0]); // TEMP 1e308
        // 0 is the middle edge, so it closes bin 4.
        assert_eq!(grouping.bins[4].values.len(), 6);
        Ok(())
    }

    #[test]
    fn test_zero_bins_is_an_error() {
        let result = binned_grouping(&sample_frame(), Measurement::Temperature, 0);
        assert!(matches!(result, Err(AggregationError::InvalidBinCount(0))));
    }

    #[test]
    fn test_constant_column_is_widened() -> Result<(), AggregationError> {
        // DEWP is 5 on every row.
        let grouping = binned_grouping(&sample_frame(), Measurement::DewPoint, 4)?;
        assert_eq!(grouping.bins.len(), 4);
        assert!((grouping.edges[0] - 4.995).abs() < 1e-9);
        assert!((grouping.edges[4] - 5.005).abs() < 1e-9);
        let total: usize = grouping.bins.iter().map(|b| b.values.len()).sum();
        assert_eq!(total, 7);
        Ok(())
    }

    #[test]
    fn test_all_missing_column_has_no_bins() -> Result<(), AggregationError> {
        let grouping = binned_grouping(&sample_frame(), Measurement::Co, 10)?;
        assert!(grouping.bins.is_empty());
        assert!(grouping.edges.is_empty());

        let empty = sample_frame().filter_rows(&FilterSelection::default())?;
        assert!(binned_grouping(&empty, Measurement::Pressure, 10)?.bins.is_empty());
        Ok(())
    }

    #[test]
    fn test_box_stats_interpolate_quantiles() {
        let stats = BoxStats::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert_eq!(stats.max, 4.0);
        assert_eq!(BoxStats::from_values(&[]), None);
    }

    #[test]
    fn test_bin_labels() {
        let bin = Bin {
            lower: -2.0,
            upper: 2.0,
            lower_closed: false,
            values: Vec::new(),
            stats: None,
        };
        assert_eq!(bin.label(), "(-2, 2]");
        assert!(!bin.contains(-2.0));
        assert!(bin.contains(2.0));

        let first = Bin {
            lower_closed: true,
            ..bin
        };
        assert_eq!(first.label(), "[-2, 2]");
        assert!(first.contains(-2.0));
    }
}
