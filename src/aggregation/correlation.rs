use crate::aggregation::error::AggregationError;
use crate::types::air_quality_frame::AirQualityFrame;
use crate::types::measurement::Measurement;
use serde::Serialize;

/// Pairwise Pearson correlations between a set of readings.
///
/// `values[i][j]` is the coefficient between `columns[i]` and `columns[j]`.
/// The matrix is symmetric; an entry is `None` when it is undefined for the
/// filtered rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<Measurement>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: Measurement, b: Measurement) -> Option<f64> {
        let i = self.columns.iter().position(|m| *m == a)?;
        let j = self.columns.iter().position(|m| *m == b)?;
        self.values[i][j]
    }
}

/// Pearson correlation over the rows where both values are present.
///
/// Returns `None` with fewer than two complete pairs, or when either side has
/// zero variance over those pairs. The result is clamped to `[-1, 1]`.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    let r = cov / (var_x.sqrt() * var_y.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Correlation matrix of `columns` over the rows of `frame`.
pub fn correlation_matrix(
    frame: &AirQualityFrame,
    columns: &[Measurement],
) -> Result<CorrelationMatrix, AggregationError> {
    let series = columns
        .iter()
        .map(|m| frame.measurement_values(*m))
        .collect::<Result<Vec<_>, _>>()?;

    let mut values = vec![vec![None; columns.len()]; columns.len()];
    for i in 0..columns.len() {
        for j in i..columns.len() {
            let r = if i == j {
                // Self-correlation is 1 whenever the column is not constant.
                pearson(&series[i], &series[i]).map(|_| 1.0)
            } else {
                pearson(&series[i], &series[j])
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    })
}
