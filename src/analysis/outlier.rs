// IQR outlier detection
//
// Quartiles are read positionally from the sorted sample (index n/4 and
// 3n/4), not interpolated. That is cruder than a proper quantile estimator
// but it is what the category thresholds were tuned against.

/// Result of an IQR outlier pass
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierReport {
    pub q1: f64,
    pub q3: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Flagged values, in input order
    pub outliers: Vec<f64>,
}

impl OutlierReport {
    pub fn count(&self) -> usize {
        self.outliers.len()
    }
}

/// Positional first and third quartiles of an ascending slice
///
/// Returns `None` for an empty slice.
pub fn positional_quartiles(sorted: &[f64]) -> Option<(f64, f64)> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    Some((sorted[n / 4], sorted[(3 * n) / 4]))
}

/// Flag values outside `[Q1 - k*IQR, Q3 + k*IQR]`
///
/// Returns `None` when there are fewer than `min_samples` values: with
/// three points a quartile split says nothing.
pub fn detect_outliers(values: &[f64], multiplier: f64, min_samples: usize) -> Option<OutlierReport> {
    if values.len() < min_samples.max(1) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let (q1, q3) = positional_quartiles(&sorted)?;
    let iqr = q3 - q1;
    let lower_fence = q1 - multiplier * iqr;
    let upper_fence = q3 + multiplier * iqr;

    let outliers = values
        .iter()
        .copied()
        .filter(|&v| v < lower_fence || v > upper_fence)
        .collect();

    Some(OutlierReport {
        q1,
        q3,
        lower_fence,
        upper_fence,
        outliers,
    })
}

/// Outlier count, 0 when the sample is too small to test
pub fn outlier_count(values: &[f64], multiplier: f64, min_samples: usize) -> usize {
    detect_outliers(values, multiplier, min_samples).map_or(0, |report| report.count())
}
