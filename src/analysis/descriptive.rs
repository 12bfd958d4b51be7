// Descriptive statistics for one topic's metric list
//
// The mean is an f64 sum. Spread, min, max and median run on the
// deviations from that mean: std dev, min and max on trueno::Vector, the
// median on aprender's DescriptiveStats (R-7 quantile). Both backends work
// in f32, which on centered data keeps the spread exact to about 1e-6
// relative, whatever the magnitude of the metric.

use crate::error::{AnalysisError, Result};
use aprender::stats::DescriptiveStats;
use trueno::Vector;

/// Summary statistics for a single topic
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptive {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample std dev (n - 1); the channel fallback when n = 1
    pub std_dev: f64,
    /// std_dev / mean * 100, 0 when the mean is 0
    pub coefficient_of_variation: f64,
    pub min: f64,
    pub max: f64,
    /// Recency-weighted mean
    pub weighted_avg: f64,
}

/// Compute descriptive statistics for a topic
///
/// # Arguments
/// * `values` - metric per video, at least one
/// * `weights` - recency weight per video, parallel to `values`
/// * `single_sample_std` - std dev to report when there is only one video
///
/// # Errors
/// `InvalidInput` for an empty list, mismatched weights, or a negative /
/// non-finite metric. An empty topic means the aggregation step is broken,
/// so this fails loudly instead of reporting zeros.
pub fn describe(values: &[f64], weights: &[f64], single_sample_std: f64) -> Result<Descriptive> {
    if values.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "cannot describe an empty metric list".to_string(),
        ));
    }

    if weights.len() != values.len() {
        return Err(AnalysisError::InvalidInput(format!(
            "expected {} recency weights, got {}",
            values.len(),
            weights.len()
        )));
    }

    if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(AnalysisError::InvalidInput(format!(
            "metric values must be finite and non-negative, got {}",
            bad
        )));
    }

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let deviations = centered(values, mean);

    let low = backend(deviations.min(), "min")? as f64;
    let high = backend(deviations.max(), "max")? as f64;

    // Constant samples short-circuit: the f64 mean can sit an ulp off the
    // value, which would show up as a tiny non-zero spread
    if low == high {
        let value = values[0];
        let std_dev = if n == 1 { single_sample_std } else { 0.0 };
        return Ok(Descriptive {
            count: n,
            mean: value,
            median: value,
            std_dev,
            coefficient_of_variation: if value > 0.0 { std_dev / value * 100.0 } else { 0.0 },
            min: value,
            max: value,
            weighted_avg: weighted_mean(values, weights, value),
        });
    }

    let (min, max) = (mean + low, mean + high);
    let std_dev = sample_std_dev(&deviations, n)?;
    let median = mean + median(&deviations)?;

    let coefficient_of_variation = if mean > 0.0 {
        std_dev / mean * 100.0
    } else {
        0.0
    };

    Ok(Descriptive {
        count: n,
        mean,
        median,
        std_dev,
        coefficient_of_variation,
        min,
        max,
        weighted_avg: weighted_mean(values, weights, mean),
    })
}

/// Weighted arithmetic mean, `fallback` when the weights sum to zero
pub fn weighted_mean(values: &[f64], weights: &[f64], fallback: f64) -> f64 {
    let total_weight: f64 = weights.iter().sum();
    if total_weight <= 0.0 {
        return fallback;
    }

    values
        .iter()
        .zip(weights)
        .map(|(value, weight)| value * weight)
        .sum::<f64>()
        / total_weight
}

/// Deviations from an f64 mean, as the f32 vector trueno works on
///
/// trueno computes variance as E[x²] - μ² in f32. On raw view counts that
/// difference cancels to zero once values pass a few hundred thousand, so
/// every spread statistic runs on centered data.
pub(crate) fn centered(values: &[f64], mean: f64) -> Vector<f32> {
    let deviations: Vec<f32> = values.iter().map(|&v| (v - mean) as f32).collect();
    Vector::from_slice(&deviations)
}

/// Sample std dev (n - 1) of centered data, 0 below two samples
pub(crate) fn sample_std_dev(deviations: &Vector<f32>, n: usize) -> Result<f64> {
    if n < 2 {
        return Ok(0.0);
    }
    // trueno's stddev is the population form
    let population_std = backend(deviations.stddev(), "stddev")? as f64;
    Ok(population_std * (n as f64 / (n as f64 - 1.0)).sqrt())
}

/// Median via aprender's quantile(0.5)
fn median(vector: &Vector<f32>) -> Result<f64> {
    let stats = DescriptiveStats::new(vector);
    stats
        .quantile(0.5)
        .map(f64::from)
        .map_err(|e| AnalysisError::Numeric(format!("Failed to compute median: {}", e)))
}

fn backend<E: std::fmt::Display>(
    result: std::result::Result<f32, E>,
    what: &str,
) -> Result<f32> {
    result.map_err(|e| AnalysisError::Numeric(format!("Failed to compute {}: {}", what, e)))
}
