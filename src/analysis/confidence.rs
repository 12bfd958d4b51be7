// Approximate 95% confidence intervals and sample-size confidence levels
//
// The multiplier is a fixed stand-in for the Student's t critical value:
// 1.96 for n >= 30, 2.26 below. A lookup table would be more exact; the
// category thresholds were tuned against the two-constant form.

use crate::analysis::config::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse trust in a topic's numbers, from sample size alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// Classify by sample size against the configured thresholds
    pub fn from_sample_size(n: usize, config: &EngineConfig) -> Self {
        if n >= config.high_confidence_min {
            Self::High
        } else if n >= config.medium_confidence_min {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approximate 95% interval for a topic mean
///
/// `mean ± multiplier * std_dev / sqrt(n)`. With one observation there is
/// no spread estimate, so the interval is a heuristic band of
/// `single_sample_interval_ratio` around the value.
///
/// The low bound never exceeds the mean and the high bound never falls
/// below it.
pub fn confidence_interval(mean: f64, std_dev: f64, n: usize, config: &EngineConfig) -> (f64, f64) {
    if n <= 1 {
        let half_width = (mean * config.single_sample_interval_ratio).abs();
        return (mean - half_width, mean + half_width);
    }

    let standard_error = std_dev.abs() / (n as f64).sqrt();
    let multiplier = if n >= config.large_sample_threshold {
        config.large_sample_multiplier
    } else {
        config.small_sample_multiplier
    };

    let margin = multiplier * standard_error;
    (mean - margin, mean + margin)
}
