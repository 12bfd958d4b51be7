// Channel-relative normalization
//
// z-scores place a topic against the channel baseline; Bayesian shrinkage
// pulls small topics toward the channel mean so one viral upload cannot
// make a topic look like a sure thing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative performance band from a z-score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    Exceptional,
    Strong,
    Average,
    Weak,
    Poor,
}

impl PerformanceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exceptional => "exceptional",
            Self::Strong => "strong",
            Self::Average => "average",
            Self::Weak => "weak",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard deviations between the topic mean and the channel mean
///
/// 0 when the channel has no spread.
pub fn z_score(topic_mean: f64, channel_mean: f64, channel_std: f64) -> f64 {
    if channel_std > 0.0 {
        (topic_mean - channel_mean) / channel_std
    } else {
        0.0
    }
}

/// Shrink an observed mean toward the channel mean
///
/// `(n * observed + k * prior) / (n + k)`: `prior_strength` (k) is the
/// number of virtual channel-average videos blended in. Sample size is a
/// float so the limits (n -> 0, n -> inf) can be probed directly.
pub fn bayesian_smooth(observed_mean: f64, n: f64, prior_mean: f64, prior_strength: f64) -> f64 {
    let total_weight = n + prior_strength;
    if total_weight <= 0.0 {
        return prior_mean;
    }
    (n * observed_mean + prior_strength * prior_mean) / total_weight
}

/// Percentage deviation of a (smoothed) mean from the channel mean
pub fn vs_channel_pct(mean: f64, channel_mean: f64) -> f64 {
    if channel_mean > 0.0 {
        (mean - channel_mean) / channel_mean * 100.0
    } else {
        0.0
    }
}

/// Percentile rank of a z-score under the standard normal
///
/// Abramowitz-Stegun 26.2.17 approximation of the normal CDF, accurate to
/// about 1e-7. Returns a value in [0, 100].
pub fn percentile_rank(z: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.231_641_9 * z.abs());
    let density = 0.398_942_3 * (-z * z / 2.0).exp();
    let tail = density
        * t
        * (0.319_381_5 + t * (-0.356_563_8 + t * (1.781_478 + t * (-1.821_256 + t * 1.330_274))));

    let percentile = if z > 0.0 { 1.0 - tail } else { tail };
    (percentile * 100.0).clamp(0.0, 100.0)
}
