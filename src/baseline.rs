//! Channel-wide baseline statistics
//!
//! Every topic is judged against the channel as a whole. The baseline is
//! built once per run from all videos with a positive metric; videos at 0
//! (private, not yet counted) would only drag the mean down.

use crate::analysis::descriptive::{centered, sample_std_dev};
use crate::analysis::outlier::positional_quartiles;
use crate::error::{AnalysisError, Result};
use crate::video::VideoMetric;
use serde::{Deserialize, Serialize};

/// Fraction of the mean used as std dev when the channel shows no spread
pub const FALLBACK_STD_RATIO: f64 = 0.5;

/// Mean and spread of the channel's metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelBaseline {
    pub mean: f64,
    pub std_dev: f64,
    /// Videos the baseline was computed from (0 when supplied by a caller)
    #[serde(default)]
    pub sample_size: usize,
}

impl ChannelBaseline {
    /// Baseline from precomputed figures
    ///
    /// # Errors
    /// `ChannelBaselineMissing` when the mean is not positive, since every
    /// z-score and percentage would collapse to 0. `InvalidInput` for a
    /// negative or non-finite spread. A zero spread falls back to half the
    /// mean, as in [`ChannelBaseline::from_metrics`].
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        if !mean.is_finite() || mean <= 0.0 {
            return Err(AnalysisError::ChannelBaselineMissing);
        }
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "channel std dev must be finite and non-negative, got {}",
                std_dev
            )));
        }
        Ok(Self {
            mean,
            std_dev: if std_dev > 0.0 {
                std_dev
            } else {
                mean * FALLBACK_STD_RATIO
            },
            sample_size: 0,
        })
    }

    /// Baseline from raw metric values (non-positive values are ignored)
    ///
    /// With a single value, or no spread at all, std dev falls back to half
    /// the mean so z-scores stay defined.
    pub fn from_metrics(values: &[f64]) -> Result<Self> {
        let positive = positive_metrics(values);
        if positive.is_empty() {
            return Err(AnalysisError::ChannelBaselineMissing);
        }

        let n = positive.len();
        let mean = positive.iter().sum::<f64>() / n as f64;
        let constant = positive.iter().all(|&v| v == positive[0]);
        let sample_std = if constant {
            0.0
        } else {
            sample_std_dev(&centered(&positive, mean), n)?
        };

        let std_dev = if sample_std > 0.0 {
            sample_std
        } else {
            mean * FALLBACK_STD_RATIO
        };

        Ok(Self {
            mean,
            std_dev,
            sample_size: n,
        })
    }

    /// Baseline from a catalog
    pub fn from_videos(videos: &[VideoMetric]) -> Result<Self> {
        let values: Vec<f64> = videos.iter().map(|v| v.metric_value).collect();
        Self::from_metrics(&values)
    }
}

/// Descriptive summary of the channel's metric distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub min: f64,
    pub max: f64,
}

impl ChannelSummary {
    /// Summarize positive metrics; `None` when there are none
    pub fn from_metrics(values: &[f64]) -> Option<Self> {
        let mut sorted = positive_metrics(values);
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };
        let std_dev = if n > 1 {
            (sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0)).sqrt()
        } else {
            0.0
        };
        let (q1, q3) = positional_quartiles(&sorted)?;

        Some(Self {
            count: n,
            mean,
            median,
            std_dev,
            q1,
            q3,
            iqr: q3 - q1,
            min: sorted[0],
            max: sorted[n - 1],
        })
    }
}

fn positive_metrics(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_from_metrics() {
        let baseline = ChannelBaseline::from_metrics(&[5_000.0, 10_000.0, 15_000.0]).unwrap();
        assert!((baseline.mean - 10_000.0).abs() < 1e-3);
        assert!((baseline.std_dev - 5_000.0).abs() < 1e-2);
        assert_eq!(baseline.sample_size, 3);
    }

    #[test]
    fn test_baseline_ignores_zero_metrics() {
        let baseline = ChannelBaseline::from_metrics(&[0.0, 0.0, 4_000.0, 6_000.0]).unwrap();
        assert!((baseline.mean - 5_000.0).abs() < 1e-3);
        assert_eq!(baseline.sample_size, 2);
    }

    #[test]
    fn test_baseline_large_metrics_keep_spread() {
        let values: Vec<f64> = (0..20).map(|i| 2_000_000.0 + 100.0 * i as f64).collect();
        let baseline = ChannelBaseline::from_metrics(&values).unwrap();

        assert!((baseline.mean - 2_000_950.0).abs() < 1e-6);
        assert!((baseline.std_dev - 591.607_978).abs() < 1e-2);
    }

    #[test]
    fn test_baseline_single_value_falls_back() {
        let baseline = ChannelBaseline::from_metrics(&[8_000.0]).unwrap();
        assert_eq!(baseline.mean, 8_000.0);
        assert_eq!(baseline.std_dev, 4_000.0);
    }

    #[test]
    fn test_baseline_no_spread_falls_back() {
        let baseline = ChannelBaseline::from_metrics(&[2_000.0; 5]).unwrap();
        assert_eq!(baseline.std_dev, 1_000.0);
    }

    #[test]
    fn test_baseline_missing() {
        assert_eq!(
            ChannelBaseline::from_metrics(&[]),
            Err(AnalysisError::ChannelBaselineMissing)
        );
        assert_eq!(
            ChannelBaseline::from_metrics(&[0.0, 0.0]),
            Err(AnalysisError::ChannelBaselineMissing)
        );
        assert_eq!(
            ChannelBaseline::new(0.0, 10.0),
            Err(AnalysisError::ChannelBaselineMissing)
        );
    }

    #[test]
    fn test_baseline_new_validates_spread() {
        assert!(ChannelBaseline::new(10_000.0, 5_000.0).is_ok());
        assert_eq!(ChannelBaseline::new(10_000.0, 0.0).unwrap().std_dev, 5_000.0);
        assert!(matches!(
            ChannelBaseline::new(10_000.0, -1.0),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_channel_summary() {
        let summary =
            ChannelSummary::from_metrics(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();

        assert_eq!(summary.count, 8);
        assert_eq!(summary.mean, 4.5);
        assert_eq!(summary.median, 4.5);
        assert_eq!(summary.q1, 3.0);
        assert_eq!(summary.q3, 7.0);
        assert_eq!(summary.iqr, 4.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 8.0);
        assert!(ChannelSummary::from_metrics(&[0.0]).is_none());
    }
}
