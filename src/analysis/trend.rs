// Trend detection by ordinary least squares
//
// Fits metric = slope * days + intercept, with days counted from the
// topic's earliest dated video. Significance is 1 - R² (lower means the
// line explains more of the variance). This is a goodness-of-fit proxy,
// not a p-value.

use crate::analysis::config::EngineConfig;
use crate::video::parse_timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Significance reported when there is no usable signal
pub const NO_SIGNAL: f64 = 1.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Declining,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fitted trend for one topic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendEstimate {
    /// Metric change per day
    pub slope: f64,
    /// 1 - R², in [0, 1]; `NO_SIGNAL` when no fit was possible
    pub significance: f64,
    pub direction: TrendDirection,
    /// Dated points that went into the fit
    pub samples_used: usize,
}

impl TrendEstimate {
    fn no_signal(samples_used: usize) -> Self {
        Self {
            slope: 0.0,
            significance: NO_SIGNAL,
            direction: TrendDirection::Stable,
            samples_used,
        }
    }

    /// True when the fit clears the configured significance threshold
    pub fn is_noteworthy(&self, config: &EngineConfig) -> bool {
        self.significance < config.trend_significance_threshold
    }
}

/// Estimate a topic's trend from parallel metric / timestamp lists
///
/// Videos with a missing or unparsable timestamp are dropped from the fit;
/// defaulting them to "now" would manufacture a trend. Fewer than
/// `trend_min_samples` dated videos, or all on the same instant, gives a
/// stable no-signal estimate.
pub fn estimate_trend(
    values: &[f64],
    timestamps: &[Option<String>],
    config: &EngineConfig,
) -> TrendEstimate {
    let dated: Vec<(i64, f64)> = values
        .iter()
        .zip(timestamps)
        .filter_map(|(&value, raw)| {
            raw.as_deref()
                .and_then(parse_timestamp)
                .map(|ts| (ts.timestamp(), value))
        })
        .collect();

    let dropped = values.len().min(timestamps.len()) - dated.len();
    if dropped > 0 {
        tracing::debug!(dropped, "dropped undated videos from trend fit");
    }

    if dated.len() < config.trend_min_samples {
        return TrendEstimate::no_signal(dated.len());
    }

    let Some(earliest) = dated.iter().map(|(ts, _)| *ts).min() else {
        return TrendEstimate::no_signal(0);
    };

    let points: Vec<(f64, f64)> = dated
        .iter()
        .map(|&(ts, value)| ((ts - earliest) as f64 / SECONDS_PER_DAY, value))
        .collect();

    let Some((slope, significance)) = fit_line(&points) else {
        return TrendEstimate::no_signal(points.len());
    };

    let direction = if significance < config.trend_significance_threshold {
        if slope > 0.0 {
            TrendDirection::Rising
        } else if slope < 0.0 {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        }
    } else {
        TrendDirection::Stable
    };

    TrendEstimate {
        slope,
        significance,
        direction,
        samples_used: points.len(),
    }
}

/// Least-squares slope and 1 - R² for `(x, y)` points
///
/// Returns `None` when x has no spread. A flat y gives the slope with
/// `NO_SIGNAL`, since R² is undefined there.
pub fn fit_line(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let n = points.len() as f64;
    if points.len() < 2 {
        return None;
    }

    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let sxx: f64 = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }

    let sxy: f64 = points
        .iter()
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let ss_tot: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
    if ss_tot == 0.0 {
        return Some((slope, NO_SIGNAL));
    }

    let ss_res: f64 = points
        .iter()
        .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
        .sum();

    let r_squared = 1.0 - ss_res / ss_tot;
    Some((slope, (1.0 - r_squared).clamp(0.0, 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamps(dates: &[&str]) -> Vec<Option<String>> {
        dates.iter().map(|d| Some(d.to_string())).collect()
    }

    #[test]
    fn test_declining_trend_is_detected() {
        let config = EngineConfig::default();
        let values = [20_000.0, 17_000.0, 14_000.0, 11_000.0, 8_000.0];
        let dates = stamps(&[
            "2024-01-01",
            "2024-02-01",
            "2024-03-01",
            "2024-04-01",
            "2024-05-01",
        ]);

        let trend = estimate_trend(&values, &dates, &config);
        assert!(trend.slope < 0.0);
        assert!(trend.significance < 0.1, "significance {}", trend.significance);
        assert_eq!(trend.direction, TrendDirection::Declining);
        assert!(trend.is_noteworthy(&config));
        assert_eq!(trend.samples_used, 5);
    }

    #[test]
    fn test_rising_trend_is_detected() {
        let config = EngineConfig::default();
        let values = [1_000.0, 2_000.0, 3_000.0, 4_000.0];
        let dates = stamps(&["2024-01-01", "2024-01-11", "2024-01-21", "2024-01-31"]);

        let trend = estimate_trend(&values, &dates, &config);
        assert!((trend.slope - 100.0).abs() < 1e-9);
        assert!(trend.significance < 1e-9);
        assert_eq!(trend.direction, TrendDirection::Rising);
    }

    #[test]
    fn test_noisy_series_is_stable() {
        let config = EngineConfig::default();
        let values = [5_000.0, 9_000.0, 4_000.0, 8_500.0, 5_500.0];
        let dates = stamps(&[
            "2024-01-01",
            "2024-02-01",
            "2024-03-01",
            "2024-04-01",
            "2024-05-01",
        ]);

        let trend = estimate_trend(&values, &dates, &config);
        assert!(trend.significance > 0.1);
        assert_eq!(trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_too_few_dated_points_is_no_signal() {
        let config = EngineConfig::default();
        let values = [1_000.0, 2_000.0, 3_000.0];
        let dates = vec![
            Some("2024-01-01".to_string()),
            None,
            Some("not a date".to_string()),
        ];

        let trend = estimate_trend(&values, &dates, &config);
        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.significance, NO_SIGNAL);
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.samples_used, 1);
    }

    #[test]
    fn test_undated_points_are_dropped_not_defaulted() {
        let config = EngineConfig::default();
        // Without the undated 0-view video the series is a clean rise
        let values = [1_000.0, 2_000.0, 3_000.0, 0.0];
        let dates = vec![
            Some("2024-01-01".to_string()),
            Some("2024-01-02".to_string()),
            Some("2024-01-03".to_string()),
            None,
        ];

        let trend = estimate_trend(&values, &dates, &config);
        assert_eq!(trend.samples_used, 3);
        assert_eq!(trend.direction, TrendDirection::Rising);
    }

    #[test]
    fn test_same_day_uploads_have_no_signal() {
        let config = EngineConfig::default();
        let values = [1_000.0, 5_000.0, 9_000.0];
        let dates = stamps(&["2024-01-01", "2024-01-01", "2024-01-01"]);

        let trend = estimate_trend(&values, &dates, &config);
        assert_eq!(trend.significance, NO_SIGNAL);
        assert_eq!(trend.slope, 0.0);
    }

    #[test]
    fn test_flat_series_has_no_signal() {
        let config = EngineConfig::default();
        let values = [700.0, 700.0, 700.0];
        let dates = stamps(&["2024-01-01", "2024-02-01", "2024-03-01"]);

        let trend = estimate_trend(&values, &dates, &config);
        assert_eq!(trend.significance, NO_SIGNAL);
        assert_eq!(trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_fit_line_rejects_degenerate_x() {
        assert!(fit_line(&[(1.0, 2.0)]).is_none());
        assert!(fit_line(&[(1.0, 2.0), (1.0, 3.0)]).is_none());
    }
}
