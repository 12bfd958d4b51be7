//! Recency weighting
//!
//! Recent uploads reflect what a creator is doing now, so they count for
//! more in "current" averages. Every weight lies in `[floor, 1.0]`; old
//! content still contributes, it just stops dominating.
//!
//! Three interchangeable variants:
//! - `rank_weight`: stepped quartiles by catalog rank (1.0 / 0.7 / 0.4 / 0.2)
//! - `smooth_rank_weight`: exponential decay by rank, oldest item lands on the floor
//! - `timestamp_weight`: piecewise-linear decay by age in days

use crate::video::{parse_timestamp, VideoMetric};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weight given to a video whose publish date is missing or unparsable
pub const UNKNOWN_DATE_WEIGHT: f64 = 0.3;

/// Lowest weight any variant produces by default
pub const DEFAULT_FLOOR: f64 = 0.2;

/// Which recency variant the engine uses for weighted averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecencyMode {
    /// Age in days relative to the run's reference time
    #[default]
    Timestamp,
    /// Stepped quartiles of `catalog_position`
    Rank,
    /// Exponential decay over `catalog_position`
    SmoothRank,
}

/// Stepped weight from a 0-based recency rank (0 = newest)
///
/// Newest quarter gets 1.0, then 0.7, 0.4 and 0.2 for the oldest quarter.
pub fn rank_weight(position: usize, total: usize) -> f64 {
    if total <= 1 {
        return 1.0;
    }

    let ratio = rank_ratio(position, total);
    if ratio <= 0.25 {
        1.0
    } else if ratio <= 0.50 {
        0.7
    } else if ratio <= 0.75 {
        0.4
    } else {
        0.2
    }
}

/// Exponential decay from 1.0 (newest) to exactly `floor` (oldest)
///
/// `weight = exp(-k * ratio)` with `k = -ln(floor)`.
pub fn smooth_rank_weight(position: usize, total: usize, floor: f64) -> f64 {
    if total <= 1 {
        return 1.0;
    }

    let k = -floor.clamp(f64::MIN_POSITIVE, 1.0).ln();
    (-k * rank_ratio(position, total)).exp()
}

fn rank_ratio(position: usize, total: usize) -> f64 {
    (position.min(total - 1) as f64) / ((total - 1) as f64)
}

/// Weight from publish age
///
/// | age (days) | weight                     |
/// |------------|----------------------------|
/// | <= 30      | 1.0                        |
/// | 30 - 90    | 1.0 -> 0.85                |
/// | 90 - 180   | 0.85 -> 0.65               |
/// | 180 - 365  | 0.65 -> 0.40               |
/// | > 365      | 0.40 -> 0.20 over a year, then 0.20 |
///
/// Future dates count as brand new.
pub fn timestamp_weight(published_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let days = (now - published_at).num_days();
    if days <= 30 {
        return 1.0;
    }

    let days = days as f64;
    if days <= 90.0 {
        1.0 - (days - 30.0) / 60.0 * 0.15
    } else if days <= 180.0 {
        0.85 - (days - 90.0) / 90.0 * 0.20
    } else if days <= 365.0 {
        0.65 - (days - 180.0) / 185.0 * 0.25
    } else {
        (0.40 - (days - 365.0) / 365.0 * 0.20).max(DEFAULT_FLOOR)
    }
}

/// Timestamp weight from a raw ISO-8601 string
///
/// Missing or unparsable dates are treated as moderately old
/// (`unknown_weight`), not as errors.
pub fn raw_timestamp_weight(raw: Option<&str>, now: DateTime<Utc>, unknown_weight: f64) -> f64 {
    raw.and_then(parse_timestamp)
        .map(|published| timestamp_weight(published, now))
        .unwrap_or(unknown_weight)
}

/// Assign `catalog_position` newest-first from publish dates
///
/// Undated videos sort after every dated one, keeping their input order.
pub fn rank_by_date(videos: &mut [VideoMetric]) {
    let mut order: Vec<(usize, Option<DateTime<Utc>>)> = videos
        .iter()
        .enumerate()
        .map(|(idx, v)| (idx, v.published_date()))
        .collect();

    // None < Some, so reversing puts undated last; sort_by is stable
    order.sort_by(|a, b| b.1.cmp(&a.1));

    for (rank, (idx, _)) in order.into_iter().enumerate() {
        videos[idx].catalog_position = rank;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        parse_timestamp("2025-06-01T00:00:00Z").unwrap()
    }

    #[test]
    fn test_rank_weight_quartiles() {
        assert_eq!(rank_weight(0, 9), 1.0);
        assert_eq!(rank_weight(2, 9), 1.0); // ratio 0.25
        assert_eq!(rank_weight(3, 9), 0.7);
        assert_eq!(rank_weight(5, 9), 0.4);
        assert_eq!(rank_weight(8, 9), 0.2);
    }

    #[test]
    fn test_rank_weight_single_item() {
        assert_eq!(rank_weight(0, 1), 1.0);
        assert_eq!(rank_weight(0, 0), 1.0);
    }

    #[test]
    fn test_smooth_rank_weight_endpoints() {
        assert!((smooth_rank_weight(0, 10, 0.2) - 1.0).abs() < 1e-12);
        assert!((smooth_rank_weight(9, 10, 0.2) - 0.2).abs() < 1e-12);

        let mid = smooth_rank_weight(5, 10, 0.2);
        assert!(mid < 1.0 && mid > 0.2);
    }

    #[test]
    fn test_smooth_rank_weight_is_monotonic() {
        let weights: Vec<f64> = (0..20).map(|p| smooth_rank_weight(p, 20, 0.2)).collect();
        assert!(weights.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_timestamp_weight_breakpoints() {
        let now = now();
        assert_eq!(timestamp_weight(now - Duration::days(10), now), 1.0);
        assert_eq!(timestamp_weight(now - Duration::days(30), now), 1.0);
        assert!((timestamp_weight(now - Duration::days(90), now) - 0.85).abs() < 1e-9);
        assert!((timestamp_weight(now - Duration::days(180), now) - 0.65).abs() < 1e-9);
        assert!((timestamp_weight(now - Duration::days(365), now) - 0.40).abs() < 1e-9);
        assert_eq!(timestamp_weight(now - Duration::days(2000), now), 0.2);
    }

    #[test]
    fn test_timestamp_weight_future_is_new() {
        let now = now();
        assert_eq!(timestamp_weight(now + Duration::days(5), now), 1.0);
    }

    #[test]
    fn test_timestamp_weight_stays_in_bounds() {
        let now = now();
        for days in (0..1500).step_by(7) {
            let w = timestamp_weight(now - Duration::days(days), now);
            assert!((0.2..=1.0).contains(&w), "day {} gave {}", days, w);
        }
    }

    #[test]
    fn test_raw_timestamp_weight_unknown() {
        let now = now();
        assert_eq!(raw_timestamp_weight(None, now, UNKNOWN_DATE_WEIGHT), 0.3);
        assert_eq!(
            raw_timestamp_weight(Some("not a date"), now, UNKNOWN_DATE_WEIGHT),
            0.3
        );
        assert_eq!(
            raw_timestamp_weight(Some("2025-05-25"), now, UNKNOWN_DATE_WEIGHT),
            1.0
        );
    }

    #[test]
    fn test_rank_by_date_newest_first_undated_last() {
        let mut videos = vec![
            VideoMetric::new("old", 1.0).published("2023-01-01"),
            VideoMetric::new("undated", 1.0),
            VideoMetric::new("new", 1.0).published("2025-01-01"),
            VideoMetric::new("mid", 1.0).published("2024-01-01"),
        ];

        rank_by_date(&mut videos);

        let position = |title: &str| {
            videos
                .iter()
                .find(|v| v.title == title)
                .map(|v| v.catalog_position)
                .unwrap()
        };
        assert_eq!(position("new"), 0);
        assert_eq!(position("mid"), 1);
        assert_eq!(position("old"), 2);
        assert_eq!(position("undated"), 3);
    }
}
