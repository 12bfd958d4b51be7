// Per-topic statistical profile
//
// Runs descriptive stats, outliers, confidence, trend and normalization
// for one topic. Each piece is independent; the categorizer consumes the
// assembled profile.

use crate::aggregate::TopicGroup;
use crate::analysis::categorizer::{Category, Rationale};
use crate::analysis::confidence::{confidence_interval, ConfidenceLevel};
use crate::analysis::config::EngineConfig;
use crate::analysis::descriptive::describe;
use crate::analysis::normalize::{
    bayesian_smooth, percentile_rank, vs_channel_pct, z_score, PerformanceTier,
};
use crate::analysis::outlier::outlier_count;
use crate::analysis::trend::{estimate_trend, TrendDirection};
use crate::baseline::ChannelBaseline;
use crate::error::Result;
use crate::video::VideoRef;
use serde::{Deserialize, Serialize};

/// Every statistic for one topic, before categorization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicProfile {
    pub topic: String,
    pub video_count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub coefficient_of_variation: f64,
    pub min: f64,
    pub max: f64,
    pub weighted_avg_metric: f64,
    /// Mean shrunk toward the channel mean
    pub smoothed_mean: f64,
    /// Smoothed mean as a percentage deviation from the channel mean
    pub vs_channel_avg: f64,
    pub z_score: f64,
    /// Normal-CDF percentile of the z-score
    pub percentile: f64,
    pub confidence_interval: (f64, f64),
    pub confidence_level: ConfidenceLevel,
    pub outlier_count: usize,
    pub trend_slope: f64,
    pub trend_direction: TrendDirection,
    pub trend_significance: f64,
    pub performance_tier: PerformanceTier,
    pub videos: Vec<VideoRef>,
}

impl TopicProfile {
    /// Profile a topic group against the channel baseline
    ///
    /// `weights` are recency weights parallel to `group.metrics`.
    ///
    /// # Errors
    /// `InvalidInput` for an empty group or mismatched weights.
    pub fn build(
        topic: &str,
        group: &TopicGroup,
        weights: &[f64],
        baseline: &ChannelBaseline,
        config: &EngineConfig,
    ) -> Result<Self> {
        let single_sample_std = baseline.std_dev * config.single_sample_std_ratio;
        let stats = describe(&group.metrics, weights, single_sample_std)?;
        let n = stats.count;

        let outliers = outlier_count(&group.metrics, config.iqr_multiplier, config.outlier_min_samples);
        let confidence_interval = confidence_interval(stats.mean, stats.std_dev, n, config);
        let confidence_level = ConfidenceLevel::from_sample_size(n, config);
        let trend = estimate_trend(&group.metrics, &group.timestamps, config);

        let z = z_score(stats.mean, baseline.mean, baseline.std_dev);
        let smoothed_mean = bayesian_smooth(stats.mean, n as f64, baseline.mean, config.prior_strength);

        if n < config.medium_confidence_min {
            tracing::debug!(topic, n, "small topic: wide interval, no outlier pass");
        }

        Ok(Self {
            topic: topic.to_string(),
            video_count: n,
            mean: stats.mean,
            median: stats.median,
            std_dev: stats.std_dev,
            coefficient_of_variation: stats.coefficient_of_variation,
            min: stats.min,
            max: stats.max,
            weighted_avg_metric: stats.weighted_avg,
            smoothed_mean,
            vs_channel_avg: vs_channel_pct(smoothed_mean, baseline.mean),
            z_score: z,
            percentile: percentile_rank(z),
            confidence_interval,
            confidence_level,
            outlier_count: outliers,
            trend_slope: trend.slope,
            trend_direction: trend.direction,
            trend_significance: trend.significance,
            performance_tier: config.tier_table.classify(z),
            videos: group.videos.iter().map(VideoRef::from).collect(),
        })
    }
}

/// A categorized topic: the profile plus the decision and its explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicStats {
    #[serde(flatten)]
    pub profile: TopicProfile,
    pub category: Category,
    /// Which rule fired
    pub rule: Rationale,
    pub reason: String,
}
