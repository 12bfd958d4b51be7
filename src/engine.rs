//! Topic performance engine
//!
//! One call per catalog: build the channel baseline, group videos by topic,
//! profile and categorize every topic, return the grouped report. The
//! engine holds no mutable state; runs over different catalogs are
//! independent and can execute in parallel.
//!
//! # Example
//!
//! ```
//! use topiclens::{EngineConfig, TopicEngine, VideoMetric};
//!
//! # fn main() -> topiclens::Result<()> {
//! let videos = vec![
//!     VideoMetric::new("Cold email teardown", 25_000.0).with_topics(["email marketing"]),
//!     VideoMetric::new("Subject lines", 24_000.0).with_topics(["email marketing"]),
//!     VideoMetric::new("Morning pages", 4_000.0).with_topics(["journaling"]),
//!     VideoMetric::new("Vlog", 6_000.0).with_topics(["lifestyle"]),
//! ];
//!
//! let engine = TopicEngine::new(EngineConfig::default())?;
//! let report = engine.analyze(&videos)?;
//! assert_eq!(report.topic_count(), 3);
//! # Ok(())
//! # }
//! ```

use crate::aggregate::{group_by_topic, normalize_topic, TopicGroup};
use crate::analysis::{classify, EngineConfig, TopicProfile};
use crate::baseline::{ChannelBaseline, ChannelSummary};
use crate::error::{AnalysisError, Result};
use crate::recency::{raw_timestamp_weight, rank_weight, smooth_rank_weight, RecencyMode};
use crate::report::TopicReport;
use crate::video::VideoMetric;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Runs the full analysis for a catalog
#[derive(Debug, Clone)]
pub struct TopicEngine {
    config: EngineConfig,
    /// Reference time for timestamp recency weights
    as_of: DateTime<Utc>,
}

impl TopicEngine {
    /// Create an engine; recency is measured from the current time
    ///
    /// # Errors
    /// `InvalidConfig` when the configuration fails validation.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate().map_err(AnalysisError::InvalidConfig)?;
        Ok(Self {
            config,
            as_of: Utc::now(),
        })
    }

    /// Measure recency from a fixed instant (reproducible runs, tests)
    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = as_of;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    /// Analyze a catalog, computing the channel baseline from it
    ///
    /// # Errors
    /// - `InvalidInput` for an empty catalog or a negative / non-finite metric
    /// - `ChannelBaselineMissing` when no video has a positive metric; the
    ///   caller should fall back to [`frequency_report`]
    pub fn analyze(&self, videos: &[VideoMetric]) -> Result<TopicReport> {
        validate_catalog(videos)?;
        let baseline = ChannelBaseline::from_videos(videos)?;
        self.run(videos, baseline)
    }

    /// Analyze a catalog against a caller-supplied baseline
    ///
    /// A baseline with no spread gets half its mean as std dev, so topics
    /// still separate instead of all landing on z = 0.
    pub fn analyze_with_baseline(
        &self,
        videos: &[VideoMetric],
        baseline: ChannelBaseline,
    ) -> Result<TopicReport> {
        validate_catalog(videos)?;
        // Struct literals bypass `ChannelBaseline::new`; re-check and apply
        // the zero-spread fallback
        let baseline = ChannelBaseline {
            sample_size: baseline.sample_size,
            ..ChannelBaseline::new(baseline.mean, baseline.std_dev)?
        };
        self.run(videos, baseline)
    }

    fn run(&self, videos: &[VideoMetric], baseline: ChannelBaseline) -> Result<TopicReport> {
        let unparsable = videos
            .iter()
            .filter(|v| v.published_at.is_some() && v.published_date().is_none())
            .count();
        if unparsable > 0 {
            tracing::warn!(
                unparsable,
                "videos with unparsable publish dates get the unknown-date weight and skip trend fitting"
            );
        }

        let groups = group_by_topic(videos);
        let mut topics = Vec::with_capacity(groups.len());

        for (topic, group) in &groups {
            let weights = self.recency_weights(group, videos.len());
            let profile = TopicProfile::build(topic, group, &weights, &baseline, &self.config)?;
            topics.push(classify(profile, &self.config));
        }

        let metrics: Vec<f64> = videos.iter().map(|v| v.metric_value).collect();
        let report = TopicReport::new(baseline, ChannelSummary::from_metrics(&metrics), topics);

        tracing::info!(
            videos = videos.len(),
            topics = report.topic_count(),
            channel_mean = baseline.mean,
            channel_std = baseline.std_dev,
            "topic analysis complete"
        );

        Ok(report)
    }

    /// Recency weight per video in a group, parallel to `group.metrics`
    fn recency_weights(&self, group: &TopicGroup, catalog_size: usize) -> Vec<f64> {
        group
            .videos
            .iter()
            .map(|video| match self.config.recency_mode {
                RecencyMode::Timestamp => raw_timestamp_weight(
                    video.published_at.as_deref(),
                    self.as_of,
                    self.config.unknown_recency_weight,
                ),
                RecencyMode::Rank => rank_weight(video.catalog_position, catalog_size),
                RecencyMode::SmoothRank => smooth_rank_weight(
                    video.catalog_position,
                    catalog_size,
                    self.config.recency_floor,
                ),
            })
            .collect()
    }
}

fn validate_catalog(videos: &[VideoMetric]) -> Result<()> {
    if videos.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "catalog is empty; nothing to analyze".to_string(),
        ));
    }

    if let Some(bad) = videos
        .iter()
        .find(|v| !v.metric_value.is_finite() || v.metric_value < 0.0)
    {
        return Err(AnalysisError::InvalidInput(format!(
            "video '{}' has invalid metric {}",
            bad.title, bad.metric_value
        )));
    }

    Ok(())
}

/// How often a topic appears, for catalogs too thin for statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicFrequency {
    pub topic: String,
    pub video_count: usize,
    pub total_metric: f64,
}

/// Topic counts, most frequent first
///
/// The fallback when the engine refuses to run (`ChannelBaselineMissing`):
/// it claims nothing beyond how often each topic was covered.
pub fn frequency_report(videos: &[VideoMetric]) -> Vec<TopicFrequency> {
    let mut counts: BTreeMap<String, TopicFrequency> = BTreeMap::new();

    for video in videos {
        let mut seen: Vec<String> = video
            .topic_labels
            .iter()
            .filter_map(|label| normalize_topic(label))
            .collect();
        seen.sort();
        seen.dedup();

        for topic in seen {
            let entry = counts.entry(topic.clone()).or_insert_with(|| TopicFrequency {
                topic,
                video_count: 0,
                total_metric: 0.0,
            });
            entry.video_count += 1;
            entry.total_metric += video.metric_value.max(0.0);
        }
    }

    let mut frequencies: Vec<TopicFrequency> = counts.into_values().collect();
    frequencies.sort_by(|a, b| b.video_count.cmp(&a.video_count));
    frequencies
}

/// Plain-text rendering of a frequency report
pub fn frequency_report_string(frequencies: &[TopicFrequency]) -> String {
    let mut report = String::new();
    report.push_str("⚠️  NOT ENOUGH PERFORMANCE DATA\n\n");
    report.push_str("No video has a positive metric, so topics cannot be compared.\n");
    report.push_str("Topic coverage by video count:\n");
    for entry in frequencies {
        report.push_str(&format!("  {:<32} {:>4} video(s)\n", entry.topic, entry.video_count));
    }
    report
}
