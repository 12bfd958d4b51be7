// Configuration for the topic performance engine
//
// Every threshold the statistics and the categorizer use lives here with a
// documented default. The defaults are empirical: they work for catalogs of
// a few dozen to a few hundred videos, nothing more is claimed.

use crate::analysis::normalize::PerformanceTier;
use crate::recency::{RecencyMode, DEFAULT_FLOOR, UNKNOWN_DATE_WEIGHT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for topic statistics and categorization
///
/// # Example
/// ```
/// use topiclens::analysis::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.prior_strength, 3.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Std dev used for a one-video topic, as a fraction of the channel std dev
    ///
    /// Default: 0.5
    pub single_sample_std_ratio: f64,

    /// Minimum topic size for the IQR outlier pass (smaller topics report 0)
    ///
    /// Default: 4
    pub outlier_min_samples: usize,

    /// IQR fence multiplier
    ///
    /// Default: 1.5 (Tukey fences)
    pub iqr_multiplier: f64,

    /// Sample size at which the interval switches to the normal multiplier
    ///
    /// Default: 30
    pub large_sample_threshold: usize,

    /// Interval multiplier for `n >= large_sample_threshold`
    ///
    /// Default: 1.96
    pub large_sample_multiplier: f64,

    /// Interval multiplier for smaller samples, a fixed stand-in for the
    /// Student's t critical value
    ///
    /// Default: 2.26
    pub small_sample_multiplier: f64,

    /// Half-width of the one-video interval, as a fraction of its mean
    ///
    /// Default: 0.5 (interval is 50%..150% of the value)
    pub single_sample_interval_ratio: f64,

    /// Videos needed for "high" confidence
    ///
    /// Default: 5
    pub high_confidence_min: usize,

    /// Videos needed for "medium" confidence
    ///
    /// Default: 3
    pub medium_confidence_min: usize,

    /// Dated videos needed before fitting a trend
    ///
    /// Default: 3
    pub trend_min_samples: usize,

    /// Trend significance (1 - R²) below which a trend counts as real
    ///
    /// Default: 0.1
    pub trend_significance_threshold: f64,

    /// Number of virtual channel-average videos blended into each topic mean
    ///
    /// Default: 3.0
    pub prior_strength: f64,

    /// z-score thresholds for performance tiers, evaluated top-down
    pub tier_table: TierTable,

    /// Topics with more videos than this and at least one outlier go to review
    ///
    /// Default: 3
    pub investigate_min_videos: usize,

    /// Minimum z-score for a declining topic to be worth resurfacing
    ///
    /// Default: 0.0
    pub resurface_min_z: f64,

    /// Minimum z-score for an untapped topic
    ///
    /// Default: 1.0
    pub untapped_min_z: f64,

    /// Largest topic still considered untapped
    ///
    /// Default: 2
    pub untapped_max_videos: usize,

    /// z-score below which a topic may be dropped
    ///
    /// Default: -0.5
    pub stop_making_max_z: f64,

    /// Coefficient of variation (percent) below which underperformance is
    /// considered consistent
    ///
    /// Default: 60.0
    pub stop_making_max_cv: f64,

    /// Minimum z-score for a double-down topic
    ///
    /// Default: 0.5
    pub double_down_min_z: f64,

    /// Recency weighting variant for weighted averages
    pub recency_mode: RecencyMode,

    /// Weight of the oldest video in `smooth_rank` mode
    ///
    /// Default: 0.2
    pub recency_floor: f64,

    /// Weight for videos with a missing or unparsable date in `timestamp` mode
    ///
    /// Default: 0.3
    pub unknown_recency_weight: f64,

    /// How many topics each category shows in a trimmed report
    pub category_limits: CategoryLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            single_sample_std_ratio: 0.5,
            outlier_min_samples: 4,
            iqr_multiplier: 1.5,
            large_sample_threshold: 30,
            large_sample_multiplier: 1.96,
            small_sample_multiplier: 2.26,
            single_sample_interval_ratio: 0.5,
            high_confidence_min: 5,
            medium_confidence_min: 3,
            trend_min_samples: 3,
            trend_significance_threshold: 0.1,
            prior_strength: 3.0,
            tier_table: TierTable::default(),
            investigate_min_videos: 3,
            resurface_min_z: 0.0,
            untapped_min_z: 1.0,
            untapped_max_videos: 2,
            stop_making_max_z: -0.5,
            stop_making_max_cv: 60.0,
            double_down_min_z: 0.5,
            recency_mode: RecencyMode::Timestamp,
            recency_floor: DEFAULT_FLOOR,
            unknown_recency_weight: UNKNOWN_DATE_WEIGHT,
            category_limits: CategoryLimits::default(),
        }
    }
}

impl EngineConfig {
    /// Demand more evidence before making a call
    ///
    /// Use when a wrong "stop making" costs more than a missed opportunity.
    pub fn strict() -> Self {
        Self {
            high_confidence_min: 8,
            medium_confidence_min: 5,
            trend_min_samples: 5,
            trend_significance_threshold: 0.05,
            prior_strength: 5.0,
            stop_making_max_cv: 40.0,
            double_down_min_z: 0.75,
            ..Self::default()
        }
    }

    /// Make calls on thinner evidence
    ///
    /// Use for young channels where every topic has only a handful of videos.
    pub fn permissive() -> Self {
        Self {
            high_confidence_min: 3,
            medium_confidence_min: 2,
            trend_significance_threshold: 0.2,
            prior_strength: 1.0,
            stop_making_max_cv: 80.0,
            double_down_min_z: 0.25,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file; missing keys keep their defaults
    ///
    /// ```no_run
    /// use topiclens::analysis::EngineConfig;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = EngineConfig::from_file("topiclens.toml")?;
    /// println!("prior strength {}", config.prior_strength);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.single_sample_std_ratio < 0.0 {
            return Err(format!(
                "single_sample_std_ratio must be non-negative, got {}",
                self.single_sample_std_ratio
            ));
        }

        if self.outlier_min_samples < 4 {
            return Err(format!(
                "outlier_min_samples must be >= 4 for a quartile split, got {}",
                self.outlier_min_samples
            ));
        }

        if self.iqr_multiplier <= 0.0 {
            return Err(format!(
                "iqr_multiplier must be positive, got {}",
                self.iqr_multiplier
            ));
        }

        if self.large_sample_multiplier <= 0.0 || self.small_sample_multiplier <= 0.0 {
            return Err(format!(
                "interval multipliers must be positive, got {} / {}",
                self.large_sample_multiplier, self.small_sample_multiplier
            ));
        }

        if !(0.0..=1.0).contains(&self.single_sample_interval_ratio) {
            return Err(format!(
                "single_sample_interval_ratio must be in [0, 1], got {}",
                self.single_sample_interval_ratio
            ));
        }

        if self.medium_confidence_min > self.high_confidence_min {
            return Err(format!(
                "medium_confidence_min ({}) must not exceed high_confidence_min ({})",
                self.medium_confidence_min, self.high_confidence_min
            ));
        }

        if self.trend_min_samples < 3 {
            return Err(format!(
                "trend_min_samples must be >= 3 for a regression, got {}",
                self.trend_min_samples
            ));
        }

        if !(0.0..=1.0).contains(&self.trend_significance_threshold) {
            return Err(format!(
                "trend_significance_threshold must be in [0, 1], got {}",
                self.trend_significance_threshold
            ));
        }

        if self.prior_strength < 0.0 {
            return Err(format!(
                "prior_strength must be non-negative, got {}",
                self.prior_strength
            ));
        }

        if !(f64::MIN_POSITIVE..=1.0).contains(&self.recency_floor) {
            return Err(format!(
                "recency_floor must be in (0, 1], got {}",
                self.recency_floor
            ));
        }

        if !(0.0..=1.0).contains(&self.unknown_recency_weight) {
            return Err(format!(
                "unknown_recency_weight must be in [0, 1], got {}",
                self.unknown_recency_weight
            ));
        }

        self.tier_table.validate()
    }
}

/// One row of the tier table: `z >= min_z` maps to `tier`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThreshold {
    pub min_z: f64,
    pub tier: PerformanceTier,
}

/// Ordered z-score thresholds; anything below the last row is `Poor`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable(pub Vec<TierThreshold>);

impl Default for TierTable {
    fn default() -> Self {
        Self(vec![
            TierThreshold {
                min_z: 2.0,
                tier: PerformanceTier::Exceptional,
            },
            TierThreshold {
                min_z: 1.0,
                tier: PerformanceTier::Strong,
            },
            TierThreshold {
                min_z: -0.5,
                tier: PerformanceTier::Average,
            },
            TierThreshold {
                min_z: -1.0,
                tier: PerformanceTier::Weak,
            },
        ])
    }
}

impl TierTable {
    /// First row whose threshold the z-score meets, `Poor` otherwise
    pub fn classify(&self, z_score: f64) -> PerformanceTier {
        self.0
            .iter()
            .find(|row| z_score >= row.min_z)
            .map(|row| row.tier)
            .unwrap_or(PerformanceTier::Poor)
    }

    fn validate(&self) -> Result<(), String> {
        if self.0.windows(2).any(|w| w[0].min_z < w[1].min_z) {
            return Err("tier_table thresholds must be in descending order".to_string());
        }
        Ok(())
    }
}

/// Topics shown per category in a trimmed report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryLimits {
    pub double_down: usize,
    pub untapped: usize,
    pub resurface: usize,
    pub stop_making: usize,
    pub investigate: usize,
}

impl Default for CategoryLimits {
    fn default() -> Self {
        Self {
            double_down: 6,
            untapped: 6,
            resurface: 6,
            stop_making: 4,
            investigate: 4,
        }
    }
}
