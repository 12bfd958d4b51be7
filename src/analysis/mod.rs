// Statistical topic analysis
//
// Per-topic statistics and the decision list that turns them into one of
// five recommendations. Components are independent and pure:
//
// - descriptive: mean / median / sample std dev / CV / weighted mean (trueno, aprender)
// - outlier:     positional IQR fences
// - confidence:  approximate 95% interval, sample-size confidence level
// - trend:       OLS against elapsed days, 1 - R² significance
// - normalize:   z-score, Bayesian shrinkage, percentile rank, tiers
// - categorizer: ordered rule list, first match wins
//
// All thresholds come from EngineConfig. Intervals use a fixed
// t-multiplier and trend significance is 1 - R², not a slope test; the
// category thresholds assume both.

pub mod categorizer;
pub mod confidence;
mod config;
pub mod descriptive;
pub mod normalize;
pub mod outlier;
mod profile;
pub mod trend;

pub use categorizer::{categorize, classify, Category, Classification, Rationale};
pub use confidence::{confidence_interval, ConfidenceLevel};
pub use config::{CategoryLimits, EngineConfig, TierTable, TierThreshold};
pub use descriptive::{describe, Descriptive};
pub use normalize::{bayesian_smooth, percentile_rank, z_score, PerformanceTier};
pub use outlier::{detect_outliers, outlier_count, OutlierReport};
pub use profile::{TopicProfile, TopicStats};
pub use trend::{estimate_trend, TrendDirection, TrendEstimate};
