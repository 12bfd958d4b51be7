//! topiclens - statistical topic performance engine
//!
//! Takes a creator's catalog (per-video metric, publish date, topic labels)
//! and decides per topic whether to double down, treat it as untapped,
//! resurface it, stop making it, or investigate further. Small samples,
//! skewed view counts and recency drift are handled with lightweight,
//! configurable approximations; this is decision support, not inference.

pub mod aggregate;
pub mod analysis;
pub mod baseline;
pub mod catalog;
pub mod cli;
pub mod engine;
pub mod error;
pub mod recency;
pub mod report;
pub mod video;

pub use analysis::{Category, EngineConfig, TopicProfile, TopicStats};
pub use baseline::{ChannelBaseline, ChannelSummary};
pub use engine::{frequency_report, TopicEngine, TopicFrequency};
pub use error::{AnalysisError, Result};
pub use report::TopicReport;
pub use video::VideoMetric;
