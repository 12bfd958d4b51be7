//! Error taxonomy for topic analysis
//!
//! Only hard failures live here. Small samples are not errors: each
//! statistic degrades on its own (wider interval, skipped outlier pass,
//! no-signal trend) and the run continues.

use thiserror::Error;

/// Errors raised by the topic performance engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Caller handed the engine data it must never see (empty topic,
    /// empty catalog, negative metric, mismatched weights)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No video in the catalog has a positive metric, so there is no
    /// channel baseline to compare topics against
    #[error("Channel baseline missing: no video in the catalog has a positive metric")]
    ChannelBaselineMissing,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A statistics backend (trueno / aprender) rejected its input
    #[error("Numeric backend failed: {0}")]
    Numeric(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
