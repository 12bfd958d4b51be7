//! Per-video input records
//!
//! A `VideoMetric` is what the upstream collaborators hand us: one
//! performance number, an optional publish timestamp, and zero or more topic
//! labels. Records are never mutated once the engine sees them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single video's performance record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetric {
    /// Free-text title, used for diagnostics and rendering only
    #[serde(default)]
    pub title: String,

    /// Raw topic labels as produced by the upstream labeler
    #[serde(default, alias = "topics")]
    pub topic_labels: Vec<String>,

    /// Non-negative performance metric (e.g. view count)
    #[serde(alias = "views")]
    pub metric_value: f64,

    /// ISO-8601 publish timestamp, kept raw so unparsable values survive
    #[serde(default, alias = "published")]
    pub published_at: Option<String>,

    /// Recency rank within the full catalog (0 = newest)
    #[serde(default)]
    pub catalog_position: usize,
}

impl VideoMetric {
    pub fn new(title: impl Into<String>, metric_value: f64) -> Self {
        Self {
            title: title.into(),
            topic_labels: Vec::new(),
            metric_value,
            published_at: None,
            catalog_position: 0,
        }
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topic_labels = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn published(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = Some(published_at.into());
        self
    }

    pub fn at_position(mut self, catalog_position: usize) -> Self {
        self.catalog_position = catalog_position;
        self
    }

    /// Parsed publish time, `None` when missing or unparsable
    pub fn published_date(&self) -> Option<DateTime<Utc>> {
        self.published_at.as_deref().and_then(parse_timestamp)
    }
}

/// Video summary carried on each topic result so renderers never need to
/// re-query raw data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRef {
    pub title: String,
    pub metric_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl From<&VideoMetric> for VideoRef {
    fn from(video: &VideoMetric) -> Self {
        Self {
            title: video.title.clone(),
            metric_value: video.metric_value,
            published_at: video.published_at.clone(),
        }
    }
}

/// Parse the timestamp shapes upstream feeds actually produce
///
/// Accepts RFC 3339 (`2025-01-15T01:00:00Z`, `+02:00` offsets), naive
/// date-times (`2025-01-15T01:00:00`, `2025-01-15 01:00:00`) and plain
/// dates (`2025-01-15`). Naive values are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
