//! Group per-video records by normalized topic label
//!
//! Upstream labelers are inconsistent about case and spacing ("email
//! marketing", " Email  Marketing"), so labels are normalized before
//! grouping. A video counts in full toward every topic it carries.

use crate::video::VideoMetric;
use std::collections::{BTreeMap, BTreeSet};

/// Everything the analysis needs about one topic
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicGroup {
    /// Metric per video, parallel to `videos`
    pub metrics: Vec<f64>,
    /// Raw publish timestamp per video, parallel to `videos`
    pub timestamps: Vec<Option<String>>,
    pub videos: Vec<VideoMetric>,
}

impl TopicGroup {
    fn push(&mut self, video: &VideoMetric) {
        self.metrics.push(video.metric_value);
        self.timestamps.push(video.published_at.clone());
        self.videos.push(video.clone());
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

/// Normalize a topic label: trim, collapse whitespace, title-case words
///
/// Returns `None` for labels that are blank after trimming.
pub fn normalize_topic(label: &str) -> Option<String> {
    let words: Vec<String> = label.split_whitespace().map(title_case_word).collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Group videos by normalized topic
///
/// Output is keyed by topic in lexical order so runs are reproducible.
/// Every returned group is non-empty; labels that normalize to nothing
/// are dropped, and a label repeated on one video counts once.
pub fn group_by_topic(videos: &[VideoMetric]) -> BTreeMap<String, TopicGroup> {
    let mut groups: BTreeMap<String, TopicGroup> = BTreeMap::new();

    for video in videos {
        let topics: BTreeSet<String> = video
            .topic_labels
            .iter()
            .filter_map(|label| normalize_topic(label))
            .collect();

        for topic in topics {
            groups.entry(topic).or_default().push(video);
        }
    }

    tracing::debug!(
        videos = videos.len(),
        topics = groups.len(),
        "grouped catalog by topic"
    );

    groups
}
