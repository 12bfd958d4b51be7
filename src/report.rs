//! Categorized analysis output
//!
//! One ordered list per category, strongest signal (highest z-score)
//! first. Serializes to a JSON object with one key per category so
//! rendering collaborators can consume it directly.

use crate::analysis::categorizer::thousands;
use crate::analysis::{Category, CategoryLimits, TopicStats};
use crate::baseline::{ChannelBaseline, ChannelSummary};
use serde::{Deserialize, Serialize};

/// Result of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicReport {
    pub baseline: ChannelBaseline,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ChannelSummary>,
    pub double_down: Vec<TopicStats>,
    pub untapped: Vec<TopicStats>,
    pub resurface: Vec<TopicStats>,
    pub stop_making: Vec<TopicStats>,
    pub investigate: Vec<TopicStats>,
}

impl TopicReport {
    /// Bucket categorized topics and order each bucket by descending z-score
    pub fn new(
        baseline: ChannelBaseline,
        summary: Option<ChannelSummary>,
        topics: Vec<TopicStats>,
    ) -> Self {
        let mut report = Self {
            baseline,
            summary,
            double_down: Vec::new(),
            untapped: Vec::new(),
            resurface: Vec::new(),
            stop_making: Vec::new(),
            investigate: Vec::new(),
        };

        for topic in topics {
            report.bucket_mut(topic.category).push(topic);
        }

        for category in Category::ALL {
            report.bucket_mut(category).sort_by(|a, b| {
                b.profile
                    .z_score
                    .total_cmp(&a.profile.z_score)
                    .then_with(|| a.profile.topic.cmp(&b.profile.topic))
            });
        }

        report
    }

    /// Topics in one category, strongest first
    pub fn category(&self, category: Category) -> &[TopicStats] {
        match category {
            Category::DoubleDown => &self.double_down,
            Category::Untapped => &self.untapped,
            Category::Resurface => &self.resurface,
            Category::StopMaking => &self.stop_making,
            Category::Investigate => &self.investigate,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<TopicStats> {
        match category {
            Category::DoubleDown => &mut self.double_down,
            Category::Untapped => &mut self.untapped,
            Category::Resurface => &mut self.resurface,
            Category::StopMaking => &mut self.stop_making,
            Category::Investigate => &mut self.investigate,
        }
    }

    /// All topics, category by category
    pub fn iter(&self) -> impl Iterator<Item = &TopicStats> {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.category(category).iter())
    }

    pub fn topic_count(&self) -> usize {
        self.iter().count()
    }

    pub fn find(&self, topic: &str) -> Option<&TopicStats> {
        self.iter().find(|t| t.profile.topic == topic)
    }

    /// Keep only the strongest topics of each category
    pub fn top(&self, limits: &CategoryLimits) -> Self {
        let take = |topics: &[TopicStats], n: usize| topics.iter().take(n).cloned().collect();
        Self {
            baseline: self.baseline,
            summary: self.summary.clone(),
            double_down: take(&self.double_down, limits.double_down),
            untapped: take(&self.untapped, limits.untapped),
            resurface: take(&self.resurface, limits.resurface),
            stop_making: take(&self.stop_making, limits.stop_making),
            investigate: take(&self.investigate, limits.investigate),
        }
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!(
            "📊 TOPIC PERFORMANCE ({} topics)\n\n",
            self.topic_count()
        ));
        report.push_str(&format!(
            "Channel average: {} (std dev {})\n",
            thousands(self.baseline.mean),
            thousands(self.baseline.std_dev)
        ));
        if let Some(summary) = &self.summary {
            report.push_str(&format!(
                "Channel median: {} (IQR {} - {}, {} videos)\n",
                thousands(summary.median),
                thousands(summary.q1),
                thousands(summary.q3),
                summary.count
            ));
        }

        for category in Category::ALL {
            let topics = self.category(category);
            if topics.is_empty() {
                continue;
            }

            report.push_str(&format!("\n{} ({}):\n", category.title(), topics.len()));
            for topic in topics {
                let p = &topic.profile;
                report.push_str(&format!(
                    "  {} [n={}, avg={}, z={:+.2}, {} confidence, CI {} - {}, trend {}]\n",
                    p.topic,
                    p.video_count,
                    thousands(p.mean),
                    p.z_score,
                    p.confidence_level,
                    thousands(p.confidence_interval.0),
                    thousands(p.confidence_interval.1),
                    p.trend_direction
                ));
                report.push_str(&format!("    {}\n", topic.reason));
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::TopicGroup;
    use crate::analysis::{classify, EngineConfig, TopicProfile};
    use crate::video::VideoMetric;

    fn stats(topic: &str, values: &[f64]) -> TopicStats {
        let config = EngineConfig::default();
        let baseline = ChannelBaseline::new(10_000.0, 5_000.0).unwrap();
        let group = TopicGroup {
            metrics: values.to_vec(),
            timestamps: vec![None; values.len()],
            videos: values.iter().map(|&v| VideoMetric::new(topic, v)).collect(),
        };
        let weights = vec![1.0; values.len()];
        let profile = TopicProfile::build(topic, &group, &weights, &baseline, &config).unwrap();
        classify(profile, &config)
    }

    fn report() -> TopicReport {
        TopicReport::new(
            ChannelBaseline::new(10_000.0, 5_000.0).unwrap(),
            None,
            vec![
                stats("Good", &[16_000.0, 15_500.0, 16_500.0, 15_800.0, 16_200.0]),
                stats("Better", &[21_000.0, 20_500.0, 21_500.0, 20_800.0, 21_200.0]),
                stats("Tiny", &[30_000.0]),
                stats("Flop", &[3_000.0, 3_100.0, 2_900.0, 3_050.0, 2_950.0]),
            ],
        )
    }

    #[test]
    fn test_bucketing_and_ordering() {
        let report = report();

        assert_eq!(report.topic_count(), 4);
        let double_down: Vec<&str> = report
            .category(Category::DoubleDown)
            .iter()
            .map(|t| t.profile.topic.as_str())
            .collect();
        assert_eq!(double_down, vec!["Better", "Good"]);
        assert_eq!(report.category(Category::Untapped)[0].profile.topic, "Tiny");
        assert_eq!(report.category(Category::StopMaking)[0].profile.topic, "Flop");
    }

    #[test]
    fn test_every_topic_in_exactly_one_bucket() {
        let report = report();
        for name in ["Good", "Better", "Tiny", "Flop"] {
            let hits = Category::ALL
                .iter()
                .filter(|&&c| report.category(c).iter().any(|t| t.profile.topic == name))
                .count();
            assert_eq!(hits, 1, "{} appears in {} buckets", name, hits);
        }
    }

    #[test]
    fn test_top_trims_each_category() {
        let limits = CategoryLimits {
            double_down: 1,
            ..CategoryLimits::default()
        };
        let trimmed = report().top(&limits);

        assert_eq!(trimmed.double_down.len(), 1);
        assert_eq!(trimmed.double_down[0].profile.topic, "Better");
        assert_eq!(trimmed.untapped.len(), 1);
    }

    #[test]
    fn test_json_has_one_key_per_category() {
        let json = serde_json::to_value(report()).unwrap();

        for category in Category::ALL {
            assert!(json[category.as_str()].is_array(), "missing {}", category);
        }
        let first = &json["double_down"][0];
        assert_eq!(first["topic"], "Better");
        assert_eq!(first["category"], "double_down");
        assert_eq!(first["confidence_level"], "high");
        assert!(first["videos"].is_array());
        assert!(first["confidence_interval"].is_array());
    }

    #[test]
    fn test_json_roundtrip_preserves_report() {
        let original = report();
        let json = serde_json::to_string(&original).unwrap();
        let parsed: TopicReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.topic_count(), original.topic_count());
        assert_eq!(parsed.find("Flop").unwrap().category, Category::StopMaking);
    }

    #[test]
    fn test_report_string() {
        let text = report().to_report_string();
        assert!(text.contains("TOPIC PERFORMANCE (4 topics)"));
        assert!(text.contains("DOUBLE DOWN (2)"));
        assert!(text.contains("STOP MAKING (1)"));
        assert!(text.contains("Channel average: 10,000"));
        assert!(!text.contains("RESURFACE"));
    }
}
