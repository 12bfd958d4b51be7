// Topic categorization as an ordered decision list
//
// Rules are evaluated top to bottom and the first match wins, so the order
// of RULES is the precedence. A topic with anomalous videos goes to human
// review before any other rule gets a say.

use crate::analysis::config::EngineConfig;
use crate::analysis::confidence::ConfidenceLevel;
use crate::analysis::profile::{TopicProfile, TopicStats};
use crate::analysis::trend::TrendDirection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Actionable recommendation bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    DoubleDown,
    Untapped,
    Resurface,
    StopMaking,
    Investigate,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::DoubleDown,
        Category::Untapped,
        Category::Resurface,
        Category::StopMaking,
        Category::Investigate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DoubleDown => "double_down",
            Self::Untapped => "untapped",
            Self::Resurface => "resurface",
            Self::StopMaking => "stop_making",
            Self::Investigate => "investigate",
        }
    }

    /// Heading used in text reports
    pub fn title(&self) -> &'static str {
        match self {
            Self::DoubleDown => "DOUBLE DOWN",
            Self::Untapped => "UNTAPPED",
            Self::Resurface => "RESURFACE",
            Self::StopMaking => "STOP MAKING",
            Self::Investigate => "INVESTIGATE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rule that placed a topic in its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rationale {
    /// Outliers distort an otherwise sizeable topic
    OutlierReview,
    /// Above average but in a clear decline
    DecliningHit,
    /// Strong on very little evidence
    Untapped,
    /// Reliably below average
    StopMaking,
    /// Proven, consistent, not fading
    DoubleDown,
    /// Nothing else matched
    Ambiguous,
}

/// Outcome of categorizing one topic
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: Category,
    pub rationale: Rationale,
    pub reason: String,
}

struct Rule {
    category: Category,
    rationale: Rationale,
    applies: fn(&TopicProfile, &EngineConfig) -> bool,
}

const RULES: [Rule; 5] = [
    Rule {
        category: Category::Investigate,
        rationale: Rationale::OutlierReview,
        applies: |p, c| p.outlier_count > 0 && p.video_count > c.investigate_min_videos,
    },
    Rule {
        category: Category::Resurface,
        rationale: Rationale::DecliningHit,
        applies: |p, c| {
            p.trend_direction == TrendDirection::Declining
                && p.trend_significance < c.trend_significance_threshold
                && p.z_score > c.resurface_min_z
        },
    },
    Rule {
        category: Category::Untapped,
        rationale: Rationale::Untapped,
        applies: |p, c| p.z_score > c.untapped_min_z && p.video_count <= c.untapped_max_videos,
    },
    Rule {
        category: Category::StopMaking,
        rationale: Rationale::StopMaking,
        applies: |p, c| {
            p.z_score < c.stop_making_max_z
                && p.confidence_level != ConfidenceLevel::Low
                && p.coefficient_of_variation < c.stop_making_max_cv
        },
    },
    Rule {
        category: Category::DoubleDown,
        rationale: Rationale::DoubleDown,
        applies: |p, c| {
            p.z_score > c.double_down_min_z
                && p.confidence_level != ConfidenceLevel::Low
                && p.trend_direction != TrendDirection::Declining
        },
    },
];

/// Place a profiled topic in exactly one category
///
/// Pure: the same profile and config always give the same category and
/// reason.
pub fn categorize(profile: &TopicProfile, config: &EngineConfig) -> Classification {
    let (category, rationale) = RULES
        .iter()
        .find(|rule| (rule.applies)(profile, config))
        .map(|rule| (rule.category, rule.rationale))
        .unwrap_or((Category::Investigate, Rationale::Ambiguous));

    tracing::debug!(
        topic = %profile.topic,
        category = %category,
        z = profile.z_score,
        n = profile.video_count,
        "categorized topic"
    );

    Classification {
        category,
        rationale,
        reason: build_reason(rationale, profile),
    }
}

/// Categorize a profile and attach the decision to it
pub fn classify(profile: TopicProfile, config: &EngineConfig) -> TopicStats {
    let Classification {
        category,
        rationale,
        reason,
    } = categorize(&profile, config);

    TopicStats {
        profile,
        category,
        rule: rationale,
        reason,
    }
}

/// Human-readable explanation for the rule that fired
pub fn build_reason(rationale: Rationale, p: &TopicProfile) -> String {
    match rationale {
        Rationale::OutlierReview => format!(
            "Mixed performance: {} outlier video(s) among {} total. Range: {} - {} views. \
             The topic has potential but needs investigation to find what works.",
            p.outlier_count,
            p.video_count,
            thousands(p.min),
            thousands(p.max)
        ),
        Rationale::DecliningHit => format!(
            "Once a strong performer ({} avg views, {:+.0}% vs channel) but in a sustained \
             decline (fit residual {:.2}). Consider updating or pivoting the angle.",
            thousands(p.mean),
            p.vs_channel_avg,
            p.trend_significance
        ),
        Rationale::Untapped => format!(
            "Only {} video(s) but performing {:.1} standard deviations above average \
             ({:+.0}% vs channel). Confidence interval: {} - {} views. \
             Your audience is hungry for more.",
            p.video_count,
            p.z_score,
            p.vs_channel_avg,
            thousands(p.confidence_interval.0),
            thousands(p.confidence_interval.1)
        ),
        Rationale::StopMaking => format!(
            "{} videos averaging {} views (z-score: {:.1}, {:+.0}% vs channel avg). \
             Consistently underperforms with {} confidence. \
             Your audience isn't engaging with this content.",
            p.video_count,
            thousands(p.mean),
            p.z_score,
            p.vs_channel_avg,
            p.confidence_level
        ),
        Rationale::DoubleDown => format!(
            "{} videos averaging {} views (z-score: {:.1}, {:+.0}% vs channel avg). \
             Consistency score: {:.0}%. {} confidence. This is your lane.",
            p.video_count,
            thousands(p.mean),
            p.z_score,
            p.vs_channel_avg,
            100.0 - p.coefficient_of_variation.min(100.0),
            capitalize(p.confidence_level.as_str())
        ),
        Rationale::Ambiguous => format!(
            "Ambiguous signals: z-score {:.1}, {} confidence, trend: {}. \
             Needs human review to determine best strategy.",
            p.z_score, p.confidence_level, p.trend_direction
        ),
    }
}

/// Round to a whole number and group digits with commas: 12345.6 -> "12,346"
pub fn thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
