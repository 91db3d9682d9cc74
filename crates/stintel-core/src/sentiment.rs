//! News and consumer sentiment payloads plus the pure derivations the
//! dashboard renders from them (gauge position, badge colour, shares).

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Scores strictly above this are positive, strictly below its negation negative.
const BADGE_THRESHOLD: f64 = 0.1;

/// Maps a sentiment score in `[-1, 1]` onto a gauge position in `[0, 1]`.
///
/// Out-of-range scores are clamped so the gauge needle never leaves its arc.
#[must_use]
pub fn gauge_percent(average: f64) -> f64 {
    ((average + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Colour class for a sentiment chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBadge {
    Positive,
    Neutral,
    Negative,
}

impl SentimentBadge {
    #[must_use]
    pub fn classify(combined: f64) -> Self {
        if combined > BADGE_THRESHOLD {
            Self::Positive
        } else if combined < -BADGE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// Backend's verdict for a set of articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    Positive,
    Neutral,
    Negative,
}

impl Prediction {
    #[must_use]
    pub fn badge(self) -> SentimentBadge {
        match self {
            Self::Positive => SentimentBadge::Positive,
            Self::Neutral => SentimentBadge::Neutral,
            Self::Negative => SentimentBadge::Negative,
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.badge().label())
    }
}

/// Payload of `GET /api/news/{company}/{industry}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsAnalysis {
    pub company: SentimentSummary,
    pub industry: SentimentSummary,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub average_sentiment: f64,
    pub prediction: Prediction,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl SentimentSummary {
    #[must_use]
    pub fn gauge_percent(&self) -> f64 {
        gauge_percent(self.average_sentiment)
    }
}

/// One scored news article.
///
/// Every field is lenient: a partially populated entry is kept and rendered
/// with blanks rather than failing the whole panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub sentiment: ArticleSentiment,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleSentiment {
    #[serde(default)]
    pub combined: Option<f64>,
    #[serde(default)]
    pub textblob: Option<f64>,
    #[serde(default)]
    pub vader: Option<f64>,
}

impl Article {
    /// Badge for the article. An article without a combined score is neutral.
    #[must_use]
    pub fn badge(&self) -> SentimentBadge {
        SentimentBadge::classify(self.sentiment.combined.unwrap_or(0.0))
    }

    /// Publication date, accepting RFC 3339 or a bare `YYYY-MM-DD` prefix.
    #[must_use]
    pub fn published_date(&self) -> Option<NaiveDate> {
        let raw = self.published_at.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.date_naive());
        }
        raw.get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    }
}

/// Payload of `GET /api/sentiment/{company}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumerSentiment {
    #[serde(default)]
    pub company_name: Option<String>,
    pub total_mentions: u64,
    pub sentiment_distribution: SentimentDistribution,
    pub average_scores: AverageScores,
    #[serde(default)]
    pub common_themes: Vec<String>,
    #[serde(default)]
    pub representative_quotes: RepresentativeQuotes,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageScores {
    pub combined: f64,
    #[serde(default)]
    pub polarity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepresentativeQuotes {
    #[serde(default)]
    pub positive: Vec<Quote>,
    #[serde(default)]
    pub negative: Vec<Quote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub score: f64,
    #[serde(default)]
    pub source: String,
}

/// Percentages of `total_mentions` per sentiment bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionShares {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl ConsumerSentiment {
    #[must_use]
    pub fn gauge_percent(&self) -> f64 {
        gauge_percent(self.average_scores.combined)
    }

    /// Bucket shares in percent. All zero when there were no mentions.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distribution_shares(&self) -> DistributionShares {
        if self.total_mentions == 0 {
            return DistributionShares {
                positive: 0.0,
                neutral: 0.0,
                negative: 0.0,
            };
        }
        let total = self.total_mentions as f64;
        let share = |count: u64| count as f64 / total * 100.0;
        DistributionShares {
            positive: share(self.sentiment_distribution.positive),
            neutral: share(self.sentiment_distribution.neutral),
            negative: share(self.sentiment_distribution.negative),
        }
    }
}
