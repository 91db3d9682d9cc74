//! Domain types and configuration for the startup intelligence dashboard.
//!
//! Everything here is plain data plus pure derivations: the profile returned
//! by the backend's search endpoint, the two enrichment payloads (news and
//! consumer sentiment), and the env-driven [`AppConfig`].

pub mod app_config;
pub mod config;
pub mod profile;
pub mod sentiment;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use profile::{Competitor, FundingRound, StartupProfile, TeamMember, NOT_AVAILABLE};
pub use sentiment::{
    gauge_percent, Article, ArticleSentiment, AverageScores, ConsumerSentiment,
    DistributionShares, NewsAnalysis, Prediction, Quote, RepresentativeQuotes, SentimentBadge,
    SentimentDistribution, SentimentSummary,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
