//! The two enrichment panels shown under a resolved profile.

use futures::future::BoxFuture;
use stintel_client::{BackendClient, ClientError};
use stintel_core::{ConsumerSentiment, NewsAnalysis, StartupProfile};

use crate::panel::{Enrichment, EnrichmentPanel};

pub type NewsPanel = EnrichmentPanel<NewsEnrichment>;
pub type ConsumerSentimentPanel = EnrichmentPanel<ConsumerSentimentEnrichment>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsKey {
    pub company: String,
    pub industry: String,
}

/// Company and industry news sentiment, keyed on name and industry.
pub struct NewsEnrichment;

impl Enrichment for NewsEnrichment {
    type Key = NewsKey;
    type Output = NewsAnalysis;

    const NAME: &'static str = "news";
    const FALLBACK_MESSAGE: &'static str = "Failed to fetch news analysis";

    fn key_for(profile: &StartupProfile) -> Option<NewsKey> {
        let company = non_blank(&profile.name)?;
        let industry = non_blank(&profile.industry)?;
        Some(NewsKey {
            company: company.to_owned(),
            industry: industry.to_owned(),
        })
    }

    fn fetch(
        client: BackendClient,
        key: NewsKey,
    ) -> BoxFuture<'static, Result<NewsAnalysis, ClientError>> {
        Box::pin(async move { client.news_analysis(&key.company, &key.industry).await })
    }
}

/// Social-media consumer sentiment, keyed on the company name.
pub struct ConsumerSentimentEnrichment;

impl Enrichment for ConsumerSentimentEnrichment {
    type Key = String;
    type Output = ConsumerSentiment;

    const NAME: &'static str = "consumer_sentiment";
    const FALLBACK_MESSAGE: &'static str = "Failed to fetch sentiment data";

    fn key_for(profile: &StartupProfile) -> Option<String> {
        non_blank(&profile.name).map(str::to_owned)
    }

    fn fetch(
        client: BackendClient,
        key: String,
    ) -> BoxFuture<'static, Result<ConsumerSentiment, ClientError>> {
        Box::pin(async move { client.consumer_sentiment(&key).await })
    }
}

/// Keys are taken verbatim from the profile; blank values mean "absent".
fn non_blank(value: &str) -> Option<&str> {
    (!value.trim().is_empty()).then_some(value)
}
