//! Wires the search controller, both enrichment panels and the two tables
//! together and drives their requests.
//!
//! All in-flight requests live in one [`FuturesUnordered`] polled from the
//! caller's task. Each resolved request is routed back as an intent to the
//! component that issued it; that component alone decides whether the
//! response is still current.

use std::fmt;
use std::num::NonZeroUsize;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use stintel_client::{BackendClient, ClientError};
use stintel_core::{
    AppConfig, Competitor, ConsumerSentiment, FundingRound, NewsAnalysis, StartupProfile,
};

use crate::enrichments::{
    ConsumerSentimentEnrichment, ConsumerSentimentPanel, NewsEnrichment, NewsKey, NewsPanel,
};
use crate::error::ComponentError;
use crate::fetch_state::{Commit, FetchState};
use crate::pagination::{DatasetId, Page, PaginatedTable};
use crate::panel::{Enrichment, PanelTicket};
use crate::search::{SearchController, SearchPhase, SearchTicket};
use crate::tables::{competitor_table, funding_table, team_page, TableId};

/// A resolved request, tagged with the ticket it was issued under.
enum Completion {
    Search(SearchTicket, Result<StartupProfile, ClientError>),
    News(PanelTicket<NewsKey>, Result<NewsAnalysis, ClientError>),
    ConsumerSentiment(PanelTicket<String>, Result<ConsumerSentiment, ClientError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    Search,
    News,
    ConsumerSentiment,
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSource::Search => write!(f, "search"),
            EventSource::News => write!(f, "news"),
            EventSource::ConsumerSentiment => write!(f, "consumer_sentiment"),
        }
    }
}

/// One request resolved and was either applied or discarded as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardEvent {
    pub source: EventSource,
    pub commit: Commit,
}

/// Read-only view of everything the shell renders.
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub phase: SearchPhase,
    pub input: &'a str,
    pub error: Option<&'a ComponentError>,
    pub profile: Option<&'a StartupProfile>,
    /// `None` when the panel has no key and renders nothing.
    pub news: Option<&'a FetchState<NewsAnalysis>>,
    pub consumer_sentiment: Option<&'a FetchState<ConsumerSentiment>>,
    pub funding: Option<Page>,
    pub competitors: Option<Page>,
    /// The whole roster on one page.
    pub team: Option<Page>,
}

pub struct Dashboard {
    client: BackendClient,
    search: SearchController,
    news: NewsPanel,
    consumer_sentiment: ConsumerSentimentPanel,
    funding: PaginatedTable<FundingRound>,
    competitors: PaginatedTable<Competitor>,
    enrichment_enabled: bool,
    in_flight: FuturesUnordered<BoxFuture<'static, Completion>>,
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("backend", &self.client.base_url().as_str())
            .field("search", &self.search)
            .field("news", &self.news)
            .field("consumer_sentiment", &self.consumer_sentiment)
            .field("enrichment_enabled", &self.enrichment_enabled)
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    #[must_use]
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            search: SearchController::new(),
            news: NewsPanel::new(),
            consumer_sentiment: ConsumerSentimentPanel::new(),
            funding: funding_table(),
            competitors: competitor_table(),
            enrichment_enabled: true,
            in_flight: FuturesUnordered::new(),
        }
    }

    /// Builds the client from `config` and applies its page size.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] or [`ClientError::Http`] when
    /// the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let client = BackendClient::new(
            &config.backend_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        Ok(Self::new(client).with_page_size(config.page_size))
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.funding = self.funding.with_page_size(page_size);
        self.competitors = self.competitors.with_page_size(page_size);
        self
    }

    /// When disabled, resolved profiles never trigger panel requests.
    #[must_use]
    pub fn with_enrichment(mut self, enabled: bool) -> Self {
        self.enrichment_enabled = enabled;
        self
    }

    /// Issues a search for `company_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::Validation`] for blank input; nothing is
    /// sent and requests already in flight are unaffected.
    pub fn submit_search(&mut self, company_name: &str) -> Result<(), ComponentError> {
        let ticket = self.search.begin_search(company_name)?;
        let client = self.client.clone();
        self.in_flight.push(Box::pin(async move {
            let outcome = client.search(&ticket.company_name).await;
            Completion::Search(ticket, outcome)
        }));
        Ok(())
    }

    /// Waits for the next request to resolve and routes it to its component.
    ///
    /// Returns `None` immediately when nothing is in flight.
    pub async fn next_event(&mut self) -> Option<DashboardEvent> {
        let completion = self.in_flight.next().await?;
        Some(self.dispatch(completion))
    }

    /// Drives every in-flight request, including the panel requests a
    /// committed search spawns, until nothing is left.
    pub async fn settle(&mut self) -> Vec<DashboardEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            events.push(event);
        }
        events
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn next_page(&mut self, table: TableId) -> bool {
        match table {
            TableId::Funding => self.funding.next(),
            TableId::Competitors => self.competitors.next(),
        }
    }

    pub fn previous_page(&mut self, table: TableId) -> bool {
        match table {
            TableId::Funding => self.funding.previous(),
            TableId::Competitors => self.competitors.previous(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        let profile = self.search.profile();
        Snapshot {
            phase: self.search.phase(),
            input: self.search.input(),
            error: self.search.error(),
            profile,
            news: self.news.is_visible().then(|| self.news.state()),
            consumer_sentiment: self
                .consumer_sentiment
                .is_visible()
                .then(|| self.consumer_sentiment.state()),
            funding: profile.map(|p| self.funding.page(&p.funding_rounds)),
            competitors: profile.map(|p| self.competitors.page(&p.competitors)),
            team: profile.map(|p| team_page(&p.team_members)),
        }
    }

    /// A profile is shown and at least one panel failed.
    #[must_use]
    pub fn has_partial_failure(&self) -> bool {
        self.search.profile().is_some()
            && (self.news.state().error().is_some()
                || self.consumer_sentiment.state().error().is_some())
    }

    #[must_use]
    pub fn search(&self) -> &SearchController {
        &self.search
    }

    #[must_use]
    pub fn news(&self) -> &NewsPanel {
        &self.news
    }

    #[must_use]
    pub fn consumer_sentiment(&self) -> &ConsumerSentimentPanel {
        &self.consumer_sentiment
    }

    #[must_use]
    pub fn funding_table(&self) -> &PaginatedTable<FundingRound> {
        &self.funding
    }

    #[must_use]
    pub fn competitor_table(&self) -> &PaginatedTable<Competitor> {
        &self.competitors
    }

    fn dispatch(&mut self, completion: Completion) -> DashboardEvent {
        match completion {
            Completion::Search(ticket, outcome) => {
                let commit = self.search.complete(&ticket, outcome);
                if commit.is_applied() {
                    self.search_committed();
                }
                DashboardEvent {
                    source: EventSource::Search,
                    commit,
                }
            }
            Completion::News(ticket, outcome) => DashboardEvent {
                source: EventSource::News,
                commit: self.news.response_arrived(&ticket, outcome),
            },
            Completion::ConsumerSentiment(ticket, outcome) => DashboardEvent {
                source: EventSource::ConsumerSentiment,
                commit: self.consumer_sentiment.response_arrived(&ticket, outcome),
            },
        }
    }

    /// Re-derives everything that depends on the resolved profile.
    fn search_committed(&mut self) {
        let (news_key, sentiment_key) = match self.search.profile() {
            Some(profile) if self.enrichment_enabled => (
                NewsEnrichment::key_for(profile),
                ConsumerSentimentEnrichment::key_for(profile),
            ),
            _ => (None, None),
        };

        match (self.search.profile(), self.search.resolved_generation()) {
            (Some(profile), Some(generation)) => {
                let dataset = DatasetId(generation);
                self.funding.bind(dataset, profile.funding_rounds.len());
                self.competitors.bind(dataset, profile.competitors.len());
            }
            _ => {
                self.funding.clear();
                self.competitors.clear();
            }
        }

        // An unchanged key is only refetched when its last request failed.
        let news_ticket = self
            .news
            .key_changed(news_key)
            .or_else(|| self.news.retry_failed());
        if let Some(ticket) = news_ticket {
            self.spawn::<NewsEnrichment>(ticket, Completion::News);
        }
        let sentiment_ticket = self
            .consumer_sentiment
            .key_changed(sentiment_key)
            .or_else(|| self.consumer_sentiment.retry_failed());
        if let Some(ticket) = sentiment_ticket {
            self.spawn::<ConsumerSentimentEnrichment>(ticket, Completion::ConsumerSentiment);
        }
    }

    fn spawn<E: Enrichment + 'static>(
        &mut self,
        ticket: PanelTicket<E::Key>,
        wrap: fn(PanelTicket<E::Key>, Result<E::Output, ClientError>) -> Completion,
    ) {
        let request = E::fetch(self.client.clone(), ticket.key.clone());
        self.in_flight.push(Box::pin(async move { wrap(ticket, request.await) }));
    }
}
