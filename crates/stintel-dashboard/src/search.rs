//! Primary company search: input, loading flag, error and resolved profile.
//!
//! The controller is a plain state machine. Issuing a request and applying
//! its response are separate intents ([`SearchController::begin_search`] and
//! [`SearchController::complete`]) so several searches may be in flight at
//! once; only the most recently issued one is ever committed.

use stintel_client::ClientError;
use stintel_core::StartupProfile;

use crate::error::ComponentError;
use crate::fetch_state::Commit;

pub const SEARCH_FALLBACK_MESSAGE: &str = "Failed to fetch startup data";

/// Derived phase of the controller. There is no terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching,
    Succeeded,
    Failed,
}

/// Handle for one issued search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    /// The name exactly as typed; the backend receives it untrimmed.
    pub company_name: String,
}

#[derive(Debug)]
struct Resolved {
    generation: u64,
    profile: StartupProfile,
}

#[derive(Debug, Default)]
pub struct SearchController {
    input: String,
    loading: bool,
    error: Option<ComponentError>,
    resolved: Option<Resolved>,
    /// Generation of the latest issued request; 0 means none yet.
    generation: u64,
}

impl SearchController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Starts a search for `company_name`.
    ///
    /// Blank input records [`ComponentError::Validation`] and returns it
    /// without issuing a request; any search already in flight stays valid.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::Validation`] when the trimmed name is empty.
    pub fn begin_search(&mut self, company_name: &str) -> Result<SearchTicket, ComponentError> {
        self.set_input(company_name);
        self.submit()
    }

    /// Starts a search for the current input.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::Validation`] when the trimmed input is empty.
    pub fn submit(&mut self) -> Result<SearchTicket, ComponentError> {
        if self.input.trim().is_empty() {
            self.error = Some(ComponentError::Validation);
            return Err(ComponentError::Validation);
        }

        self.generation += 1;
        self.loading = true;
        self.error = None;
        tracing::debug!(generation = self.generation, company_name = %self.input, "search issued");

        Ok(SearchTicket {
            generation: self.generation,
            company_name: self.input.clone(),
        })
    }

    /// Applies the outcome of the request identified by `ticket`.
    ///
    /// Responses for anything but the latest issued request are dropped.
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<StartupProfile, ClientError>,
    ) -> Commit {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                company_name = %ticket.company_name,
                "discarding superseded search response"
            );
            return Commit::Discarded;
        }

        self.loading = false;
        match outcome {
            Ok(profile) => {
                tracing::info!(
                    generation = ticket.generation,
                    name = %profile.name,
                    funding_rounds = profile.funding_rounds.len(),
                    competitors = profile.competitors.len(),
                    "search resolved"
                );
                self.error = None;
                self.resolved = Some(Resolved {
                    generation: ticket.generation,
                    profile,
                });
            }
            Err(err) => {
                tracing::warn!(
                    generation = ticket.generation,
                    company_name = %ticket.company_name,
                    error = %err,
                    "search failed"
                );
                self.error = Some(ComponentError::from_client(&err, SEARCH_FALLBACK_MESSAGE));
                self.resolved = None;
            }
        }
        Commit::Applied
    }

    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        if self.loading {
            SearchPhase::Searching
        } else if self.resolved.is_some() {
            SearchPhase::Succeeded
        } else if self.error.is_some() && self.generation > 0 {
            SearchPhase::Failed
        } else {
            SearchPhase::Idle
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&ComponentError> {
        self.error.as_ref()
    }

    /// The current profile. While a new search is loading, the previous
    /// profile stays visible until the new outcome is committed.
    #[must_use]
    pub fn profile(&self) -> Option<&StartupProfile> {
        self.resolved.as_ref().map(|r| &r.profile)
    }

    /// Generation that produced the current profile; tables use it as the
    /// dataset identity.
    #[must_use]
    pub fn resolved_generation(&self) -> Option<u64> {
        self.resolved.as_ref().map(|r| r.generation)
    }

    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.generation
    }
}
