//! Reusable async-fetch state machine for enrichment panels.
//!
//! A panel is keyed off fields of the resolved profile. Whenever the key
//! changes it issues exactly one request; when a response arrives it is
//! committed only if it still belongs to the panel's current key and
//! generation. Everything else is discarded silently, which is how a slow
//! response for an old company is kept from overwriting the new one.

use std::fmt;

use futures::future::BoxFuture;
use stintel_client::{BackendClient, ClientError};
use stintel_core::StartupProfile;

use crate::error::ComponentError;
use crate::fetch_state::{Commit, FetchState};

/// Describes one kind of enrichment: what it is keyed on and how it fetches.
pub trait Enrichment {
    type Key: Clone + PartialEq + fmt::Debug + Send + 'static;
    type Output: Send + 'static;

    /// Panel name used in logs.
    const NAME: &'static str;

    /// Message shown when the request fails without a backend message.
    const FALLBACK_MESSAGE: &'static str;

    /// Derives the key from a profile. `None` when a required field is empty.
    fn key_for(profile: &StartupProfile) -> Option<Self::Key>;

    /// Issues the request for `key`.
    fn fetch(
        client: BackendClient,
        key: Self::Key,
    ) -> BoxFuture<'static, Result<Self::Output, ClientError>>;
}

/// Handle for one issued enrichment request.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelTicket<K> {
    pub generation: u64,
    pub key: K,
}

pub struct EnrichmentPanel<E: Enrichment> {
    key: Option<E::Key>,
    state: FetchState<E::Output>,
    generation: u64,
}

impl<E: Enrichment> Default for EnrichmentPanel<E> {
    fn default() -> Self {
        Self {
            key: None,
            state: FetchState::Idle,
            generation: 0,
        }
    }
}

impl<E: Enrichment> fmt::Debug for EnrichmentPanel<E>
where
    E::Output: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrichmentPanel")
            .field("name", &E::NAME)
            .field("key", &self.key)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish()
    }
}

impl<E: Enrichment> EnrichmentPanel<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reacts to a (possibly) new key.
    ///
    /// Returns a ticket when a request must be issued. An unchanged key is a
    /// no-op; `None` returns the panel to [`FetchState::Idle`] and orphans any
    /// request still in flight.
    pub fn key_changed(&mut self, key: Option<E::Key>) -> Option<PanelTicket<E::Key>> {
        if key == self.key {
            return None;
        }

        self.generation += 1;
        self.key.clone_from(&key);

        let Some(key) = key else {
            tracing::debug!(panel = E::NAME, "key cleared; panel idle");
            self.state = FetchState::Idle;
            return None;
        };

        tracing::debug!(panel = E::NAME, generation = self.generation, ?key, "enrichment requested");
        self.state = FetchState::Loading;
        Some(PanelTicket {
            generation: self.generation,
            key,
        })
    }

    /// Re-issues the request for the current key if the last one failed.
    ///
    /// Loaded, loading and idle panels are left alone.
    pub fn retry_failed(&mut self) -> Option<PanelTicket<E::Key>> {
        if !matches!(self.state, FetchState::Failed(_)) {
            return None;
        }
        let key = self.key.clone()?;

        self.generation += 1;
        tracing::debug!(panel = E::NAME, generation = self.generation, ?key, "retrying failed enrichment");
        self.state = FetchState::Loading;
        Some(PanelTicket {
            generation: self.generation,
            key,
        })
    }

    /// Applies the outcome of the request identified by `ticket`.
    pub fn response_arrived(
        &mut self,
        ticket: &PanelTicket<E::Key>,
        outcome: Result<E::Output, ClientError>,
    ) -> Commit {
        if ticket.generation != self.generation || self.key.as_ref() != Some(&ticket.key) {
            tracing::debug!(
                panel = E::NAME,
                stale = ticket.generation,
                current = self.generation,
                key = ?ticket.key,
                "discarding superseded enrichment response"
            );
            return Commit::Discarded;
        }

        self.state = match outcome {
            Ok(output) => {
                tracing::info!(panel = E::NAME, key = ?ticket.key, "enrichment resolved");
                FetchState::Success(output)
            }
            Err(err) => {
                tracing::warn!(panel = E::NAME, key = ?ticket.key, error = %err, "enrichment failed");
                FetchState::Failed(ComponentError::from_client(&err, E::FALLBACK_MESSAGE))
            }
        };
        Commit::Applied
    }

    #[must_use]
    pub fn key(&self) -> Option<&E::Key> {
        self.key.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> &FetchState<E::Output> {
        &self.state
    }

    /// `false` when the panel has no key and should render nothing.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.key.is_some()
    }
}
