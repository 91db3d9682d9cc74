//! Client-side orchestration for the startup intelligence dashboard.
//!
//! Each asynchronously fetched region is an explicit state machine that
//! owns its own generation counter. Issuing a request and applying its
//! response are separate intents, so a response that arrives after a newer
//! request was issued is discarded rather than overwriting fresher state.
//!
//! - [`SearchController`]: the primary company search.
//! - [`EnrichmentPanel`]: one reusable fetch machine, instantiated for news
//!   and consumer sentiment.
//! - [`PaginatedTable`]: client-side windowing over the profile's lists.
//! - [`Dashboard`]: owns the above plus the in-flight request set.

pub mod dashboard;
pub mod enrichments;
pub mod error;
pub mod fetch_state;
pub mod pagination;
pub mod panel;
pub mod search;
pub mod tables;

pub use dashboard::{Dashboard, DashboardEvent, EventSource, Snapshot};
pub use enrichments::{
    ConsumerSentimentEnrichment, ConsumerSentimentPanel, NewsEnrichment, NewsKey, NewsPanel,
};
pub use error::ComponentError;
pub use fetch_state::{Commit, FetchState};
pub use pagination::{Column, DatasetId, Page, PaginatedTable, TableRow, DEFAULT_PAGE_SIZE};
pub use panel::{Enrichment, EnrichmentPanel, PanelTicket};
pub use search::{SearchController, SearchPhase, SearchTicket, SEARCH_FALLBACK_MESSAGE};
pub use tables::{
    competitor_columns, competitor_table, funding_columns, funding_table, team_columns, team_page,
    TableId,
};
