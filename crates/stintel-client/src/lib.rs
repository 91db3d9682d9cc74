//! HTTP client for the startup intelligence analysis backend.
//!
//! Three endpoints are consumed: the primary company search and the two
//! enrichment lookups (news analysis, consumer sentiment). The backend does
//! all scraping and scoring; this crate only speaks its JSON contract.

pub mod client;
pub mod error;
pub mod path;

pub use client::BackendClient;
pub use error::ClientError;
pub use path::{encode_segment, news_path, sentiment_path, SEARCH_PATH};
