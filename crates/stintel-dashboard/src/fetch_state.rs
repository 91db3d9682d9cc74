//! Loading state shared by every asynchronously fetched dashboard region.

use crate::error::ComponentError;

/// State of one asynchronous fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested; the region renders nothing.
    Idle,
    Loading,
    Success(T),
    Failed(ComponentError),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            FetchState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ComponentError> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// What a component did with a resolved response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The response belonged to the latest request and was applied.
    Applied,
    /// A newer request superseded it; state is unchanged.
    Discarded,
}

impl Commit {
    pub fn is_applied(self) -> bool {
        matches!(self, Commit::Applied)
    }
}
