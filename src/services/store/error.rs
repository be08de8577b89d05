//! Store failure taxonomy.
//!
//! Every failed mutation resolves to exactly one of these; the
//! reschedule controller turns them into banner messages and never
//! propagates them further.

/// Outcome classification for calls against the authoritative store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Rejected client-side before any request was issued.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Hard overlap rejected by the store (409).
    #[error("Scheduling conflict: {0}")]
    Conflict(String),

    /// The caller's version token no longer matches the store's current
    /// value; resolved only by a fresh data pull.
    #[error("Entry was edited elsewhere")]
    StaleVersion,

    /// Another session holds an edit lock on the activity (423).
    #[error("Entry is locked by another session")]
    Locked,

    /// Network, decode, or server failure; safe to retry manually.
    #[error("Transport failure: {0}")]
    Transport(String),
}

impl StoreError {
    /// Whether a retry with unchanged input could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Locked | StoreError::Transport(_))
    }
}
