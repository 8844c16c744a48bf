//! Error types for the holdings ledger.

/// All errors the core can return.
///
/// Aggregation and rebalancing are total functions and never produce one of
/// these; only ledger mutations, input parsing and weight construction do.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("index {index} out of range for {len} holdings")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown category '{0}'")]
    InvalidCategory(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;
