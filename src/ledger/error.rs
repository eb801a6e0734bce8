use thiserror::Error;

/// Failure taxonomy for the ledger. Every rejected operation carries an
/// identifiable kind and leaves state unchanged.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed transaction payload; the pool was not modified.
    #[error("malformed transaction payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Proof-of-work seed outside the searchable range (must be positive).
    #[error("proof-of-work seed {0} is outside the searchable range")]
    InvalidSeed(i64),

    #[error("ledger has no genesis block yet")]
    NotInitialized,

    #[error("ledger is already initialized")]
    AlreadyInitialized,

    /// Another mining operation is in flight; retryable.
    #[error("a mining operation is already in progress")]
    Busy,

    /// Shutdown interrupted the proof search; nothing was appended.
    #[error("mining was cancelled by shutdown")]
    Cancelled,

    #[error("chain integrity broken at block {index}")]
    ValidationFailure { index: u64 },
}

impl LedgerError {
    /// Stable machine-readable kind, used in structured API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::Decode(_) => "decode",
            LedgerError::InvalidSeed(_) => "invalid_seed",
            LedgerError::NotInitialized => "not_initialized",
            LedgerError::AlreadyInitialized => "already_initialized",
            LedgerError::Busy => "busy",
            LedgerError::Cancelled => "cancelled",
            LedgerError::ValidationFailure { .. } => "validation_failure",
        }
    }
}
