use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::ledger::{Block, Ledger, LedgerError};

/// Shared application state: one ledger handle for the whole process.
pub struct AppState {
    pub ledger: Arc<Ledger>,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub accepted: bool,
    pub pending: usize,
}

/// Reduced external view of a mined block: `previous_hash` and `proof` are
/// intentionally omitted.
#[derive(Serialize)]
pub struct MineResponse {
    pub index: u64,
    /// RFC 3339 with nanosecond precision.
    pub timestamp: String,
    pub data: String,
    /// Lowercase hex digest.
    pub hash: String,
}

impl From<&Block> for MineResponse {
    fn from(block: &Block) -> Self {
        Self {
            index: block.index,
            timestamp: block.timestamp_rfc3339(),
            data: block.data.clone(),
            hash: block.hash_hex(),
        }
    }
}

#[derive(Serialize)]
pub struct ChainResponse {
    pub length: usize,
    pub chain: Vec<Block>,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_index: Option<u64>,
}

#[derive(Serialize)]
pub struct PoolResponse {
    pub size: usize,
    pub transactions: Vec<Value>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

impl From<&LedgerError> for ErrorResponse {
    fn from(err: &LedgerError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}
