use serde_json::Value;

use super::error::LedgerError;

/// Ordered buffer of decoded transaction payloads awaiting admission into a
/// block. Insertion order is preserved; entries leave only through
/// [`TransactionPool::drain_all`].
#[derive(Debug, Default)]
pub struct TransactionPool {
    pending: Vec<Value>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Structurally decode a raw payload and append it. Malformed input is
    /// rejected whole: on a decode error the pool is untouched.
    pub fn submit(&mut self, raw: &[u8]) -> Result<(), LedgerError> {
        let payload: Value = serde_json::from_slice(raw)?;
        self.pending.push(payload);
        Ok(())
    }

    /// Remove and return every pending transaction, in submission order,
    /// leaving the pool empty. Mining uses this, never `peek_all`, so no
    /// transaction can be admitted twice.
    pub fn drain_all(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.pending)
    }

    /// Read-only snapshot for observability.
    pub fn peek_all(&self) -> Vec<Value> {
        self.pending.clone()
    }

    /// Put a drained snapshot back at the head of the pool, ahead of anything
    /// submitted since the drain. Used when mining fails after the drain.
    pub fn restore_front(&mut self, mut drained: Vec<Value>) {
        drained.append(&mut self.pending);
        self.pending = drained;
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
