use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::hash::compute_hash;
use super::{GENESIS_DATA, GENESIS_PROOF};

/// A single ledger entry. Immutable once constructed: every field is fixed
/// at creation and `hash` is a pure function of the others, so validation
/// can always recompute it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    /// Creation instant in Unix nanoseconds, captured at construction.
    pub timestamp_nanos: i64,
    /// Opaque payload; for mined blocks, the serialized transaction snapshot.
    pub data: String,
    /// Digest of the preceding block; empty only for genesis.
    #[serde(with = "hex")]
    pub previous_hash: Vec<u8>,
    /// Admission credential relative to the previous block's proof.
    /// Not an input to `hash`.
    pub proof: i64,
    #[serde(with = "hex")]
    pub hash: Vec<u8>,
}

impl Block {
    pub fn new(
        index: u64,
        timestamp_nanos: i64,
        data: String,
        previous_hash: Vec<u8>,
        proof: i64,
    ) -> Self {
        let hash = compute_hash(index, timestamp_nanos, &data, &previous_hash).to_vec();
        Self {
            index,
            timestamp_nanos,
            data,
            previous_hash,
            proof,
            hash,
        }
    }

    /// The unique block with index 0 and a zero-length previous hash.
    pub fn genesis() -> Self {
        Self::new(
            0,
            now_nanos(),
            GENESIS_DATA.to_string(),
            Vec::new(),
            GENESIS_PROOF,
        )
    }

    /// Re-derive the digest from the stored fields. Equals `hash` iff the
    /// block is untampered.
    pub fn recompute_hash(&self) -> Vec<u8> {
        compute_hash(
            self.index,
            self.timestamp_nanos,
            &self.data,
            &self.previous_hash,
        )
        .to_vec()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.timestamp_nanos)
    }

    /// External form of the timestamp: RFC 3339 with nanosecond precision.
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp().to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    pub fn hash_hex(&self) -> String {
        hex::encode(&self.hash)
    }
}

/// Current instant in Unix nanoseconds.
pub fn now_nanos() -> i64 {
    Utc::now()
        .timestamp_nanos_opt()
        .expect("system clock out of nanosecond range")
}

#[cfg(test)]
mod tests {
    use super::{Block, now_nanos};
    use crate::ledger::GENESIS_PROOF;

    #[test]
    fn genesis_shape() {
        let b = Block::genesis();
        assert_eq!(b.index, 0);
        assert!(b.previous_hash.is_empty());
        assert_eq!(b.proof, GENESIS_PROOF);
        assert_eq!(b.hash, b.recompute_hash());
        assert_eq!(b.hash.len(), 32);
    }

    #[test]
    fn proof_is_not_hashed() {
        let mut b = Block::new(1, now_nanos(), "x".into(), vec![0u8; 32], 18);
        b.proof = 9999;
        // Changing the proof must not invalidate the digest.
        assert_eq!(b.hash, b.recompute_hash());
    }

    #[test]
    fn tampering_any_field_breaks_recomputation() {
        let baseline = Block::new(3, 1_600_000_000_000_000_000, "abc".into(), vec![7u8; 32], 36);

        let mut b = baseline.clone();
        b.data = "abd".into();
        assert_ne!(b.hash, b.recompute_hash());

        let mut b = baseline.clone();
        b.index = 4;
        assert_ne!(b.hash, b.recompute_hash());

        let mut b = baseline.clone();
        b.timestamp_nanos += 1;
        assert_ne!(b.hash, b.recompute_hash());

        let mut b = baseline.clone();
        b.previous_hash[0] ^= 1;
        assert_ne!(b.hash, b.recompute_hash());
    }

    #[test]
    fn rfc3339_rendering_keeps_nanoseconds() {
        let b = Block::new(1, 1_600_000_000_000_000_001, "x".into(), Vec::new(), 18);
        assert_eq!(b.timestamp_rfc3339(), "2020-09-13T12:26:40.000000001Z");
    }

    #[test]
    fn hash_hex_is_lowercase() {
        let b = Block::genesis();
        let hx = b.hash_hex();
        assert_eq!(hx.len(), 64);
        assert!(hx.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
