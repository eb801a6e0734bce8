use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest binding a block to its content and its parent.
/// Fields are fed in a fixed order (index, timestamp, data, previous hash);
/// integers as fixed-width 8-byte little-endian, so the byte stream is
/// canonical and two distinct field tuples can never collide by framing.
///
/// The proof is deliberately not part of the preimage: the previous proof
/// seeds the search for the next one, but the admitted proof is an admission
/// credential stored alongside the block, not content.
pub fn compute_hash(
    index: u64,
    timestamp_nanos: i64,
    data: &str,
    previous_hash: &[u8],
) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(index.to_le_bytes());
    hasher.update(timestamp_nanos.to_le_bytes());
    hasher.update(data.as_bytes());
    hasher.update(previous_hash);
    hasher.finalize().into()
}
