use std::sync::atomic::{AtomicBool, Ordering};

use super::error::LedgerError;

/// How many candidates to test between cancellation-flag polls.
const CANCEL_POLL_INTERVAL: u32 = 1024;

/// Find the smallest proof admissible relative to `previous_proof`: the
/// first `p > previous_proof` with `p % 9 == 0` and
/// `p % previous_proof == 0` (fixed-difficulty rule). Deterministic and
/// side-effect-free, so re-mining from the same seed yields the same proof.
pub fn find_proof(previous_proof: i64) -> Result<i64, LedgerError> {
    let never = AtomicBool::new(false);
    find_proof_cancelable(previous_proof, &never)
}

/// Like [`find_proof`], but aborts with `Cancelled` when `cancel` is raised.
/// The flag is polled every [`CANCEL_POLL_INTERVAL`] candidates.
pub fn find_proof_cancelable(
    previous_proof: i64,
    cancel: &AtomicBool,
) -> Result<i64, LedgerError> {
    // The first admissible value is at most 9 * previous_proof, so a seed in
    // (0, i64::MAX / 9] guarantees the scan terminates without overflowing.
    // A seed <= 0 would make the modulo undefined.
    if previous_proof <= 0 || previous_proof > i64::MAX / 9 {
        return Err(LedgerError::InvalidSeed(previous_proof));
    }

    let mut candidate = previous_proof + 1;
    let mut steps: u32 = 0;
    loop {
        if candidate % 9 == 0 && candidate % previous_proof == 0 {
            return Ok(candidate);
        }
        steps = steps.wrapping_add(1);
        if steps % CANCEL_POLL_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
            return Err(LedgerError::Cancelled);
        }
        candidate += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::{find_proof, find_proof_cancelable};
    use crate::ledger::LedgerError;

    #[test]
    fn known_proofs() {
        assert_eq!(find_proof(2).unwrap(), 18);
        assert_eq!(find_proof(18).unwrap(), 36);
        assert_eq!(find_proof(36).unwrap(), 72);
        assert_eq!(find_proof(9).unwrap(), 18);
    }

    #[test]
    fn deterministic() {
        assert_eq!(find_proof(7).unwrap(), find_proof(7).unwrap());
    }

    #[test]
    fn result_is_smallest_admissible() {
        for seed in [2i64, 3, 5, 7, 11, 100] {
            let p = find_proof(seed).unwrap();
            assert_eq!(p % 9, 0);
            assert_eq!(p % seed, 0);
            assert!(p > seed);
            for candidate in (seed + 1)..p {
                assert!(
                    !(candidate % 9 == 0 && candidate % seed == 0),
                    "found smaller admissible value {candidate} for seed {seed}"
                );
            }
        }
    }

    #[test]
    fn zero_and_negative_seeds_are_rejected() {
        assert!(matches!(find_proof(0), Err(LedgerError::InvalidSeed(0))));
        assert!(matches!(find_proof(-1), Err(LedgerError::InvalidSeed(-1))));
    }

    #[test]
    fn oversized_seed_is_rejected_instead_of_overflowing() {
        assert!(matches!(
            find_proof(i64::MAX / 9 + 1),
            Err(LedgerError::InvalidSeed(_))
        ));
    }

    #[test]
    fn long_search_can_be_cancelled() {
        // Prime seed: the answer would be 9 * seed, millions of steps away.
        let cancel = AtomicBool::new(true);
        let result = find_proof_cancelable(1_000_003, &cancel);
        assert!(matches!(result, Err(LedgerError::Cancelled)));
    }

    #[test]
    fn short_search_finishes_before_the_first_poll() {
        // The flag is only polled every 1024 candidates, so a search that
        // ends earlier still succeeds.
        let cancel = AtomicBool::new(true);
        assert_eq!(find_proof_cancelable(2, &cancel).unwrap(), 18);
        cancel.store(false, Ordering::Relaxed);
        assert_eq!(find_proof_cancelable(1_000_003, &cancel).unwrap(), 9_000_027);
    }
}
