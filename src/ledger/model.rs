use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};
use serde_json::{Value, json};

use super::block::{Block, now_nanos};
use super::chain::Chain;
use super::error::LedgerError;
use super::pool::TransactionPool;
use super::proof::find_proof_cancelable;
use super::{REWARD_AMOUNT, REWARD_SENDER};

/// One ledger instance: the chain, the pending-transaction pool and the
/// mining discipline behind a single handle the HTTP layer shares.
///
/// Lock layout: the chain and the pool sit behind their own mutexes with
/// short critical sections; the proof-of-work search runs with no locks
/// held. Mining itself is serialized by an atomic guard, so the
/// read-seed / search / append sequence can never interleave with a second
/// miner — a concurrent `mine` is rejected with `Busy`.
pub struct Ledger {
    chain: Mutex<Chain>,
    pool: Mutex<TransactionPool>,
    mining: AtomicBool,
    cancel: AtomicBool,
    reward_address: String,
}

/// Releases the mining guard when the attempt ends, on every exit path.
struct MiningSlot<'a>(&'a AtomicBool);

impl Drop for MiningSlot<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Ledger {
    /// `reward_address` is the identity credited by the synthetic reward
    /// transaction of every mined block.
    pub fn new(reward_address: impl Into<String>) -> Self {
        Self {
            chain: Mutex::new(Chain::new()),
            pool: Mutex::new(TransactionPool::new()),
            mining: AtomicBool::new(false),
            cancel: AtomicBool::new(false),
            reward_address: reward_address.into(),
        }
    }

    /// Create the genesis block. Called exactly once at startup, before any
    /// handler is reachable.
    pub fn initialize(&self) -> Result<Block, LedgerError> {
        let mut chain = self.chain.lock().expect("mutex poisoned");
        let genesis = chain.initialize()?.clone();
        info!("genesis block created (hash={})", genesis.hash_hex());
        Ok(genesis)
    }

    /// Decode and enqueue a raw transaction payload. Returns the number of
    /// pending transactions after the submit.
    pub fn submit_transaction(&self, raw: &[u8]) -> Result<usize, LedgerError> {
        let mut pool = self.pool.lock().expect("mutex poisoned");
        pool.submit(raw)?;
        debug!("transaction accepted ({} pending)", pool.len());
        Ok(pool.len())
    }

    /// Mine one block: search a proof seeded by the last block's proof,
    /// drain the pool, append the reward transaction, seal and append.
    ///
    /// The pool drain happens only after the search succeeds, and the
    /// drained snapshot is restored to the head of the pool if anything
    /// fails before the block is appended, so submitted transactions are
    /// never silently lost.
    pub fn mine(&self) -> Result<Block, LedgerError> {
        if self
            .mining
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(LedgerError::Busy);
        }
        let _slot = MiningSlot(&self.mining);

        // Only mining appends, and mining is serialized by the slot, so the
        // frontier read here stays current until our own append below.
        let (seed, previous_hash, next_index) = {
            let chain = self.chain.lock().expect("mutex poisoned");
            let last = chain.last_block()?;
            (last.proof, last.hash.clone(), last.index + 1)
        };

        debug!("mining block #{next_index} from seed {seed}");
        let proof = find_proof_cancelable(seed, &self.cancel)?;

        let mut admitted = self.pool.lock().expect("mutex poisoned").drain_all();
        admitted.push(json!({
            "from": REWARD_SENDER,
            "to": self.reward_address,
            "amount": REWARD_AMOUNT,
        }));

        let data = match serde_json::to_string(&admitted) {
            Ok(data) => data,
            Err(err) => {
                // Give back only what was drained, not the reward entry.
                admitted.pop();
                self.pool
                    .lock()
                    .expect("mutex poisoned")
                    .restore_front(admitted);
                return Err(err.into());
            }
        };

        let block = Block::new(next_index, now_nanos(), data, previous_hash, proof);
        let mined = block.clone();
        self.chain.lock().expect("mutex poisoned").append(block);

        info!(
            "sealed block #{} (proof={}, hash={})",
            mined.index,
            mined.proof,
            mined.hash_hex()
        );
        Ok(mined)
    }

    /// Verify the whole chain; `Ok` carries the height, a failure names the
    /// first broken index.
    pub fn validate(&self) -> Result<usize, LedgerError> {
        let chain = self.chain.lock().expect("mutex poisoned");
        chain.validate()?;
        Ok(chain.height())
    }

    /// Point-in-time copy of the chain.
    pub fn blocks(&self) -> Vec<Block> {
        self.chain.lock().expect("mutex poisoned").blocks().to_vec()
    }

    pub fn height(&self) -> usize {
        self.chain.lock().expect("mutex poisoned").height()
    }

    /// Point-in-time copy of the pending pool.
    pub fn pending_transactions(&self) -> Vec<Value> {
        self.pool.lock().expect("mutex poisoned").peek_all()
    }

    /// Raise the cancellation flag: an in-flight proof search aborts with
    /// `Cancelled` before any state is touched.
    pub fn shutdown(&self) {
        self.cancel.store(true, Ordering::Relaxed);
        info!("ledger shutdown requested");
    }
}
