pub mod block;
pub mod chain;
pub mod error;
pub mod hash;
pub mod model;
pub mod pool;
pub mod proof;

pub use block::Block;
pub use error::LedgerError;
pub use model::Ledger;
pub use pool::TransactionPool;

/// Proof stored on the genesis block. Seeds the first proof-of-work search,
/// so it must be positive and non-trivial.
pub const GENESIS_PROOF: i64 = 2;

/// Sentinel payload recorded in the genesis block.
pub const GENESIS_DATA: &str = "Genesis Block";

/// Identity credited as the sender of every mining reward.
pub const REWARD_SENDER: &str = "network";

/// Units granted to the reward recipient per mined block.
pub const REWARD_AMOUNT: u64 = 1;
