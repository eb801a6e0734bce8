use super::block::Block;
use super::error::LedgerError;

/// Append-only ordered sequence of blocks. The chain owns every block for
/// the process lifetime; the last element is the only frontier, read but
/// never rewritten.
#[derive(Debug, Default)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Empty -> Genesis. Fails if the chain already has blocks.
    pub fn initialize(&mut self) -> Result<&Block, LedgerError> {
        if !self.blocks.is_empty() {
            return Err(LedgerError::AlreadyInitialized);
        }
        self.blocks.push(Block::genesis());
        Ok(&self.blocks[0])
    }

    pub fn last_block(&self) -> Result<&Block, LedgerError> {
        self.blocks.last().ok_or(LedgerError::NotInitialized)
    }

    pub fn append(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn height(&self) -> usize {
        self.blocks.len()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Read-only pass over the whole sequence: every block's digest must
    /// recompute from its own fields and every `previous_hash` must equal
    /// the predecessor's `hash`. Reports the first failing position; never
    /// repairs anything.
    pub fn validate(&self) -> Result<(), LedgerError> {
        for (i, block) in self.blocks.iter().enumerate() {
            let failed = Err(LedgerError::ValidationFailure { index: i as u64 });
            if block.hash != block.recompute_hash() {
                return failed;
            }
            if i == 0 {
                if block.index != 0 || !block.previous_hash.is_empty() {
                    return failed;
                }
            } else {
                let prev = &self.blocks[i - 1];
                if block.previous_hash != prev.hash || block.index != prev.index + 1 {
                    return failed;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Chain;
    use crate::ledger::LedgerError;
    use crate::ledger::block::{Block, now_nanos};

    fn extend(chain: &mut Chain, data: &str, proof: i64) {
        let last = chain.last_block().unwrap();
        let block = Block::new(
            last.index + 1,
            now_nanos(),
            data.to_string(),
            last.hash.clone(),
            proof,
        );
        chain.append(block);
    }

    #[test]
    fn initialize_only_once() {
        let mut chain = Chain::new();
        assert!(chain.initialize().is_ok());
        assert!(matches!(
            chain.initialize(),
            Err(LedgerError::AlreadyInitialized)
        ));
    }

    #[test]
    fn last_block_on_empty_chain() {
        let chain = Chain::new();
        assert!(matches!(
            chain.last_block(),
            Err(LedgerError::NotInitialized)
        ));
    }

    #[test]
    fn well_formed_chain_validates() {
        let mut chain = Chain::new();
        chain.initialize().unwrap();
        extend(&mut chain, "one", 18);
        extend(&mut chain, "two", 36);
        assert!(chain.validate().is_ok());
        assert_eq!(chain.height(), 3);
    }

    #[test]
    fn corruption_is_reported_at_its_index() {
        let mut chain = Chain::new();
        chain.initialize().unwrap();
        extend(&mut chain, "one", 18);
        extend(&mut chain, "two", 36);

        chain.blocks[1].data.push('!');
        assert!(matches!(
            chain.validate(),
            Err(LedgerError::ValidationFailure { index: 1 })
        ));
    }

    #[test]
    fn broken_linkage_is_reported() {
        let mut chain = Chain::new();
        chain.initialize().unwrap();
        extend(&mut chain, "one", 18);

        // Rebuild block 1 against the wrong parent digest; its own hash is
        // consistent but the linkage is not.
        let stray = Block::new(1, now_nanos(), "one".into(), vec![9u8; 32], 18);
        chain.blocks[1] = stray;
        assert!(matches!(
            chain.validate(),
            Err(LedgerError::ValidationFailure { index: 1 })
        ));
    }

    #[test]
    fn tampered_genesis_is_reported_at_zero() {
        let mut chain = Chain::new();
        chain.initialize().unwrap();
        chain.blocks[0].timestamp_nanos += 1;
        assert!(matches!(
            chain.validate(),
            Err(LedgerError::ValidationFailure { index: 0 })
        ));
    }

    #[test]
    fn empty_chain_is_vacuously_valid() {
        assert!(Chain::new().validate().is_ok());
    }
}
