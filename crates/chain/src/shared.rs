//! Thread-safe handle over a single [`Blockchain`].

use crate::blockchain::{Blockchain, BlockchainConfig, BlockchainStats, Result};
use merklechain_core::{Amount, Block, Hash, Transaction};
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable handle that serializes every operation behind one lock.
///
/// Block creation holds the lock from draining the pool to appending the
/// block, so transactions added concurrently land either in that block or
/// in the next pool, never in both and never nowhere.
#[derive(Debug, Clone)]
pub struct SharedBlockchain {
    inner: Arc<Mutex<Blockchain>>,
}

impl SharedBlockchain {
    /// Create a new shared blockchain seeded with a genesis block.
    pub fn new() -> Result<Self> {
        Ok(Self::from_blockchain(Blockchain::new()?))
    }

    pub fn with_config(config: BlockchainConfig) -> Result<Self> {
        Ok(Self::from_blockchain(Blockchain::with_config(config)?))
    }

    /// Wrap an existing blockchain.
    pub fn from_blockchain(blockchain: Blockchain) -> Self {
        Self {
            inner: Arc::new(Mutex::new(blockchain)),
        }
    }

    pub fn add_transaction(
        &self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        value: Amount,
    ) {
        self.inner.lock().add_transaction(sender, recipient, value);
    }

    pub fn submit_transaction(&self, tx: Transaction) {
        self.inner.lock().submit_transaction(tx);
    }

    /// Seal the pool into a block linked to the tip, atomically.
    pub fn create_block(&self) -> Result<Block> {
        self.inner.lock().create_block().cloned()
    }

    /// Seal the pool into a block linked to a caller-supplied hash.
    ///
    /// Another caller may append between reading the tip hash and this
    /// call, so the supplied hash can be stale. Prefer
    /// [`SharedBlockchain::create_block`].
    pub fn create_block_with_previous_hash(&self, previous_hash: Hash) -> Result<Block> {
        self.inner
            .lock()
            .create_block_with_previous_hash(previous_hash)
            .cloned()
    }

    /// Copy of the most recently appended block.
    pub fn last_block(&self) -> Result<Block> {
        self.inner.lock().last_block().cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.inner.lock().pool().len()
    }

    pub fn verify(&self) -> Result<()> {
        self.inner.lock().verify()
    }

    pub fn stats(&self) -> Result<BlockchainStats> {
        self.inner.lock().stats()
    }

    /// Run `f` with shared access to the blockchain while holding the lock.
    pub fn read<R>(&self, f: impl FnOnce(&Blockchain) -> R) -> R {
        f(&self.inner.lock())
    }
}
