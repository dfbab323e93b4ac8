//! Main blockchain orchestration.
//!
//! This module owns the chain of blocks and the pending transaction pool,
//! and turns the pool into linked blocks.

use crate::mempool::TransactionPool;
use merklechain_core::{Amount, Block, Clock, EncodingError, Hash, SystemClock, Transaction};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("chain is empty")]
    EmptyChain,

    #[error("genesis block does not link to the empty sentinel block")]
    InvalidGenesis,

    #[error("block {height} links to {found} but the previous block hashes to {expected}")]
    BrokenLink {
        height: u64,
        expected: Hash,
        found: Hash,
    },

    #[error("block {height} merkle root does not match its transactions")]
    MerkleRootMismatch { height: u64 },
}

pub type Result<T> = std::result::Result<T, BlockchainError>;

/// Blockchain configuration.
#[derive(Debug, Clone)]
pub struct BlockchainConfig {
    /// Timestamp source for new blocks, genesis included.
    pub clock: Arc<dyn Clock>,
}

impl BlockchainConfig {
    /// Configuration that stamps blocks with the given clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self::with_clock(SystemClock)
    }
}

/// Hash of the empty sentinel block, stored as the genesis previous hash.
pub fn genesis_previous_hash() -> Result<Hash> {
    Ok(Block::default().hash()?)
}

/// An append-only chain of blocks plus the pool feeding the next block.
///
/// The chain always holds at least the genesis block.
#[derive(Debug)]
pub struct Blockchain {
    /// Blocks in order; index is the block height.
    chain: Vec<Block>,
    /// Transactions waiting for the next block.
    pool: TransactionPool,
    /// Configuration.
    config: BlockchainConfig,
}

impl Blockchain {
    /// Create a new blockchain seeded with a genesis block.
    pub fn new() -> Result<Self> {
        Self::with_config(BlockchainConfig::default())
    }

    /// Create a new blockchain with the given configuration.
    ///
    /// The genesis block links to the hash of `Block::default()` and holds
    /// no transactions.
    pub fn with_config(config: BlockchainConfig) -> Result<Self> {
        let mut blockchain = Self {
            chain: Vec::new(),
            pool: TransactionPool::new(),
            config,
        };
        blockchain.append_block(genesis_previous_hash()?)?;
        Ok(blockchain)
    }

    /// Add a transaction to the pending pool. Nothing is validated.
    pub fn add_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        value: Amount,
    ) {
        self.submit_transaction(Transaction::new(sender, recipient, value));
    }

    /// Add an already-built transaction to the pending pool.
    pub fn submit_transaction(&mut self, tx: Transaction) {
        self.pool.add(tx);
    }

    /// Seal the pending pool into a new block linked to the current tip.
    ///
    /// The previous hash is taken from `last_block()`, so the new block
    /// always links to the block it follows.
    pub fn create_block(&mut self) -> Result<&Block> {
        let previous_hash = self.last_block()?.hash()?;
        self.append_block(previous_hash)
    }

    /// Seal the pending pool into a new block linked to `previous_hash`.
    ///
    /// The supplied hash is trusted as-is. A hash that does not match the
    /// current tip is logged and stored anyway; [`Blockchain::verify`]
    /// reports it as a broken link. Prefer [`Blockchain::create_block`].
    pub fn create_block_with_previous_hash(&mut self, previous_hash: Hash) -> Result<&Block> {
        let tip_hash = self.last_block()?.hash()?;
        if tip_hash != previous_hash {
            warn!(
                height = self.chain.len(),
                supplied = %previous_hash,
                tip = %tip_hash,
                "previous hash does not match the chain tip"
            );
        }
        self.append_block(previous_hash)
    }

    /// Build a block from the whole pool, append it, and leave the pool empty.
    ///
    /// On an encoding failure the drained transactions are dropped with the
    /// error; the chain itself is left unchanged.
    fn append_block(&mut self, previous_hash: Hash) -> Result<&Block> {
        let transactions = self.pool.drain();
        let timestamp = self.config.clock.now_nanos();
        let block = Block::with_timestamp(timestamp, previous_hash, transactions)?;

        debug!(
            height = self.chain.len(),
            txs = block.tx_count(),
            merkle_root = %block.merkle_root(),
            previous_hash = %block.previous_hash(),
            "block appended"
        );

        self.chain.push(block);
        let index = self.chain.len() - 1;
        Ok(&self.chain[index])
    }

    /// Get the most recently appended block.
    pub fn last_block(&self) -> Result<&Block> {
        self.chain.last().ok_or(BlockchainError::EmptyChain)
    }

    /// Get the genesis block.
    pub fn genesis(&self) -> Result<&Block> {
        self.chain.first().ok_or(BlockchainError::EmptyChain)
    }

    /// Get a block by height.
    pub fn block(&self, height: u64) -> Option<&Block> {
        usize::try_from(height).ok().and_then(|h| self.chain.get(h))
    }

    /// All blocks, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    /// Height of the tip (0 when only genesis exists).
    pub fn height(&self) -> u64 {
        self.chain.len().saturating_sub(1) as u64
    }

    /// Number of blocks including genesis.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Only true for a chain that was never seeded.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Transactions waiting for the next block.
    pub fn pending_transactions(&self) -> &[Transaction] {
        self.pool.transactions()
    }

    pub fn pool(&self) -> &TransactionPool {
        &self.pool
    }

    /// Check every block against its transactions and its predecessor.
    ///
    /// Verifies that genesis links to the empty sentinel, that every merkle
    /// root matches its transactions, and that every later block stores the
    /// hash of the block before it.
    pub fn verify(&self) -> Result<()> {
        let genesis = self.genesis()?;
        if *genesis.previous_hash() != genesis_previous_hash()? {
            return Err(BlockchainError::InvalidGenesis);
        }

        let mut expected_previous: Option<Hash> = None;
        for (height, block) in self.chain.iter().enumerate() {
            let height = height as u64;

            if !block.verify_merkle_root()? {
                return Err(BlockchainError::MerkleRootMismatch { height });
            }

            if let Some(expected) = expected_previous {
                if *block.previous_hash() != expected {
                    return Err(BlockchainError::BrokenLink {
                        height,
                        expected,
                        found: *block.previous_hash(),
                    });
                }
            }

            expected_previous = Some(block.hash()?);
        }

        Ok(())
    }

    /// Get blockchain statistics.
    pub fn stats(&self) -> Result<BlockchainStats> {
        let latest_block = self.last_block()?;

        Ok(BlockchainStats {
            height: self.height(),
            latest_block_hash: latest_block.hash()?,
            latest_timestamp: latest_block.timestamp(),
            committed_transactions: self.chain.iter().map(Block::tx_count).sum(),
            pending_transactions: self.pool.len(),
        })
    }
}

/// Blockchain statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockchainStats {
    /// Current chain height.
    pub height: u64,
    /// Hash of the latest block.
    pub latest_block_hash: Hash,
    /// Timestamp of the latest block (nanoseconds).
    pub latest_timestamp: i64,
    /// Transactions sealed in blocks.
    pub committed_transactions: usize,
    /// Number of pending transactions.
    pub pending_transactions: usize,
}
