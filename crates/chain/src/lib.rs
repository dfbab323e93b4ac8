//! Blockchain orchestration for merklechain.
//!
//! This crate turns core primitives into a running ledger:
//! - **Blockchain**: the chain of hash-linked blocks, seeded with genesis
//! - **Mempool**: the ordered pool of pending transactions
//! - **Shared**: a lock-guarded handle for concurrent callers
//!
//! # Example
//!
//! ```rust
//! use merklechain_chain::Blockchain;
//! use merklechain_core::Amount;
//!
//! let mut blockchain = Blockchain::new().unwrap();
//! blockchain.add_transaction("A", "B", "1.0".parse::<Amount>().unwrap());
//!
//! let block = blockchain.create_block().unwrap();
//! assert_eq!(block.tx_count(), 1);
//! assert_eq!(blockchain.len(), 2);
//! assert!(blockchain.verify().is_ok());
//! ```

pub mod blockchain;
pub mod mempool;
pub mod shared;

// Re-export commonly used types
pub use blockchain::{
    genesis_previous_hash, Blockchain, BlockchainConfig, BlockchainError, BlockchainStats,
};
pub use mempool::{PoolStats, TransactionPool};
pub use shared::SharedBlockchain;
