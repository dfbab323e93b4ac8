//! Core ledger primitives for merklechain.
//!
//! This crate provides the types every chain is built from:
//! - Blake3 digests and the fixed-size [`Hash`] type
//! - Fixed-precision amounts and transfer transactions
//! - The canonical byte encoding that all hashes are computed over
//! - Merkle roots and inclusion proofs
//! - Blocks and the clocks that timestamp them

pub mod amount;
pub mod block;
pub mod clock;
pub mod encoding;
pub mod hash;
pub mod merkle;
pub mod transaction;

// Re-export commonly used types at the crate root
pub use amount::{Amount, AmountError};
pub use block::{compute_merkle_root, Block};
pub use clock::{Clock, SteppingClock, SystemClock};
pub use encoding::{CanonicalEncode, EncodingError};
pub use hash::{hash, hash_concat, hash_pair, Hash, HashParseError, H256};
pub use merkle::{merkle_root, verify_proof, MerkleProof, MerkleTree, ProofStep, Side};
pub use transaction::{transaction_hashes, Transaction};
