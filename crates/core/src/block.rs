//! Blocks: a timestamped, hash-linked batch of transactions.

use crate::clock::SystemClock;
use crate::encoding::{CanonicalEncode, EncodingError};
use crate::hash::Hash;
use crate::merkle::{merkle_root, MerkleTree};
use crate::transaction::{transaction_hashes, Transaction};
use serde::{Deserialize, Serialize};

/// Merkle root of the leaf hashes of `transactions`, in order.
pub fn compute_merkle_root(transactions: &[Transaction]) -> Result<Hash, EncodingError> {
    Ok(merkle_root(&transaction_hashes(transactions)?))
}

/// A block of transactions linked to its predecessor.
///
/// Fields are private and there are no mutating methods, so the stored
/// merkle root always matches the stored transactions.
///
/// `Block::default()` is the empty sentinel (timestamp 0, zero hashes, no
/// transactions) whose hash seeds the genesis block's previous hash.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    /// Creation time in nanoseconds since the Unix epoch.
    timestamp: i64,
    /// Hash of the previous block.
    previous_hash: Hash,
    /// Merkle root of transactions.
    merkle_root: Hash,
    /// Transactions in insertion order.
    transactions: Vec<Transaction>,
}

impl Block {
    /// Create a new block stamped with the current wall-clock time.
    pub fn new(previous_hash: Hash, transactions: Vec<Transaction>) -> Result<Self, EncodingError> {
        Self::with_timestamp(SystemClock::nanos(), previous_hash, transactions)
    }

    /// Create a new block with an explicit timestamp.
    pub fn with_timestamp(
        timestamp: i64,
        previous_hash: Hash,
        transactions: Vec<Transaction>,
    ) -> Result<Self, EncodingError> {
        let merkle_root = compute_merkle_root(&transactions)?;

        Ok(Self {
            timestamp,
            previous_hash,
            merkle_root,
            transactions,
        })
    }

    /// Get the block hash: the digest of its canonical encoding.
    ///
    /// The next block stores this value as its previous hash.
    pub fn hash(&self) -> Result<Hash, EncodingError> {
        self.canonical_hash()
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn previous_hash(&self) -> &Hash {
        &self.previous_hash
    }

    pub fn merkle_root(&self) -> &Hash {
        &self.merkle_root
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Get the number of transactions in this block.
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }

    /// Recompute the merkle root and compare it with the stored one.
    ///
    /// Always true for blocks built through the constructors; deserialized
    /// blocks are not checked on the way in.
    pub fn verify_merkle_root(&self) -> Result<bool, EncodingError> {
        Ok(compute_merkle_root(&self.transactions)? == self.merkle_root)
    }

    /// Full merkle tree over this block's transactions, for inclusion proofs.
    pub fn merkle_tree(&self) -> Result<MerkleTree, EncodingError> {
        Ok(MerkleTree::new(&transaction_hashes(&self.transactions)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use crate::hash::{hash, hash_pair};
    use crate::merkle::verify_proof;

    fn tx(sender: &str, recipient: &str, value: &str) -> Transaction {
        Transaction::new(sender, recipient, value.parse::<Amount>().unwrap())
    }

    #[test]
    fn test_sentinel_block() {
        let sentinel = Block::default();

        assert_eq!(sentinel.timestamp(), 0);
        assert_eq!(*sentinel.previous_hash(), Hash::ZERO);
        assert_eq!(*sentinel.merkle_root(), Hash::ZERO);
        assert_eq!(sentinel.tx_count(), 0);
        assert!(sentinel.verify_merkle_root().unwrap());
    }

    #[test]
    fn test_block_hash_deterministic() {
        let block = Block::new(Hash::ZERO, vec![tx("A", "B", "1")]).unwrap();
        assert_eq!(block.hash().unwrap(), block.hash().unwrap());
    }

    #[test]
    fn test_empty_block_merkle_root() {
        let block = Block::new(hash(b"prev"), vec![]).unwrap();

        assert_eq!(*block.merkle_root(), Hash::ZERO);
        assert!(block.verify_merkle_root().unwrap());
    }

    #[test]
    fn test_single_transaction_root_is_leaf() {
        let t = tx("A", "B", "1.0");
        let block = Block::new(Hash::ZERO, vec![t.clone()]).unwrap();

        assert_eq!(*block.merkle_root(), t.hash().unwrap());
    }

    #[test]
    fn test_two_transaction_root() {
        let t1 = tx("X", "Y", "2.0");
        let t2 = tx("P", "Q", "3.0");
        let block = Block::new(Hash::ZERO, vec![t1.clone(), t2.clone()]).unwrap();

        let expected = hash_pair(&t1.hash().unwrap(), &t2.hash().unwrap());
        assert_eq!(*block.merkle_root(), expected);
    }

    #[test]
    fn test_same_inputs_differ_only_by_timestamp() {
        let prev = hash(b"prev");
        let txs = vec![tx("A", "B", "1"), tx("C", "D", "2")];

        let b1 = Block::with_timestamp(1, prev, txs.clone()).unwrap();
        let b2 = Block::with_timestamp(2, prev, txs.clone()).unwrap();
        let b3 = Block::with_timestamp(1, prev, txs).unwrap();

        assert_eq!(b1.merkle_root(), b2.merkle_root());
        assert_ne!(b1.hash().unwrap(), b2.hash().unwrap());
        assert_eq!(b1.hash().unwrap(), b3.hash().unwrap());
    }

    #[test]
    fn test_previous_hash_changes_block_hash() {
        let b1 = Block::with_timestamp(1, hash(b"a"), vec![]).unwrap();
        let b2 = Block::with_timestamp(1, hash(b"b"), vec![]).unwrap();
        assert_ne!(b1.hash().unwrap(), b2.hash().unwrap());
    }

    #[test]
    fn test_transaction_order_changes_root() {
        let t1 = tx("A", "B", "1");
        let t2 = tx("C", "D", "2");
        let b1 = Block::with_timestamp(0, Hash::ZERO, vec![t1.clone(), t2.clone()]).unwrap();
        let b2 = Block::with_timestamp(0, Hash::ZERO, vec![t2, t1]).unwrap();

        assert_ne!(b1.merkle_root(), b2.merkle_root());
    }

    #[test]
    fn test_new_block_uses_current_time() {
        let before = SystemClock::nanos();
        let block = Block::new(Hash::ZERO, vec![]).unwrap();
        let after = SystemClock::nanos();

        assert!(block.timestamp() >= before && block.timestamp() <= after);
    }

    #[test]
    fn test_inclusion_proof_against_block_root() {
        let txs = vec![tx("A", "B", "1"), tx("C", "D", "2"), tx("E", "F", "3")];
        let block = Block::new(Hash::ZERO, txs).unwrap();
        let tree = block.merkle_tree().unwrap();

        for i in 0..block.tx_count() {
            let proof = tree.proof(i).unwrap();
            assert!(verify_proof(block.merkle_root(), &proof));
        }
    }

    #[test]
    fn test_tampered_deserialized_block_fails_merkle_check() {
        let block = Block::new(Hash::ZERO, vec![tx("A", "B", "1")]).unwrap();
        let mut json = serde_json::to_value(&block).unwrap();
        json["transactions"][0]["recipient"] = serde_json::Value::from("Mallory");
        let tampered: Block = serde_json::from_value(json).unwrap();

        assert!(!tampered.verify_merkle_root().unwrap());
    }
}
