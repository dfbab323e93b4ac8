//! Pending transaction pool.
//!
//! The pool stages transactions until the next block is created. Insertion
//! order is kept because it determines the block's merkle root.

use merklechain_core::Transaction;
use std::collections::HashSet;

/// Ordered staging area for not-yet-committed transactions.
///
/// Adding never fails: duplicates are kept and nothing is validated.
#[derive(Debug, Clone, Default)]
pub struct TransactionPool {
    transactions: Vec<Transaction>,
}

impl TransactionPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of transactions in the pool.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Check if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Append a transaction.
    pub fn add(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Pending transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Pending transactions sent by `sender`, in insertion order.
    pub fn by_sender<'a>(&'a self, sender: &'a str) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions.iter().filter(move |tx| tx.sender == sender)
    }

    /// Move every pending transaction out, leaving the pool empty.
    pub fn drain(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.transactions)
    }

    /// Get pool statistics.
    pub fn stats(&self) -> PoolStats {
        let senders: HashSet<&str> = self.transactions.iter().map(|tx| tx.sender.as_str()).collect();

        PoolStats {
            total_transactions: self.len(),
            unique_senders: senders.len(),
        }
    }
}

/// Pool statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStats {
    /// Total number of transactions.
    pub total_transactions: usize,
    /// Number of unique senders.
    pub unique_senders: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use merklechain_core::Amount;

    fn tx(sender: &str, recipient: &str, whole: i64) -> Transaction {
        Transaction::new(sender, recipient, Amount::from_whole(whole).unwrap())
    }

    #[test]
    fn test_pool_add_keeps_order() {
        let mut pool = TransactionPool::new();
        pool.add(tx("A", "B", 1));
        pool.add(tx("C", "D", 2));

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.transactions()[0].sender, "A");
        assert_eq!(pool.transactions()[1].sender, "C");
    }

    #[test]
    fn test_pool_keeps_duplicates() {
        let mut pool = TransactionPool::new();
        pool.add(tx("A", "B", 1));
        pool.add(tx("A", "B", 1));

        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_pool_drain_empties() {
        let mut pool = TransactionPool::new();
        pool.add(tx("A", "B", 1));
        pool.add(tx("C", "D", 2));

        let drained = pool.drain();
        assert_eq!(drained, vec![tx("A", "B", 1), tx("C", "D", 2)]);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_pool_by_sender() {
        let mut pool = TransactionPool::new();
        pool.add(tx("A", "B", 1));
        pool.add(tx("C", "D", 2));
        pool.add(tx("A", "E", 3));

        let from_a: Vec<_> = pool.by_sender("A").collect();
        assert_eq!(from_a.len(), 2);
        assert_eq!(from_a[1].recipient, "E");
        assert_eq!(pool.by_sender("Z").count(), 0);
    }

    #[test]
    fn test_pool_stats() {
        let mut pool = TransactionPool::new();
        pool.add(tx("A", "B", 1));
        pool.add(tx("A", "C", 1));
        pool.add(tx("D", "B", 1));

        let stats = pool.stats();
        assert_eq!(stats.total_transactions, 3);
        assert_eq!(stats.unique_senders, 2);
    }
}
