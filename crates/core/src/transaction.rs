//! Transfer transactions.

use crate::amount::Amount;
use crate::encoding::{CanonicalEncode, EncodingError};
use crate::hash::Hash;
use serde::{Deserialize, Serialize};

/// A value transfer between two parties.
///
/// Transactions are plain values: no uniqueness is enforced, and two
/// transactions with equal fields hash identically. Nothing about the
/// sender, recipient or amount is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    /// Sender's identifier.
    pub sender: String,
    /// Recipient's identifier.
    pub recipient: String,
    /// Value to transfer.
    pub value: Amount,
}

impl Transaction {
    /// Create a new transaction.
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, value: Amount) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            value,
        }
    }

    /// Leaf hash: the digest of the canonical encoding.
    pub fn hash(&self) -> Result<Hash, EncodingError> {
        self.canonical_hash()
    }
}

/// Leaf hashes of `transactions`, in order.
pub fn transaction_hashes(transactions: &[Transaction]) -> Result<Vec<Hash>, EncodingError> {
    transactions.iter().map(Transaction::hash).collect()
}
