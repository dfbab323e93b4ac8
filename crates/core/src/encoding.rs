//! Canonical byte encoding of transactions and blocks.
//!
//! Every hash in the chain is a digest of these bytes, so the layout is
//! fixed here field by field rather than derived from struct layout:
//!
//! ```text
//! Transaction := str(sender) ‖ str(recipient) ‖ i64(value micro-units)
//! Block       := i64(timestamp ns) ‖ previous_hash[32] ‖ merkle_root[32]
//!                ‖ u32(tx count) ‖ Transaction*
//! str(s)      := u32(byte length) ‖ utf8(s)
//! ```
//!
//! All integers are big-endian. Hashes are written as raw bytes, never hex.

use crate::block::Block;
use crate::hash::{hash, Hash};
use crate::transaction::Transaction;
use thiserror::Error;

/// Errors that can occur while encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("{field} length {len} does not fit in a u32 length prefix")]
    LengthOverflow { field: &'static str, len: usize },
}

pub type Result<T> = std::result::Result<T, EncodingError>;

/// Types with a deterministic byte representation.
pub trait CanonicalEncode {
    /// Append the canonical bytes of `self` to `out`.
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()>;

    /// Canonical bytes of `self`.
    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_into(&mut out)?;
        Ok(out)
    }

    /// Digest of the canonical bytes.
    fn canonical_hash(&self) -> Result<Hash> {
        Ok(hash(&self.encode()?))
    }
}

impl CanonicalEncode for Transaction {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        put_str(out, "sender", &self.sender)?;
        put_str(out, "recipient", &self.recipient)?;
        put_i64(out, self.value.units());
        Ok(())
    }
}

impl CanonicalEncode for Block {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        let transactions = self.transactions();

        put_i64(out, self.timestamp());
        put_hash(out, self.previous_hash());
        put_hash(out, self.merkle_root());
        put_len(out, "transactions", transactions.len())?;
        for tx in transactions {
            tx.encode_into(out)?;
        }
        Ok(())
    }
}

fn put_len(out: &mut Vec<u8>, field: &'static str, len: usize) -> Result<()> {
    let prefix = u32::try_from(len).map_err(|_| EncodingError::LengthOverflow { field, len })?;
    out.extend_from_slice(&prefix.to_be_bytes());
    Ok(())
}

fn put_str(out: &mut Vec<u8>, field: &'static str, s: &str) -> Result<()> {
    put_len(out, field, s.len())?;
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

fn put_i64(out: &mut Vec<u8>, value: i64) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_hash(out: &mut Vec<u8>, value: &Hash) {
    out.extend_from_slice(value.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;

    fn tx(sender: &str, recipient: &str, units: i64) -> Transaction {
        Transaction::new(sender, recipient, Amount::from_units(units))
    }

    #[test]
    fn test_transaction_layout() {
        let bytes = tx("A", "BC", 1_000_000).encode().unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(&1u32.to_be_bytes());
        expected.extend_from_slice(b"A");
        expected.extend_from_slice(&2u32.to_be_bytes());
        expected.extend_from_slice(b"BC");
        expected.extend_from_slice(&1_000_000i64.to_be_bytes());

        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_block_layout() {
        let prev = hash(b"prev");
        let block = Block::with_timestamp(42, prev, vec![tx("A", "B", 5)]).unwrap();
        let bytes = block.encode().unwrap();

        assert_eq!(&bytes[..8], &42i64.to_be_bytes());
        assert_eq!(&bytes[8..40], prev.as_bytes());
        assert_eq!(&bytes[40..72], block.merkle_root().as_bytes());
        assert_eq!(&bytes[72..76], &1u32.to_be_bytes());
        assert_eq!(&bytes[76..], tx("A", "B", 5).encode().unwrap().as_slice());
    }

    #[test]
    fn test_empty_block_layout() {
        let bytes = Block::default().encode().unwrap();
        assert_eq!(bytes.len(), 8 + 32 + 32 + 4);
        assert!(bytes.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_encoding_deterministic() {
        let a = tx("alice", "bob", 7);
        let b = a.clone();
        assert_eq!(a.encode().unwrap(), b.encode().unwrap());
    }

    #[test]
    fn test_field_boundaries_do_not_collide() {
        // Same concatenated text, different split between the two strings.
        let a = tx("ab", "c", 1);
        let b = tx("a", "bc", 1);
        assert_ne!(a.encode().unwrap(), b.encode().unwrap());
        assert_ne!(a.canonical_hash().unwrap(), b.canonical_hash().unwrap());
    }

    #[test]
    fn test_transaction_order_changes_block_bytes() {
        let t1 = tx("A", "B", 1);
        let t2 = tx("C", "D", 2);
        let b1 = Block::with_timestamp(0, Hash::ZERO, vec![t1.clone(), t2.clone()]).unwrap();
        let b2 = Block::with_timestamp(0, Hash::ZERO, vec![t2, t1]).unwrap();
        assert_ne!(b1.encode().unwrap(), b2.encode().unwrap());
    }

    #[test]
    fn test_utf8_is_length_prefixed_in_bytes() {
        let bytes = tx("é", "", 0).encode().unwrap();
        assert_eq!(&bytes[..4], &2u32.to_be_bytes());
        assert_eq!(&bytes[4..6], "é".as_bytes());
        assert_eq!(&bytes[6..10], &0u32.to_be_bytes());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_length_overflow() {
        let mut out = Vec::new();
        let len = u32::MAX as usize + 1;
        assert_eq!(
            put_len(&mut out, "sender", len),
            Err(EncodingError::LengthOverflow {
                field: "sender",
                len
            })
        );
        assert!(out.is_empty());
    }
}
