//! Merkle tree over transaction leaf hashes.
//!
//! Levels are folded left to right. When a level has an odd number of
//! hashes the last one is duplicated before pairing, so `[h1, h2, h3]`
//! folds to `D(D(h1 ‖ h2) ‖ D(h3 ‖ h3))`. A single leaf is its own root and
//! an empty set has the zero root.

use crate::hash::{hash_pair, Hash};

/// Fold one level into the next by hashing adjacent pairs.
fn fold_level(level: &[Hash]) -> Vec<Hash> {
    level
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            hash_pair(left, right)
        })
        .collect()
}

/// Compute the merkle root of a list of leaf hashes.
///
/// Returns the zero hash if the list is empty.
pub fn merkle_root(leaves: &[Hash]) -> Hash {
    let mut level = leaves.to_vec();

    while level.len() > 1 {
        level = fold_level(&level);
    }

    level.first().copied().unwrap_or(Hash::ZERO)
}

/// Which side of the running hash a proof sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One level of an inclusion proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofStep {
    pub sibling: Hash,
    pub side: Side,
}

/// Proof that a leaf is included under a given root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof {
    /// The leaf being proven.
    pub leaf: Hash,
    /// Position of the leaf in the original sequence.
    pub index: usize,
    /// Siblings from the leaf level up to just below the root.
    pub path: Vec<ProofStep>,
}

/// A merkle tree that keeps every level, for proofs.
#[derive(Debug, Clone, Default)]
pub struct MerkleTree {
    /// Levels from the leaves (first) to the root (last).
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build a merkle tree from a list of leaf hashes.
    pub fn new(leaves: &[Hash]) -> Self {
        if leaves.is_empty() {
            return Self::default();
        }

        let mut levels = vec![leaves.to_vec()];
        loop {
            let current = &levels[levels.len() - 1];
            if current.len() <= 1 {
                break;
            }
            let next = fold_level(current);
            levels.push(next);
        }

        Self { levels }
    }

    /// Root of the tree; the zero hash for an empty tree.
    pub fn root(&self) -> Hash {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or(Hash::ZERO)
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Number of levels including leaves and root.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Generate a proof for the leaf at the given index.
    pub fn proof(&self, index: usize) -> Option<MerkleProof> {
        let leaf = *self.levels.first()?.get(index)?;
        let mut path = Vec::with_capacity(self.levels.len().saturating_sub(1));
        let mut idx = index;

        for level in &self.levels[..self.levels.len() - 1] {
            let (sibling_idx, side) = if idx % 2 == 0 {
                (idx + 1, Side::Right)
            } else {
                (idx - 1, Side::Left)
            };
            // The odd last hash of a level is paired with itself.
            let sibling = level.get(sibling_idx).copied().unwrap_or(level[idx]);

            path.push(ProofStep { sibling, side });
            idx /= 2;
        }

        Some(MerkleProof { leaf, index, path })
    }

    /// Verify a merkle proof against this tree's root.
    pub fn verify_proof(&self, proof: &MerkleProof) -> bool {
        verify_proof(&self.root(), proof)
    }
}

/// Verify a merkle proof against a given root.
pub fn verify_proof(root: &Hash, proof: &MerkleProof) -> bool {
    let computed = proof
        .path
        .iter()
        .fold(proof.leaf, |current, step| match step.side {
            Side::Right => hash_pair(&current, &step.sibling),
            Side::Left => hash_pair(&step.sibling, &current),
        });

    computed == *root
}
