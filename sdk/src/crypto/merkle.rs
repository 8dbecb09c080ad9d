//! Merkle aggregation of embedded transaction hashes.
//!
//! Leaves are reduced pairwise, left to right, with SHA3-256. When a level
//! has an odd number of nodes the last one is paired with itself. A single
//! leaf is its own root, and an empty tree hashes to all zeroes.

use super::hash::sha3_256_multi;
use crate::codec::Hash256;

/// Accumulates leaf hashes and produces their Merkle root.
#[derive(Debug, Clone, Default)]
pub struct MerkleHashBuilder {
    hashes: Vec<Hash256>,
}

impl MerkleHashBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one leaf.
    pub fn update(&mut self, component_hash: Hash256) {
        self.hashes.push(component_hash);
    }

    /// Number of leaves added so far.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// `true` if no leaves have been added.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Reduce the leaves to a single root.
    pub fn final_hash(&self) -> Hash256 {
        merkle_root(&self.hashes)
    }
}

/// Root of `leaves`, duplicating the trailing node on odd levels.
pub fn merkle_root(leaves: &[Hash256]) -> Hash256 {
    if leaves.is_empty() {
        return Hash256::zero();
    }

    let mut current_level = leaves.to_vec();
    while current_level.len() > 1 {
        current_level = current_level
            .chunks(2)
            .map(|pair| {
                let left = &pair[0];
                let right = pair.get(1).unwrap_or(left);
                sha3_256_multi(&[&left.as_bytes()[..], &right.as_bytes()[..]])
            })
            .collect();
    }

    current_level[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::sha3_256;

    fn leaf(byte: u8) -> Hash256 {
        Hash256::new([byte; 32])
    }

    fn pair(left: &Hash256, right: &Hash256) -> Hash256 {
        sha3_256_multi(&[&left.as_bytes()[..], &right.as_bytes()[..]])
    }

    #[test]
    fn empty_tree_is_zero_hash() {
        assert_eq!(MerkleHashBuilder::new().final_hash(), Hash256::zero());
    }

    #[test]
    fn single_leaf_is_root() {
        let mut builder = MerkleHashBuilder::new();
        builder.update(leaf(0xAB));
        assert_eq!(builder.final_hash(), leaf(0xAB));
    }

    #[test]
    fn two_leaves_hash_together() {
        let (a, b) = (leaf(1), leaf(2));
        assert_eq!(merkle_root(&[a, b]), pair(&a, &b));
    }

    #[test]
    fn odd_level_duplicates_last_node() {
        let (a, b, c) = (leaf(1), leaf(2), leaf(3));
        let expected = pair(&pair(&a, &b), &pair(&c, &c));
        assert_eq!(merkle_root(&[a, b, c]), expected);
    }

    #[test]
    fn five_leaves() {
        let leaves: Vec<Hash256> = (1..=5).map(leaf).collect();
        let l1 = [
            pair(&leaves[0], &leaves[1]),
            pair(&leaves[2], &leaves[3]),
            pair(&leaves[4], &leaves[4]),
        ];
        let l2 = [pair(&l1[0], &l1[1]), pair(&l1[2], &l1[2])];
        assert_eq!(merkle_root(&leaves), pair(&l2[0], &l2[1]));
    }

    #[test]
    fn order_matters() {
        let (a, b) = (sha3_256(b"a"), sha3_256(b"b"));
        assert_ne!(merkle_root(&[a, b]), merkle_root(&[b, a]));
    }

    #[test]
    fn builder_tracks_length() {
        let mut builder = MerkleHashBuilder::new();
        assert!(builder.is_empty());
        builder.update(leaf(9));
        builder.update(leaf(8));
        assert_eq!(builder.len(), 2);
    }
}
