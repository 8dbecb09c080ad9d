//! # Hashing Utilities
//!
//! The ledger settled on exactly two hash functions and we refuse to support
//! more without a very good reason:
//!
//! - **SHA3-256**: the domain hash. Transaction hashes, Merkle leaves and
//!   nodes, artifact ids and address checksums all use it.
//! - **RIPEMD-160**: only for shortening a public key hash into an address
//!   body. Twenty bytes, one job.
//!
//! Note that this is FIPS-202 SHA3, not the original Keccak submission.
//! The two differ only in padding and produce completely different digests,
//! which is a fun thing to discover at 2am.

use crate::codec::Hash256;
use ripemd::Ripemd160;
use sha3::{Digest, Sha3_256};

/// Compute the SHA3-256 digest of `data`.
///
/// # Example
///
/// ```
/// use symbol_sdk::crypto::sha3_256;
///
/// let hash = sha3_256(b"symbol");
/// assert_eq!(hash.as_bytes().len(), 32);
/// ```
pub fn sha3_256(data: &[u8]) -> Hash256 {
    sha3_256_multi(&[data])
}

/// Compute SHA3-256 over several inputs as if they were concatenated.
///
/// Avoids building a temporary buffer when hashing `seed ‖ payload` style
/// constructions, which is most of what this crate hashes.
pub fn sha3_256_multi(parts: &[&[u8]]) -> Hash256 {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    Hash256::new(output)
}

/// Compute the RIPEMD-160 digest of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    let mut output = [0u8; 20];
    output.copy_from_slice(&hasher.finalize());
    output
}
