//! # Cryptographic Primitives
//!
//! Every signature and every hash in this crate flows through here.
//!
//! We deliberately chose boring, well-audited cryptography, mostly because
//! the ledger chose it for us:
//!
//! - **Ed25519** for signatures.
//! - **SHA3-256** as the domain hash.
//! - **RIPEMD-160** for address bodies, and nothing else.
//!
//! ## A note on "rolling your own crypto"
//!
//! We don't. Everything here is a thin, type-safe wrapper around audited
//! implementations.

pub mod hash;
pub mod keys;
pub mod merkle;

pub use hash::{ripemd160, sha3_256, sha3_256_multi};
pub use keys::{KeyError, KeyPair, PrivateKey, Verifier};
pub use merkle::{merkle_root, MerkleHashBuilder};
