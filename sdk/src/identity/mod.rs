//! # Identity Module
//!
//! Deterministic ids for the two kinds of named artifact on the ledger:
//! mosaics (tokens) and namespaces (human-readable names that can alias a
//! mosaic or an account).
//!
//! ## Design Decisions
//!
//! - Ids are derived, never assigned. A mosaic id depends only on its
//!   owner's address and a nonce; a namespace id only on its name and its
//!   parent. Two clients that agree on the inputs agree on the id.
//! - The top bit partitions the 64-bit id space: clear for mosaics, set for
//!   namespaces. That's how an `UnresolvedMosaicId` knows whether it still
//!   needs alias resolution.
//! - Namespace names are validated one dotted part at a time, and an error
//!   always reports the whole name the caller passed in.

pub mod id_generator;

pub use id_generator::{
    generate_mosaic_alias_id, generate_mosaic_id, generate_namespace_id, generate_namespace_path,
    is_valid_namespace_name, IdError,
};
