// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Symbol SDK: Transaction Codec & Identity Engine
//!
//! Everything a client needs to produce a transaction a Symbol node will
//! accept, and nothing that needs a node: no REST client, no websocket
//! listener, no wallet storage. Bytes in, bytes out.
//!
//! ## Architecture
//!
//! The crate is layered bottom-up. Each layer only knows the ones below it:
//!
//! - **config**: protocol constants. Sizes, network identifiers, seeds.
//! - **codec**: the [`Codec`](codec::Codec) trait and fixed-size byte values.
//! - **crypto**: Ed25519 key pairs, SHA3-256, RIPEMD-160, Merkle roots.
//! - **network**: network presets, addresses, network time.
//! - **models**: the typed transaction catalog and its schema tables.
//! - **identity**: mosaic and namespace id derivation.
//! - **transaction**: descriptors and the rule-based factory.
//! - **facade**: signing payloads, hashes, signatures, cosignatures.
//! - **logging**: optional `tracing` subscriber setup for hosts and tools.
//!
//! ## Quick Start
//!
//! ```no_run
//! use symbol_sdk::crypto::KeyPair;
//! use symbol_sdk::facade::SymbolFacade;
//! use symbol_sdk::transaction::{Descriptor, TransactionFactory};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let facade = SymbolFacade::from_network_name("testnet")?;
//! let key_pair = KeyPair::generate();
//!
//! let descriptor = Descriptor::map()
//!     .with("type", "transfer_transaction_v1")
//!     .with("recipient_address", "TCHBDENCLKEBILBPWP3JPB2XNY64OE7PYHHE32I")
//!     .with("message", "hello");
//! let mut transaction =
//!     facade.create_transaction_from_descriptor(&descriptor, &key_pair.public_key(), 100, 7200, 0)?;
//!
//! let signature = facade.sign_transaction(&key_pair, &transaction)?;
//! let body = TransactionFactory::attach_signature(&mut transaction, signature)?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Philosophy
//!
//! 1. The bytes are the contract. Every model round-trips exactly.
//! 2. Nothing is global. The network is a value you pass around.
//! 3. Key material never reaches a log line.
//! 4. If it touches a signature, it is checked against known vectors.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod facade;
pub mod identity;
pub mod logging;
pub mod models;
pub mod network;
pub mod transaction;

pub use codec::{Codec, CodecError, Hash256, PublicKey, Signature, UnresolvedAddress};
pub use crypto::{KeyPair, Verifier};
pub use facade::{CosignatureKind, FacadeError, SymbolAccount, SymbolFacade, SymbolPublicAccount};
pub use network::{Address, Network, NetworkTimestamp};
pub use transaction::{Descriptor, FactoryError, TransactionFactory};
