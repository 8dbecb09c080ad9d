//! # Transaction Module
//!
//! Turning loose descriptions into typed, serializable transactions.
//!
//! ## Architecture
//!
//! ```text
//! descriptor.rs  Descriptor, the untyped input tree
//! rules.rs       RuleBasedTransactionFactory: one conversion rule per type name
//! factory.rs     TransactionFactory: network defaults, id autogeneration, envelopes
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Describe**: build a [`Descriptor`] (by hand or from JSON).
//! 2. **Create**: [`TransactionFactory::create`] resolves every field through
//!    its rule, sorts keyed arrays and derives artifact ids.
//! 3. **Sign**: hand the result to the facade.
//! 4. **Announce**: [`TransactionFactory::attach_signature`] produces the
//!    `{"payload": ...}` body a node accepts.
//!
//! ## Design Decisions
//!
//! - The rule table is built and validated once, when the factory is
//!   constructed. A schema that references an unknown type fails there,
//!   not on the first descriptor that happens to use it.
//! - Array ordering is declared in the schema (a sort key on the field), not
//!   hard-coded per transaction type.
//! - With `autosort` off the factory keeps the caller's order, and writing an
//!   out-of-order array fails. You can still build and inspect it.

pub mod descriptor;
pub mod factory;
pub mod rules;

pub use descriptor::Descriptor;
pub use factory::{TransactionFactory, TYPE_KEY};
pub use rules::{FactoryError, Rule, RuleBasedTransactionFactory, RuleFn, TypeConverter, BYTES_RULE};
