//! # Models
//!
//! The typed side of the factory: every POD, enum, struct and transaction
//! body the crate can build, plus the schema each one publishes about
//! itself.
//!
//! ```text
//! schema.rs        TypeRef / FieldSchema / Record / the Schema trait
//! pods.rs          Amount, MosaicId, Timestamp, ...
//! enums.rs         closed enums and bit flags
//! structs.rs       UnresolvedMosaic, cosignatures
//! bodies.rs        one struct per transaction body
//! transactions.rs  headers, the kind registry, aggregates
//! ```
//!
//! [`catalogue`] lists every named type the rule-based factory can resolve
//! without help. Transaction bodies are not in it; they are reached through
//! [`TransactionKind`] instead.

pub mod bodies;
pub mod enums;
pub mod pods;
pub mod schema;
pub mod structs;
pub mod transactions;

pub use bodies::{
    AccountMetadataBody, AccountRestrictionBody, AddressAliasBody, HashLockBody, KeyLinkBody,
    MosaicAddressRestrictionBody, MosaicAliasBody, MosaicDefinitionBody, MosaicGlobalRestrictionBody,
    MosaicMetadataBody, MosaicSupplyChangeBody, MosaicSupplyRevocationBody,
    MultisigAccountModificationBody, NamespaceMetadataBody, NamespaceRegistrationBody,
    RestrictionValue, SecretLockBody, SecretProofBody, TransferBody, VotingKeyLinkBody,
};
pub use enums::{
    AccountRestrictionFlags, AliasAction, LinkAction, LockHashAlgorithm, MosaicFlags,
    MosaicRestrictionType, MosaicSupplyChangeAction, NamespaceRegistrationType, NetworkType,
    TransactionType,
};
pub use pods::{
    Amount, BlockDuration, FinalizationEpoch, MosaicId, MosaicNonce, NamespaceId,
    ScopedMetadataKey, Timestamp, UnresolvedMosaicId,
};
pub use schema::{
    EnumSchema, FieldSchema, FromTyped, Record, Schema, SchemaError, TypeKind, TypeRef, TypeSchema,
    TypedValue,
};
pub use structs::{Cosignature, DetachedCosignature, UnresolvedMosaic};
pub use transactions::{
    AggregateBody, EmbeddedTransaction, Transaction, TransactionBody, TransactionKind,
    EMBEDDED_TRANSACTION_HEADER_FIELDS, TRANSACTION_HEADER_FIELDS, TRANSACTION_KINDS,
};

use crate::codec::{Hash256, PublicKey, Signature, UnresolvedAddress, VotingPublicKey};
use crate::network::Address;

/// Fixed-size byte types.
pub const BYTE_ARRAY_SCHEMAS: &[TypeSchema] = &[
    TypeSchema { name: "Hash256", kind: TypeKind::ByteArray { size: Hash256::SIZE } },
    TypeSchema { name: "PublicKey", kind: TypeKind::ByteArray { size: PublicKey::SIZE } },
    TypeSchema { name: "VotingPublicKey", kind: TypeKind::ByteArray { size: VotingPublicKey::SIZE } },
    TypeSchema { name: "Signature", kind: TypeKind::ByteArray { size: Signature::SIZE } },
    TypeSchema {
        name: "UnresolvedAddress",
        kind: TypeKind::ByteArray { size: UnresolvedAddress::SIZE },
    },
    TypeSchema { name: "Address", kind: TypeKind::ByteArray { size: Address::SIZE } },
];

/// Every named type the factory can autodetect a rule for.
pub fn catalogue() -> impl Iterator<Item = &'static TypeSchema> {
    BYTE_ARRAY_SCHEMAS
        .iter()
        .chain(pods::PRIMITIVE_SCHEMAS)
        .chain(pods::POD_SCHEMAS)
        .chain(enums::ENUM_SCHEMAS)
        .chain(structs::STRUCT_SCHEMAS)
}
