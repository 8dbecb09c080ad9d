//! # Transactions
//!
//! A [`Transaction`] is the common signed header plus a [`TransactionBody`].
//! An [`EmbeddedTransaction`] is the same body behind the shorter unsigned
//! header used inside aggregates.
//!
//! ```text
//! top-level (128 byte header)                 embedded (48 byte header)
//! ┌──────────────────────────────────┐        ┌──────────────────────────┐
//! │ size u32 │ reserved u32          │        │ size u32 │ reserved u32  │
//! │ signature [64]                   │        │ signer_public_key [32]   │
//! │ signer_public_key [32]           │        │ reserved u32             │
//! │ reserved u32                     │        │ version │ network │ type │
//! │ version │ network │ type         │        ├──────────────────────────┤
//! │ fee u64 │ deadline u64           │        │ body                     │
//! ├──────────────────────────────────┤        └──────────────────────────┘
//! │ body                             │
//! └──────────────────────────────────┘
//! ```
//!
//! The type code is not stored separately: it is a function of the body
//! variant. Decoding dispatches on `(type, version)` through
//! [`TRANSACTION_KINDS`] and fails with
//! [`CodecError::UnknownTransactionType`] for anything not listed there.

use super::bodies::{
    AccountMetadataBody, AccountRestrictionBody, AddressAliasBody, HashLockBody, KeyLinkBody,
    MosaicAddressRestrictionBody, MosaicAliasBody, MosaicDefinitionBody, MosaicGlobalRestrictionBody,
    MosaicMetadataBody, MosaicSupplyChangeBody, MosaicSupplyRevocationBody,
    MultisigAccountModificationBody, NamespaceMetadataBody, NamespaceRegistrationBody,
    RestrictionValue, SecretLockBody, SecretProofBody, TransferBody, VotingKeyLinkBody,
};
use super::enums::{NetworkType, TransactionType};
use super::pods::{Amount, Timestamp, UnresolvedMosaicId};
use super::schema::{FieldSchema, FromTyped, Record, Schema, SchemaError, TypeRef, TypedValue};
use super::structs::Cosignature;
use crate::codec::array::{read_variable_size_elements, size as padded_size, write_array, write_variable_size_elements};
use crate::codec::{
    count_as, ensure_remaining, read_reserved, write_reserved, Codec, CodecError, Hash256,
    PublicKey, Signature, UnresolvedAddress,
};
use crate::config::{
    COSIGNATURE_SIZE, EMBEDDED_TRANSACTION_ALIGNMENT, EMBEDDED_TRANSACTION_HEADER_SIZE,
    TRANSACTION_FULL_HEADER_SIZE,
};
use crate::crypto::{merkle_root, sha3_256};
use ::bytes::{Buf, BufMut};

// ---------------------------------------------------------------------------
// Kind registry
// ---------------------------------------------------------------------------

/// A concrete `(type, version)` pair the crate can build and decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionKind {
    /// Descriptor name, e.g. `transfer_transaction_v1`.
    pub name: &'static str,
    pub transaction_type: TransactionType,
    pub version: u8,
    /// `false` for aggregates, which cannot nest.
    pub embeddable: bool,
}

const fn kind(
    name: &'static str,
    transaction_type: TransactionType,
    version: u8,
    embeddable: bool,
) -> TransactionKind {
    TransactionKind {
        name,
        transaction_type,
        version,
        embeddable,
    }
}

/// Every transaction kind, grouped by type, oldest version first.
pub const TRANSACTION_KINDS: &[TransactionKind] = &[
    kind("account_key_link_transaction_v1", TransactionType::AccountKeyLink, 1, true),
    kind("node_key_link_transaction_v1", TransactionType::NodeKeyLink, 1, true),
    kind("aggregate_complete_transaction_v1", TransactionType::AggregateComplete, 1, false),
    kind("aggregate_complete_transaction_v2", TransactionType::AggregateComplete, 2, false),
    kind("aggregate_bonded_transaction_v1", TransactionType::AggregateBonded, 1, false),
    kind("aggregate_bonded_transaction_v2", TransactionType::AggregateBonded, 2, false),
    kind("voting_key_link_transaction_v1", TransactionType::VotingKeyLink, 1, true),
    kind("vrf_key_link_transaction_v1", TransactionType::VrfKeyLink, 1, true),
    kind("hash_lock_transaction_v1", TransactionType::HashLock, 1, true),
    kind("secret_lock_transaction_v1", TransactionType::SecretLock, 1, true),
    kind("secret_proof_transaction_v1", TransactionType::SecretProof, 1, true),
    kind("account_metadata_transaction_v1", TransactionType::AccountMetadata, 1, true),
    kind("mosaic_metadata_transaction_v1", TransactionType::MosaicMetadata, 1, true),
    kind("namespace_metadata_transaction_v1", TransactionType::NamespaceMetadata, 1, true),
    kind("mosaic_definition_transaction_v1", TransactionType::MosaicDefinition, 1, true),
    kind("mosaic_supply_change_transaction_v1", TransactionType::MosaicSupplyChange, 1, true),
    kind(
        "mosaic_supply_revocation_transaction_v1",
        TransactionType::MosaicSupplyRevocation,
        1,
        true,
    ),
    kind(
        "multisig_account_modification_transaction_v1",
        TransactionType::MultisigAccountModification,
        1,
        true,
    ),
    kind("address_alias_transaction_v1", TransactionType::AddressAlias, 1, true),
    kind("mosaic_alias_transaction_v1", TransactionType::MosaicAlias, 1, true),
    kind("namespace_registration_transaction_v1", TransactionType::NamespaceRegistration, 1, true),
    kind(
        "account_address_restriction_transaction_v1",
        TransactionType::AccountAddressRestriction,
        1,
        true,
    ),
    kind(
        "account_mosaic_restriction_transaction_v1",
        TransactionType::AccountMosaicRestriction,
        1,
        true,
    ),
    kind(
        "account_operation_restriction_transaction_v1",
        TransactionType::AccountOperationRestriction,
        1,
        true,
    ),
    kind(
        "mosaic_address_restriction_transaction_v1",
        TransactionType::MosaicAddressRestriction,
        1,
        true,
    ),
    kind(
        "mosaic_global_restriction_transaction_v1",
        TransactionType::MosaicGlobalRestriction,
        1,
        true,
    ),
    kind("transfer_transaction_v1", TransactionType::Transfer, 1, true),
];

impl TransactionKind {
    /// Kind for a decoded `(type, version)` pair.
    pub fn find(transaction_type: TransactionType, version: u8) -> Option<&'static TransactionKind> {
        TRANSACTION_KINDS
            .iter()
            .find(|kind| kind.transaction_type == transaction_type && kind.version == version)
    }

    /// Kind by descriptor name. Accepts the full name
    /// (`aggregate_complete_transaction_v1`) or the bare type name
    /// (`aggregate_complete`), which picks the latest version.
    pub fn by_name(name: &str) -> Option<&'static TransactionKind> {
        TRANSACTION_KINDS
            .iter()
            .find(|kind| kind.name == name)
            .or_else(|| {
                TRANSACTION_KINDS
                    .iter()
                    .filter(|kind| kind.transaction_type.name() == name)
                    .max_by_key(|kind| kind.version)
            })
    }

    /// Schema of the body fields, in wire order.
    pub fn body_fields(&self) -> &'static [FieldSchema] {
        TransactionBody::fields(self.transaction_type)
    }
}

// ---------------------------------------------------------------------------
// Header schemas
// ---------------------------------------------------------------------------

/// Header fields a descriptor may set on a top-level transaction.
pub const TRANSACTION_HEADER_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("signature", TypeRef::Named("Signature")),
    FieldSchema::new("signer_public_key", TypeRef::Named("PublicKey")),
    FieldSchema::new("network", TypeRef::Named("NetworkType")),
    FieldSchema::new("fee", TypeRef::Named("Amount")),
    FieldSchema::new("deadline", TypeRef::Named("Timestamp")),
];

/// Header fields a descriptor may set on an embedded transaction.
pub const EMBEDDED_TRANSACTION_HEADER_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("signer_public_key", TypeRef::Named("PublicKey")),
    FieldSchema::new("network", TypeRef::Named("NetworkType")),
];

// ---------------------------------------------------------------------------
// Aggregate body
// ---------------------------------------------------------------------------

/// Inner transactions bound by a Merkle commitment, plus cosignatures.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregateBody {
    /// Merkle root of the inner transaction hashes.
    pub transactions_hash: Hash256,
    pub transactions: Vec<EmbeddedTransaction>,
    pub cosignatures: Vec<Cosignature>,
}

impl AggregateBody {
    pub const FIELDS: &'static [FieldSchema] = &[
        FieldSchema::new("transactions_hash", TypeRef::Named("Hash256")),
        FieldSchema::new(
            "transactions",
            TypeRef::Array { element: "EmbeddedTransaction", sort_key: None },
        ),
        FieldSchema::new(
            "cosignatures",
            TypeRef::Array { element: "struct:Cosignature", sort_key: None },
        ),
    ];

    /// Byte length of the padded inner transactions.
    pub fn payload_size(&self) -> usize {
        padded_size(&self.transactions, EMBEDDED_TRANSACTION_ALIGNMENT, false)
    }

    /// Merkle root over the SHA3-256 of each serialized inner transaction.
    pub fn compute_transactions_hash(&self) -> Result<Hash256, CodecError> {
        let leaves = self
            .transactions
            .iter()
            .map(|transaction| transaction.to_bytes().map(|bytes| sha3_256(&bytes)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(merkle_root(&leaves))
    }
}

impl Schema for AggregateBody {
    const NAME: &'static str = "AggregateBody";

    fn fields() -> &'static [FieldSchema] {
        Self::FIELDS
    }

    fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        Ok(Self {
            transactions_hash: record.take("transactions_hash")?,
            transactions: record.take_array("transactions")?,
            cosignatures: record.take_array("cosignatures")?,
        })
    }
}

impl Codec for AggregateBody {
    fn size(&self) -> usize {
        Hash256::SIZE + 4 + 4 + self.payload_size() + self.cosignatures.len() * COSIGNATURE_SIZE
    }

    fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
        self.transactions_hash.write(writer)?;
        writer.put_u32_le(count_as("payload", self.payload_size())?);
        write_reserved(writer, 4);
        write_variable_size_elements(writer, &self.transactions, EMBEDDED_TRANSACTION_ALIGNMENT, false)?;
        write_array(writer, &self.cosignatures)
    }

    /// Cosignatures fill whatever follows the payload, so `reader` must
    /// end exactly where the aggregate does.
    fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
        let transactions_hash = Hash256::read(reader)?;
        let payload_size = u32::read(reader)? as usize;
        read_reserved(reader, 4, "aggregate_transaction_header_reserved_1")?;
        let transactions = read_variable_size_elements(
            reader,
            payload_size,
            EMBEDDED_TRANSACTION_ALIGNMENT,
            false,
        )?;

        let mut cosignatures = Vec::new();
        while reader.has_remaining() {
            cosignatures.push(Cosignature::read(reader)?);
        }
        Ok(Self {
            transactions_hash,
            transactions,
            cosignatures,
        })
    }
}

// ---------------------------------------------------------------------------
// TransactionBody
// ---------------------------------------------------------------------------

/// The body of any transaction, tagged by type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionBody {
    AccountKeyLink(KeyLinkBody),
    NodeKeyLink(KeyLinkBody),
    VrfKeyLink(KeyLinkBody),
    VotingKeyLink(VotingKeyLinkBody),
    HashLock(HashLockBody),
    SecretLock(SecretLockBody),
    SecretProof(SecretProofBody),
    AccountMetadata(AccountMetadataBody),
    MosaicMetadata(MosaicMetadataBody),
    NamespaceMetadata(NamespaceMetadataBody),
    MosaicDefinition(MosaicDefinitionBody),
    MosaicSupplyChange(MosaicSupplyChangeBody),
    MosaicSupplyRevocation(MosaicSupplyRevocationBody),
    MultisigAccountModification(MultisigAccountModificationBody),
    AddressAlias(AddressAliasBody),
    MosaicAlias(MosaicAliasBody),
    NamespaceRegistration(NamespaceRegistrationBody),
    AccountAddressRestriction(AccountRestrictionBody<UnresolvedAddress>),
    AccountMosaicRestriction(AccountRestrictionBody<UnresolvedMosaicId>),
    AccountOperationRestriction(AccountRestrictionBody<TransactionType>),
    MosaicAddressRestriction(MosaicAddressRestrictionBody),
    MosaicGlobalRestriction(MosaicGlobalRestrictionBody),
    Transfer(TransferBody),
    AggregateComplete(AggregateBody),
    AggregateBonded(AggregateBody),
}

macro_rules! for_each_body {
    ($value:expr, $body:ident => $action:expr) => {
        match $value {
            TransactionBody::AccountKeyLink($body) => $action,
            TransactionBody::NodeKeyLink($body) => $action,
            TransactionBody::VrfKeyLink($body) => $action,
            TransactionBody::VotingKeyLink($body) => $action,
            TransactionBody::HashLock($body) => $action,
            TransactionBody::SecretLock($body) => $action,
            TransactionBody::SecretProof($body) => $action,
            TransactionBody::AccountMetadata($body) => $action,
            TransactionBody::MosaicMetadata($body) => $action,
            TransactionBody::NamespaceMetadata($body) => $action,
            TransactionBody::MosaicDefinition($body) => $action,
            TransactionBody::MosaicSupplyChange($body) => $action,
            TransactionBody::MosaicSupplyRevocation($body) => $action,
            TransactionBody::MultisigAccountModification($body) => $action,
            TransactionBody::AddressAlias($body) => $action,
            TransactionBody::MosaicAlias($body) => $action,
            TransactionBody::NamespaceRegistration($body) => $action,
            TransactionBody::AccountAddressRestriction($body) => $action,
            TransactionBody::AccountMosaicRestriction($body) => $action,
            TransactionBody::AccountOperationRestriction($body) => $action,
            TransactionBody::MosaicAddressRestriction($body) => $action,
            TransactionBody::MosaicGlobalRestriction($body) => $action,
            TransactionBody::Transfer($body) => $action,
            TransactionBody::AggregateComplete($body) => $action,
            TransactionBody::AggregateBonded($body) => $action,
        }
    };
}

/// Maps a type to its body variant, for both reading and building.
macro_rules! body_for_type {
    ($transaction_type:expr, $body_ty:ident => $build:expr) => {
        match $transaction_type {
            TransactionType::AccountKeyLink => {
                type $body_ty = KeyLinkBody;
                TransactionBody::AccountKeyLink($build)
            }
            TransactionType::NodeKeyLink => {
                type $body_ty = KeyLinkBody;
                TransactionBody::NodeKeyLink($build)
            }
            TransactionType::VrfKeyLink => {
                type $body_ty = KeyLinkBody;
                TransactionBody::VrfKeyLink($build)
            }
            TransactionType::VotingKeyLink => {
                type $body_ty = VotingKeyLinkBody;
                TransactionBody::VotingKeyLink($build)
            }
            TransactionType::HashLock => {
                type $body_ty = HashLockBody;
                TransactionBody::HashLock($build)
            }
            TransactionType::SecretLock => {
                type $body_ty = SecretLockBody;
                TransactionBody::SecretLock($build)
            }
            TransactionType::SecretProof => {
                type $body_ty = SecretProofBody;
                TransactionBody::SecretProof($build)
            }
            TransactionType::AccountMetadata => {
                type $body_ty = AccountMetadataBody;
                TransactionBody::AccountMetadata($build)
            }
            TransactionType::MosaicDefinition => {
                type $body_ty = MosaicDefinitionBody;
                TransactionBody::MosaicDefinition($build)
            }
            TransactionType::MosaicSupplyChange => {
                type $body_ty = MosaicSupplyChangeBody;
                TransactionBody::MosaicSupplyChange($build)
            }
            TransactionType::MultisigAccountModification => {
                type $body_ty = MultisigAccountModificationBody;
                TransactionBody::MultisigAccountModification($build)
            }
            TransactionType::AddressAlias => {
                type $body_ty = AddressAliasBody;
                TransactionBody::AddressAlias($build)
            }
            TransactionType::MosaicAlias => {
                type $body_ty = MosaicAliasBody;
                TransactionBody::MosaicAlias($build)
            }
            TransactionType::NamespaceRegistration => {
                type $body_ty = NamespaceRegistrationBody;
                TransactionBody::NamespaceRegistration($build)
            }
            TransactionType::AccountAddressRestriction => {
                type $body_ty = AccountRestrictionBody<UnresolvedAddress>;
                TransactionBody::AccountAddressRestriction($build)
            }
            TransactionType::AccountMosaicRestriction => {
                type $body_ty = AccountRestrictionBody<UnresolvedMosaicId>;
                TransactionBody::AccountMosaicRestriction($build)
            }
            TransactionType::AccountOperationRestriction => {
                type $body_ty = AccountRestrictionBody<TransactionType>;
                TransactionBody::AccountOperationRestriction($build)
            }
            TransactionType::MosaicGlobalRestriction => {
                type $body_ty = MosaicGlobalRestrictionBody;
                TransactionBody::MosaicGlobalRestriction($build)
            }
            TransactionType::Transfer => {
                type $body_ty = TransferBody;
                TransactionBody::Transfer($build)
            }
            TransactionType::AggregateComplete => {
                type $body_ty = AggregateBody;
                TransactionBody::AggregateComplete($build)
            }
            TransactionType::AggregateBonded => {
                type $body_ty = AggregateBody;
                TransactionBody::AggregateBonded($build)
            }
            TransactionType::MosaicMetadata => {
                type $body_ty = MosaicMetadataBody;
                TransactionBody::MosaicMetadata($build)
            }
            TransactionType::NamespaceMetadata => {
                type $body_ty = NamespaceMetadataBody;
                TransactionBody::NamespaceMetadata($build)
            }
            TransactionType::MosaicSupplyRevocation => {
                type $body_ty = MosaicSupplyRevocationBody;
                TransactionBody::MosaicSupplyRevocation($build)
            }
            TransactionType::MosaicAddressRestriction => {
                type $body_ty = MosaicAddressRestrictionBody;
                TransactionBody::MosaicAddressRestriction($build)
            }
        }
    };
}

impl TransactionBody {
    /// Type code implied by the variant.
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            TransactionBody::AccountKeyLink(_) => TransactionType::AccountKeyLink,
            TransactionBody::NodeKeyLink(_) => TransactionType::NodeKeyLink,
            TransactionBody::VrfKeyLink(_) => TransactionType::VrfKeyLink,
            TransactionBody::VotingKeyLink(_) => TransactionType::VotingKeyLink,
            TransactionBody::HashLock(_) => TransactionType::HashLock,
            TransactionBody::SecretLock(_) => TransactionType::SecretLock,
            TransactionBody::SecretProof(_) => TransactionType::SecretProof,
            TransactionBody::AccountMetadata(_) => TransactionType::AccountMetadata,
            TransactionBody::MosaicMetadata(_) => TransactionType::MosaicMetadata,
            TransactionBody::NamespaceMetadata(_) => TransactionType::NamespaceMetadata,
            TransactionBody::MosaicDefinition(_) => TransactionType::MosaicDefinition,
            TransactionBody::MosaicSupplyChange(_) => TransactionType::MosaicSupplyChange,
            TransactionBody::MosaicSupplyRevocation(_) => TransactionType::MosaicSupplyRevocation,
            TransactionBody::MultisigAccountModification(_) => {
                TransactionType::MultisigAccountModification
            }
            TransactionBody::AddressAlias(_) => TransactionType::AddressAlias,
            TransactionBody::MosaicAlias(_) => TransactionType::MosaicAlias,
            TransactionBody::NamespaceRegistration(_) => TransactionType::NamespaceRegistration,
            TransactionBody::AccountAddressRestriction(_) => TransactionType::AccountAddressRestriction,
            TransactionBody::AccountMosaicRestriction(_) => TransactionType::AccountMosaicRestriction,
            TransactionBody::AccountOperationRestriction(_) => {
                TransactionType::AccountOperationRestriction
            }
            TransactionBody::MosaicAddressRestriction(_) => TransactionType::MosaicAddressRestriction,
            TransactionBody::MosaicGlobalRestriction(_) => TransactionType::MosaicGlobalRestriction,
            TransactionBody::Transfer(_) => TransactionType::Transfer,
            TransactionBody::AggregateComplete(_) => TransactionType::AggregateComplete,
            TransactionBody::AggregateBonded(_) => TransactionType::AggregateBonded,
        }
    }

    /// Body schema for `transaction_type`.
    pub fn fields(transaction_type: TransactionType) -> &'static [FieldSchema] {
        match transaction_type {
            TransactionType::AccountKeyLink
            | TransactionType::NodeKeyLink
            | TransactionType::VrfKeyLink => KeyLinkBody::FIELDS,
            TransactionType::VotingKeyLink => VotingKeyLinkBody::FIELDS,
            TransactionType::HashLock => HashLockBody::FIELDS,
            TransactionType::SecretLock => SecretLockBody::FIELDS,
            TransactionType::SecretProof => SecretProofBody::FIELDS,
            TransactionType::AccountMetadata => AccountMetadataBody::FIELDS,
            TransactionType::MosaicMetadata => MosaicMetadataBody::FIELDS,
            TransactionType::NamespaceMetadata => NamespaceMetadataBody::FIELDS,
            TransactionType::MosaicDefinition => MosaicDefinitionBody::FIELDS,
            TransactionType::MosaicSupplyChange => MosaicSupplyChangeBody::FIELDS,
            TransactionType::MosaicSupplyRevocation => MosaicSupplyRevocationBody::FIELDS,
            TransactionType::MultisigAccountModification => MultisigAccountModificationBody::FIELDS,
            TransactionType::AddressAlias => AddressAliasBody::FIELDS,
            TransactionType::MosaicAlias => MosaicAliasBody::FIELDS,
            TransactionType::NamespaceRegistration => NamespaceRegistrationBody::FIELDS,
            TransactionType::AccountAddressRestriction => <UnresolvedAddress as RestrictionValue>::FIELDS,
            TransactionType::AccountMosaicRestriction => <UnresolvedMosaicId as RestrictionValue>::FIELDS,
            TransactionType::AccountOperationRestriction => <TransactionType as RestrictionValue>::FIELDS,
            TransactionType::MosaicAddressRestriction => MosaicAddressRestrictionBody::FIELDS,
            TransactionType::MosaicGlobalRestriction => MosaicGlobalRestrictionBody::FIELDS,
            TransactionType::Transfer => TransferBody::FIELDS,
            TransactionType::AggregateComplete | TransactionType::AggregateBonded => AggregateBody::FIELDS,
        }
    }

    /// Builds the body of `transaction_type` from converted values.
    pub fn from_record(transaction_type: TransactionType, record: Record) -> Result<Self, SchemaError> {
        Ok(body_for_type!(transaction_type, Body => Body::from_record(record)?))
    }

    /// Decodes the body of a known `(type, version)` pair.
    pub fn read(kind: &TransactionKind, reader: &mut impl Buf) -> Result<Self, CodecError> {
        Ok(body_for_type!(kind.transaction_type, Body => Body::read(reader)?))
    }

    pub fn size(&self) -> usize {
        for_each_body!(self, body => body.size())
    }

    pub fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
        for_each_body!(self, body => body.write(writer))
    }

    /// The aggregate body, if this is one.
    pub fn aggregate(&self) -> Option<&AggregateBody> {
        match self {
            TransactionBody::AggregateComplete(body) | TransactionBody::AggregateBonded(body) => {
                Some(body)
            }
            _ => None,
        }
    }

    pub fn aggregate_mut(&mut self) -> Option<&mut AggregateBody> {
        match self {
            TransactionBody::AggregateComplete(body) | TransactionBody::AggregateBonded(body) => {
                Some(body)
            }
            _ => None,
        }
    }
}

/// Resolves a decoded header to a registry entry. Aggregates are rejected
/// inside other aggregates.
fn resolve_kind(
    type_code: u16,
    version: u8,
    embedded: bool,
) -> Result<&'static TransactionKind, CodecError> {
    TransactionType::try_from(type_code)
        .ok()
        .and_then(|transaction_type| TransactionKind::find(transaction_type, version))
        .filter(|kind| kind.embeddable || !embedded)
        .ok_or(CodecError::UnknownTransactionType { type_code, version })
}

/// Splits off exactly one size-prefixed entity.
fn entity_view(
    reader: &mut impl Buf,
    minimum_size: usize,
    what: &'static str,
) -> Result<::bytes::Bytes, CodecError> {
    let size = u32::read(reader)? as usize;
    if size < minimum_size {
        return Err(CodecError::SizeMismatch {
            what,
            expected: minimum_size,
            actual: size,
        });
    }
    ensure_remaining(reader, size - 4)?;
    Ok(reader.copy_to_bytes(size - 4))
}

fn ensure_consumed(view: &::bytes::Bytes) -> Result<(), CodecError> {
    if view.has_remaining() {
        return Err(CodecError::TrailingBytes(view.remaining()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A top-level, signable transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub signature: Signature,
    pub signer_public_key: PublicKey,
    pub version: u8,
    pub network: NetworkType,
    pub fee: Amount,
    pub deadline: Timestamp,
    pub body: TransactionBody,
}

impl Transaction {
    pub fn transaction_type(&self) -> TransactionType {
        self.body.transaction_type()
    }

    /// `true` for aggregate complete and aggregate bonded.
    pub fn is_aggregate(&self) -> bool {
        self.transaction_type().is_aggregate()
    }

    /// Registry entry, if the version is one the crate knows.
    pub fn kind(&self) -> Option<&'static TransactionKind> {
        TransactionKind::find(self.transaction_type(), self.version)
    }

    /// Builds a transaction of `kind` from converted header and body values.
    pub fn from_record(kind: &TransactionKind, mut record: Record) -> Result<Self, SchemaError> {
        Ok(Self {
            signature: record.take("signature")?,
            signer_public_key: record.take("signer_public_key")?,
            version: kind.version,
            network: record.take("network")?,
            fee: record.take("fee")?,
            deadline: record.take("deadline")?,
            body: TransactionBody::from_record(kind.transaction_type, record)?,
        })
    }
}

impl Codec for Transaction {
    fn size(&self) -> usize {
        TRANSACTION_FULL_HEADER_SIZE + self.body.size()
    }

    fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
        writer.put_u32_le(count_as("transaction size", self.size())?);
        write_reserved(writer, 4);
        self.signature.write(writer)?;
        self.signer_public_key.write(writer)?;
        write_reserved(writer, 4);
        writer.put_u8(self.version);
        self.network.write(writer)?;
        self.transaction_type().write(writer)?;
        self.fee.write(writer)?;
        self.deadline.write(writer)?;
        self.body.write(writer)
    }

    fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
        let mut view = entity_view(reader, TRANSACTION_FULL_HEADER_SIZE, "transaction")?;
        read_reserved(&mut view, 4, "verifiable_entity_header_reserved_1")?;
        let signature = Signature::read(&mut view)?;
        let signer_public_key = PublicKey::read(&mut view)?;
        read_reserved(&mut view, 4, "entity_body_reserved_1")?;

        let version = u8::read(&mut view)?;
        let network = NetworkType::read(&mut view)?;
        let kind = resolve_kind(u16::read(&mut view)?, version, false)?;
        let fee = Amount::read(&mut view)?;
        let deadline = Timestamp::read(&mut view)?;
        let body = TransactionBody::read(kind, &mut view)?;
        ensure_consumed(&view)?;

        Ok(Self {
            signature,
            signer_public_key,
            version: kind.version,
            network,
            fee,
            deadline,
            body,
        })
    }
}

// ---------------------------------------------------------------------------
// EmbeddedTransaction
// ---------------------------------------------------------------------------

/// An inner transaction of an aggregate. Never signed on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedTransaction {
    pub signer_public_key: PublicKey,
    pub version: u8,
    pub network: NetworkType,
    pub body: TransactionBody,
}

impl EmbeddedTransaction {
    pub fn transaction_type(&self) -> TransactionType {
        self.body.transaction_type()
    }

    pub fn kind(&self) -> Option<&'static TransactionKind> {
        TransactionKind::find(self.transaction_type(), self.version)
    }

    /// Builds an embedded transaction of `kind` from converted values.
    pub fn from_record(kind: &TransactionKind, mut record: Record) -> Result<Self, SchemaError> {
        if !kind.embeddable {
            return Err(SchemaError::NotEmbeddable(kind.name));
        }
        Ok(Self {
            signer_public_key: record.take("signer_public_key")?,
            version: kind.version,
            network: record.take("network")?,
            body: TransactionBody::from_record(kind.transaction_type, record)?,
        })
    }
}

impl Codec for EmbeddedTransaction {
    fn size(&self) -> usize {
        EMBEDDED_TRANSACTION_HEADER_SIZE + self.body.size()
    }

    fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
        writer.put_u32_le(count_as("embedded transaction size", self.size())?);
        write_reserved(writer, 4);
        self.signer_public_key.write(writer)?;
        write_reserved(writer, 4);
        writer.put_u8(self.version);
        self.network.write(writer)?;
        self.transaction_type().write(writer)?;
        self.body.write(writer)
    }

    fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
        let mut view = entity_view(reader, EMBEDDED_TRANSACTION_HEADER_SIZE, "embedded transaction")?;
        read_reserved(&mut view, 4, "embedded_transaction_header_reserved_1")?;
        let signer_public_key = PublicKey::read(&mut view)?;
        read_reserved(&mut view, 4, "entity_body_reserved_1")?;

        let version = u8::read(&mut view)?;
        let network = NetworkType::read(&mut view)?;
        let kind = resolve_kind(u16::read(&mut view)?, version, true)?;
        let body = TransactionBody::read(kind, &mut view)?;
        ensure_consumed(&view)?;

        Ok(Self {
            signer_public_key,
            version: kind.version,
            network,
            body,
        })
    }
}

impl FromTyped for EmbeddedTransaction {
    fn from_typed(value: TypedValue, field: &'static str) -> Result<Self, SchemaError> {
        match value {
            TypedValue::Embedded(transaction) => Ok(*transaction),
            _ => Err(SchemaError::TypeMismatch { field, expected: "embedded transaction" }),
        }
    }
}
