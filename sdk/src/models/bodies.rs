//! # Transaction Bodies
//!
//! The part of each transaction after the common header. Top-level and
//! embedded transactions of the same type share one body struct; only the
//! header around it differs (see [`super::transactions`]).
//!
//! Fixed-layout bodies are stamped out by `fixed_body!`: the struct, its
//! schema and its codec all come from one field list, so they cannot drift
//! apart. Bodies with counts, sizes or variant fields are written by hand.

use super::enums::{
    AccountRestrictionFlags, AliasAction, LinkAction, LockHashAlgorithm, MosaicFlags,
    MosaicRestrictionType, MosaicSupplyChangeAction, NamespaceRegistrationType, TransactionType,
};
use super::pods::{
    Amount, BlockDuration, FinalizationEpoch, MosaicId, MosaicNonce, NamespaceId, UnresolvedMosaicId,
};
use super::schema::{FieldSchema, FromTyped, Record, Schema, SchemaError, TypeRef};
use super::structs::UnresolvedMosaic;
use crate::codec::array::{read_array, read_sorted_array, write_array, write_sorted_array};
use crate::codec::{
    count_as, read_raw, read_reserved, write_reserved, Codec, CodecError, Hash256, PublicKey,
    UnresolvedAddress, VotingPublicKey,
};
use crate::network::Address;
use ::bytes::{Buf, BufMut};
use std::fmt::Debug;

macro_rules! fixed_body {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($field:ident: $ty:ty => $type_ref:expr),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $name {
            $(pub $field: $ty,)*
        }

        impl $name {
            pub const FIELDS: &'static [FieldSchema] = &[
                $(FieldSchema::new(stringify!($field), $type_ref),)*
            ];
        }

        impl Schema for $name {
            const NAME: &'static str = stringify!($name);

            fn fields() -> &'static [FieldSchema] {
                Self::FIELDS
            }

            fn from_record(mut record: Record) -> Result<Self, SchemaError> {
                Ok(Self {
                    $($field: record.take(stringify!($field))?,)*
                })
            }
        }

        impl Codec for $name {
            fn size(&self) -> usize {
                0 $(+ self.$field.size())*
            }

            fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
                $(self.$field.write(writer)?;)*
                Ok(())
            }

            fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
                Ok(Self {
                    $($field: <$ty>::read(reader)?,)*
                })
            }
        }
    };
}

const MOSAIC: TypeRef = TypeRef::Struct("UnresolvedMosaic");
const ADDRESS_ARRAY: TypeRef = TypeRef::Array { element: "UnresolvedAddress", sort_key: None };

// ---------------------------------------------------------------------------
// Fixed layouts
// ---------------------------------------------------------------------------

fixed_body! {
    /// Account, node and VRF key links.
    KeyLinkBody {
        linked_public_key: PublicKey => TypeRef::Named("PublicKey"),
        link_action: LinkAction => TypeRef::Named("LinkAction"),
    }
}

fixed_body! {
    /// Voting key link, bounded by finalization epochs.
    VotingKeyLinkBody {
        linked_public_key: VotingPublicKey => TypeRef::Named("VotingPublicKey"),
        start_epoch: FinalizationEpoch => TypeRef::Named("FinalizationEpoch"),
        end_epoch: FinalizationEpoch => TypeRef::Named("FinalizationEpoch"),
        link_action: LinkAction => TypeRef::Named("LinkAction"),
    }
}

fixed_body! {
    /// Deposit locked against the hash of an aggregate bonded.
    HashLockBody {
        mosaic: UnresolvedMosaic => MOSAIC,
        duration: BlockDuration => TypeRef::Named("BlockDuration"),
        hash: Hash256 => TypeRef::Named("Hash256"),
    }
}

fixed_body! {
    /// Funds locked until a secret proof or expiry.
    SecretLockBody {
        recipient_address: UnresolvedAddress => TypeRef::Named("UnresolvedAddress"),
        secret: Hash256 => TypeRef::Named("Hash256"),
        mosaic: UnresolvedMosaic => MOSAIC,
        duration: BlockDuration => TypeRef::Named("BlockDuration"),
        hash_algorithm: LockHashAlgorithm => TypeRef::Named("LockHashAlgorithm"),
    }
}

fixed_body! {
    /// Mosaic creation. `id` is derived from the signer and nonce.
    MosaicDefinitionBody {
        id: MosaicId => TypeRef::Named("MosaicId"),
        duration: BlockDuration => TypeRef::Named("BlockDuration"),
        nonce: MosaicNonce => TypeRef::Named("MosaicNonce"),
        flags: MosaicFlags => TypeRef::Named("MosaicFlags"),
        divisibility: u8 => TypeRef::Named("uint8"),
    }
}

fixed_body! {
    /// Mosaic supply increase or decrease.
    MosaicSupplyChangeBody {
        mosaic_id: UnresolvedMosaicId => TypeRef::Named("UnresolvedMosaicId"),
        delta: Amount => TypeRef::Named("Amount"),
        action: MosaicSupplyChangeAction => TypeRef::Named("MosaicSupplyChangeAction"),
    }
}

fixed_body! {
    /// Namespace to address alias.
    AddressAliasBody {
        namespace_id: NamespaceId => TypeRef::Named("NamespaceId"),
        address: Address => TypeRef::Named("Address"),
        alias_action: AliasAction => TypeRef::Named("AliasAction"),
    }
}

fixed_body! {
    /// Namespace to mosaic alias.
    MosaicAliasBody {
        namespace_id: NamespaceId => TypeRef::Named("NamespaceId"),
        mosaic_id: MosaicId => TypeRef::Named("MosaicId"),
        alias_action: AliasAction => TypeRef::Named("AliasAction"),
    }
}

fixed_body! {
    /// Network-wide restriction on holding a mosaic.
    MosaicGlobalRestrictionBody {
        mosaic_id: UnresolvedMosaicId => TypeRef::Named("UnresolvedMosaicId"),
        reference_mosaic_id: UnresolvedMosaicId => TypeRef::Named("UnresolvedMosaicId"),
        restriction_key: u64 => TypeRef::Named("uint64"),
        previous_restriction_value: u64 => TypeRef::Named("uint64"),
        new_restriction_value: u64 => TypeRef::Named("uint64"),
        previous_restriction_type: MosaicRestrictionType => TypeRef::Named("MosaicRestrictionType"),
        new_restriction_type: MosaicRestrictionType => TypeRef::Named("MosaicRestrictionType"),
    }
}

fixed_body! {
    /// Creator reclaims units of a revokable mosaic from `source_address`.
    MosaicSupplyRevocationBody {
        source_address: UnresolvedAddress => TypeRef::Named("UnresolvedAddress"),
        mosaic: UnresolvedMosaic => MOSAIC,
    }
}

fixed_body! {
    MosaicAddressRestrictionBody {
        mosaic_id: UnresolvedMosaicId => TypeRef::Named("UnresolvedMosaicId"),
        restriction_key: u64 => TypeRef::Named("uint64"),
        previous_restriction_value: u64 => TypeRef::Named("uint64"),
        new_restriction_value: u64 => TypeRef::Named("uint64"),
        target_address: UnresolvedAddress => TypeRef::Named("UnresolvedAddress"),
    }
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

/// Mosaics and an optional message sent to one recipient.
///
/// `mosaics` must be strictly ascending by id when written. Construction
/// through the factory sorts them; building the struct by hand does not,
/// and an unsorted list fails in [`Codec::write`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransferBody {
    pub recipient_address: UnresolvedAddress,
    pub mosaics: Vec<UnresolvedMosaic>,
    pub message: Vec<u8>,
}

impl TransferBody {
    pub const FIELDS: &'static [FieldSchema] = &[
        FieldSchema::new("recipient_address", TypeRef::Named("UnresolvedAddress")),
        FieldSchema::new(
            "mosaics",
            TypeRef::Array { element: "struct:UnresolvedMosaic", sort_key: Some("mosaic_id") },
        ),
        FieldSchema::new("message", TypeRef::Bytes),
    ];
}

impl Schema for TransferBody {
    const NAME: &'static str = "TransferBody";

    fn fields() -> &'static [FieldSchema] {
        Self::FIELDS
    }

    fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        Ok(Self {
            recipient_address: record.take("recipient_address")?,
            mosaics: record.take_array("mosaics")?,
            message: record.take_bytes("message")?,
        })
    }
}

impl Codec for TransferBody {
    fn size(&self) -> usize {
        UnresolvedAddress::SIZE + 2 + 1 + 4 + 1 + self.mosaics.len() * 16 + self.message.len()
    }

    fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
        self.recipient_address.write(writer)?;
        writer.put_u16_le(count_as("message", self.message.len())?);
        writer.put_u8(count_as("mosaics", self.mosaics.len())?);
        write_reserved(writer, 4);
        write_reserved(writer, 1);
        write_sorted_array(writer, &self.mosaics, "mosaics", |mosaic| mosaic.mosaic_id)?;
        writer.put_slice(&self.message);
        Ok(())
    }

    fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
        let recipient_address = UnresolvedAddress::read(reader)?;
        let message_size = u16::read(reader)? as usize;
        let mosaics_count = u8::read(reader)? as usize;
        read_reserved(reader, 4, "transfer_transaction_body_reserved_1")?;
        read_reserved(reader, 1, "transfer_transaction_body_reserved_2")?;
        let mosaics = read_sorted_array(reader, mosaics_count, "mosaics", |mosaic: &UnresolvedMosaic| {
            mosaic.mosaic_id
        })?;
        let message = read_raw(reader, message_size)?;
        Ok(Self {
            recipient_address,
            mosaics,
            message,
        })
    }
}

// ---------------------------------------------------------------------------
// Secret proof
// ---------------------------------------------------------------------------

/// Reveals the preimage of a secret lock.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SecretProofBody {
    pub recipient_address: UnresolvedAddress,
    pub secret: Hash256,
    pub hash_algorithm: LockHashAlgorithm,
    pub proof: Vec<u8>,
}

impl SecretProofBody {
    pub const FIELDS: &'static [FieldSchema] = &[
        FieldSchema::new("recipient_address", TypeRef::Named("UnresolvedAddress")),
        FieldSchema::new("secret", TypeRef::Named("Hash256")),
        FieldSchema::new("hash_algorithm", TypeRef::Named("LockHashAlgorithm")),
        FieldSchema::new("proof", TypeRef::Bytes),
    ];
}

impl Schema for SecretProofBody {
    const NAME: &'static str = "SecretProofBody";

    fn fields() -> &'static [FieldSchema] {
        Self::FIELDS
    }

    fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        Ok(Self {
            recipient_address: record.take("recipient_address")?,
            secret: record.take("secret")?,
            hash_algorithm: record.take("hash_algorithm")?,
            proof: record.take_bytes("proof")?,
        })
    }
}

impl Codec for SecretProofBody {
    fn size(&self) -> usize {
        UnresolvedAddress::SIZE + Hash256::SIZE + 2 + 1 + self.proof.len()
    }

    fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
        self.recipient_address.write(writer)?;
        self.secret.write(writer)?;
        writer.put_u16_le(count_as("proof", self.proof.len())?);
        self.hash_algorithm.write(writer)?;
        writer.put_slice(&self.proof);
        Ok(())
    }

    fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
        let recipient_address = UnresolvedAddress::read(reader)?;
        let secret = Hash256::read(reader)?;
        let proof_size = u16::read(reader)? as usize;
        let hash_algorithm = LockHashAlgorithm::read(reader)?;
        let proof = read_raw(reader, proof_size)?;
        Ok(Self {
            recipient_address,
            secret,
            hash_algorithm,
            proof,
        })
    }
}

// ---------------------------------------------------------------------------
// Namespace registration
// ---------------------------------------------------------------------------

/// Root or child namespace registration.
///
/// The first eight body bytes hold `duration` for a root and `parent_id`
/// for a child; the other one is not serialized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamespaceRegistrationBody {
    pub duration: BlockDuration,
    pub parent_id: NamespaceId,
    pub id: NamespaceId,
    pub registration_type: NamespaceRegistrationType,
    pub name: Vec<u8>,
}

impl NamespaceRegistrationBody {
    pub const FIELDS: &'static [FieldSchema] = &[
        FieldSchema::new("duration", TypeRef::Named("BlockDuration")),
        FieldSchema::new("parent_id", TypeRef::Named("NamespaceId")),
        FieldSchema::new("id", TypeRef::Named("NamespaceId")),
        FieldSchema::new("registration_type", TypeRef::Named("NamespaceRegistrationType")),
        FieldSchema::new("name", TypeRef::Bytes),
    ];
}

impl Schema for NamespaceRegistrationBody {
    const NAME: &'static str = "NamespaceRegistrationBody";

    fn fields() -> &'static [FieldSchema] {
        Self::FIELDS
    }

    fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        Ok(Self {
            duration: record.take("duration")?,
            parent_id: record.take("parent_id")?,
            id: record.take("id")?,
            registration_type: record.take("registration_type")?,
            name: record.take_bytes("name")?,
        })
    }
}

impl Codec for NamespaceRegistrationBody {
    fn size(&self) -> usize {
        8 + 8 + 1 + 1 + self.name.len()
    }

    fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
        match self.registration_type {
            NamespaceRegistrationType::Root => self.duration.write(writer)?,
            NamespaceRegistrationType::Child => self.parent_id.write(writer)?,
        }
        self.id.write(writer)?;
        self.registration_type.write(writer)?;
        writer.put_u8(count_as("name", self.name.len())?);
        writer.put_slice(&self.name);
        Ok(())
    }

    fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
        let duration_or_parent = u64::read(reader)?;
        let id = NamespaceId::read(reader)?;
        let registration_type = NamespaceRegistrationType::read(reader)?;
        let name_size = u8::read(reader)? as usize;
        let name = read_raw(reader, name_size)?;

        let (duration, parent_id) = match registration_type {
            NamespaceRegistrationType::Root => (BlockDuration(duration_or_parent), NamespaceId(0)),
            NamespaceRegistrationType::Child => (BlockDuration(0), NamespaceId(duration_or_parent)),
        };
        Ok(Self {
            duration,
            parent_id,
            id,
            registration_type,
            name,
        })
    }
}

// ---------------------------------------------------------------------------
// Multisig
// ---------------------------------------------------------------------------

/// Changes cosignatories and approval thresholds of a multisig account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultisigAccountModificationBody {
    pub min_removal_delta: i8,
    pub min_approval_delta: i8,
    pub address_additions: Vec<UnresolvedAddress>,
    pub address_deletions: Vec<UnresolvedAddress>,
}

impl MultisigAccountModificationBody {
    pub const FIELDS: &'static [FieldSchema] = &[
        FieldSchema::new("min_removal_delta", TypeRef::Named("int8")),
        FieldSchema::new("min_approval_delta", TypeRef::Named("int8")),
        FieldSchema::new("address_additions", ADDRESS_ARRAY),
        FieldSchema::new("address_deletions", ADDRESS_ARRAY),
    ];
}

impl Schema for MultisigAccountModificationBody {
    const NAME: &'static str = "MultisigAccountModificationBody";

    fn fields() -> &'static [FieldSchema] {
        Self::FIELDS
    }

    fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        Ok(Self {
            min_removal_delta: record.take("min_removal_delta")?,
            min_approval_delta: record.take("min_approval_delta")?,
            address_additions: record.take_array("address_additions")?,
            address_deletions: record.take_array("address_deletions")?,
        })
    }
}

impl Codec for MultisigAccountModificationBody {
    fn size(&self) -> usize {
        1 + 1 + 1 + 1 + 4
            + (self.address_additions.len() + self.address_deletions.len()) * UnresolvedAddress::SIZE
    }

    fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
        writer.put_i8(self.min_removal_delta);
        writer.put_i8(self.min_approval_delta);
        writer.put_u8(count_as("address_additions", self.address_additions.len())?);
        writer.put_u8(count_as("address_deletions", self.address_deletions.len())?);
        write_reserved(writer, 4);
        write_array(writer, &self.address_additions)?;
        write_array(writer, &self.address_deletions)
    }

    fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
        let min_removal_delta = i8::read(reader)?;
        let min_approval_delta = i8::read(reader)?;
        let additions_count = u8::read(reader)? as usize;
        let deletions_count = u8::read(reader)? as usize;
        read_reserved(reader, 4, "multisig_account_modification_transaction_body_reserved_1")?;
        Ok(Self {
            min_removal_delta,
            min_approval_delta,
            address_additions: read_array(reader, additions_count)?,
            address_deletions: read_array(reader, deletions_count)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Account restrictions
// ---------------------------------------------------------------------------

/// A value an account restriction can list.
pub trait RestrictionValue: Codec + FromTyped + Clone + PartialEq + Eq + Debug {
    /// Schema name of the body holding this value.
    const BODY_NAME: &'static str;

    /// Body fields, with the array element type filled in.
    const FIELDS: &'static [FieldSchema];
}

macro_rules! restriction_value {
    ($ty:ty, $body_name:literal, $element:literal) => {
        impl RestrictionValue for $ty {
            const BODY_NAME: &'static str = $body_name;

            const FIELDS: &'static [FieldSchema] = &[
                FieldSchema::new("restriction_flags", TypeRef::Named("AccountRestrictionFlags")),
                FieldSchema::new(
                    "restriction_additions",
                    TypeRef::Array { element: $element, sort_key: None },
                ),
                FieldSchema::new(
                    "restriction_deletions",
                    TypeRef::Array { element: $element, sort_key: None },
                ),
            ];
        }
    };
}

restriction_value!(UnresolvedAddress, "AccountAddressRestrictionBody", "UnresolvedAddress");
restriction_value!(UnresolvedMosaicId, "AccountMosaicRestrictionBody", "UnresolvedMosaicId");
restriction_value!(TransactionType, "AccountOperationRestrictionBody", "TransactionType");

/// Allow or block list changes for addresses, mosaics or operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRestrictionBody<T: RestrictionValue> {
    pub restriction_flags: AccountRestrictionFlags,
    pub restriction_additions: Vec<T>,
    pub restriction_deletions: Vec<T>,
}

impl<T: RestrictionValue> Default for AccountRestrictionBody<T> {
    fn default() -> Self {
        Self {
            restriction_flags: AccountRestrictionFlags::default(),
            restriction_additions: Vec::new(),
            restriction_deletions: Vec::new(),
        }
    }
}

impl<T: RestrictionValue> Schema for AccountRestrictionBody<T> {
    const NAME: &'static str = T::BODY_NAME;

    fn fields() -> &'static [FieldSchema] {
        T::FIELDS
    }

    fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        Ok(Self {
            restriction_flags: record.take("restriction_flags")?,
            restriction_additions: record.take_array("restriction_additions")?,
            restriction_deletions: record.take_array("restriction_deletions")?,
        })
    }
}

impl<T: RestrictionValue> Codec for AccountRestrictionBody<T> {
    fn size(&self) -> usize {
        2 + 1 + 1 + 4
            + self
                .restriction_additions
                .iter()
                .chain(&self.restriction_deletions)
                .map(|value| value.size())
                .sum::<usize>()
    }

    fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
        self.restriction_flags.write(writer)?;
        writer.put_u8(count_as("restriction_additions", self.restriction_additions.len())?);
        writer.put_u8(count_as("restriction_deletions", self.restriction_deletions.len())?);
        write_reserved(writer, 4);
        write_array(writer, &self.restriction_additions)?;
        write_array(writer, &self.restriction_deletions)
    }

    fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
        let restriction_flags = AccountRestrictionFlags::read(reader)?;
        let additions_count = u8::read(reader)? as usize;
        let deletions_count = u8::read(reader)? as usize;
        read_reserved(reader, 4, "account_restriction_transaction_body_reserved_1")?;
        Ok(Self {
            restriction_flags,
            restriction_additions: read_array(reader, additions_count)?,
            restriction_deletions: read_array(reader, deletions_count)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

macro_rules! metadata_body {
    (
        $(#[$meta:meta])*
        $name:ident $(, $target:ident: $target_ty:ty => $target_ref:literal)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $name {
            pub target_address: UnresolvedAddress,
            pub scoped_metadata_key: u64,
            $(pub $target: $target_ty,)?
            pub value_size_delta: i16,
            pub value: Vec<u8>,
        }

        impl $name {
            pub const FIELDS: &'static [FieldSchema] = &[
                FieldSchema::new("target_address", TypeRef::Named("UnresolvedAddress")),
                FieldSchema::new("scoped_metadata_key", TypeRef::Named("uint64")),
                $(FieldSchema::new(stringify!($target), TypeRef::Named($target_ref)),)?
                FieldSchema::new("value_size_delta", TypeRef::Named("int16")),
                FieldSchema::new("value", TypeRef::Bytes),
            ];
        }

        impl Schema for $name {
            const NAME: &'static str = stringify!($name);

            fn fields() -> &'static [FieldSchema] {
                Self::FIELDS
            }

            fn from_record(mut record: Record) -> Result<Self, SchemaError> {
                Ok(Self {
                    target_address: record.take("target_address")?,
                    scoped_metadata_key: record.take("scoped_metadata_key")?,
                    $($target: record.take(stringify!($target))?,)?
                    value_size_delta: record.take("value_size_delta")?,
                    value: record.take_bytes("value")?,
                })
            }
        }

        impl Codec for $name {
            fn size(&self) -> usize {
                UnresolvedAddress::SIZE + 8 $(+ self.$target.size())? + 2 + 2 + self.value.len()
            }

            fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
                self.target_address.write(writer)?;
                writer.put_u64_le(self.scoped_metadata_key);
                $(self.$target.write(writer)?;)?
                writer.put_i16_le(self.value_size_delta);
                writer.put_u16_le(count_as("value", self.value.len())?);
                writer.put_slice(&self.value);
                Ok(())
            }

            fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
                let target_address = UnresolvedAddress::read(reader)?;
                let scoped_metadata_key = u64::read(reader)?;
                $(let $target = <$target_ty>::read(reader)?;)?
                let value_size_delta = i16::read(reader)?;
                let value_size = u16::read(reader)? as usize;
                Ok(Self {
                    target_address,
                    scoped_metadata_key,
                    $($target,)?
                    value_size_delta,
                    value: read_raw(reader, value_size)?,
                })
            }
        }
    };
}

metadata_body! {
    /// Key/value metadata attached to an account.
    AccountMetadataBody
}

metadata_body! {
    /// Key/value metadata attached to a mosaic owned by `target_address`.
    MosaicMetadataBody, target_mosaic_id: UnresolvedMosaicId => "UnresolvedMosaicId"
}

metadata_body! {
    /// Key/value metadata attached to a namespace owned by `target_address`.
    NamespaceMetadataBody, target_namespace_id: NamespaceId => "NamespaceId"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient() -> UnresolvedAddress {
        "98F8F4AADD4BF6269C1CFD4654335D88AD3B44D3E74EC7C8".parse().unwrap()
    }

    #[test]
    fn transfer_body_layout() {
        let body = TransferBody {
            recipient_address: recipient(),
            mosaics: vec![UnresolvedMosaic::new(0x2CF4_03E8_5507_F39Eu64, 1_000_000u64)],
            message: Vec::new(),
        };
        let bytes = body.to_bytes().unwrap();
        assert_eq!(bytes.len(), body.size());
        assert_eq!(
            hex::encode_upper(&bytes),
            "98F8F4AADD4BF6269C1CFD4654335D88AD3B44D3E74EC7C8\
             0000010000000000\
             9EF30755E803F42C40420F0000000000"
        );
        assert_eq!(TransferBody::from_bytes(&bytes).unwrap(), body);
    }

    #[test]
    fn unsorted_mosaics_fail_on_write() {
        let body = TransferBody {
            recipient_address: recipient(),
            mosaics: vec![UnresolvedMosaic::new(2u64, 1u64), UnresolvedMosaic::new(1u64, 1u64)],
            message: b"hi".to_vec(),
        };
        assert_eq!(body.to_bytes().unwrap_err(), CodecError::UnsortedArray { name: "mosaics" });
    }

    #[test]
    fn unsorted_mosaics_fail_on_read() {
        let mut bytes = recipient().to_bytes().unwrap();
        bytes.extend_from_slice(&[0, 0, 2, 0, 0, 0, 0, 0]);
        for id in [5u64, 3u64] {
            bytes.extend_from_slice(&UnresolvedMosaic::new(id, 1u64).to_bytes().unwrap());
        }
        assert_eq!(
            TransferBody::from_bytes(&bytes).unwrap_err(),
            CodecError::UnsortedArray { name: "mosaics" }
        );
    }

    #[test]
    fn transfer_reserved_bytes_are_checked() {
        let mut bytes = recipient().to_bytes().unwrap();
        bytes.extend_from_slice(&[0, 0, 0, 1, 0, 0, 0, 0]);
        assert!(matches!(
            TransferBody::from_bytes(&bytes),
            Err(CodecError::NonZeroReserved(_))
        ));
    }

    #[test]
    fn namespace_registration_uses_variant_prefix() {
        let root = NamespaceRegistrationBody {
            duration: BlockDuration(1000),
            id: NamespaceId(0xA95F_1F8A_9615_9516),
            name: b"symbol".to_vec(),
            ..Default::default()
        };
        let bytes = root.to_bytes().unwrap();
        assert_eq!(&bytes[..8], &1000u64.to_le_bytes());
        assert_eq!(bytes.len(), root.size());
        assert_eq!(NamespaceRegistrationBody::from_bytes(&bytes).unwrap(), root);

        let child = NamespaceRegistrationBody {
            parent_id: NamespaceId(0xA95F_1F8A_9615_9516),
            id: NamespaceId(0xE74B_99BA_41F4_AFEE),
            registration_type: NamespaceRegistrationType::Child,
            name: b"xym".to_vec(),
            ..Default::default()
        };
        let bytes = child.to_bytes().unwrap();
        assert_eq!(&bytes[..8], &0xA95F_1F8A_9615_9516u64.to_le_bytes());
        assert_eq!(NamespaceRegistrationBody::from_bytes(&bytes).unwrap(), child);
    }

    #[test]
    fn fixed_bodies_have_expected_sizes() {
        assert_eq!(KeyLinkBody::default().size(), 33);
        assert_eq!(VotingKeyLinkBody::default().size(), 41);
        assert_eq!(HashLockBody::default().size(), 56);
        assert_eq!(SecretLockBody::default().size(), 81);
        assert_eq!(MosaicDefinitionBody::default().size(), 22);
        assert_eq!(MosaicSupplyChangeBody::default().size(), 17);
        assert_eq!(AddressAliasBody::default().size(), 33);
        assert_eq!(MosaicAliasBody::default().size(), 17);
        assert_eq!(MosaicGlobalRestrictionBody::default().size(), 42);
        assert_eq!(MosaicSupplyRevocationBody::default().size(), 40);
        assert_eq!(MosaicAddressRestrictionBody::default().size(), 56);
    }

    #[test]
    fn fixed_body_schema_follows_field_order() {
        let names: Vec<&str> = MosaicDefinitionBody::fields().iter().map(|f| f.name).collect();
        assert_eq!(names, ["id", "duration", "nonce", "flags", "divisibility"]);
    }

    #[test]
    fn multisig_signed_deltas() {
        let body = MultisigAccountModificationBody {
            min_removal_delta: -1,
            min_approval_delta: 2,
            address_additions: vec![recipient()],
            address_deletions: Vec::new(),
        };
        let bytes = body.to_bytes().unwrap();
        assert_eq!(&bytes[..4], &[0xFF, 0x02, 0x01, 0x00]);
        assert_eq!(bytes.len(), 8 + 24);
        assert_eq!(MultisigAccountModificationBody::from_bytes(&bytes).unwrap(), body);
    }

    #[test]
    fn operation_restriction_lists_type_codes() {
        let body = AccountRestrictionBody::<TransactionType> {
            restriction_flags: AccountRestrictionFlags::TRANSACTION_TYPE
                | AccountRestrictionFlags::OUTGOING,
            restriction_additions: vec![TransactionType::Transfer],
            restriction_deletions: vec![TransactionType::HashLock],
        };
        let bytes = body.to_bytes().unwrap();
        assert_eq!(hex::encode_upper(&bytes), "044001010000000054414841");
        assert_eq!(AccountRestrictionBody::<TransactionType>::from_bytes(&bytes).unwrap(), body);
        assert_eq!(
            <AccountRestrictionBody<TransactionType> as Schema>::NAME,
            "AccountOperationRestrictionBody"
        );
    }

    #[test]
    fn metadata_and_proof_carry_sizes() {
        let metadata = AccountMetadataBody {
            target_address: recipient(),
            scoped_metadata_key: 0xA,
            value_size_delta: -3,
            value: b"abc".to_vec(),
        };
        let bytes = metadata.to_bytes().unwrap();
        assert_eq!(bytes.len(), metadata.size());
        assert_eq!(AccountMetadataBody::from_bytes(&bytes).unwrap(), metadata);

        let proof = SecretProofBody {
            recipient_address: recipient(),
            secret: Hash256::new([7; 32]),
            hash_algorithm: LockHashAlgorithm::Hash160,
            proof: b"hello".to_vec(),
        };
        let bytes = proof.to_bytes().unwrap();
        assert_eq!(&bytes[56..59], &[5, 0, 1]);
        assert_eq!(SecretProofBody::from_bytes(&bytes).unwrap(), proof);
    }

    #[test]
    fn mosaic_and_namespace_metadata_place_target_before_sizes() {
        let mosaic = MosaicMetadataBody {
            target_address: recipient(),
            scoped_metadata_key: 0xA,
            target_mosaic_id: UnresolvedMosaicId(0x2CF4_03E8_5507_F39E),
            value_size_delta: 2,
            value: b"ab".to_vec(),
        };
        let bytes = mosaic.to_bytes().unwrap();
        assert_eq!(bytes.len(), 24 + 8 + 8 + 2 + 2 + 2);
        assert_eq!(bytes.len(), mosaic.size());
        assert_eq!(&bytes[32..40], &0x2CF4_03E8_5507_F39Eu64.to_le_bytes());
        assert_eq!(&bytes[40..44], &[2, 0, 2, 0]);
        assert_eq!(MosaicMetadataBody::from_bytes(&bytes).unwrap(), mosaic);

        let namespace = NamespaceMetadataBody {
            target_address: recipient(),
            scoped_metadata_key: 0xA,
            target_namespace_id: NamespaceId(0xA95F_1F8A_9615_9516),
            value_size_delta: -1,
            value: b"x".to_vec(),
        };
        let bytes = namespace.to_bytes().unwrap();
        assert_eq!(&bytes[32..40], &0xA95F_1F8A_9615_9516u64.to_le_bytes());
        assert_eq!(&bytes[40..44], &[0xFF, 0xFF, 1, 0]);
        assert_eq!(NamespaceMetadataBody::from_bytes(&bytes).unwrap(), namespace);

        let names: Vec<&str> = NamespaceMetadataBody::fields().iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            ["target_address", "scoped_metadata_key", "target_namespace_id", "value_size_delta", "value"]
        );
    }

    #[test]
    fn mosaic_address_restriction_layout() {
        let body = MosaicAddressRestrictionBody {
            mosaic_id: UnresolvedMosaicId(1),
            restriction_key: 2,
            previous_restriction_value: u64::MAX,
            new_restriction_value: 3,
            target_address: recipient(),
        };
        let bytes = body.to_bytes().unwrap();
        assert_eq!(&bytes[..8], &1u64.to_le_bytes());
        assert_eq!(&bytes[16..24], &[0xFF; 8]);
        assert_eq!(&bytes[32..], &recipient().to_bytes().unwrap()[..]);
        assert_eq!(MosaicAddressRestrictionBody::from_bytes(&bytes).unwrap(), body);
    }
}
