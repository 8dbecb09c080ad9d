//! Enums and bit flags.
//!
//! Every enum carries its `(name, code)` table as an [`EnumSchema`], which
//! is what the factory's enum and flags parsers consult. Decoding a code
//! outside the table is an error; there is no "unknown" variant.

use super::schema::{
    integer_from_typed, EnumSchema, FromTyped, SchemaError, TypeKind, TypeSchema, TypedValue,
};
use crate::codec::{Codec, CodecError};
use ::bytes::{Buf, BufMut};
use std::fmt;
use std::ops::BitOr;

macro_rules! schema_enum {
    (
        $(#[$meta:meta])*
        $name:ident: $repr:ty {
            $(#[$first_meta:meta])* $first:ident = $first_value:literal => $first_label:literal
            $(, $(#[$variant_meta:meta])* $variant:ident = $value:literal => $label:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr($repr)]
        pub enum $name {
            $(#[$first_meta])* $first = $first_value,
            $($(#[$variant_meta])* $variant = $value,)*
        }

        impl $name {
            /// Closed `(name, code)` table.
            pub const ENUM_SCHEMA: EnumSchema = EnumSchema {
                name: stringify!($name),
                values: &[($first_label, $first_value) $(, ($label, $value))*],
                size: std::mem::size_of::<$repr>(),
                is_flags: false,
            };

            /// Catalogue entry.
            pub const SCHEMA: TypeSchema = TypeSchema {
                name: stringify!($name),
                kind: TypeKind::Enum(&Self::ENUM_SCHEMA),
            };

            /// Wire code.
            pub const fn value(self) -> $repr {
                self as $repr
            }

            /// Lower snake case name.
            pub const fn name(self) -> &'static str {
                match self {
                    Self::$first => $first_label,
                    $(Self::$variant => $label,)*
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$first
            }
        }

        impl TryFrom<$repr> for $name {
            type Error = CodecError;

            fn try_from(value: $repr) -> Result<Self, Self::Error> {
                match value {
                    $first_value => Ok(Self::$first),
                    $($value => Ok(Self::$variant),)*
                    _ => Err(CodecError::InvalidEnumValue {
                        name: stringify!($name),
                        value: value as u64,
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl Codec for $name {
            fn size(&self) -> usize {
                std::mem::size_of::<$repr>()
            }

            fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
                self.value().write(writer)
            }

            fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
                Self::try_from(<$repr>::read(reader)?)
            }
        }

        impl FromTyped for $name {
            fn from_typed(value: TypedValue, field: &'static str) -> Result<Self, SchemaError> {
                let raw = integer_from_typed(value, field, std::mem::size_of::<$repr>())?;
                Self::try_from(raw as $repr).map_err(|_| SchemaError::InvalidEnumValue {
                    name: stringify!($name),
                    value: raw,
                })
            }
        }
    };
}

macro_rules! schema_flags {
    (
        $(#[$meta:meta])*
        $name:ident: $repr:ty {
            $($(#[$flag_meta:meta])* $flag:ident = $value:literal => $label:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name($repr);

        impl $name {
            $($(#[$flag_meta])* pub const $flag: Self = Self($value);)*

            /// Closed `(name, bit)` table.
            pub const ENUM_SCHEMA: EnumSchema = EnumSchema {
                name: stringify!($name),
                values: &[$(($label, $value)),*],
                size: std::mem::size_of::<$repr>(),
                is_flags: true,
            };

            /// Catalogue entry.
            pub const SCHEMA: TypeSchema = TypeSchema {
                name: stringify!($name),
                kind: TypeKind::Enum(&Self::ENUM_SCHEMA),
            };

            /// Raw bits. Unknown bits are kept as given.
            pub const fn from_bits(bits: $repr) -> Self {
                Self(bits)
            }

            pub const fn value(self) -> $repr {
                self.0
            }

            /// `true` if every bit of `other` is set.
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }
        }

        impl BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let names: Vec<&str> = Self::ENUM_SCHEMA
                    .values
                    .iter()
                    .filter(|(_, bit)| *bit != 0 && (self.0 as u64) & *bit == *bit)
                    .map(|(label, _)| *label)
                    .collect();
                if names.is_empty() {
                    f.write_str("none")
                } else {
                    f.write_str(&names.join(" "))
                }
            }
        }

        impl Codec for $name {
            fn size(&self) -> usize {
                std::mem::size_of::<$repr>()
            }

            fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
                self.0.write(writer)
            }

            fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
                <$repr>::read(reader).map(Self)
            }
        }

        impl FromTyped for $name {
            fn from_typed(value: TypedValue, field: &'static str) -> Result<Self, SchemaError> {
                let raw = integer_from_typed(value, field, std::mem::size_of::<$repr>())?;
                Ok(Self(raw as $repr))
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

schema_enum! {
    /// Network a transaction is bound to.
    NetworkType: u8 {
        Mainnet = 104 => "mainnet",
        Testnet = 152 => "testnet",
    }
}

schema_enum! {
    /// Every transaction type code the ledger knows.
    TransactionType: u16 {
        AccountKeyLink = 0x414C => "account_key_link",
        NodeKeyLink = 0x424C => "node_key_link",
        AggregateComplete = 0x4141 => "aggregate_complete",
        AggregateBonded = 0x4241 => "aggregate_bonded",
        VotingKeyLink = 0x4143 => "voting_key_link",
        VrfKeyLink = 0x4243 => "vrf_key_link",
        HashLock = 0x4148 => "hash_lock",
        SecretLock = 0x4152 => "secret_lock",
        SecretProof = 0x4252 => "secret_proof",
        AccountMetadata = 0x4144 => "account_metadata",
        MosaicMetadata = 0x4244 => "mosaic_metadata",
        NamespaceMetadata = 0x4344 => "namespace_metadata",
        MosaicDefinition = 0x414D => "mosaic_definition",
        MosaicSupplyChange = 0x424D => "mosaic_supply_change",
        MosaicSupplyRevocation = 0x434D => "mosaic_supply_revocation",
        MultisigAccountModification = 0x4155 => "multisig_account_modification",
        AddressAlias = 0x424E => "address_alias",
        MosaicAlias = 0x434E => "mosaic_alias",
        NamespaceRegistration = 0x414E => "namespace_registration",
        AccountAddressRestriction = 0x4150 => "account_address_restriction",
        AccountMosaicRestriction = 0x4250 => "account_mosaic_restriction",
        AccountOperationRestriction = 0x4350 => "account_operation_restriction",
        MosaicAddressRestriction = 0x4251 => "mosaic_address_restriction",
        MosaicGlobalRestriction = 0x4151 => "mosaic_global_restriction",
        Transfer = 0x4154 => "transfer",
    }
}

impl TransactionType {
    /// `true` for the two aggregate types.
    pub fn is_aggregate(self) -> bool {
        matches!(self, Self::AggregateComplete | Self::AggregateBonded)
    }
}

schema_enum! {
    /// Link or unlink a key.
    LinkAction: u8 {
        Unlink = 0 => "unlink",
        Link = 1 => "link",
    }
}

schema_enum! {
    /// Link or unlink an alias.
    AliasAction: u8 {
        Unlink = 0 => "unlink",
        Link = 1 => "link",
    }
}

schema_enum! {
    /// Direction of a supply change.
    MosaicSupplyChangeAction: u8 {
        Decrease = 0 => "decrease",
        Increase = 1 => "increase",
    }
}

schema_enum! {
    /// Root namespaces have a duration, children have a parent.
    NamespaceRegistrationType: u8 {
        Root = 0 => "root",
        Child = 1 => "child",
    }
}

schema_enum! {
    /// Hash used to build a secret lock's secret.
    LockHashAlgorithm: u8 {
        Sha3_256 = 0 => "sha3_256",
        Hash160 = 1 => "hash_160",
        Hash256 = 2 => "hash_256",
    }
}

schema_enum! {
    /// Comparison applied by a mosaic restriction.
    MosaicRestrictionType: u8 {
        None = 0 => "none",
        Equal = 1 => "eq",
        NotEqual = 2 => "ne",
        LessThan = 3 => "lt",
        LessOrEqual = 4 => "le",
        GreaterThan = 5 => "gt",
        GreaterOrEqual = 6 => "ge",
    }
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

schema_flags! {
    /// Mosaic properties fixed at definition time.
    MosaicFlags: u8 {
        NONE = 0 => "none",
        SUPPLY_MUTABLE = 1 => "supply_mutable",
        TRANSFERABLE = 2 => "transferable",
        RESTRICTABLE = 4 => "restrictable",
        REVOKABLE = 8 => "revokable",
    }
}

schema_flags! {
    /// What an account restriction applies to and how.
    AccountRestrictionFlags: u16 {
        ADDRESS = 0x0001 => "address",
        MOSAIC_ID = 0x0002 => "mosaic_id",
        TRANSACTION_TYPE = 0x0004 => "transaction_type",
        OUTGOING = 0x4000 => "outgoing",
        BLOCK = 0x8000 => "block",
    }
}

/// Catalogue entries for every enum and flags type.
pub const ENUM_SCHEMAS: &[TypeSchema] = &[
    NetworkType::SCHEMA,
    TransactionType::SCHEMA,
    LinkAction::SCHEMA,
    AliasAction::SCHEMA,
    MosaicSupplyChangeAction::SCHEMA,
    NamespaceRegistrationType::SCHEMA,
    LockHashAlgorithm::SCHEMA,
    MosaicRestrictionType::SCHEMA,
    MosaicFlags::SCHEMA,
    AccountRestrictionFlags::SCHEMA,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_try_from() {
        assert_eq!(TransactionType::try_from(0x4154).unwrap(), TransactionType::Transfer);
        assert_eq!(TransactionType::Transfer.value(), 0x4154);
        assert_eq!(NetworkType::Testnet.value(), 0x98);
        assert_eq!(MosaicRestrictionType::GreaterOrEqual.name(), "ge");
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(
            LinkAction::try_from(2).unwrap_err(),
            CodecError::InvalidEnumValue { name: "LinkAction", value: 2 }
        );
        assert!(matches!(
            NetworkType::from_bytes(&[0x90]),
            Err(CodecError::InvalidEnumValue { name: "NetworkType", value: 0x90 })
        ));
        assert!(matches!(
            LinkAction::from_typed(TypedValue::Integer(7), "link_action"),
            Err(SchemaError::InvalidEnumValue { value: 7, .. })
        ));
    }

    #[test]
    fn default_is_first_variant() {
        assert_eq!(LinkAction::default(), LinkAction::Unlink);
        assert_eq!(NamespaceRegistrationType::default(), NamespaceRegistrationType::Root);
    }

    #[test]
    fn aggregates_are_detected() {
        assert!(TransactionType::AggregateBonded.is_aggregate());
        assert!(!TransactionType::Transfer.is_aggregate());
    }

    #[test]
    fn transaction_type_table_is_complete() {
        assert_eq!(TransactionType::ENUM_SCHEMA.values.len(), 25);
        assert_eq!(TransactionType::ENUM_SCHEMA.value_of("hash_lock"), Some(0x4148));
        assert_eq!(TransactionType::ENUM_SCHEMA.size, 2);
    }

    #[test]
    fn flags_combine_and_display() {
        let flags = MosaicFlags::SUPPLY_MUTABLE | MosaicFlags::RESTRICTABLE;
        assert_eq!(flags.value(), 5);
        assert!(flags.contains(MosaicFlags::RESTRICTABLE));
        assert!(!flags.contains(MosaicFlags::TRANSFERABLE));
        assert_eq!(flags.to_string(), "supply_mutable restrictable");
        assert_eq!(MosaicFlags::NONE.to_string(), "none");
        assert!(MosaicFlags::ENUM_SCHEMA.is_flags);
    }

    #[test]
    fn restriction_flags_are_two_bytes() {
        let flags = AccountRestrictionFlags::ADDRESS | AccountRestrictionFlags::BLOCK;
        assert_eq!(flags.to_bytes().unwrap(), vec![0x01, 0x80]);
    }
}
