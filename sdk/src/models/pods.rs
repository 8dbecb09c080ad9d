//! Plain integer wrappers.
//!
//! Each wire integer with a meaning of its own gets a newtype, so an
//! `Amount` never ends up where a `BlockDuration` belongs.

use super::schema::{integer_from_typed, FromTyped, SchemaError, TypeKind, TypeSchema, TypedValue};
use crate::codec::{Codec, CodecError};
use ::bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! pod {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Catalogue entry.
            pub const SCHEMA: TypeSchema = TypeSchema {
                name: stringify!($name),
                kind: TypeKind::Pod { size: std::mem::size_of::<$inner>(), signed: false },
            };

            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Codec for $name {
            fn size(&self) -> usize {
                std::mem::size_of::<$inner>()
            }

            fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
                self.0.write(writer)
            }

            fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
                <$inner>::read(reader).map(Self)
            }
        }

        impl FromTyped for $name {
            fn from_typed(value: TypedValue, field: &'static str) -> Result<Self, SchemaError> {
                let raw = integer_from_typed(value, field, std::mem::size_of::<$inner>())?;
                Ok(Self(raw as $inner))
            }
        }
    };
}

pod!(
    /// A quantity of a mosaic in atomic units.
    Amount(u64)
);

pod!(
    /// A duration measured in blocks.
    BlockDuration(u64)
);

pod!(
    /// A resolved mosaic id. The top bit is always clear.
    MosaicId(u64)
);

pod!(
    /// A mosaic id or a namespace alias to one.
    UnresolvedMosaicId(u64)
);

pod!(
    /// A namespace id. The top bit is always set.
    NamespaceId(u64)
);

pod!(
    /// Per-owner nonce mixed into a mosaic id.
    MosaicNonce(u32)
);

pod!(
    /// Milliseconds since the network epoch, as carried in a deadline.
    Timestamp(u64)
);

pod!(
    /// A finalization epoch number.
    FinalizationEpoch(u32)
);

pod!(
    /// Key under which a metadata value is stored.
    ScopedMetadataKey(u64)
);

impl From<MosaicId> for UnresolvedMosaicId {
    fn from(id: MosaicId) -> Self {
        Self(id.0)
    }
}

impl From<NamespaceId> for UnresolvedMosaicId {
    fn from(id: NamespaceId) -> Self {
        Self(id.0)
    }
}

impl fmt::LowerHex for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// Catalogue entries for every POD.
pub const POD_SCHEMAS: &[TypeSchema] = &[
    Amount::SCHEMA,
    BlockDuration::SCHEMA,
    MosaicId::SCHEMA,
    UnresolvedMosaicId::SCHEMA,
    NamespaceId::SCHEMA,
    MosaicNonce::SCHEMA,
    Timestamp::SCHEMA,
    FinalizationEpoch::SCHEMA,
    ScopedMetadataKey::SCHEMA,
];

/// Bare integers that appear in schemas without a wrapper.
pub const PRIMITIVE_SCHEMAS: &[TypeSchema] = &[
    TypeSchema { name: "uint8", kind: TypeKind::Pod { size: 1, signed: false } },
    TypeSchema { name: "uint16", kind: TypeKind::Pod { size: 2, signed: false } },
    TypeSchema { name: "uint32", kind: TypeKind::Pod { size: 4, signed: false } },
    TypeSchema { name: "uint64", kind: TypeKind::Pod { size: 8, signed: false } },
    TypeSchema { name: "int8", kind: TypeKind::Pod { size: 1, signed: true } },
    TypeSchema { name: "int16", kind: TypeKind::Pod { size: 2, signed: true } },
];
