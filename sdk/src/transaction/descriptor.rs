//! Loosely typed transaction descriptions.
//!
//! A [`Descriptor`] is what a caller hands the factory: a tree of integers,
//! text, bytes and nested maps keyed by field name. It carries no schema of
//! its own; the factory decides what every leaf means from the field it
//! lands in.
//!
//! ```
//! use symbol_sdk::transaction::Descriptor;
//!
//! let descriptor = Descriptor::map()
//!     .with("type", "transfer_transaction_v1")
//!     .with("fee", 1_000_000u64)
//!     .with("message", "hello");
//! assert_eq!(descriptor.get("fee"), Some(&Descriptor::Integer(1_000_000)));
//! ```

use crate::codec::{Hash256, PublicKey, Signature, UnresolvedAddress, VotingPublicKey};
use crate::models::{
    AccountRestrictionFlags, AliasAction, Amount, BlockDuration, Cosignature, EmbeddedTransaction,
    FinalizationEpoch, LinkAction, LockHashAlgorithm, MosaicFlags, MosaicId, MosaicNonce,
    MosaicRestrictionType, MosaicSupplyChangeAction, NamespaceId, NamespaceRegistrationType,
    NetworkType, ScopedMetadataKey, Timestamp, TransactionType, UnresolvedMosaic,
    UnresolvedMosaicId,
};
use crate::network::Address;
use std::collections::BTreeMap;
use std::fmt;

/// One node of a transaction description.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    /// Wide enough for every unsigned and signed field.
    Integer(i128),
    /// Enum names, hex for fixed-size byte fields, UTF-8 for raw byte fields,
    /// or a decimal / `0x` integer.
    Text(String),
    Bytes(Vec<u8>),
    Address(Address),
    /// An inner transaction that was already built.
    Embedded(Box<EmbeddedTransaction>),
    Map(BTreeMap<String, Descriptor>),
    List(Vec<Descriptor>),
}

impl Descriptor {
    /// An empty map, the usual starting point.
    pub fn map() -> Self {
        Descriptor::Map(BTreeMap::new())
    }

    /// Returns this map with `key` set. Non-map descriptors are returned
    /// unchanged.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Descriptor>) -> Self {
        if let Descriptor::Map(entries) = &mut self {
            entries.insert(key.into(), value.into());
        }
        self
    }

    /// A list of anything convertible.
    pub fn list<T: Into<Descriptor>>(items: impl IntoIterator<Item = T>) -> Self {
        Descriptor::List(items.into_iter().map(Into::into).collect())
    }

    /// Entry of a map descriptor.
    pub fn get(&self, key: &str) -> Option<&Descriptor> {
        match self {
            Descriptor::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Descriptor>> {
        match self {
            Descriptor::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Descriptor::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Short shape name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Descriptor::Integer(_) => "integer",
            Descriptor::Text(_) => "text",
            Descriptor::Bytes(_) => "bytes",
            Descriptor::Address(_) => "address",
            Descriptor::Embedded(_) => "embedded transaction",
            Descriptor::Map(_) => "map",
            Descriptor::List(_) => "list",
        }
    }
}

impl Default for Descriptor {
    fn default() -> Self {
        Descriptor::map()
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Integer(value) => write!(f, "{value}"),
            Descriptor::Text(text) => f.write_str(text),
            Descriptor::Bytes(bytes) => f.write_str(&hex::encode_upper(bytes)),
            Descriptor::Address(address) => write!(f, "{address}"),
            Descriptor::Embedded(transaction) => {
                write!(f, "<embedded {}>", transaction.transaction_type())
            }
            Descriptor::Map(entries) => write!(f, "<map of {}>", entries.len()),
            Descriptor::List(items) => write!(f, "<list of {}>", items.len()),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

macro_rules! integer_descriptor {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Descriptor {
                fn from(value: $ty) -> Self {
                    Descriptor::Integer(i128::from(value))
                }
            }
        )*
    };
}

integer_descriptor!(u8, u16, u32, u64, i8, i16, i32, i64);

impl From<bool> for Descriptor {
    fn from(value: bool) -> Self {
        Descriptor::Integer(i128::from(u8::from(value)))
    }
}

impl From<&str> for Descriptor {
    fn from(value: &str) -> Self {
        Descriptor::Text(value.to_string())
    }
}

impl From<String> for Descriptor {
    fn from(value: String) -> Self {
        Descriptor::Text(value)
    }
}

impl From<Vec<u8>> for Descriptor {
    fn from(value: Vec<u8>) -> Self {
        Descriptor::Bytes(value)
    }
}

impl From<&[u8]> for Descriptor {
    fn from(value: &[u8]) -> Self {
        Descriptor::Bytes(value.to_vec())
    }
}

impl From<Address> for Descriptor {
    fn from(value: Address) -> Self {
        Descriptor::Address(value)
    }
}

impl From<EmbeddedTransaction> for Descriptor {
    fn from(value: EmbeddedTransaction) -> Self {
        Descriptor::Embedded(Box::new(value))
    }
}

impl From<Vec<Descriptor>> for Descriptor {
    fn from(items: Vec<Descriptor>) -> Self {
        Descriptor::List(items)
    }
}

macro_rules! bytes_descriptor {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Descriptor {
                fn from(value: $ty) -> Self {
                    Descriptor::Bytes(value.as_bytes().to_vec())
                }
            }
        )*
    };
}

bytes_descriptor!(Hash256, PublicKey, VotingPublicKey, Signature, UnresolvedAddress);

macro_rules! value_descriptor {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Descriptor {
                fn from(value: $ty) -> Self {
                    Descriptor::Integer(i128::from(value.value()))
                }
            }
        )*
    };
}

value_descriptor!(
    Amount,
    BlockDuration,
    MosaicId,
    UnresolvedMosaicId,
    NamespaceId,
    MosaicNonce,
    Timestamp,
    FinalizationEpoch,
    ScopedMetadataKey,
    NetworkType,
    TransactionType,
    LinkAction,
    AliasAction,
    MosaicSupplyChangeAction,
    NamespaceRegistrationType,
    LockHashAlgorithm,
    MosaicRestrictionType,
    MosaicFlags,
    AccountRestrictionFlags
);

impl From<UnresolvedMosaic> for Descriptor {
    fn from(value: UnresolvedMosaic) -> Self {
        Descriptor::map()
            .with("mosaic_id", value.mosaic_id)
            .with("amount", value.amount)
    }
}

impl From<Cosignature> for Descriptor {
    fn from(value: Cosignature) -> Self {
        Descriptor::map()
            .with("version", value.version)
            .with("signer_public_key", value.signer_public_key)
            .with("signature", value.signature)
    }
}

/// JSON numbers become integers when they are integral, and their decimal
/// text otherwise (which integer rules then reject with the value in the
/// message). `null` is an empty map.
impl From<serde_json::Value> for Descriptor {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Descriptor::map(),
            Value::Bool(flag) => Descriptor::from(flag),
            Value::Number(number) => number
                .as_u64()
                .map(|n| Descriptor::Integer(i128::from(n)))
                .or_else(|| number.as_i64().map(|n| Descriptor::Integer(i128::from(n))))
                .unwrap_or_else(|| Descriptor::Text(number.to_string())),
            Value::String(text) => Descriptor::Text(text),
            Value::Array(items) => Descriptor::List(items.into_iter().map(Descriptor::from).collect()),
            Value::Object(entries) => Descriptor::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Descriptor::from(value)))
                    .collect(),
            ),
        }
    }
}
