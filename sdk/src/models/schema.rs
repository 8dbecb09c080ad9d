//! # Schema Reflection
//!
//! The factory never looks at a model's Rust fields directly. Instead every
//! model publishes a static description of itself (ordered field names, each
//! tagged with the name of the type it holds) and a constructor that accepts
//! a [`Record`] of already-converted values keyed by those same names.
//!
//! ```text
//! Descriptor ──(rules, by TypeRef)──► TypedValue tree ──(from_record)──► model
//! ```
//!
//! [`TypedValue`] is deliberately tiny: integers, raw bytes, nested records,
//! arrays and pre-built embedded transactions. Anything richer lives in the
//! models themselves.

use super::transactions::EmbeddedTransaction;
use crate::codec::{Hash256, PublicKey, Signature, UnresolvedAddress, VotingPublicKey};
use crate::network::Address;
use std::collections::BTreeMap;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while assembling a model from converted values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A value has the wrong shape for its field.
    #[error("field {field} expects {expected}")]
    TypeMismatch {
        /// Field name.
        field: &'static str,
        /// Shape the field wanted.
        expected: &'static str,
    },

    /// An integer does not fit in the field's wire width.
    #[error("field {field} value {value} does not fit in {width} bytes")]
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: u64,
        /// Wire width in bytes.
        width: usize,
    },

    /// An enum field holds a code outside its closed set.
    #[error("invalid value {value} for enum {name}")]
    InvalidEnumValue {
        /// Enum type name.
        name: &'static str,
        /// Offending code.
        value: u64,
    },

    /// A fixed-size byte field has the wrong length.
    #[error("field {field} expects {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Field name.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Aggregates cannot nest.
    #[error("{0} cannot be embedded in an aggregate")]
    NotEmbeddable(&'static str),
}

// ---------------------------------------------------------------------------
// Static schema description
// ---------------------------------------------------------------------------

/// The type a field holds, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRef {
    /// A POD, enum, flags or fixed-size byte type, resolved by name.
    Named(&'static str),
    /// A nested struct.
    Struct(&'static str),
    /// A list of `element` (itself a rule name). `sort_key` names the
    /// element field arrays are ordered by, if any.
    Array {
        element: &'static str,
        sort_key: Option<&'static str>,
    },
    /// Raw variable-length bytes.
    Bytes,
}

impl TypeRef {
    /// Name of the conversion rule this reference resolves through.
    pub fn rule_name(&self) -> String {
        match self {
            TypeRef::Named(name) => (*name).to_string(),
            TypeRef::Struct(name) => format!("struct:{name}"),
            TypeRef::Array { element, .. } => format!("array[{element}]"),
            TypeRef::Bytes => "bytes".to_string(),
        }
    }
}

/// One field of a struct schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub ty: TypeRef,
}

impl FieldSchema {
    pub const fn new(name: &'static str, ty: TypeRef) -> Self {
        Self { name, ty }
    }
}

/// Closed set of `(name, code)` pairs behind an enum or flags type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumSchema {
    pub name: &'static str,
    pub values: &'static [(&'static str, u64)],
    /// Width of the code on the wire.
    pub size: usize,
    /// `true` for bit flags, where codes combine with OR.
    pub is_flags: bool,
}

impl EnumSchema {
    /// Code for `name`, if it is a member.
    pub fn value_of(&self, name: &str) -> Option<u64> {
        self.values
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, value)| *value)
    }

    /// `true` if `value` is one of the declared codes.
    pub fn contains(&self, value: u64) -> bool {
        self.values.iter().any(|(_, code)| *code == value)
    }
}

/// What kind of type a catalogue entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A plain integer wrapper.
    Pod { size: usize, signed: bool },
    /// A fixed-size byte value.
    ByteArray { size: usize },
    /// An enum or flags type.
    Enum(&'static EnumSchema),
    /// A struct with named fields.
    Struct(&'static [FieldSchema]),
}

/// One named entry in the type catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSchema {
    pub name: &'static str,
    pub kind: TypeKind,
}

// ---------------------------------------------------------------------------
// Converted values
// ---------------------------------------------------------------------------

/// A value after its conversion rule ran.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Any integer field; signed fields are stored two's complement.
    Integer(u64),
    /// Fixed-size or variable byte data.
    Bytes(Vec<u8>),
    /// A nested struct.
    Struct(Record),
    /// A list of converted elements.
    Array(Vec<TypedValue>),
    /// A complete inner transaction.
    Embedded(Box<EmbeddedTransaction>),
}

impl TypedValue {
    /// Short shape name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            TypedValue::Integer(_) => "integer",
            TypedValue::Bytes(_) => "bytes",
            TypedValue::Struct(_) => "struct",
            TypedValue::Array(_) => "array",
            TypedValue::Embedded(_) => "embedded transaction",
        }
    }
}

/// Converted field values keyed by field name. Missing fields read back as
/// their zero value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: BTreeMap<&'static str, TypedValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, value: TypedValue) {
        self.fields.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Removes and converts a scalar field, defaulting when absent.
    pub fn take<T: FromTyped + Default>(&mut self, name: &'static str) -> Result<T, SchemaError> {
        match self.fields.remove(name) {
            Some(value) => T::from_typed(value, name),
            None => Ok(T::default()),
        }
    }

    /// Removes and converts an array field, empty when absent.
    pub fn take_array<T: FromTyped>(&mut self, name: &'static str) -> Result<Vec<T>, SchemaError> {
        match self.fields.remove(name) {
            Some(TypedValue::Array(items)) => {
                items.into_iter().map(|item| T::from_typed(item, name)).collect()
            }
            Some(_) => Err(SchemaError::TypeMismatch { field: name, expected: "array" }),
            None => Ok(Vec::new()),
        }
    }

    /// Removes a raw byte field, empty when absent.
    pub fn take_bytes(&mut self, name: &'static str) -> Result<Vec<u8>, SchemaError> {
        match self.fields.remove(name) {
            Some(TypedValue::Bytes(bytes)) => Ok(bytes),
            Some(_) => Err(SchemaError::TypeMismatch { field: name, expected: "bytes" }),
            None => Ok(Vec::new()),
        }
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Conversion out of a [`TypedValue`].
pub trait FromTyped: Sized {
    /// `field` is only used to label errors.
    fn from_typed(value: TypedValue, field: &'static str) -> Result<Self, SchemaError>;
}

/// A struct model with a static field list.
pub trait Schema: Sized {
    /// Catalogue name.
    const NAME: &'static str;

    /// Ordered fields, as laid out on the wire.
    fn fields() -> &'static [FieldSchema];

    /// Build from converted values. Absent fields take their zero value.
    fn from_record(record: Record) -> Result<Self, SchemaError>;
}

/// Integer out of a typed value, checked against a byte width.
pub(crate) fn integer_from_typed(
    value: TypedValue,
    field: &'static str,
    width: usize,
) -> Result<u64, SchemaError> {
    match value {
        TypedValue::Integer(raw) => {
            if width < 8 && raw >> (width * 8) != 0 {
                return Err(SchemaError::OutOfRange { field, value: raw, width });
            }
            Ok(raw)
        }
        _ => Err(SchemaError::TypeMismatch { field, expected: "integer" }),
    }
}

macro_rules! unsigned_from_typed {
    ($($ty:ty),*) => {
        $(
            impl FromTyped for $ty {
                fn from_typed(value: TypedValue, field: &'static str) -> Result<Self, SchemaError> {
                    let raw = integer_from_typed(value, field, std::mem::size_of::<$ty>())?;
                    Ok(raw as $ty)
                }
            }
        )*
    };
}

unsigned_from_typed!(u8, u16, u32, u64);

// Signed fields arrive as two's complement truncated to their width.
macro_rules! signed_from_typed {
    ($($ty:ty => $unsigned:ty),*) => {
        $(
            impl FromTyped for $ty {
                fn from_typed(value: TypedValue, field: &'static str) -> Result<Self, SchemaError> {
                    let raw = integer_from_typed(value, field, std::mem::size_of::<$ty>())?;
                    Ok(raw as $unsigned as $ty)
                }
            }
        )*
    };
}

signed_from_typed!(i8 => u8, i16 => u16);

/// Implements [`FromTyped`] for a [`Schema`] struct.
macro_rules! struct_from_typed {
    ($($ty:ty),*) => {
        $(
            impl $crate::models::schema::FromTyped for $ty {
                fn from_typed(
                    value: $crate::models::schema::TypedValue,
                    field: &'static str,
                ) -> Result<Self, $crate::models::schema::SchemaError> {
                    match value {
                        $crate::models::schema::TypedValue::Struct(record) => {
                            <$ty as $crate::models::schema::Schema>::from_record(record)
                        }
                        _ => Err($crate::models::schema::SchemaError::TypeMismatch {
                            field,
                            expected: "struct",
                        }),
                    }
                }
            }
        )*
    };
}

pub(crate) use struct_from_typed;

/// Implements [`FromTyped`] for a fixed-size byte type from the codec layer.
macro_rules! byte_array_from_typed {
    ($($ty:ty),*) => {
        $(
            impl FromTyped for $ty {
                fn from_typed(value: TypedValue, field: &'static str) -> Result<Self, SchemaError> {
                    match value {
                        TypedValue::Bytes(bytes) => <$ty>::from_slice(&bytes).map_err(|_| {
                            SchemaError::SizeMismatch {
                                field,
                                expected: <$ty>::SIZE,
                                actual: bytes.len(),
                            }
                        }),
                        _ => Err(SchemaError::TypeMismatch { field, expected: "bytes" }),
                    }
                }
            }
        )*
    };
}

byte_array_from_typed!(Hash256, PublicKey, VotingPublicKey, Signature, UnresolvedAddress, Address);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_names() {
        assert_eq!(TypeRef::Named("Amount").rule_name(), "Amount");
        assert_eq!(TypeRef::Struct("UnresolvedMosaic").rule_name(), "struct:UnresolvedMosaic");
        assert_eq!(
            TypeRef::Array { element: "struct:UnresolvedMosaic", sort_key: Some("mosaic_id") }
                .rule_name(),
            "array[struct:UnresolvedMosaic]"
        );
    }

    #[test]
    fn record_defaults_missing_fields() {
        let mut record = Record::new();
        assert_eq!(record.take::<u64>("fee").unwrap(), 0);
        assert!(record.take_array::<u8>("items").unwrap().is_empty());
        assert!(record.take_bytes("message").unwrap().is_empty());
        assert_eq!(record.take::<Hash256>("hash").unwrap(), Hash256::zero());
    }

    #[test]
    fn integers_checked_against_width() {
        assert_eq!(u8::from_typed(TypedValue::Integer(255), "x").unwrap(), 255);
        assert_eq!(
            u8::from_typed(TypedValue::Integer(256), "x").unwrap_err(),
            SchemaError::OutOfRange { field: "x", value: 256, width: 1 }
        );
        assert_eq!(i8::from_typed(TypedValue::Integer(0xFF), "x").unwrap(), -1);
        assert_eq!(i16::from_typed(TypedValue::Integer(0xFFFE), "x").unwrap(), -2);
    }

    #[test]
    fn byte_arrays_checked_against_size() {
        let err = PublicKey::from_typed(TypedValue::Bytes(vec![0; 31]), "signer").unwrap_err();
        assert_eq!(err, SchemaError::SizeMismatch { field: "signer", expected: 32, actual: 31 });
        assert!(matches!(
            Hash256::from_typed(TypedValue::Integer(1), "hash"),
            Err(SchemaError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn enum_schema_lookup() {
        const LINK: EnumSchema = EnumSchema {
            name: "LinkAction",
            values: &[("unlink", 0), ("link", 1)],
            size: 1,
            is_flags: false,
        };
        assert_eq!(LINK.value_of("link"), Some(1));
        assert_eq!(LINK.value_of("relink"), None);
        assert!(LINK.contains(0));
        assert!(!LINK.contains(2));
    }
}
