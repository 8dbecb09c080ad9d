//! Rule-based conversion of descriptors into typed values.
//!
//! Every field in a model schema names a type. [`RuleBasedTransactionFactory`]
//! keeps one [`Rule`] per type name and walks a descriptor field by field,
//! converting each raw value with the rule for its declared type:
//!
//! ```text
//! "Amount"                    Rule::Pod        range-checked integer
//! "Hash256"                   Rule::ByteArray  hex text or raw bytes
//! "LinkAction"                Rule::Enum       name or code
//! "MosaicFlags"               Rule::Flags      "supply_mutable transferable"
//! "struct:UnresolvedMosaic"   Rule::Struct     recurse into fields
//! "array[UnresolvedAddress]"  Rule::Array      convert every element
//! "bytes"                     Rule::Bytes      UTF-8 text or raw bytes
//! ```
//!
//! The table is filled once, by [`autodetect`](RuleBasedTransactionFactory::autodetect)
//! plus any explicit registrations, and is read-only afterwards. A factory
//! is `Send + Sync` and can be shared freely.

use super::descriptor::Descriptor;
use crate::codec::CodecError;
use crate::identity::IdError;
use crate::models::{catalogue, EnumSchema, FieldSchema, Record, SchemaError, TypeKind, TypeRef, TypedValue};
use crate::network::AddressError;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while turning a descriptor into a transaction.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// The descriptor has no `type` entry.
    #[error("descriptor has no transaction type")]
    MissingTransactionType,

    /// The `type` entry names no known transaction kind.
    #[error("unknown transaction type {0}")]
    UnknownTransactionType(String),

    /// No rule is registered for a type name.
    #[error("unresolved type {0}")]
    UnresolvedType(String),

    /// An enum name, flag name or integer literal is not valid for its type.
    #[error("unknown value {value} for type {type_name}")]
    UnknownValue { value: String, type_name: String },

    /// An integer does not fit the type's width.
    #[error("value {value} is out of range for type {type_name}")]
    OutOfRange { value: i128, type_name: String },

    /// A descriptor has the wrong shape for the type.
    #[error("type {type_name} cannot be built from {actual}")]
    InvalidShape { type_name: String, actual: &'static str },

    /// A fixed-size byte value has the wrong length.
    #[error("type {type_name} expects {expected} bytes, got {actual}")]
    SizeMismatch { type_name: String, expected: usize, actual: usize },

    /// Hex text could not be decoded.
    #[error("invalid hex for type {type_name}: {reason}")]
    InvalidHex { type_name: String, reason: String },

    /// A descriptor key is not a field of the type being built.
    #[error("unknown field {field} for {owner}")]
    UnknownField { field: String, owner: String },

    /// Aggregates cannot be embedded.
    #[error("{0} cannot be embedded in an aggregate")]
    NotEmbeddable(&'static str),

    /// The network identifier is neither mainnet nor testnet.
    #[error("unsupported network identifier {0}")]
    UnsupportedNetwork(u8),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Id(#[from] IdError),

    #[error("failed to encode payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// A caller-supplied conversion.
pub type RuleFn = Arc<dyn Fn(&Descriptor) -> Result<TypedValue, FactoryError> + Send + Sync>;

/// Rewrites a raw value before its rule runs. `None` keeps the value as is.
pub type TypeConverter = Arc<dyn Fn(&Descriptor) -> Option<Descriptor> + Send + Sync>;

/// How one type name is converted.
#[derive(Clone)]
pub enum Rule {
    /// Integer of `size` bytes.
    Pod { size: usize, signed: bool },
    /// Exactly `size` bytes.
    ByteArray { size: usize },
    /// One member of a closed set.
    Enum(&'static EnumSchema),
    /// Any combination of flags.
    Flags(&'static EnumSchema),
    /// Nested fields.
    Struct(&'static [FieldSchema]),
    /// Every element converted by the rule named `element`.
    Array { element: String },
    /// Raw variable-length bytes.
    Bytes,
    /// Caller-supplied.
    Custom(RuleFn),
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Pod { size, signed } => write!(f, "Pod({size}, signed={signed})"),
            Rule::ByteArray { size } => write!(f, "ByteArray({size})"),
            Rule::Enum(schema) => write!(f, "Enum({})", schema.name),
            Rule::Flags(schema) => write!(f, "Flags({})", schema.name),
            Rule::Struct(fields) => write!(f, "Struct({} fields)", fields.len()),
            Rule::Array { element } => write!(f, "Array({element})"),
            Rule::Bytes => f.write_str("Bytes"),
            Rule::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Name under which raw byte fields are converted.
pub const BYTES_RULE: &str = "bytes";

/// Converts descriptors into [`Record`]s, one type name at a time.
#[derive(Clone, Default)]
pub struct RuleBasedTransactionFactory {
    rules: HashMap<String, Rule>,
    overrides: HashMap<String, RuleFn>,
    type_converter: Option<TypeConverter>,
}

impl fmt::Debug for RuleBasedTransactionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleBasedTransactionFactory")
            .field("rules", &self.rules.len())
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .field("type_converter", &self.type_converter.is_some())
            .finish()
    }
}

impl RuleBasedTransactionFactory {
    /// An empty rule table. Call [`autodetect`](Self::autodetect) to fill it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `converter` to every raw value before its rule.
    pub fn with_type_converter(mut self, converter: TypeConverter) -> Self {
        self.type_converter = Some(converter);
        self
    }

    /// Replaces whatever rule `type_name` resolves to.
    pub fn with_override(mut self, type_name: impl Into<String>, rule: RuleFn) -> Self {
        self.overrides.insert(type_name.into(), rule);
        self
    }

    /// Registers a rule for every catalogued type, plus the raw bytes rule.
    pub fn autodetect(&mut self) {
        for schema in catalogue() {
            let (name, rule) = match schema.kind {
                TypeKind::Pod { size, signed } => (schema.name.to_string(), Rule::Pod { size, signed }),
                TypeKind::ByteArray { size } => (schema.name.to_string(), Rule::ByteArray { size }),
                TypeKind::Enum(enum_schema) if enum_schema.is_flags => {
                    (schema.name.to_string(), Rule::Flags(enum_schema))
                }
                TypeKind::Enum(enum_schema) => (schema.name.to_string(), Rule::Enum(enum_schema)),
                TypeKind::Struct(fields) => (TypeRef::Struct(schema.name).rule_name(), Rule::Struct(fields)),
            };
            self.rules.insert(name, rule);
        }
        self.rules.insert(BYTES_RULE.to_string(), Rule::Bytes);
        debug!(rules = self.rules.len(), "autodetected conversion rules");
    }

    /// Substitutes a custom conversion for `type_name`.
    pub fn add_pod_parser(&mut self, type_name: impl Into<String>, parser: RuleFn) {
        self.rules.insert(type_name.into(), Rule::Custom(parser));
    }

    pub fn add_flags_parser(&mut self, schema: &'static EnumSchema) {
        self.rules.insert(schema.name.to_string(), Rule::Flags(schema));
    }

    pub fn add_enum_parser(&mut self, schema: &'static EnumSchema) {
        self.rules.insert(schema.name.to_string(), Rule::Enum(schema));
    }

    pub fn add_struct_parser(&mut self, name: &'static str, fields: &'static [FieldSchema]) {
        self.rules.insert(TypeRef::Struct(name).rule_name(), Rule::Struct(fields));
    }

    /// Registers `array[element]`.
    pub fn add_array_parser(&mut self, element: &str) {
        let name = format!("array[{element}]");
        self.rules.entry(name).or_insert_with(|| Rule::Array { element: element.to_string() });
    }

    /// `true` if `type_name` has a rule or an override.
    pub fn has_rule(&self, type_name: &str) -> bool {
        self.overrides.contains_key(type_name) || self.rules.contains_key(type_name)
    }

    /// Checks that every type reachable from `fields` resolves.
    pub fn validate<'a>(&self, fields: impl IntoIterator<Item = &'a FieldSchema>) -> Result<(), FactoryError> {
        for field in fields {
            self.ensure_resolvable(&field.ty.rule_name())?;
        }
        Ok(())
    }

    fn ensure_resolvable(&self, type_name: &str) -> Result<(), FactoryError> {
        if self.overrides.contains_key(type_name) {
            return Ok(());
        }
        match self.rules.get(type_name) {
            None => Err(FactoryError::UnresolvedType(type_name.to_string())),
            Some(Rule::Struct(fields)) => self.validate(fields.iter()),
            Some(Rule::Array { element }) => self.ensure_resolvable(element),
            Some(_) => Ok(()),
        }
    }

    /// Converts the entries of `map` against `fields`.
    ///
    /// Keys that are not fields are rejected. Absent fields stay absent and
    /// take their zero value in the model. With `autosort`, arrays with a
    /// sort key are ordered ascending by it; the sort is stable.
    pub fn build_struct(
        &self,
        owner: &str,
        fields: &[FieldSchema],
        map: &BTreeMap<String, Descriptor>,
        autosort: bool,
    ) -> Result<Record, FactoryError> {
        if let Some(key) = map.keys().find(|key| !fields.iter().any(|field| field.name == key.as_str())) {
            return Err(FactoryError::UnknownField {
                field: key.clone(),
                owner: owner.to_string(),
            });
        }

        let mut record = Record::new();
        for field in fields {
            let Some(raw) = map.get(field.name) else {
                continue;
            };

            let mut value = self.convert(&field.ty.rule_name(), raw, autosort)?;
            if let (true, TypeRef::Array { sort_key: Some(sort_key), .. }, TypedValue::Array(items)) =
                (autosort, field.ty, &mut value)
            {
                items.sort_by_key(|item| sort_value(item, sort_key));
                trace!(field = field.name, sort_key, "sorted array");
            }
            record.insert(field.name, value);
        }
        Ok(record)
    }

    /// Converts one raw value with the rule for `type_name`.
    pub fn convert(&self, type_name: &str, raw: &Descriptor, autosort: bool) -> Result<TypedValue, FactoryError> {
        let converted = self.type_converter.as_ref().and_then(|converter| converter(raw));
        let raw = converted.as_ref().unwrap_or(raw);

        if let Some(rule) = self.overrides.get(type_name) {
            return rule(raw);
        }

        let rule = self
            .rules
            .get(type_name)
            .ok_or_else(|| FactoryError::UnresolvedType(type_name.to_string()))?;
        match rule {
            Rule::Pod { size, signed } => convert_integer(type_name, raw, *size, *signed),
            Rule::ByteArray { size } => convert_byte_array(type_name, raw, *size),
            Rule::Enum(schema) => convert_enum(schema, raw),
            Rule::Flags(schema) => convert_flags(schema, raw),
            Rule::Struct(fields) => match raw {
                Descriptor::Map(map) => {
                    Ok(TypedValue::Struct(self.build_struct(type_name, fields, map, autosort)?))
                }
                other => Err(invalid_shape(type_name, other)),
            },
            Rule::Array { element } => match raw {
                Descriptor::List(items) => items
                    .iter()
                    .map(|item| self.convert(element, item, autosort))
                    .collect::<Result<Vec<_>, _>>()
                    .map(TypedValue::Array),
                other => Err(invalid_shape(type_name, other)),
            },
            Rule::Bytes => match raw {
                Descriptor::Bytes(bytes) => Ok(TypedValue::Bytes(bytes.clone())),
                Descriptor::Text(text) => Ok(TypedValue::Bytes(text.as_bytes().to_vec())),
                other => Err(invalid_shape(type_name, other)),
            },
            Rule::Custom(parser) => parser(raw),
        }
    }
}

// ---------------------------------------------------------------------------
// Leaf conversions
// ---------------------------------------------------------------------------

fn invalid_shape(type_name: &str, raw: &Descriptor) -> FactoryError {
    FactoryError::InvalidShape {
        type_name: type_name.to_string(),
        actual: raw.kind(),
    }
}

fn unknown_value(type_name: &str, value: impl fmt::Display) -> FactoryError {
    FactoryError::UnknownValue {
        value: value.to_string(),
        type_name: type_name.to_string(),
    }
}

fn sort_value(item: &TypedValue, sort_key: &str) -> u64 {
    match item {
        TypedValue::Struct(record) => match record.get(sort_key) {
            Some(TypedValue::Integer(value)) => *value,
            _ => 0,
        },
        TypedValue::Integer(value) => *value,
        _ => 0,
    }
}

/// Integer literal: decimal, optionally signed, or `0x` hex.
pub(crate) fn parse_integer(type_name: &str, raw: &Descriptor) -> Result<i128, FactoryError> {
    match raw {
        Descriptor::Integer(value) => Ok(*value),
        Descriptor::Text(text) => {
            let trimmed = text.trim();
            let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
                Some(digits) => u64::from_str_radix(digits, 16).map(i128::from).ok(),
                None => trimmed.parse::<i128>().ok(),
            };
            parsed.ok_or_else(|| unknown_value(type_name, text))
        }
        other => Err(invalid_shape(type_name, other)),
    }
}

fn convert_integer(type_name: &str, raw: &Descriptor, size: usize, signed: bool) -> Result<TypedValue, FactoryError> {
    let value = parse_integer(type_name, raw)?;
    let bits = (size * 8) as u32;
    let (min, max) = if signed {
        (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    } else {
        (0, (1i128 << bits) - 1)
    };
    if value < min || value > max {
        return Err(FactoryError::OutOfRange {
            value,
            type_name: type_name.to_string(),
        });
    }

    let mask = if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 };
    Ok(TypedValue::Integer((value as u64) & mask))
}

fn convert_byte_array(type_name: &str, raw: &Descriptor, size: usize) -> Result<TypedValue, FactoryError> {
    let bytes = match raw {
        Descriptor::Bytes(bytes) => bytes.clone(),
        Descriptor::Address(address) => address.as_bytes().to_vec(),
        Descriptor::Text(text) => hex::decode(text).map_err(|e| FactoryError::InvalidHex {
            type_name: type_name.to_string(),
            reason: e.to_string(),
        })?,
        other => return Err(invalid_shape(type_name, other)),
    };
    if bytes.len() != size {
        return Err(FactoryError::SizeMismatch {
            type_name: type_name.to_string(),
            expected: size,
            actual: bytes.len(),
        });
    }
    Ok(TypedValue::Bytes(bytes))
}

fn convert_enum(schema: &EnumSchema, raw: &Descriptor) -> Result<TypedValue, FactoryError> {
    let value = match raw {
        Descriptor::Text(name) => schema.value_of(name).ok_or_else(|| unknown_value(schema.name, name))?,
        other => {
            let value = parse_integer(schema.name, other)?;
            match u64::try_from(value) {
                Ok(code) if schema.contains(code) => code,
                _ => return Err(unknown_value(schema.name, value)),
            }
        }
    };
    Ok(TypedValue::Integer(value))
}

/// Space-separated flag names OR-ed together, or an integer whose bits are
/// all declared flags.
fn convert_flags(schema: &EnumSchema, raw: &Descriptor) -> Result<TypedValue, FactoryError> {
    let all_bits = schema.values.iter().fold(0u64, |bits, (_, value)| bits | value);
    match raw {
        Descriptor::Text(names) => names
            .split_whitespace()
            .try_fold(0u64, |bits, name| {
                schema
                    .value_of(name)
                    .map(|value| bits | value)
                    .ok_or_else(|| unknown_value(schema.name, name))
            })
            .map(TypedValue::Integer),
        other => {
            let value = parse_integer(schema.name, other)?;
            match u64::try_from(value) {
                Ok(bits) if bits & !all_bits == 0 => Ok(TypedValue::Integer(bits)),
                _ => Err(unknown_value(schema.name, value)),
            }
        }
    }
}
