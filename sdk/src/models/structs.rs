//! Small structs nested inside transaction bodies.

use super::pods::{Amount, UnresolvedMosaicId};
use super::schema::{struct_from_typed, FieldSchema, Record, Schema, SchemaError, TypeKind, TypeRef, TypeSchema};
use crate::codec::{Codec, CodecError, Hash256, PublicKey, Signature};
use crate::config::{COSIGNATURE_SIZE, DETACHED_COSIGNATURE_SIZE};
use ::bytes::{Buf, BufMut};

// ---------------------------------------------------------------------------
// UnresolvedMosaic
// ---------------------------------------------------------------------------

/// An amount of a (possibly aliased) mosaic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnresolvedMosaic {
    pub mosaic_id: UnresolvedMosaicId,
    pub amount: Amount,
}

impl UnresolvedMosaic {
    pub const FIELDS: &'static [FieldSchema] = &[
        FieldSchema::new("mosaic_id", TypeRef::Named("UnresolvedMosaicId")),
        FieldSchema::new("amount", TypeRef::Named("Amount")),
    ];

    pub fn new(mosaic_id: impl Into<UnresolvedMosaicId>, amount: impl Into<Amount>) -> Self {
        Self {
            mosaic_id: mosaic_id.into(),
            amount: amount.into(),
        }
    }
}

impl Schema for UnresolvedMosaic {
    const NAME: &'static str = "UnresolvedMosaic";

    fn fields() -> &'static [FieldSchema] {
        Self::FIELDS
    }

    fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        Ok(Self {
            mosaic_id: record.take("mosaic_id")?,
            amount: record.take("amount")?,
        })
    }
}

impl Codec for UnresolvedMosaic {
    fn size(&self) -> usize {
        16
    }

    fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
        self.mosaic_id.write(writer)?;
        self.amount.write(writer)
    }

    fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
        Ok(Self {
            mosaic_id: UnresolvedMosaicId::read(reader)?,
            amount: Amount::read(reader)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Cosignatures
// ---------------------------------------------------------------------------

/// A cosignature stored inside an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cosignature {
    pub version: u64,
    pub signer_public_key: PublicKey,
    pub signature: Signature,
}

impl Cosignature {
    pub const FIELDS: &'static [FieldSchema] = &[
        FieldSchema::new("version", TypeRef::Named("uint64")),
        FieldSchema::new("signer_public_key", TypeRef::Named("PublicKey")),
        FieldSchema::new("signature", TypeRef::Named("Signature")),
    ];
}

impl Schema for Cosignature {
    const NAME: &'static str = "Cosignature";

    fn fields() -> &'static [FieldSchema] {
        Self::FIELDS
    }

    fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        Ok(Self {
            version: record.take("version")?,
            signer_public_key: record.take("signer_public_key")?,
            signature: record.take("signature")?,
        })
    }
}

impl Codec for Cosignature {
    fn size(&self) -> usize {
        COSIGNATURE_SIZE
    }

    fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
        self.version.write(writer)?;
        self.signer_public_key.write(writer)?;
        self.signature.write(writer)
    }

    fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
        Ok(Self {
            version: u64::read(reader)?,
            signer_public_key: PublicKey::read(reader)?,
            signature: Signature::read(reader)?,
        })
    }
}

/// A cosignature travelling on its own, tagged with the aggregate it signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetachedCosignature {
    pub version: u64,
    pub signer_public_key: PublicKey,
    pub signature: Signature,
    pub parent_hash: Hash256,
}

impl DetachedCosignature {
    pub const FIELDS: &'static [FieldSchema] = &[
        FieldSchema::new("version", TypeRef::Named("uint64")),
        FieldSchema::new("signer_public_key", TypeRef::Named("PublicKey")),
        FieldSchema::new("signature", TypeRef::Named("Signature")),
        FieldSchema::new("parent_hash", TypeRef::Named("Hash256")),
    ];

    /// Drops the parent hash.
    pub fn cosignature(&self) -> Cosignature {
        Cosignature {
            version: self.version,
            signer_public_key: self.signer_public_key,
            signature: self.signature,
        }
    }
}

impl Schema for DetachedCosignature {
    const NAME: &'static str = "DetachedCosignature";

    fn fields() -> &'static [FieldSchema] {
        Self::FIELDS
    }

    fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        Ok(Self {
            version: record.take("version")?,
            signer_public_key: record.take("signer_public_key")?,
            signature: record.take("signature")?,
            parent_hash: record.take("parent_hash")?,
        })
    }
}

impl Codec for DetachedCosignature {
    fn size(&self) -> usize {
        DETACHED_COSIGNATURE_SIZE
    }

    fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
        self.cosignature().write(writer)?;
        self.parent_hash.write(writer)
    }

    fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
        let cosignature = Cosignature::read(reader)?;
        Ok(Self {
            version: cosignature.version,
            signer_public_key: cosignature.signer_public_key,
            signature: cosignature.signature,
            parent_hash: Hash256::read(reader)?,
        })
    }
}

struct_from_typed!(UnresolvedMosaic, Cosignature, DetachedCosignature);

/// Catalogue entries for the nested structs.
pub const STRUCT_SCHEMAS: &[TypeSchema] = &[
    TypeSchema { name: "UnresolvedMosaic", kind: TypeKind::Struct(UnresolvedMosaic::FIELDS) },
    TypeSchema { name: "Cosignature", kind: TypeKind::Struct(Cosignature::FIELDS) },
    TypeSchema { name: "DetachedCosignature", kind: TypeKind::Struct(DetachedCosignature::FIELDS) },
];
