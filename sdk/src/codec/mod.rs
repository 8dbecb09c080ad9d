//! # Binary Primitive Layer
//!
//! Everything that ends up on the wire goes through the [`Codec`] trait:
//! a value knows its exact serialized size, writes itself into any
//! [`BufMut`], and reads itself back out of any [`Buf`]. All integers are
//! little-endian. There is no framing, no length prefix we didn't put there
//! ourselves, and no self-description. The bytes are the contract.
//!
//! ```text
//! byte_array.rs  fixed-size byte values (hashes, keys, signatures, addresses)
//! array.rs       alignment, sorted arrays, variable-size element lists
//! ```
//!
//! ## Invariants
//!
//! - `value.size() == value.to_bytes()?.len()` for every value.
//! - `T::from_bytes(&value.to_bytes()?)? == value` for well-formed input.
//! - Ordering violations are reported when *writing*, not when building a
//!   value, so a deliberately unsorted value can still be inspected.

pub mod array;
pub mod byte_array;

pub use byte_array::{Hash256, PublicKey, Signature, UnresolvedAddress, VotingPublicKey};

use ::bytes::{Buf, BufMut};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while encoding or decoding binary values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The reader ran out of bytes.
    #[error("unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes the decoder asked for.
        needed: usize,
        /// Bytes actually left.
        remaining: usize,
    },

    /// An enum field carried a code outside its closed set.
    #[error("invalid value {value} for enum {name}")]
    InvalidEnumValue {
        /// Enum type name.
        name: &'static str,
        /// Offending code.
        value: u64,
    },

    /// An array that must be strictly ascending by its sort key is not.
    #[error("array {name} is not sorted in strictly ascending order")]
    UnsortedArray {
        /// Array field name.
        name: &'static str,
    },

    /// A byte value or a declared size has the wrong length.
    #[error("invalid {what} size: expected {expected}, got {actual}")]
    SizeMismatch {
        /// What was being sized.
        what: &'static str,
        /// Expected byte count.
        expected: usize,
        /// Actual byte count.
        actual: usize,
    },

    /// A reserved field or padding byte was non-zero.
    #[error("reserved field {0} must be zero")]
    NonZeroReserved(&'static str),

    /// No transaction model exists for this (type, version) pair.
    #[error("unknown transaction type 0x{type_code:04X} version {version}")]
    UnknownTransactionType {
        /// Raw transaction type code.
        type_code: u16,
        /// Raw version byte.
        version: u8,
    },

    /// Decoding consumed less than the full input.
    #[error("{0} trailing bytes after decoding")]
    TrailingBytes(usize),

    /// A hex string could not be parsed.
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// A count does not fit in its wire width.
    #[error("{name} count {count} exceeds the maximum of {max}")]
    CountOverflow {
        /// Field name.
        name: &'static str,
        /// Requested count.
        count: usize,
        /// Wire maximum.
        max: usize,
    },
}

// ---------------------------------------------------------------------------
// Codec trait
// ---------------------------------------------------------------------------

/// A value with a fixed, deterministic binary encoding.
pub trait Codec: Sized {
    /// Exact number of bytes [`write`](Self::write) produces.
    fn size(&self) -> usize;

    /// Serialize into `writer`.
    fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError>;

    /// Deserialize from `reader`, consuming exactly the bytes of one value.
    fn read(reader: &mut impl Buf) -> Result<Self, CodecError>;

    /// Serialize into a freshly allocated buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut buffer = Vec::with_capacity(self.size());
        self.write(&mut buffer)?;
        Ok(buffer)
    }

    /// Deserialize from a complete buffer. Trailing bytes are an error.
    fn from_bytes(mut bytes: &[u8]) -> Result<Self, CodecError> {
        let value = Self::read(&mut bytes)?;
        if !bytes.is_empty() {
            return Err(CodecError::TrailingBytes(bytes.len()));
        }
        Ok(value)
    }
}

/// Fails unless `reader` has at least `needed` bytes left.
pub(crate) fn ensure_remaining(reader: &impl Buf, needed: usize) -> Result<(), CodecError> {
    if reader.remaining() < needed {
        return Err(CodecError::UnexpectedEof {
            needed,
            remaining: reader.remaining(),
        });
    }
    Ok(())
}

/// Writes `width` zero bytes.
pub(crate) fn write_reserved(writer: &mut impl BufMut, width: usize) {
    writer.put_bytes(0, width);
}

/// Consumes `width` bytes that must all be zero.
pub(crate) fn read_reserved(
    reader: &mut impl Buf,
    width: usize,
    name: &'static str,
) -> Result<(), CodecError> {
    ensure_remaining(reader, width)?;
    for _ in 0..width {
        if reader.get_u8() != 0 {
            return Err(CodecError::NonZeroReserved(name));
        }
    }
    Ok(())
}

/// Reads exactly `len` raw bytes.
pub(crate) fn read_raw(reader: &mut impl Buf, len: usize) -> Result<Vec<u8>, CodecError> {
    ensure_remaining(reader, len)?;
    let mut bytes = vec![0u8; len];
    reader.copy_to_slice(&mut bytes);
    Ok(bytes)
}

/// Narrows a collection length to its wire width.
pub(crate) fn count_as<T: TryFrom<usize>>(name: &'static str, count: usize) -> Result<T, CodecError> {
    let max = match std::mem::size_of::<T>() {
        1 => u8::MAX as usize,
        2 => u16::MAX as usize,
        _ => u32::MAX as usize,
    };
    T::try_from(count).map_err(|_| CodecError::CountOverflow { name, count, max })
}

// ---- Integer primitives ----

macro_rules! integer_codec {
    ($($ty:ty => $put:ident, $get:ident;)*) => {
        $(
            impl Codec for $ty {
                fn size(&self) -> usize {
                    std::mem::size_of::<$ty>()
                }

                fn write(&self, writer: &mut impl BufMut) -> Result<(), CodecError> {
                    writer.$put(*self);
                    Ok(())
                }

                fn read(reader: &mut impl Buf) -> Result<Self, CodecError> {
                    ensure_remaining(reader, std::mem::size_of::<$ty>())?;
                    Ok(reader.$get())
                }
            }
        )*
    };
}

integer_codec! {
    u8 => put_u8, get_u8;
    u16 => put_u16_le, get_u16_le;
    u32 => put_u32_le, get_u32_le;
    u64 => put_u64_le, get_u64_le;
    i8 => put_i8, get_i8;
    i16 => put_i16_le, get_i16_le;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_little_endian() {
        assert_eq!(0x1234_5678u32.to_bytes().unwrap(), vec![0x78, 0x56, 0x34, 0x12]);
        assert_eq!((-2i8).to_bytes().unwrap(), vec![0xFE]);
        assert_eq!(u64::from_bytes(&[1, 0, 0, 0, 0, 0, 0, 0x80]).unwrap(), 0x8000_0000_0000_0001);
    }

    #[test]
    fn short_input_is_eof() {
        let err = u32::from_bytes(&[1, 2]).unwrap_err();
        assert_eq!(err, CodecError::UnexpectedEof { needed: 4, remaining: 2 });
    }

    #[test]
    fn trailing_bytes_rejected() {
        assert_eq!(u16::from_bytes(&[1, 2, 3]).unwrap_err(), CodecError::TrailingBytes(1));
    }

    #[test]
    fn reserved_must_be_zero() {
        let mut ok: &[u8] = &[0, 0, 0, 0];
        assert!(read_reserved(&mut ok, 4, "reserved_1").is_ok());

        let mut bad: &[u8] = &[0, 1, 0, 0];
        assert_eq!(
            read_reserved(&mut bad, 4, "reserved_1").unwrap_err(),
            CodecError::NonZeroReserved("reserved_1")
        );
    }

    #[test]
    fn counts_are_narrowed_with_an_error() {
        assert_eq!(count_as::<u8>("mosaics", 255).unwrap(), 255u8);
        assert!(matches!(
            count_as::<u8>("mosaics", 256),
            Err(CodecError::CountOverflow { max: 255, .. })
        ));
    }
}
